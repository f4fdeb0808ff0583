//! Quill values: the dynamic cell evaluated by the Quill dialogue runtime.
//!
//! A [`Value`] holds a number, a string, a bool, null, an unresolved
//! variable reference, or the undefined placeholder. This crate defines how
//! those kinds coerce into each other and how the arithmetic and relational
//! operators combine them. Parsing, evaluation and variable storage live in
//! the evaluator; it talks to this crate only by building values and calling
//! the views and operators below.
//!
//! ```rust
//! use quill_value::Value;
//!
//! let gold = Value::from(12);
//! let total = gold.add(&Value::from(true))?;
//! assert_eq!(total, Value::from(13));
//! assert_eq!(total.as_string()?, "13");
//! # Ok::<(), quill_value::Error>(())
//! ```

pub mod coerce;
pub mod error;
pub mod kind;
pub mod ops;
pub mod value;

pub use error::{Error, Result};
pub use kind::Kind;
pub use ops::{BinaryOp, CompareOp};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    fn every_kind() -> Vec<Value> {
        vec![
            Value::UNDEFINED,
            Value::from(2.5),
            Value::from("text"),
            Value::TRUE,
            Value::variable("flag"),
            Value::NULL,
        ]
    }

    fn expect_value(result: Result<Value>, expected: Value) {
        match result {
            Ok(actual) => assert_eq!(actual, expected),
            Err(e) => panic!("expected {:?}, got error: {}", expected, e),
        }
    }

    fn expect_error(result: Result<Value>) -> Error {
        match result {
            Ok(v) => panic!("expected an error, got {:?}", v),
            Err(e) => e,
        }
    }

    #[test]
    fn every_kind_is_covered() {
        let kinds: Vec<Kind> = every_kind().iter().map(Value::kind).collect();
        assert_eq!(kinds, Kind::ALL.to_vec());
    }

    #[test]
    fn views_fail_only_for_references() {
        for v in every_kind() {
            let failures = [v.as_number().is_err(), v.as_bool().is_err(), v.as_string().is_err()];
            let expected = v.kind() == Kind::VariableRef;
            assert_eq!(failures, [expected; 3], "unexpected view result for {:?}", v);
        }
    }

    #[test]
    fn discriminant_strictness() {
        assert_ne!(Value::from(1), Value::from(true));
        assert_eq!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn string_plus_number_keeps_only_the_string() {
        expect_value(Value::from("a").add(&Value::from(5)), Value::from("a"));
    }

    #[test]
    fn undefined_plus_null_is_nan() {
        let v = Value::UNDEFINED.add(&Value::NULL).unwrap();
        assert_eq!(v.kind(), Kind::Number);
        assert!(v.is_nan());
    }

    #[test]
    fn division_by_zero() {
        expect_value(Value::from(1).div(&Value::from(0)), Value::Number(f32::INFINITY));
        expect_value(Value::from(-1).div(&Value::from(0)), Value::Number(f32::NEG_INFINITY));
        assert!(Value::from(0).div(&Value::from(0)).unwrap().is_nan());
    }

    #[test]
    fn ordering_domain() {
        let mixed = Value::from(1).lt(&Value::from("2"));
        assert!(matches!(mixed, Err(Error::IncomparableTypes { .. })));
        assert_eq!(Value::from(1).lt(&Value::from(2)), Ok(true));
    }

    #[test]
    fn negation_of_text() {
        expect_value(Ok(Value::from("").neg()), Value::Number(-0.0));
        assert!(Value::from("x").neg().is_nan());
    }

    #[test]
    fn operator_errors_carry_kinds() {
        let e = expect_error(Value::from(true).mul(&Value::from("3")));
        assert_eq!(
            e,
            Error::IncompatibleOperandTypes {
                op: BinaryOp::Mul,
                lhs: Kind::Bool,
                rhs: Kind::String,
            }
        );
        let e = expect_error(Value::from_native([0u8; 4]));
        assert!(matches!(e, Error::UnsupportedValueType { .. }));
    }
}
