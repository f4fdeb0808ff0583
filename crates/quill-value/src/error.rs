//! Error types for value construction, coercion and operators.
//!
//! Every failure in this crate is local and synchronous: it is handed back to
//! the caller as an [`Error`] and never logged or swallowed here. The two
//! graceful degradations are not errors at all:
//!
//! - malformed numeric text reads as `0.0` through [`Value::as_number`]
//! - negating a non-numeric value yields NaN through [`Value::neg`]
//!
//! # Examples
//!
//! ```rust
//! use quill_value::{Error, Kind, Value};
//!
//! let err = Value::from("a").sub(&Value::from(1)).unwrap_err();
//! assert!(matches!(err, Error::IncompatibleOperandTypes { lhs: Kind::String, .. }));
//! assert_eq!(err.to_string(), "Cannot subtract string and number");
//! ```
//!
//! [`Value::as_number`]: crate::Value::as_number
//! [`Value::neg`]: crate::Value::neg

use std::fmt;

use crate::kind::Kind;
use crate::ops::BinaryOp;

/// A failure raised by the value core.
///
/// Each variant carries enough context to build a diagnostic without the
/// caller having to remember which operands it passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A host value of a type outside {none, text, number, bool, Value}.
    UnsupportedValueType {
        /// Rust type name of the rejected value.
        type_name: String,
    },

    /// A coerced view was requested on a variable reference.
    ///
    /// References have to be resolved to a concrete value by the evaluator
    /// before they can be read as a number, bool or string.
    InvalidCoercion {
        /// Name of the unresolved variable.
        name: String,
        /// The view that was asked for.
        target: Kind,
    },

    /// An arithmetic operator was applied to a kind pair it has no rule for.
    IncompatibleOperandTypes {
        op: BinaryOp,
        lhs: Kind,
        rhs: Kind,
    },

    /// A relational operator was applied across different kinds.
    IncomparableTypes { lhs: Kind, rhs: Kind },
}

impl Error {
    pub(crate) fn incompatible<T>(op: BinaryOp, lhs: Kind, rhs: Kind) -> Result<T> {
        Err(Error::IncompatibleOperandTypes { op, lhs, rhs })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedValueType { type_name } => {
                write!(f, "Unsupported value type '{}'", type_name)
            }
            Error::InvalidCoercion { name, target } => {
                write!(f, "Cannot convert unresolved variable '${}' to {}", name, target)
            }
            Error::IncompatibleOperandTypes { op, lhs, rhs } => {
                write!(f, "Cannot {} {} and {}", op.verb(), lhs, rhs)
            }
            Error::IncomparableTypes { lhs, rhs } => {
                write!(f, "Cannot compare {} with {}", lhs, rhs)
            }
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for value operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_both_operands() {
        let e =
            Error::IncompatibleOperandTypes { op: BinaryOp::Mul, lhs: Kind::Bool, rhs: Kind::Null };
        assert_eq!(e.to_string(), "Cannot multiply bool and null");
        let e = Error::IncomparableTypes { lhs: Kind::Number, rhs: Kind::String };
        assert_eq!(e.to_string(), "Cannot compare number with string");
    }

    #[test]
    fn coercion_message_names_variable() {
        let e = Error::InvalidCoercion { name: "gold".into(), target: Kind::Number };
        assert_eq!(e.to_string(), "Cannot convert unresolved variable '$gold' to number");
    }
}
