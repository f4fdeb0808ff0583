//! The value cell and its construction rules.

use std::any::{type_name, Any};
use std::fmt;

use crate::coerce::format_number;
use crate::error::{Error, Result};
use crate::kind::Kind;

/// A single dynamically typed runtime cell.
///
/// Values are created whole and never patched in place; [`Value::set`] and
/// [`Value::try_set`] replace the entire cell as if it had been constructed
/// again. Equality and hashing are strict about the discriminant, see the
/// `ops` module.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Not yet known. Distinct from [`Value::Null`].
    #[default]
    Undefined,
    Number(f32),
    String(String),
    Bool(bool),
    /// The name of a variable the evaluator has not resolved yet.
    VariableRef(String),
    Null,
}

impl Value {
    pub const UNDEFINED: Value = Value::Undefined;
    pub const NULL: Value = Value::Null;
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    /// A reference to the variable `name`.
    pub fn variable(name: impl Into<String>) -> Self {
        Value::VariableRef(name.into())
    }

    /// Builds a value from a host scalar whose type is only known at runtime.
    ///
    /// Supported: `()` and `None` map to null, text (`String`, `&'static str`,
    /// `char`) to a string, every integer width and `f32`/`f64` to a number
    /// (narrowed to `f32`), `bool` to a bool, and `Value` to a copy of itself.
    /// `Option`s of those types are unwrapped. Anything else fails with
    /// [`Error::UnsupportedValueType`].
    ///
    /// ```rust
    /// use quill_value::{Kind, Value};
    ///
    /// assert_eq!(Value::from_native(7u8).unwrap(), Value::Number(7.0));
    /// assert_eq!(Value::from_native(None::<String>).unwrap().kind(), Kind::Null);
    /// assert!(Value::from_native(vec![1, 2]).is_err());
    /// ```
    pub fn from_native<T: Any>(native: T) -> Result<Value> {
        let any = &native as &dyn Any;

        macro_rules! bridge {
            ($($t:ty => $conv:expr),* $(,)?) => {
                $(
                    if let Some(v) = any.downcast_ref::<$t>() {
                        return Ok($conv(v));
                    }
                    if let Some(v) = any.downcast_ref::<Option<$t>>() {
                        return Ok(v.as_ref().map_or(Value::Null, $conv));
                    }
                )*
            };
        }
        macro_rules! numbers {
            ($($t:ty),*) => {
                bridge!($($t => |n: &$t| Value::Number(*n as f32)),*);
            };
        }

        numbers!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
        bridge!(
            bool => |b: &bool| Value::Bool(*b),
            String => |s: &String| Value::String(s.clone()),
            &'static str => |s: &&str| Value::String((*s).to_string()),
            char => |c: &char| Value::String(c.to_string()),
            Value => |v: &Value| v.clone(),
        );
        if any.is::<()>() {
            return Ok(Value::Null);
        }

        Err(Error::UnsupportedValueType { type_name: type_name::<T>().to_string() })
    }

    /// Re-initializes this cell from anything with a static conversion.
    pub fn set(&mut self, value: impl Into<Value>) {
        *self = value.into();
    }

    /// Re-initializes this cell from a host scalar of runtime-checked type.
    ///
    /// The cell is cleared first; if the type is unsupported it is left
    /// [`Value::Undefined`].
    pub fn try_set<T: Any>(&mut self, native: T) -> Result<()> {
        *self = Value::Undefined;
        *self = Value::from_native(native)?;
        Ok(())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Bool,
            Value::VariableRef(_) => Kind::VariableRef,
            Value::Null => Kind::Null,
        }
    }

    pub fn has_payload(&self) -> bool {
        self.kind().has_payload()
    }

    /// The variable name of a reference, `None` for every other kind.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Value::VariableRef(name) => Some(name),
            _ => None,
        }
    }

    /// True only for a number holding NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// The raw string payload, empty for every non-string kind.
    pub(crate) fn raw_str(&self) -> &str {
        match self {
            Value::String(s) => s,
            _ => "",
        }
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f32)
                }
            }
        )*
    };
}

from_number!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::VariableRef(name) => write!(f, "${}", name),
            Value::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undefined_not_null() {
        let v = Value::default();
        assert_eq!(v.kind(), Kind::Undefined);
        assert!(!v.has_payload());
        assert_ne!(v, Value::Null);
    }

    #[test]
    fn static_conversions() {
        assert_eq!(Value::from(3i64), Value::Number(3.0));
        assert_eq!(Value::from(2.5f64), Value::Number(2.5));
        assert_eq!(Value::from("hi"), Value::String("hi".into()));
        assert_eq!(Value::from('x'), Value::String("x".into()));
        assert_eq!(Value::from(false), Value::FALSE);
        assert_eq!(Value::from(None::<i32>), Value::NULL);
        assert_eq!(Value::from(Some("a")), Value::String("a".into()));
    }

    #[test]
    fn copy_is_independent() {
        let original = Value::from("line");
        let mut copy = Value::from(&original);
        copy.set("changed");
        assert_eq!(original, Value::from("line"));
        assert_eq!(copy, Value::from("changed"));
    }

    #[test]
    fn from_native_maps_supported_types() {
        assert_eq!(Value::from_native(()).unwrap(), Value::Null);
        assert_eq!(Value::from_native(None::<f64>).unwrap(), Value::Null);
        assert_eq!(Value::from_native(Some(4u16)).unwrap(), Value::Number(4.0));
        assert_eq!(Value::from_native(-9i128).unwrap(), Value::Number(-9.0));
        assert_eq!(Value::from_native("x").unwrap(), Value::from("x"));
        assert_eq!(Value::from_native(String::from("y")).unwrap(), Value::from("y"));
        assert_eq!(Value::from_native(true).unwrap(), Value::TRUE);
        assert_eq!(Value::from_native(Value::variable("hp")).unwrap(), Value::variable("hp"));
    }

    #[test]
    fn from_native_rejects_other_types() {
        match Value::from_native(vec![1u8]) {
            Err(Error::UnsupportedValueType { type_name }) => assert!(type_name.contains("Vec")),
            other => panic!("expected UnsupportedValueType, got {:?}", other),
        }
    }

    #[test]
    fn set_replaces_the_whole_cell() {
        let mut v = Value::from("text");
        v.set(12);
        assert_eq!(v, Value::Number(12.0));
        v.set(Value::NULL);
        assert_eq!(v.kind(), Kind::Null);
    }

    #[test]
    fn failed_try_set_leaves_undefined() {
        let mut v = Value::from(1);
        assert!(v.try_set(std::time::Duration::from_secs(1)).is_err());
        assert_eq!(v, Value::UNDEFINED);
        v.try_set(2.0f64).unwrap();
        assert_eq!(v, Value::Number(2.0));
    }

    #[test]
    fn display_never_fails() {
        assert_eq!(Value::variable("name").to_string(), "$name");
        assert_eq!(Value::TRUE.to_string(), "True");
        assert_eq!(Value::UNDEFINED.to_string(), "undefined");
    }

    #[test]
    fn display_matches_string_view() {
        for v in [
            Value::UNDEFINED,
            Value::NULL,
            Value::FALSE,
            Value::from(-0.25),
            Value::Number(f32::NAN),
            Value::Number(f32::NEG_INFINITY),
            Value::from("a \"line\""),
        ] {
            assert_eq!(v.to_string(), v.as_string().unwrap());
        }
    }
}
