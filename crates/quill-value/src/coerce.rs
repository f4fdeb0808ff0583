//! Coerced views of a value.
//!
//! Each view is total over the five concrete kinds. Only a variable
//! reference is refused, with [`Error::InvalidCoercion`], because its value
//! lives in the evaluator's storage and not in the cell.

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::value::Value;

impl Value {
    /// The numeric view.
    ///
    /// Text that does not parse as a float reads as `0.0`.
    pub fn as_number(&self) -> Result<f32> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(parse_number(s)),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Null | Value::Undefined => Ok(0.0),
            Value::VariableRef(name) => unresolved(name, Kind::Number),
        }
    }

    /// The truth view. Zero and NaN are false, as is empty text.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Number(n) => Ok(!(*n == 0.0 || n.is_nan())),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Bool(b) => Ok(*b),
            Value::Null | Value::Undefined => Ok(false),
            Value::VariableRef(name) => unresolved(name, Kind::Bool),
        }
    }

    /// The textual view.
    pub fn as_string(&self) -> Result<String> {
        match self {
            Value::Undefined => Ok("undefined".to_string()),
            Value::Number(n) => Ok(format_number(*n)),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Null => Ok("null".to_string()),
            Value::VariableRef(name) => unresolved(name, Kind::String),
        }
    }

    /// A new value of kind `target` built from the matching view.
    ///
    /// ```rust
    /// use quill_value::{Kind, Value};
    ///
    /// assert_eq!(Value::from("12.5").convert_to(Kind::Number).unwrap(), Value::from(12.5));
    /// assert_eq!(Value::from(0).convert_to(Kind::Bool).unwrap(), Value::FALSE);
    /// ```
    pub fn convert_to(&self, target: Kind) -> Result<Value> {
        match target {
            Kind::Number => self.as_number().map(Value::Number),
            Kind::Bool => self.as_bool().map(Value::Bool),
            Kind::String => self.as_string().map(Value::String),
            Kind::Null => Ok(Value::Null),
            Kind::Undefined => Ok(Value::Undefined),
            Kind::VariableRef => Err(Error::InvalidCoercion {
                name: self.variable_name().unwrap_or_default().to_string(),
                target,
            }),
        }
    }
}

fn unresolved<T>(name: &str, target: Kind) -> Result<T> {
    Err(Error::InvalidCoercion { name: name.to_string(), target })
}

fn parse_number(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(0.0)
}

pub(crate) fn format_number(n: f32) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f32::INFINITY {
        "Infinity".to_string()
    } else if n == f32::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        n.to_string()
    }
}
