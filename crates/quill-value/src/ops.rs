//! Operator algebra: arithmetic, ordering, equality and hashing.
//!
//! Binary operators classify the pair of operand kinds and take the first
//! rule that matches. Arithmetic always produces a number or a string; the
//! relational operators produce plain `bool`s.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::value::Value;

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    pub fn from_symbol(sym: &str) -> Option<Self> {
        BinaryOp::ALL.into_iter().find(|op| op.symbol() == sym)
    }

    /// Verb used in error messages ("Cannot add ...").
    pub fn verb(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Rem => "take the remainder of",
        }
    }

    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<Value> {
        match self {
            BinaryOp::Add => lhs.add(rhs),
            BinaryOp::Sub => lhs.sub(rhs),
            BinaryOp::Mul => lhs.mul(rhs),
            BinaryOp::Div => lhs.div(rhs),
            BinaryOp::Rem => lhs.rem(rhs),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub const ALL: [CompareOp; 4] = [CompareOp::Lt, CompareOp::Gt, CompareOp::Le, CompareOp::Ge];

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    pub fn from_symbol(sym: &str) -> Option<Self> {
        CompareOp::ALL.into_iter().find(|op| op.symbol() == sym)
    }

    pub fn apply(self, lhs: &Value, rhs: &Value) -> Result<bool> {
        let ord = lhs.compare(rhs)?;
        Ok(match self {
            CompareOp::Lt => ord == Some(Ordering::Less),
            CompareOp::Gt => ord == Some(Ordering::Greater),
            CompareOp::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
            CompareOp::Ge => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        })
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Value {
    /// `self + rhs`.
    ///
    /// If either side is a string the result is the concatenation of the raw
    /// string payloads, so a non-string operand contributes nothing:
    /// `"a" + 5` is `"a"`. An undefined operand next to a null or a number
    /// gives NaN. Otherwise numbers, bool pairs and null pairs are summed.
    pub fn add(&self, rhs: &Value) -> Result<Value> {
        let (l, r) = (self.kind(), rhs.kind());

        if l == Kind::String || r == Kind::String {
            let mut joined = String::with_capacity(self.raw_str().len() + rhs.raw_str().len());
            joined.push_str(self.raw_str());
            joined.push_str(rhs.raw_str());
            return Ok(Value::String(joined));
        }

        let unknown =
            |a: Kind, b: Kind| a == Kind::Undefined && matches!(b, Kind::Null | Kind::Number);
        if unknown(l, r) || unknown(r, l) {
            return Ok(Value::Number(f32::NAN));
        }

        let has_number = l == Kind::Number || r == Kind::Number;
        if has_number || (l == r && matches!(l, Kind::Bool | Kind::Null)) {
            return Ok(Value::Number(self.as_number()? + rhs.as_number()?));
        }

        Error::incompatible(BinaryOp::Add, l, r)
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Value) -> Result<Value> {
        self.numeric(BinaryOp::Sub, rhs, |a, b| a - b)
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &Value) -> Result<Value> {
        self.numeric(BinaryOp::Mul, rhs, |a, b| a * b)
    }

    /// `self / rhs`. Division by zero follows IEEE-754.
    pub fn div(&self, rhs: &Value) -> Result<Value> {
        self.numeric(BinaryOp::Div, rhs, |a, b| a / b)
    }

    /// `self % rhs`, truncated remainder. A zero divisor gives NaN.
    pub fn rem(&self, rhs: &Value) -> Result<Value> {
        self.numeric(BinaryOp::Rem, rhs, |a, b| a % b)
    }

    // One side must be a number, the other a number, undefined or null.
    fn numeric(&self, op: BinaryOp, rhs: &Value, f: fn(f32, f32) -> f32) -> Result<Value> {
        let (l, r) = (self.kind(), rhs.kind());
        let accepts = |a: Kind, b: Kind| {
            a == Kind::Number && matches!(b, Kind::Number | Kind::Undefined | Kind::Null)
        };
        if accepts(l, r) || accepts(r, l) {
            Ok(Value::Number(f(self.as_number()?, rhs.as_number()?)))
        } else {
            Error::incompatible(op, l, r)
        }
    }

    /// Unary minus. Never fails.
    ///
    /// Numbers are negated, blank text becomes `-0.0`, everything else NaN.
    pub fn neg(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            Value::String(s) if s.trim().is_empty() => Value::Number(-0.0),
            _ => Value::Number(f32::NAN),
        }
    }

    /// Orders two values of the same kind by their numeric views.
    ///
    /// Two payload-less values (undefined or null) always compare equal.
    /// `Ok(None)` means a NaN was involved.
    pub fn compare(&self, rhs: &Value) -> Result<Option<Ordering>> {
        if !self.has_payload() && !rhs.has_payload() {
            return Ok(Some(Ordering::Equal));
        }
        let (l, r) = (self.kind(), rhs.kind());
        if l != r {
            return Err(Error::IncomparableTypes { lhs: l, rhs: r });
        }
        Ok(self.as_number()?.partial_cmp(&rhs.as_number()?))
    }

    pub fn lt(&self, rhs: &Value) -> Result<bool> {
        CompareOp::Lt.apply(self, rhs)
    }

    pub fn gt(&self, rhs: &Value) -> Result<bool> {
        CompareOp::Gt.apply(self, rhs)
    }

    pub fn le(&self, rhs: &Value) -> Result<bool> {
        CompareOp::Le.apply(self, rhs)
    }

    pub fn ge(&self, rhs: &Value) -> Result<bool> {
        CompareOp::Ge.apply(self, rhs)
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::neg(self)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::neg(&self)
    }
}

// Numbers use float equality, except that NaN equals NaN so `Eq` holds.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::VariableRef(a), Value::VariableRef(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

const NO_PAYLOAD: u8 = 0;

// Bit pattern with -0.0 folded into 0.0 and every NaN into one NaN.
fn number_key(n: f32) -> u32 {
    if n.is_nan() {
        f32::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Value::Number(n) => number_key(*n).hash(state),
            Value::String(s) | Value::VariableRef(s) => s.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Undefined | Value::Null => NO_PAYLOAD.hash(state),
        }
    }
}
