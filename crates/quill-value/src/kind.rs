//! The discriminant of a [`Value`](crate::Value).

use std::fmt;

/// Which variant a value currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Not yet known. The default state of a fresh value.
    Undefined,
    /// A 32-bit float.
    Number,
    /// Owned text.
    String,
    /// `true` or `false`.
    Bool,
    /// An unresolved variable name.
    VariableRef,
    /// The script-visible null.
    Null,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Undefined,
        Kind::Number,
        Kind::String,
        Kind::Bool,
        Kind::VariableRef,
        Kind::Null,
    ];

    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::VariableRef => "variable",
            Kind::Null => "null",
        }
    }

    /// Whether values of this kind carry a payload.
    pub fn has_payload(self) -> bool {
        !matches!(self, Kind::Undefined | Kind::Null)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_undefined_and_null_are_empty() {
        let empty: Vec<Kind> = Kind::ALL.iter().copied().filter(|k| !k.has_payload()).collect();
        assert_eq!(empty, vec![Kind::Undefined, Kind::Null]);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Kind::VariableRef.to_string(), "variable");
        assert_eq!(format!("{}", Kind::Number), "number");
    }
}
