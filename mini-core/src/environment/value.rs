use std::fmt::Display;

/// Current value of an identifier in the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Value {
    /// Seen by the lexer but never declared or assigned.
    #[default]
    Undefined,
    Integer {
        value: i64
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Integer { value } => write!(f, "{value}")
        }
    }
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer { value } => Some(*value),
            Self::Undefined => None
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Integer { .. })
    }
}
