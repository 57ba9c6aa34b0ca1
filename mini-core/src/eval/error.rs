use crate::{parser::prelude::ParseError, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    /// A name is read or assigned without being declared first.
    ///
    /// Example:
    /// ```text
    /// BEGIN
    ///     a = 10 <- Variable not declared: `a`
    /// END
    /// ```
    UndeclaredVariable {
        name: String
    },
    DivisionByZero,
    /// The result of an operation does not fit a 64-bit integer.
    IntegerOverflow,
    /// `READ` received text that is not an integer.
    InvalidInput {
        variable: String,
        input: String
    },
    Io {
        kind: std::io::ErrorKind
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UndeclaredVariable { name } => (
                "Variable not declared",
                vec![format!("Variable `{name}` is not declared.")]
            ),
            RuntimeErrorType::DivisionByZero => ("Division by zero", vec![]),
            RuntimeErrorType::IntegerOverflow => (
                "Integer overflow",
                vec!["The result does not fit a 64-bit integer.".to_string()]
            ),
            RuntimeErrorType::InvalidInput { variable, input } => (
                "Invalid input",
                vec![format!("`{}` is not an integer, cannot store it in `{variable}`.", input.trim())]
            ),
            RuntimeErrorType::Io { kind } => ("Console failed", vec![format!("{kind}")])
        }
    }

    /// `true` for the errors that depend only on the program itself.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self.error,
            RuntimeErrorType::UndeclaredVariable { .. }
                | RuntimeErrorType::DivisionByZero
                | RuntimeErrorType::IntegerOverflow
        )
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}

/// Failure while running a program. Loop bodies are parsed when first
/// entered, so syntax errors can surface during evaluation too.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl From<ParseError> for EvalError {
    fn from(value: ParseError) -> Self {
        EvalError::Parse(value)
    }
}

impl From<RuntimeError> for EvalError {
    fn from(value: RuntimeError) -> Self {
        EvalError::Runtime(value)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Warning {
    /// A `FOR` loop ran zero times, its body was never checked.
    SkippedLoopBody {
        location: SrcSpan,
    },
    Redeclaration {
        location: SrcSpan,
        variable: String,
    },
}

impl Warning {
    pub fn location(&self) -> SrcSpan {
        match self {
            Warning::SkippedLoopBody { location } => *location,
            Warning::Redeclaration { location, .. } => *location,
        }
    }
}
