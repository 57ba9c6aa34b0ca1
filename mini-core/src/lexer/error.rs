use crate::utils::prelude::SrcSpan;

use super::token::MAX_IDENT_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { text: String },
    IdentifierTooLong { name: String },
    IntegerTooLarge { literal: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            LexicalErrorType::UnrecognizedToken { text } => {
                ("Unknown token", vec![format!("`{text}` is not part of the language")])
            },
            LexicalErrorType::IdentifierTooLong { name } => {
                ("Identifier too long", vec![format!(
                    "`{name}` has {} characters, the limit is {MAX_IDENT_LEN}",
                    name.chars().count()
                )])
            },
            LexicalErrorType::IntegerTooLarge { literal } => {
                ("Integer literal too large", vec![format!("`{literal}` does not fit a 64-bit integer")])
            }
        }
    }
}
