use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    EmptyProgram,
    ExpectedIdent,
    ExpectedBegin,
    ExpectedType { found: Option<Token> },
    ExpectedStatement { found: Token },
    ExpectedExpression { found: Token },
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    EndOutsideBlock,
    TrailingCode,
    UnclosedBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

fn found(token: &Token) -> String {
    format!("Found `{}` ({}).", token.as_literal(), token.kind())
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::EmptyProgram => ("Program contains no tokens", vec![]),
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::ExpectedBegin => ("Expected `BEGIN` keyword", vec![]),
            ParseErrorType::ExpectedType { found: token } => {
                let mut messages = vec!["The only type is `integer`.".to_string()];
                if let Some(token) = token {
                    messages.push(found(token));
                }

                ("Expected type", messages)
            },
            ParseErrorType::ExpectedStatement { found: token } => (
                "Expected statement",
                vec![
                    "A statement is an assignment, `WRITE`, `READ` or `FOR`.".to_string(),
                    found(token),
                ]
            ),
            ParseErrorType::ExpectedExpression { found: token } => (
                "Expected expression",
                vec![
                    "Expected a constant, an identifier, `(` or `-`.".to_string(),
                    found(token),
                ]
            ),
            ParseErrorType::UnexpectedEof => ("Unexpected end of program", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let messages: Vec<String> = std::iter::once(found(token))
                    .chain(match expected.len() {
                        0 => None,
                        1 => Some(format!("Expected `{}`.", expected[0])),
                        _ => Some(format!("Expected one of `{}`.", expected.join("`, `")))
                    })
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::EndOutsideBlock => ("`END` outside any block", vec![]),
            ParseErrorType::TrailingCode => ("Trailing code after program end", vec![
                "Nothing may follow the `END` of the program.".to_string()
            ]),
            ParseErrorType::UnclosedBlock => ("Block is never closed", vec![
                "Every `BEGIN` needs a matching `END`.".to_string()
            ]),
        }
    }
}
