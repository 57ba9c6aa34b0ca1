use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::{RuntimeError, RuntimeErrorType},
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        errors: Vec<LexicalError>
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program stopped with an error")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, errors } => errors.iter()
                .map(|error| {
                    let (label, notes) = error.details();
                    located("Lexical error", notes, src, path, Label::new(label, error.location))
                })
                .collect(),
            Error::Parse { path, src, error } => {
                let (label, notes) = error.details();

                vec![located("Syntax error", notes, src, path, Label::new(label, error.span))]
            },
            Error::Runtime { path, src, error } => {
                let (label, notes) = error.details();

                let title = match error.error {
                    _ if error.is_semantic() => "Semantic error",
                    RuntimeErrorType::InvalidInput { .. } => "Input conversion error",
                    _ => "Standard IO error",
                };

                vec![located(title, notes, src, path, Label::new(label, error.location))]
            },
            Error::StdIo { err } => vec![Diagnostic {
                title: "Standard IO error".into(),
                notes: vec![err.to_string()],
                level: Level::Error,
                location: None,
            }]
        }
    }
}

fn located<'a>(
    title: &str,
    notes: Vec<String>,
    src: &'a str,
    path: &std::path::Path,
    label: Label
) -> Diagnostic<'a> {
    Diagnostic {
        title: title.into(),
        notes,
        level: Level::Error,
        location: Some(Location::new(src, path.to_path_buf(), label)),
    }
}
