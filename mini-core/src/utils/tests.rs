use std::{path::PathBuf, rc::Rc};

use crate::{
    eval::prelude::{RuntimeError, RuntimeErrorType, Warning as EvalWarning},
    lexer::prelude::{LexicalError, LexicalErrorType},
    utils::prelude::{Error, SourceWarningEmitter, SrcSpan, VectorWarningEmitterIO, WarningEmitter}
};

fn runtime(error: RuntimeErrorType) -> Error {
    Error::Runtime {
        path: PathBuf::from("prog.mini"),
        src: "BEGIN WRITE 4 / 0 END".into(),
        error: RuntimeError { error, location: SrcSpan::from(12, 17) }
    }
}

#[test]
fn test_span_merge() {
    let span = SrcSpan::from(4, 7).merge(SrcSpan::from(1, 5));

    assert_eq!(span, SrcSpan::from(1, 7));
    assert_eq!(span.to_string(), "1..7");
}

#[test]
fn test_lex_error_reports_every_error() {
    let err = Error::Lex {
        path: PathBuf::from("prog.mini"),
        src: "BEGIN @ # END".into(),
        errors: vec![
            LexicalError {
                error: LexicalErrorType::UnrecognizedToken { text: "@".into() },
                location: SrcSpan::from(6, 7)
            },
            LexicalError {
                error: LexicalErrorType::UnrecognizedToken { text: "#".into() },
                location: SrcSpan::from(8, 9)
            },
        ]
    };

    let pretty = err.pretty_string();

    assert_eq!(err.to_diagnostics().len(), 2);
    assert_eq!(pretty.matches("Lexical error").count(), 2);
    assert!(pretty.contains("prog.mini"));
    assert!(pretty.contains("`#` is not part of the language"));
}

#[test]
fn test_runtime_error_titles() {
    assert_eq!(runtime(RuntimeErrorType::DivisionByZero).to_diagnostics()[0].title, "Semantic error");
    assert_eq!(
        runtime(RuntimeErrorType::UndeclaredVariable { name: "x".into() }).to_diagnostics()[0].title,
        "Semantic error"
    );
    assert_eq!(
        runtime(RuntimeErrorType::InvalidInput { variable: "x".into(), input: "abc".into() }).to_diagnostics()[0].title,
        "Input conversion error"
    );
    assert_eq!(
        runtime(RuntimeErrorType::Io { kind: std::io::ErrorKind::UnexpectedEof }).to_diagnostics()[0].title,
        "Standard IO error"
    );
}

#[test]
fn test_std_io_error_has_no_location() {
    let err = Error::StdIo { err: std::io::ErrorKind::NotFound };
    let diagnostics = err.to_diagnostics();

    assert!(diagnostics[0].location.is_none());
    assert!(err.pretty_string().contains("Standard IO error"));
}

#[test]
fn test_source_warning_emitter() {
    let collected = Rc::new(VectorWarningEmitterIO::new());
    let emitter = SourceWarningEmitter::new(
        PathBuf::from("prog.mini"),
        "VAR a : integer; VAR a : integer; BEGIN END".into(),
        WarningEmitter::new(collected.clone())
    );

    emitter.emit(EvalWarning::Redeclaration {
        location: SrcSpan::from(21, 22),
        variable: "a".into()
    });

    assert_eq!(emitter.count(), 1);

    let warnings = collected.take();
    assert_eq!(warnings.len(), 1);

    let pretty = warnings[0].pretty_string();
    assert!(pretty.contains("Variable declared again"));
    assert!(pretty.contains("`a` is reset to 0."));
    assert!(collected.take().is_empty());
}
