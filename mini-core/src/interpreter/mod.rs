use std::{path::{Path, PathBuf}, rc::Rc};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{ConsoleIO, SymbolTable},
    eval::prelude::{eval, Context, EvalError},
    lexer::prelude::{tokenize, Spanned},
    parser::prelude::{parse_tokens, Program},
    utils::prelude::{Error, NullWarningEmitterIO, SourceWarningEmitter, WarningEmitter, WarningEmitterIO}
};

pub mod prelude {
    pub use super::{
        interpret,
        lex_from_stream,
        lex_source,
        parse_source,
        read_source,
        run_from_stream,
        run_source
    };
}


/// Reads a program file character by character.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for c in reader.chars() {
        let c = c.map_err(|err| Error::StdIo { err: err.kind() })?;
        src.push(c);
    }

    Ok(src)
}

/// Tokenizes `src`, registering every identifier and constant in a fresh table.
pub fn lex_source(path: PathBuf, src: String) -> Result<(Vec<Spanned>, SymbolTable), Error> {
    let mut table = SymbolTable::new();

    match tokenize(&src, &mut table) {
        Ok(tokens) => Ok((tokens, table)),
        Err(errors) => Err(Error::Lex { path, src, errors })
    }
}

pub fn lex_from_stream(path: PathBuf) -> Result<(String, Vec<Spanned>, SymbolTable), Error> {
    let src = read_source(&path)?;
    let (tokens, table) = lex_source(path, src.clone())?;

    Ok((src, tokens, table))
}

/// Lexes and parses the top level of `src`. Loop bodies stay unparsed.
pub fn parse_source(path: PathBuf, src: String) -> Result<(Program, SymbolTable), Error> {
    let (tokens, table) = lex_source(path.clone(), src.clone())?;

    match parse_tokens(&tokens, src.len() as u32) {
        Ok(program) => Ok((program, table)),
        Err(error) => Err(Error::Parse { path, src, error })
    }
}

/// Runs a whole program and returns the final symbol table.
pub fn run_source(
    path: PathBuf,
    src: String,
    console: &dyn ConsoleIO,
    warnings: Rc<dyn WarningEmitterIO>
) -> Result<SymbolTable, Error> {
    let (program, table) = parse_source(path.clone(), src.clone())?;

    let warnings = SourceWarningEmitter::new(
        path.clone(),
        src.clone(),
        WarningEmitter::new(warnings)
    );

    let mut ctx = Context::new(table, console, &warnings);

    match eval(&program, &mut ctx) {
        Ok(()) => Ok(ctx.into_table()),
        Err(EvalError::Parse(error)) => Err(Error::Parse { path, src, error }),
        Err(EvalError::Runtime(error)) => Err(Error::Runtime { path, src, error })
    }
}

pub fn run_from_stream(
    path: PathBuf,
    console: &dyn ConsoleIO,
    warnings: Rc<dyn WarningEmitterIO>
) -> Result<SymbolTable, Error> {
    let src = read_source(&path)?;

    run_source(path, src, console, warnings)
}

/// Runs `src` without a file behind it, dropping warnings.
pub fn interpret(src: &str, console: &dyn ConsoleIO) -> Result<SymbolTable, Error> {
    run_source(PathBuf::new(), src.to_string(), console, Rc::new(NullWarningEmitterIO))
}
