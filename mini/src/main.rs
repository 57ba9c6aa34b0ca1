mod cli;
mod rlpl;
mod rppl;

use std::{path::PathBuf, rc::Rc};

use clap::Parser;
use cli::{
    print_finished, print_lexed, print_lexing, print_running
};
use mini_core::{
    environment::prelude::StdConsoleIO,
    interpreter::prelude::{lex_from_stream, run_from_stream},
    utils::prelude::{Error, Warning, WarningEmitterIO}
};

#[derive(Parser)]
enum Command {
    /// Lexes, parses and runs a program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not print the symbol table after the run
        #[arg(long, default_value_t = false)]
        no_table: bool
    },
    /// Prints every token of a program and the resulting symbol table
    Lex {
        /// Path of source file
        path: PathBuf
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let success = match Command::parse() {
        Command::Run { path, no_table } => {
            let warning_emitter = Rc::new(ConsoleWarningEmitter);

            print_running(&path.to_string_lossy());
            let start = std::time::Instant::now();

            match run_from_stream(path, &StdConsoleIO, warning_emitter) {
                Ok(table) => {
                    print_finished(std::time::Instant::now() - start);

                    if !no_table {
                        println!("{table}");
                    }

                    true
                },
                Err(err) => {
                    print_error(&err);
                    false
                }
            }
        },
        Command::Lex { path } => {
            print_lexing(&path.to_string_lossy());
            let start = std::time::Instant::now();

            match lex_from_stream(path) {
                Ok((_, tokens, table)) => {
                    for (_, token, _) in &tokens {
                        println!("{token}");
                    }

                    println!();
                    println!("{table}");

                    print_lexed(std::time::Instant::now() - start);
                    true
                },
                Err(err) => {
                    print_error(&err);
                    false
                }
            }
        },
        Command::Rlpl => report_io(rlpl::start()),
        Command::Rppl => report_io(rppl::start())
    };

    if !success {
        std::process::exit(1);
    }
}

fn print_error(err: &Error) {
    let buf_writer = crate::cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    err.pretty(&mut buf);
    buf_writer
        .print(&buf)
        .expect("Writing error to stderr");
}

fn report_io(result: std::io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            print_error(&Error::StdIo { err: err.kind() });
            false
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
