use std::{io::Write, path::PathBuf};

use mini_core::interpreter::prelude::parse_source;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	crate::cli::exit_on_interrupt()?;

	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim_end_matches(['\r', '\n']) {
			"" => {},
			".exit" => return Ok(()),
			line => {
				match parse_source(PathBuf::new(), line.to_string()) {
					Ok((program, _)) => println!("{program}"),
					Err(err) => {
						let buf_writer = crate::cli::stderr_buffer_writer();
						let mut buf = buf_writer.buffer();

						err.pretty(&mut buf);
						buf_writer.print(&buf)?;
					}
				}
			}
		}
	}
}
