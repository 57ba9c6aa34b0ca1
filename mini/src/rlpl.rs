use std::io::Write;

use mini_core::lexer::prelude::lexer_from_str;

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
				for res in lexer_from_str(line) {
					match res {
						Ok((start, token, end)) => println!("[{start}..{end}] {token}"),
						Err(err) => {
							let (message, messages) = err.details();
							println!("[at {}] Lexical error: {}", err.location, message);
							if !messages.is_empty() {
								println!("\t{}", messages.join("\n\t"));
							}
						}
					}
				}
			}
		}
	}
}
