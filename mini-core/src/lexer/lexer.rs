use super::error::{LexicalError, LexicalErrorType};
use super::token::{char_to_operator, str_to_keyword, Token, MAX_IDENT_LEN};
use crate::environment::prelude::SymbolTable;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

fn is_word_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

fn starts_token(ch: char) -> bool {
	is_word_char(ch) || char_to_operator(ch).is_some()
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

	/// Returns the next token, or `None` once the input is exhausted.
	/// Errors do not stop the lexer: the offending text is consumed and
	/// the following call continues after it.
    pub fn next_token(&mut self) -> Option<LexResult> {
		loop {
			let ch = self.ch?;

			if ch.is_whitespace() {
				let _ = self.next_char();
				continue;
			}

			if let Some(operator) = char_to_operator(ch) {
				return Some(Ok(self.eat_one_char(operator)));
			}

			return Some(match ch {
				'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
				'0'..='9' => self.lex_number(),
				_ => Err(self.lex_unrecognized()),
			});
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, char::len_utf8) as u32;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_while(&mut self, buf: &mut String, predicate: impl Fn(char) -> bool) {
		while let Some(ch) = self.ch {
			if !predicate(ch) {
				break;
			}

			buf.push(ch);
			self.next_char();
		}
	}

	fn lex_word(&mut self) -> LexResult {
        let start_pos = self.position;
		let mut word = String::new();

		self.eat_while(&mut word, is_word_char);

        let end_pos = self.position;

        if let Some(keyword) = str_to_keyword(&word) {
			return Ok((start_pos, keyword, end_pos));
		}

		if word.chars().count() > MAX_IDENT_LEN {
			return Err(LexicalError {
				error: LexicalErrorType::IdentifierTooLong { name: word },
				location: SrcSpan::from(start_pos, end_pos)
			});
		}

		Ok((start_pos, Token::Ident(word), end_pos))
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut literal = String::new();

		self.eat_while(&mut literal, |ch| ch.is_ascii_digit());

		// `12ab` has no word boundary after the digits, so none of it is a token
		if self.ch.is_some_and(is_word_char) {
			self.eat_while(&mut literal, is_word_char);

			return Err(LexicalError {
				error: LexicalErrorType::UnrecognizedToken { text: literal },
				location: SrcSpan::from(start_pos, self.position)
			});
		}

		let end_pos = self.position;

		match literal.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerTooLarge { literal },
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}

	fn lex_unrecognized(&mut self) -> LexicalError {
		let start_pos = self.position;
		let mut text = String::new();

		self.eat_while(&mut text, |ch| !ch.is_whitespace() && !starts_token(ch));

		LexicalError {
			error: LexicalErrorType::UnrecognizedToken { text },
			location: SrcSpan::from(start_pos, self.position)
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token()
	}
}

pub fn lexer_from_str(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
}

/// Splits `src` into tokens, registering every identifier and constant in `table`.
///
/// All lexical errors are collected; if there is at least one, no tokens are returned.
pub fn tokenize(src: &str, table: &mut SymbolTable) -> Result<Vec<Spanned>, Vec<LexicalError>> {
	let mut tokens = vec![];
	let mut errors = vec![];

	for result in lexer_from_str(src) {
		match result {
			Ok((start, token, end)) => {
				match &token {
					Token::Ident(name) => table.record_identifier(name),
					Token::Int(value) => {
						table.record_constant(&src[start as usize..end as usize], *value)
					},
					_ => {}
				}

				tokens.push((start, token, end));
			},
			Err(err) => errors.push(err),
		}
	}

	if errors.is_empty() {
		Ok(tokens)
	} else {
		Err(errors)
	}
}
