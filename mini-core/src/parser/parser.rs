use crate::{lexer::prelude::{Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{DeferredBlock, Program};

pub trait Parse
    where Self: Sized,
{
    fn parse(parser: &mut Parser) -> Result<Self, ParseError>;
}

/// Cursor over an already lexed token sequence.
///
/// The cursor only moves forward. `depth` counts the `BEGIN`s that have not
/// been matched by an `END` yet.
pub struct Parser<'a> {
    tokens: &'a [Spanned],
    position: usize,
    depth: u32,
    eof: u32,
}

impl<'a> Parser<'a> {
    /// `eof` is the byte offset reported for errors at the end of input.
    pub fn new(tokens: &'a [Spanned], eof: u32) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            eof,
        }
    }

    /// Parser for tokens that already sit inside `depth` open blocks.
    pub fn nested(tokens: &'a [Spanned], eof: u32, depth: u32) -> Self {
        Self {
            tokens,
            position: 0,
            depth,
            eof,
        }
    }

    pub fn current_token(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.position)
    }

    pub fn step(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub fn at(&self, token: &Token) -> bool {
        matches!(self.current_token(), Some((_, tok, _)) if tok == token)
    }

    pub fn eof_span(&self) -> SrcSpan {
        SrcSpan::point(self.eof)
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        if self.tokens.is_empty() {
            return parse_error(ParseErrorType::EmptyProgram, self.eof_span());
        }

        let program = Program::parse(self)?;

        match self.current_token() {
            None => {},
            Some((start, Token::End, end)) => return parse_error(
                ParseErrorType::EndOutsideBlock,
                SrcSpan::from(*start, *end)
            ),
            Some((start, _, _)) => {
                let end = self.tokens.last().map_or(*start, |(_, _, end)| *end);

                return parse_error(
                    ParseErrorType::TrailingCode,
                    SrcSpan::from(*start, end)
                )
            }
        }

        if self.depth != 0 {
            return parse_error(ParseErrorType::UnclosedBlock, self.eof_span());
        }

        Ok(program)
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token() {
            Some((start, tok, end)) if *tok == token => {
                self.step();
                Ok((*start, *end))
            },
            Some((start, tok, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: tok.clone(),
                    expected: vec![token.as_literal()],
                },
                SrcSpan::from(*start, *end)
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, self.eof_span())
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((*start, value.clone(), *end))
            },
            Some((start, _, end)) => parse_error(
                ParseErrorType::ExpectedIdent,
                SrcSpan::from(*start, *end)
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, self.eof_span())
        }
    }

    /// Consumes `BEGIN` and enters a block.
    pub fn open_block(&mut self) -> Result<(u32, u32), ParseError> {
        let span = match self.current_token() {
            Some((start, Token::Begin, end)) => (*start, *end),
            Some((start, _, end)) => return parse_error(
                ParseErrorType::ExpectedBegin,
                SrcSpan::from(*start, *end)
            ),
            None => return parse_error(ParseErrorType::UnexpectedEof, self.eof_span())
        };

        self.step();
        self.depth += 1;

        Ok(span)
    }

    /// Consumes `END` and leaves the innermost block.
    pub fn close_block(&mut self) -> Result<(u32, u32), ParseError> {
        let (start, end) = self.expect_one(Token::End)?;

        if self.depth == 0 {
            return parse_error(ParseErrorType::EndOutsideBlock, SrcSpan::from(start, end));
        }

        self.depth -= 1;

        Ok((start, end))
    }

    /// Collects the tokens of a block whose `BEGIN` was just consumed, up to
    /// its matching `END`, without checking what is between them.
    pub fn defer_block(&mut self, begin: SrcSpan) -> Result<DeferredBlock, ParseError> {
        let first = self.position;
        let mut nested = 0u32;

        loop {
            match self.current_token() {
                None => return parse_error(
                    ParseErrorType::UnclosedBlock,
                    begin
                ),
                Some((_, Token::Begin, _)) => nested += 1,
                Some((_, Token::End, _)) if nested == 0 => break,
                Some((_, Token::End, _)) => nested -= 1,
                Some(_) => {}
            }

            self.step();
        }

        let tokens = self.tokens[first..self.position].to_vec();
        let (end_start, end) = self.close_block()?;

        Ok(DeferredBlock {
            tokens,
            eof: end_start,
            location: SrcSpan::from(begin.start, end)
        })
    }
}

pub fn parse_tokens(tokens: &[Spanned], eof: u32) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens, eof);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
