use std::fmt::Display;

/// Longest identifier the language accepts.
pub const MAX_IDENT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // <letter | _>{<letter> | <digit> | _}
    Ident(String),
    // {/ <digit> /}
    Int(i64),

    // Keywords
    Var, // VAR
    Begin, // BEGIN
    End, // END
    For, // FOR
    To, // TO
    Read, // READ
    Write, // WRITE
    Do, // DO

    // Operators
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /
    Assign, // =
    LParen, // (
    RParen, // )
    Semicolon, // ;
    Comma, // ,
    Colon, // :
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TokenKind {
    Keyword,
    Operator,
    Identifier,
    Constant,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Keyword => "KEYWORD",
            Self::Operator => "OPERATOR",
            Self::Identifier => "IDENTIFIER",
            Self::Constant => "CONSTANT",
        };

        write!(f, "{kind}")
    }
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "VAR" => Token::Var,
        "BEGIN" => Token::Begin,
        "END" => Token::End,
        "FOR" => Token::For,
        "TO" => Token::To,
        "READ" => Token::Read,
        "WRITE" => Token::Write,
        "DO" => Token::Do,
        _ => return None
    })
}

pub fn char_to_operator(ch: char) -> Option<Token> {
    Some(match ch {
        '+' => Token::Plus,
        '-' => Token::Minus,
        '*' => Token::Asterisk,
        '/' => Token::Slash,
        '=' => Token::Assign,
        '(' => Token::LParen,
        ')' => Token::RParen,
        ';' => Token::Semicolon,
        ',' => Token::Comma,
        ':' => Token::Colon,
        _ => return None
    })
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Ident(_) => TokenKind::Identifier,
            Token::Int(_) => TokenKind::Constant,
            Token::Var
            | Token::Begin
            | Token::End
            | Token::For
            | Token::To
            | Token::Read
            | Token::Write
            | Token::Do => TokenKind::Keyword,
            Token::Plus
            | Token::Minus
            | Token::Asterisk
            | Token::Slash
            | Token::Assign
            | Token::LParen
            | Token::RParen
            | Token::Semicolon
            | Token::Comma
            | Token::Colon => TokenKind::Operator,
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),

            Token::Var => "VAR".to_string(),
            Token::Begin => "BEGIN".to_string(),
            Token::End => "END".to_string(),
            Token::For => "FOR".to_string(),
            Token::To => "TO".to_string(),
            Token::Read => "READ".to_string(),
            Token::Write => "WRITE".to_string(),
            Token::Do => "DO".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Assign => "=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Comma => ",".to_string(),
            Token::Colon => ":".to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.as_literal())
    }
}
