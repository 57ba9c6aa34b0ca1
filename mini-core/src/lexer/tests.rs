use crate::environment::prelude::{SymbolTable, Value};

use super::prelude::{lexer_from_str, tokenize, LexicalError, LexicalErrorType, Token, TokenKind};

fn ident(name: &str) -> Token {
    Token::Ident(name.to_string())
}

#[test]
fn test_keywords_and_operators() -> std::result::Result<(), LexicalError> {
    let input = "VAR BEGIN END FOR TO READ WRITE DO + - * / = ( ) ; , :";

    let tokens = vec![
        Token::Var,
        Token::Begin,
        Token::End,
        Token::For,
        Token::To,
        Token::Read,
        Token::Write,
        Token::Do,
        Token::Plus,
        Token::Minus,
        Token::Asterisk,
        Token::Slash,
        Token::Assign,
        Token::LParen,
        Token::RParen,
        Token::Semicolon,
        Token::Comma,
        Token::Colon,
    ];

    let mut lexer = lexer_from_str(input);

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = match lexer.next_token() {
            Some(result) => result?,
            None => panic!("input ended before {token:?} ({idx})"),
        };

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }

    assert!(lexer.next_token().is_none());

    Ok(())
}

#[test]
fn test_keywords_are_case_sensitive_whole_words() -> std::result::Result<(), LexicalError> {
    let input = "var Begin VARx END_ _DO WRITE";

    let tokens = lexer_from_str(input)
        .map(|res| res.map(|(_, token, _)| token))
        .collect::<Result<Vec<Token>, LexicalError>>()?;

    assert_eq!(tokens, vec![
        ident("var"),
        ident("Begin"),
        ident("VARx"),
        ident("END_"),
        ident("_DO"),
        Token::Write,
    ]);

    Ok(())
}

#[test]
fn test_spans() -> std::result::Result<(), LexicalError> {
    let input = "VAR x1 :\n  42;";

    let spans = lexer_from_str(input).collect::<Result<Vec<_>, _>>()?;

    assert_eq!(spans, vec![
        (0, Token::Var, 3),
        (4, ident("x1"), 6),
        (7, Token::Colon, 8),
        (11, Token::Int(42), 13),
        (13, Token::Semicolon, 14),
    ]);

    Ok(())
}

#[test]
fn test_operators_need_no_whitespace() -> std::result::Result<(), LexicalError> {
    let tokens = lexer_from_str("y=-x+3*(a/b);")
        .map(|res| res.map(|(_, token, _)| token))
        .collect::<Result<Vec<Token>, LexicalError>>()?;

    assert_eq!(tokens, vec![
        ident("y"),
        Token::Assign,
        Token::Minus,
        ident("x"),
        Token::Plus,
        Token::Int(3),
        Token::Asterisk,
        Token::LParen,
        ident("a"),
        Token::Slash,
        ident("b"),
        Token::RParen,
        Token::Semicolon,
    ]);

    Ok(())
}

#[test]
fn test_token_kinds() {
    assert_eq!(Token::Var.kind(), TokenKind::Keyword);
    assert_eq!(Token::Colon.kind(), TokenKind::Operator);
    assert_eq!(ident("x").kind(), TokenKind::Identifier);
    assert_eq!(Token::Int(7).kind(), TokenKind::Constant);

    assert_eq!(Token::Write.to_string(), "KEYWORD: WRITE");
    assert_eq!(Token::Int(12).to_string(), "CONSTANT: 12");
}

#[test]
fn test_errors_are_collected() {
    let input = "BEGIN x = 1 @ 2; abcdefghijk = 3 # $ END";

    let mut table = SymbolTable::new();
    let errors = tokenize(input, &mut table).unwrap_err();

    let fails = vec![
        LexicalErrorType::UnrecognizedToken { text: "@".into() },
        LexicalErrorType::IdentifierTooLong { name: "abcdefghijk".into() },
        LexicalErrorType::UnrecognizedToken { text: "#".into() },
        LexicalErrorType::UnrecognizedToken { text: "$".into() },
    ];

    assert_eq!(
        errors.iter().map(|err| err.error.clone()).collect::<Vec<_>>(),
        fails
    );
}

#[test]
fn test_unrecognized_run_is_one_error() {
    let errors = lexer_from_str("x ?!? y")
        .filter_map(Result::err)
        .collect::<Vec<LexicalError>>();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error, LexicalErrorType::UnrecognizedToken { text: "?!?".into() });
    assert_eq!((errors[0].location.start, errors[0].location.end), (2, 5));
}

#[test]
fn test_digits_glued_to_letters() {
    let errors = lexer_from_str("12ab")
        .filter_map(Result::err)
        .collect::<Vec<LexicalError>>();

    assert_eq!(errors, vec![LexicalError {
        error: LexicalErrorType::UnrecognizedToken { text: "12ab".into() },
        location: crate::utils::prelude::SrcSpan::from(0, 4),
    }]);
}

#[test]
fn test_integer_too_large() {
    let errors = lexer_from_str("99999999999999999999")
        .filter_map(Result::err)
        .collect::<Vec<LexicalError>>();

    assert!(matches!(
        &errors[0].error,
        LexicalErrorType::IntegerTooLarge { literal } if literal == "99999999999999999999"
    ));
}

#[test]
fn test_identifier_length_limit() {
    let mut table = SymbolTable::new();

    let tokens = tokenize("abcdefghij", &mut table).unwrap();
    assert_eq!(tokens[0].1, ident("abcdefghij"));

    let mut table = SymbolTable::new();

    assert!(tokenize("abcdefghijk", &mut table).is_err());
    assert!(table.identifiers().next().is_none());
}

#[test]
fn test_symbols_are_registered() {
    let input = "VAR x : integer; BEGIN x = 007 + 7 + x END";

    let mut table = SymbolTable::new();
    let _ = tokenize(input, &mut table).unwrap();

    assert_eq!(table.identifier("x"), Some(&Value::Undefined));
    assert_eq!(table.identifier("integer"), Some(&Value::Undefined));
    assert_eq!(table.constant("007"), Some(7));
    assert_eq!(table.constant("7"), Some(7));
    assert_eq!(table.constants().count(), 2);
}
