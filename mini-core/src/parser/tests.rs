use crate::{
    environment::prelude::SymbolTable,
    lexer::prelude::{tokenize, Token},
    parser::prelude::{parse_tokens, Expression, ParseError, ParseErrorType, Program, Statement},
    utils::prelude::SrcSpan
};

fn parse(input: &str) -> Result<Program, ParseError> {
    let mut table = SymbolTable::new();
    let tokens = tokenize(input, &mut table).expect("input should lex");

    parse_tokens(&tokens, input.len() as u32)
}

fn parse_err(input: &str) -> ParseErrorType {
    match parse(input) {
        Ok(program) => panic!("Expected Err but got Ok({program})"),
        Err(err) => err.error
    }
}

#[test]
fn test_declarations() -> Result<(), ParseError> {
    let input = r#"
        VAR a, b, c : integer;
        VAR d : integer;
        BEGIN
        END
    "#;

    let parsed = parse(input)?;

    let names = parsed.declarations.iter()
        .flat_map(|decl| decl.names.iter().map(|name| name.value.as_str()))
        .collect::<Vec<&str>>();

    assert_eq!(names, vec!["a", "b", "c", "d"]);
    assert!(parsed.block.statements.is_empty());

    Ok(())
}

#[test]
fn test_statements() -> Result<(), ParseError> {
    let input = r#"
        VAR x, y : integer;
        BEGIN
            READ x;
            y = -x + 3;
            WRITE y;
            FOR x = 1 TO y DO BEGIN WRITE x END
        END
    "#;

    let parsed = parse(input)?;

    assert_eq!(
        parsed.to_string(),
        "VAR x, y : integer; BEGIN READ x; y = -x + 3; WRITE y; FOR x = 1 TO y DO BEGIN WRITE x END END"
    );

    assert!(matches!(parsed.block.statements[0], Statement::Input(_)));
    assert!(matches!(parsed.block.statements[1], Statement::Assignment(_)));
    assert!(matches!(parsed.block.statements[2], Statement::Output(_)));
    assert!(matches!(parsed.block.statements[3], Statement::FixedLoop(_)));

    Ok(())
}

#[test]
fn test_precedence() -> Result<(), ParseError> {
    let parsed = parse("BEGIN x = 1 + 2 * 3 - 4 / (5 - 6) END")?;

    let Statement::Assignment(assignment) = &parsed.block.statements[0] else {
        panic!("expected an assignment");
    };

    let Expression::Infix(infix) = &assignment.value else {
        panic!("expected an infix expression");
    };

    // ((1 + (2 * 3)) - (4 / (5 - 6)))
    assert_eq!(infix.operator, Token::Minus);
    assert!(matches!(&*infix.left, Expression::Infix(left) if left.operator == Token::Plus));
    assert!(matches!(&*infix.right, Expression::Infix(right) if right.operator == Token::Slash));

    Ok(())
}

#[test]
fn test_unary_minus() -> Result<(), ParseError> {
    let parsed = parse("BEGIN x = --3 * -y END")?;

    assert_eq!(parsed.to_string(), "BEGIN x = --3 * -y END");

    let Statement::Assignment(assignment) = &parsed.block.statements[0] else {
        panic!("expected an assignment");
    };

    // unary minus binds tighter than `*`
    assert!(matches!(&assignment.value, Expression::Infix(infix) if infix.operator == Token::Asterisk));

    Ok(())
}

#[test]
fn test_trailing_semicolon_and_empty_block() -> Result<(), ParseError> {
    parse("BEGIN WRITE 1; END")?;
    parse("BEGIN END")?;
    parse("BEGIN FOR i = 1 TO 2 DO BEGIN END END")?;

    Ok(())
}

#[test]
fn test_locations() -> Result<(), ParseError> {
    let input = "BEGIN WRITE 1 + 22 END";
    let parsed = parse(input)?;

    assert_eq!(parsed.location, SrcSpan::from(0, 22));
    assert_eq!(parsed.block.statements[0].location(), SrcSpan::from(6, 18));

    Ok(())
}

#[test]
fn test_loop_body_is_deferred() -> Result<(), ParseError> {
    let input = "BEGIN FOR i = 5 TO 1 DO BEGIN WRITE ) ( BEGIN END END END";

    let parsed = parse(input)?;

    let Statement::FixedLoop(loop_) = &parsed.block.statements[0] else {
        panic!("expected a loop");
    };

    assert_eq!(loop_.block.tokens.len(), 5);
    assert_eq!(loop_.block.to_string(), "BEGIN WRITE ) ( BEGIN END END");

    let err = loop_.block.parse().unwrap_err();
    assert!(matches!(err.error, ParseErrorType::ExpectedExpression { found: Token::RParen }));

    Ok(())
}

#[test]
fn test_deferred_body_parses_to_block() -> Result<(), ParseError> {
    let parsed = parse("BEGIN FOR i = 1 TO 3 DO BEGIN WRITE i; FOR j = 1 TO i DO BEGIN WRITE j END END END")?;

    let Statement::FixedLoop(loop_) = &parsed.block.statements[0] else {
        panic!("expected a loop");
    };

    let body = loop_.block.parse()?;

    assert_eq!(body.statements.len(), 2);
    assert!(matches!(body.statements[1], Statement::FixedLoop(_)));
    assert_eq!(body.location, loop_.block.location);

    Ok(())
}

#[test]
fn test_block_errors() {
    assert_eq!(parse_err(""), ParseErrorType::EmptyProgram);
    assert_eq!(parse_err("BEGIN WRITE 1"), ParseErrorType::UnclosedBlock);
    assert_eq!(parse_err("BEGIN FOR i = 1 TO 2 DO BEGIN WRITE i END"), ParseErrorType::UnclosedBlock);
    assert_eq!(parse_err("BEGIN FOR i = 1 TO 2 DO BEGIN WRITE i"), ParseErrorType::UnclosedBlock);
    assert_eq!(parse_err("BEGIN WRITE 1 END END"), ParseErrorType::EndOutsideBlock);
    assert_eq!(parse_err("BEGIN WRITE 1 END WRITE 2"), ParseErrorType::TrailingCode);
    assert_eq!(parse_err("WRITE 1"), ParseErrorType::ExpectedBegin);
    assert_eq!(parse_err("VAR x : integer;"), ParseErrorType::UnexpectedEof);
}

#[test]
fn test_declaration_errors() {
    assert_eq!(
        parse_err("VAR x : int; BEGIN END"),
        ParseErrorType::ExpectedType { found: Some(Token::Ident("int".into())) }
    );
    assert_eq!(parse_err("VAR : integer; BEGIN END"), ParseErrorType::ExpectedIdent);
    assert_eq!(parse_err("VAR x, : integer; BEGIN END"), ParseErrorType::ExpectedIdent);
    assert_eq!(
        parse_err("VAR x integer; BEGIN END"),
        ParseErrorType::UnexpectedToken {
            token: Token::Ident("integer".into()),
            expected: vec![":".into()]
        }
    );
    assert_eq!(
        parse_err("VAR x : integer BEGIN END"),
        ParseErrorType::UnexpectedToken {
            token: Token::Begin,
            expected: vec![";".into()]
        }
    );
}

#[test]
fn test_statement_errors() {
    assert_eq!(
        parse_err("BEGIN TO END"),
        ParseErrorType::ExpectedStatement { found: Token::To }
    );
    assert_eq!(
        parse_err("BEGIN WRITE 1 WRITE 2 END"),
        ParseErrorType::UnexpectedToken {
            token: Token::Write,
            expected: vec![";".into(), "END".into()]
        }
    );
    assert_eq!(
        parse_err("BEGIN WRITE ; END"),
        ParseErrorType::ExpectedExpression { found: Token::Semicolon }
    );
    assert_eq!(
        parse_err("BEGIN x = (1 + 2 END"),
        ParseErrorType::UnexpectedToken {
            token: Token::End,
            expected: vec![")".into()]
        }
    );
    assert_eq!(parse_err("BEGIN READ 5 END"), ParseErrorType::ExpectedIdent);
    assert_eq!(
        parse_err("BEGIN FOR i = 1 2 DO BEGIN END END"),
        ParseErrorType::UnexpectedToken {
            token: Token::Int(2),
            expected: vec!["TO".into()]
        }
    );
    assert_eq!(parse_err("BEGIN FOR i = 1 TO 2 DO WRITE i END"), ParseErrorType::ExpectedBegin);
}

#[test]
fn test_error_details() {
    let err = parse("BEGIN WRITE 1 END WRITE 2").unwrap_err();

    assert_eq!(err.span, SrcSpan::from(18, 25));
    assert_eq!(err.details().0, "Trailing code after program end");
}
