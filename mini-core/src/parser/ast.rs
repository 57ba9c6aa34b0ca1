use std::fmt::Display;

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, Parser},
    utils::prelude::SrcSpan
};

/// Name of the only type a `VAR` list may declare.
pub const INTEGER_TYPE: &str = "integer";

// program -> {<declaration>} <block>
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub block: Block,
    pub location: SrcSpan
}

impl Parse for Program {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut declarations = vec![];

        while parser.at(&Token::Var) {
            declarations.push(Declaration::parse(parser)?);
        }

        let block = Block::parse(parser)?;

        let start = declarations.first()
            .map_or(block.location.start, |decl| decl.location.start);

        Ok(Self {
            declarations,
            location: SrcSpan::from(start, block.location.end),
            block
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for declaration in &self.declarations {
            write!(f, "{declaration} ")?;
        }

        write!(f, "{}", self.block)
    }
}

// declaration -> VAR <identifier> {, <identifier>} : integer ;
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub names: Vec<Identifier>,
    pub location: SrcSpan
}

impl Parse for Declaration {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Var)?;

        let mut names = vec![Identifier::from(parser.expect_ident()?)];

        while parser.at(&Token::Comma) {
            parser.step();
            names.push(parser.expect_ident()?.into());
        }

        let (_, colon_end) = parser.expect_one(Token::Colon)?;

        match parser.current_token() {
            Some((_, Token::Ident(name), _)) if name == INTEGER_TYPE => parser.step(),
            Some((start, token, end)) => return parse_error(
                ParseErrorType::ExpectedType { found: Some(token.clone()) },
                SrcSpan::from(*start, *end)
            ),
            None => return parse_error(
                ParseErrorType::ExpectedType { found: None },
                SrcSpan::from(colon_end, colon_end)
            )
        }

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            names,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names.iter()
            .map(|name| name.to_string())
            .collect::<Vec<String>>();

        write!(f, "VAR {} : {INTEGER_TYPE};", names.join(", "))
    }
}

// block -> BEGIN [<statement> {; <statement>} [;]] END
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Parse for Block {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, begin_end) = parser.open_block()?;

        let statements = parse_statements(parser)?;

        if parser.current_token().is_none() {
            return parse_error(
                ParseErrorType::UnclosedBlock,
                SrcSpan::from(start, begin_end)
            );
        }

        let (_, end) = parser.close_block()?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

/// Statements up to the next `END` at the current level or the end of input.
fn parse_statements(parser: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    let mut statements = vec![];

    while parser.current_token().is_some_and(|(_, token, _)| *token != Token::End) {
        statements.push(Statement::parse(parser)?);

        match parser.current_token() {
            Some((_, Token::Semicolon, _)) => parser.step(),
            Some((_, Token::End, _)) | None => break,
            Some((start, token, end)) => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected: vec![Token::Semicolon.as_literal(), Token::End.as_literal()]
                },
                SrcSpan::from(*start, *end)
            )
        }
    }

    Ok(statements)
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        if statements.is_empty() {
            write!(f, "BEGIN END")
        } else {
            write!(f, "BEGIN {} END", statements.join("; "))
        }
    }
}

/// Body of a `FOR` loop, kept as tokens until the loop first runs.
/// A body that never runs is never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredBlock {
    /// Tokens between `BEGIN` and the matching `END`, both excluded.
    pub tokens: Vec<Spanned>,
    /// Offset of the closing `END`.
    pub eof: u32,
    pub location: SrcSpan
}

impl DeferredBlock {
    pub fn parse(&self) -> Result<Block, ParseError> {
        let mut parser = Parser::nested(&self.tokens, self.eof, 1);

        let statements = parse_statements(&mut parser)?;

        if let Some((start, _, end)) = parser.current_token() {
            return parse_error(ParseErrorType::EndOutsideBlock, SrcSpan::from(*start, *end));
        }

        Ok(Block {
            statements,
            location: self.location
        })
    }
}

impl Display for DeferredBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tokens = self.tokens.iter()
            .map(|(_, token, _)| token.as_literal())
            .collect::<Vec<String>>();

        if tokens.is_empty() {
            write!(f, "BEGIN END")
        } else {
            write!(f, "BEGIN {} END", tokens.join(" "))
        }
    }
}

// statement -> <assignment> | <output> | <input> | <fixed_loop>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Assignment),
    Output(Output),
    Input(Input),
    FixedLoop(FixedLoop),
}

impl Parse for Statement {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let res = match parser.current_token() {
            Some((start, token, end)) => match token {
                Token::Ident(_) => Self::Assignment(Assignment::parse(parser)?),
                Token::Write => Self::Output(Output::parse(parser)?),
                Token::Read => Self::Input(Input::parse(parser)?),
                Token::For => Self::FixedLoop(FixedLoop::parse(parser)?),
                _ => return parse_error(
                    ParseErrorType::ExpectedStatement { found: token.clone() },
                    SrcSpan::from(*start, *end)
                )
            },
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Output(output) => write!(f, "{output}"),
            Self::Input(input) => write!(f, "{input}"),
            Self::FixedLoop(loop_) => write!(f, "{loop_}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Assignment(assignment) => assignment.location,
            Self::Output(output) => output.location,
            Self::Input(input) => input.location,
            Self::FixedLoop(loop_) => loop_.location
        }
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl Parse for Assignment {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let ident = parser.expect_ident()?;
        let start = ident.0;

        parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser)?;
        let end = value.location().end;

        Ok(Self {
            identifier: ident.into(),
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

// fixed_loop -> FOR <identifier> = <expression> TO <expression> DO <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLoop {
    pub variable: Identifier,
    pub from: Expression,
    pub to: Expression,
    pub block: DeferredBlock,
    pub location: SrcSpan
}

impl Parse for FixedLoop {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::For)?;

        let variable = Identifier::from(parser.expect_ident()?);
        parser.expect_one(Token::Assign)?;

        let from = Expression::parse(parser)?;
        parser.expect_one(Token::To)?;

        let to = Expression::parse(parser)?;
        parser.expect_one(Token::Do)?;

        let (begin_start, begin_end) = parser.open_block()?;
        let block = parser.defer_block(SrcSpan::from(begin_start, begin_end))?;

        let location = SrcSpan { start, end: block.location.end };

        Ok(Self {
            variable,
            from,
            to,
            block,
            location
        })
    }
}

impl Display for FixedLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FOR {} = {} TO {} DO {}",
            self.variable,
            self.from,
            self.to,
            self.block
        )
    }
}

// input -> READ <identifier>
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub identifier: Identifier,
    pub location: SrcSpan
}

impl Parse for Input {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Read)?;

        let identifier = Identifier::from(parser.expect_ident()?);
        let end = identifier.location.end;

        Ok(Self {
            identifier,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "READ {}", self.identifier)
    }
}

// output -> WRITE <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub expression: Expression,
    pub location: SrcSpan
}

impl Parse for Output {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Write)?;

        let expression = Expression::parse(parser)?;
        let end = expression.location().end;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WRITE {}", self.expression)
    }
}

// expression -> <term> {(+ | -) <term>}
// term -> <factor> {(* | /) <factor>}
// factor -> <constant> | <identifier> | "(" <expression> ")" | - <factor>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Infix(Infix),
    Prefix(Prefix),
    Constant(Constant),
    Nested {
        expression: Box<Expression>,
        location: SrcSpan
    }
}

impl Parse for Expression {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut expr = Self::parse_term(parser)?;

        while let Some((_, operator @ (Token::Plus | Token::Minus), _)) = parser.current_token() {
            parser.step();

            let right = Self::parse_term(parser)?;
            expr = Self::Infix(Infix::new(expr, operator.clone(), right));
        }

        Ok(expr)
    }
}

impl Expression {
    fn parse_term(parser: &mut Parser) -> Result<Self, ParseError> {
        let mut expr = Self::parse_factor(parser)?;

        while let Some((_, operator @ (Token::Asterisk | Token::Slash), _)) = parser.current_token() {
            parser.step();

            let right = Self::parse_factor(parser)?;
            expr = Self::Infix(Infix::new(expr, operator.clone(), right));
        }

        Ok(expr)
    }

    fn parse_factor(parser: &mut Parser) -> Result<Self, ParseError> {
        let expr = match parser.current_token() {
            Some((start, token, end)) => match token {
                Token::Ident(_) => Self::Identifier(Identifier::from(parser.expect_ident()?)),
                Token::Int(value) => {
                    parser.step();

                    Self::Constant(Constant {
                        value: *value,
                        location: SrcSpan::from(*start, *end)
                    })
                },
                Token::Minus => Self::Prefix(Prefix::parse(parser)?),
                Token::LParen => {
                    let (start, _) = parser.expect_one(Token::LParen)?;

                    let expression = Box::new(Expression::parse(parser)?);

                    let (_, end) = parser.expect_one(Token::RParen)?;

                    Self::Nested {
                        expression,
                        location: SrcSpan { start, end }
                    }
                },
                _ => return parse_error(
                    ParseErrorType::ExpectedExpression { found: token.clone() },
                    SrcSpan::from(*start, *end)
                )
            },
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        Ok(expr)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Infix(infix) => infix.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Constant(constant) => constant.location,
            Self::Nested { location, .. } => *location
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Constant(constant) => write!(f, "{}", constant.value),
            Self::Nested { expression, .. } => write!(f, "({expression})")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: i64,
    pub location: SrcSpan
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Infix {
    pub fn new(left: Expression, operator: Token, right: Expression) -> Self {
        let location = left.location().merge(right.location());

        Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        }
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.as_literal(), self.right)
    }
}

// prefix -> - <factor>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl Parse for Prefix {
    fn parse(parser: &mut Parser) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Minus)?;

        let expression = Expression::parse_factor(parser)?;
        let end = expression.location().end;

        Ok(Self {
            operator: Token::Minus,
            expression: Box::new(expression),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator.as_literal(), self.expression)
    }
}
