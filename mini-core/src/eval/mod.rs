pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        Context,
        eval
    };
}


use crate::{
    environment::prelude::{ConsoleIO, SymbolTable},
    lexer::prelude::Token,
    parser::prelude::{Block, Expression, FixedLoop, Identifier, Program, Statement},
    utils::prelude::SourceWarningEmitter
};
use error::{runtime_error, EvalError, RuntimeError, RuntimeErrorType, Warning};

/// State of a single run: the symbol table and the channels a program talks through.
pub struct Context<'a> {
    pub table: SymbolTable,
    console: &'a dyn ConsoleIO,
    warnings: &'a SourceWarningEmitter
}

impl<'a> Context<'a> {
    pub fn new(
        table: SymbolTable,
        console: &'a dyn ConsoleIO,
        warnings: &'a SourceWarningEmitter
    ) -> Self {
        Self {
            table,
            console,
            warnings
        }
    }

    pub fn into_table(self) -> SymbolTable {
        self.table
    }

    fn lookup(&self, identifier: &Identifier) -> Result<i64, RuntimeError> {
        self.table.get(&identifier.value)
            .map_err(|error| RuntimeError { error, location: identifier.location })
    }

    fn ensure_declared(&self, identifier: &Identifier) -> Result<(), RuntimeError> {
        self.lookup(identifier).map(|_| ())
    }
}

pub fn eval(program: &Program, ctx: &mut Context) -> Result<(), EvalError> {
    for declaration in &program.declarations {
        for name in &declaration.names {
            if ctx.table.declare(&name.value) {
                ctx.warnings.emit(Warning::Redeclaration {
                    location: name.location,
                    variable: name.value.clone()
                });
            }
        }
    }

    eval_block(&program.block, ctx)
}

fn eval_block(block: &Block, ctx: &mut Context) -> Result<(), EvalError> {
    for statement in &block.statements {
        eval_statement(statement, ctx)?;
    }

    Ok(())
}

fn eval_statement(statement: &Statement, ctx: &mut Context) -> Result<(), EvalError> {
    match statement {
        Statement::Assignment(assignment) => {
            ctx.ensure_declared(&assignment.identifier)?;

            let value = eval_expression(&assignment.value, &ctx.table)?;
            ctx.table.set(&assignment.identifier.value, value);
        },
        Statement::Output(output) => {
            let value = eval_expression(&output.expression, &ctx.table)?;

            ctx.console.write_output(&format!("OUTPUT: {value}"))
                .or_else(|err| runtime_error(RuntimeErrorType::Io { kind: err.kind() }, output.location))?;
        },
        Statement::Input(input) => {
            let identifier = &input.identifier;
            ctx.ensure_declared(identifier)?;

            let line = ctx.console.read_input(&format!("Enter value for {}: ", identifier.value))
                .or_else(|err| runtime_error(RuntimeErrorType::Io { kind: err.kind() }, input.location))?;

            let value = match line.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => return Err(RuntimeError {
                    error: RuntimeErrorType::InvalidInput {
                        variable: identifier.value.clone(),
                        input: line.trim_end_matches(['\r', '\n']).to_string()
                    },
                    location: input.location
                }.into())
            };

            ctx.table.set(&identifier.value, value);
        },
        Statement::FixedLoop(fixed_loop) => eval_loop(fixed_loop, ctx)?
    }

    Ok(())
}

fn eval_loop(fixed_loop: &FixedLoop, ctx: &mut Context) -> Result<(), EvalError> {
    let from = eval_expression(&fixed_loop.from, &ctx.table)?;
    let to = eval_expression(&fixed_loop.to, &ctx.table)?;

    if from > to {
        ctx.warnings.emit(Warning::SkippedLoopBody { location: fixed_loop.block.location });
        return Ok(());
    }

    let body = fixed_loop.block.parse()?;

    for i in from..=to {
        ctx.table.set(&fixed_loop.variable.value, i);
        eval_block(&body, ctx)?;
    }

    Ok(())
}

pub fn eval_expression(expression: &Expression, table: &SymbolTable) -> Result<i64, RuntimeError> {
    match expression {
        Expression::Constant(constant) => Ok(constant.value),
        Expression::Identifier(identifier) => table.get(&identifier.value)
            .map_err(|error| RuntimeError { error, location: identifier.location }),
        Expression::Nested { expression, .. } => eval_expression(expression, table),
        Expression::Prefix(prefix) => {
            let value = eval_expression(&prefix.expression, table)?;

            match prefix.operator {
                Token::Minus => value.checked_neg()
                    .map_or_else(|| runtime_error(RuntimeErrorType::IntegerOverflow, prefix.location), Ok),
                _ => unreachable!("only `-` is parsed as a prefix operator")
            }
        },
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, table)?;
            let right = eval_expression(&infix.right, table)?;

            let result = match infix.operator {
                Token::Plus => left.checked_add(right),
                Token::Minus => left.checked_sub(right),
                Token::Asterisk => left.checked_mul(right),
                Token::Slash => {
                    if right == 0 {
                        return runtime_error(RuntimeErrorType::DivisionByZero, infix.location);
                    }

                    floor_div(left, right)
                },
                _ => unreachable!("only arithmetic operators are parsed as infix operators")
            };

            result.map_or_else(|| runtime_error(RuntimeErrorType::IntegerOverflow, infix.location), Ok)
        }
    }
}

/// Division rounding toward negative infinity. `None` on overflow.
fn floor_div(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;

    if left % right != 0 && ((left < 0) != (right < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}
