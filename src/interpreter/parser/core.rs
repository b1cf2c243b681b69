use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{block::parse_body, pratt::parse_expression_bp},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It starts the binding-power
/// engine with a minimum binding power of zero, so every operator may extend
/// the expression.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_expression_bp(tokens, 0)
}

/// Parses a whole program: statements until the end of input.
///
/// A closing keyword such as `end` or `else` at the top level has nothing to
/// close and is reported as an unexpected token.
///
/// # Example
/// ```
/// use tommy::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("let x = 1; x = x + 1").unwrap();
/// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
///
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let statements = parse_body(tokens, &[])?;

    if let Some((tok, line)) = tokens.peek() {
        return Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 line:  *line, });
    }

    Ok(statements)
}
