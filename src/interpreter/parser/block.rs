use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses a sequence of statements up to one of `terminators`.
///
/// Semicolons between statements are optional separators and are skipped
/// wherever they appear. Parsing stops, without consuming anything, at the
/// first terminator token or at the end of input; the caller decides whether
/// the token it stopped at is acceptable.
///
/// Newlines do not end statements. A line that starts with `(` or `[`
/// continues the expression on the line before it as a call or an index, so
/// `print(1)` followed by `(f)(2)` on the next line parses as
/// `print(1)(f)(2)`. Put a `;` before such a line to start a new statement.
///
/// Grammar: `body := (";"* statement)* ";"*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement.
/// - `terminators`: Tokens that close the body, such as `end` or `else`.
///
/// # Returns
/// The statements in source order.
pub fn parse_body<'a, I>(tokens: &mut Peekable<I>,
                         terminators: &[Token])
                         -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }

        match tokens.peek() {
            None => break,
            Some((tok, _)) if terminators.contains(tok) => break,
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}
