use std::iter::Peekable;

use crate::{
    ast::{Type, TypedName},
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by array literals, call arguments and parameter lists. Each element
/// is parsed with `parse_item`; after it the stream must hold either a comma,
/// to continue, or `closing`, which is consumed and ends the list. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, a token other than `,`
/// or `closing` follows an item, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected: format!("',' or {closing}"),
                                                  found:    tok.to_string(),
                                                  line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
/// - `line`: Line reported if the input ends here.
///
/// # Errors
/// `Expected` if the next token is not an identifier, or
/// `UnexpectedEndOfInput`.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => Err(ParseError::Expected { expected: "identifier".to_string(),
                                                        found:    tok.to_string(),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// Returns the line of the consumed token. `line` is only used when the input
/// has already run out.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    line: usize)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, l)) if tok == expected => Ok(*l),
        Some((tok, l)) => Err(ParseError::Expected { expected: expected.to_string(),
                                                     found:    tok.to_string(),
                                                     line:     *l, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses a type annotation.
///
/// Grammar:
/// ```text
/// type := "Int" | "String" | "Bool" | "Unit"
///       | "[" type "]"
///       | "(" (type ("," type)*)? ")" "->" type
/// ```
///
/// The element type of an array annotation is checked for syntax and then
/// dropped; arrays are not typed by their contents.
///
/// # Example
/// ```
/// use tommy::{
///     ast::Type,
///     interpreter::{lexer::tokenize, parser::utils::parse_type},
/// };
///
/// let tokens = tokenize("(Int, [String]) -> Bool").unwrap();
/// let ty = parse_type(&mut tokens.iter().peekable(), 1).unwrap();
///
/// assert_eq!(ty,
///            Type::function(vec![Type::Int, Type::Array],
///                           Type::Bool));
/// ```
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Type>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::IntType, _)) => Ok(Type::Int),
        Some((Token::StringType, _)) => Ok(Type::String),
        Some((Token::BoolType, _)) => Ok(Type::Bool),
        Some((Token::UnitType, _)) => Ok(Type::Unit),
        Some((Token::LBracket, l)) => {
            parse_type(tokens, *l)?;
            expect(tokens, &Token::RBracket, *l)?;
            Ok(Type::Array)
        },
        Some((Token::LParen, l)) => {
            let domain =
                parse_comma_separated(tokens, |t| parse_type(t, *l), &Token::RParen)?;
            expect(tokens, &Token::Arrow, *l)?;
            let codomain = parse_type(tokens, *l)?;
            Ok(Type::function(domain, codomain))
        },
        Some((tok, l)) => Err(ParseError::Expected { expected: "type".to_string(),
                                                     found:    tok.to_string(),
                                                     line:     *l, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses `name: type`.
pub(in crate::interpreter::parser) fn parse_typed_name<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<TypedName>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, line)?;
    expect(tokens, &Token::Colon, line)?;
    let ty = parse_type(tokens, line)?;

    Ok(TypedName { name, ty })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn ty(source: &str) -> ParseResult<Type> {
        let tokens = tokenize(source)?;
        parse_type(&mut tokens.iter().peekable(), 1)
    }

    #[test]
    fn nested_types() {
        assert_eq!(ty("[[Int]]").unwrap(), Type::Array);
        assert_eq!(ty("() -> Unit").unwrap(), Type::function(vec![], Type::Unit));
        assert_eq!(ty("((Int) -> Int) -> Int").unwrap(),
                   Type::function(vec![Type::function(vec![Type::Int], Type::Int)], Type::Int));
    }

    #[test]
    fn function_type_requires_arrow() {
        assert!(matches!(ty("(Int) Int"), Err(ParseError::Expected { .. })));
    }

    #[test]
    fn unknown_type_name() {
        assert!(matches!(ty("Float"), Err(ParseError::Expected { .. })));
    }

    #[test]
    fn list_needs_separator() {
        let tokens = tokenize("a b)").unwrap();
        let mut iter = tokens.iter().peekable();
        let result = parse_comma_separated(&mut iter,
                                           |t| parse_identifier(t, 1).map(|_| ()),
                                           &Token::RParen);
        assert!(matches!(result, Err(ParseError::Expected { .. })));
    }
}
