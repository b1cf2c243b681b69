use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Associativity, Expr, InfixOperator, Lambda, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            string::parse_string_literal,
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Binding power of call application and indexing. Higher than any operator,
/// so `f(x)` and `a[i]` always bind tightest.
pub const HIGHEST_PRECEDENCE: u8 = 100;

/// How a token starts an expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum NullDenotation {
    Literal,
    Variable,
    Prefix(PrefixOperator),
    Group,
    Lambda,
    ArrayLiteral,
}

/// How a token extends an already-parsed expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LeftDenotation {
    Infix(InfixOperator),
    Call,
    Index,
}

impl LeftDenotation {
    /// The strength with which the token grabs the expression to its left.
    const fn left_binding_power(self) -> u8 {
        match self {
            Self::Infix(op) => op.precedence(),
            Self::Call | Self::Index => HIGHEST_PRECEDENCE,
        }
    }

    /// The minimum binding power handed to the recursive parse of the right
    /// operand. One less than the precedence for right-associative operators,
    /// so an equal operator to the right may bind again.
    const fn right_binding_power(self) -> u8 {
        match self {
            Self::Infix(op) => match op.associativity() {
                Associativity::Left => op.precedence(),
                Associativity::Right => op.precedence() - 1,
            },
            Self::Call | Self::Index => 0,
        }
    }
}

/// Maps a token to its prefix operator, if it has one.
///
/// # Example
/// ```
/// use tommy::{
///     ast::PrefixOperator,
///     interpreter::{lexer::Token, parser::pratt::token_to_prefix_operator},
/// };
///
/// assert_eq!(token_to_prefix_operator(&Token::Not), Some(PrefixOperator::Not));
/// assert_eq!(token_to_prefix_operator(&Token::Star), None);
/// ```
#[must_use]
pub const fn token_to_prefix_operator(token: &Token) -> Option<PrefixOperator> {
    match token {
        Token::Plus => Some(PrefixOperator::Plus),
        Token::Minus => Some(PrefixOperator::Negate),
        Token::Not => Some(PrefixOperator::Not),
        _ => None,
    }
}

/// Maps a token to its infix operator, if it has one.
///
/// # Example
/// ```
/// use tommy::{
///     ast::InfixOperator,
///     interpreter::{lexer::Token, parser::pratt::token_to_infix_operator},
/// };
///
/// assert_eq!(token_to_infix_operator(&Token::StarStar), Some(InfixOperator::Pow));
/// assert_eq!(token_to_infix_operator(&Token::Not), None);
/// ```
#[must_use]
pub const fn token_to_infix_operator(token: &Token) -> Option<InfixOperator> {
    let op = match token {
        Token::Plus => InfixOperator::Add,
        Token::Minus => InfixOperator::Sub,
        Token::Star => InfixOperator::Mul,
        Token::Slash => InfixOperator::Div,
        Token::Percent => InfixOperator::Mod,
        Token::StarStar => InfixOperator::Pow,
        Token::PlusPlus => InfixOperator::Concat,
        Token::And => InfixOperator::And,
        Token::Or => InfixOperator::Or,
        Token::EqualEqual => InfixOperator::Equal,
        Token::BangEqual => InfixOperator::NotEqual,
        Token::Less => InfixOperator::Less,
        Token::Greater => InfixOperator::Greater,
        Token::LessEqual => InfixOperator::LessEqual,
        Token::GreaterEqual => InfixOperator::GreaterEqual,
        _ => return None,
    };
    Some(op)
}

const fn null_denotation(token: &Token) -> Option<NullDenotation> {
    if let Some(op) = token_to_prefix_operator(token) {
        return Some(NullDenotation::Prefix(op));
    }
    match token {
        Token::Integer(_) | Token::Str(_) | Token::Bool(_) | Token::Unit => {
            Some(NullDenotation::Literal)
        },
        Token::Identifier(_) => Some(NullDenotation::Variable),
        Token::LParen => Some(NullDenotation::Group),
        Token::Lambda => Some(NullDenotation::Lambda),
        Token::LBracket => Some(NullDenotation::ArrayLiteral),
        _ => None,
    }
}

const fn left_denotation(token: &Token) -> Option<LeftDenotation> {
    if let Some(op) = token_to_infix_operator(token) {
        return Some(LeftDenotation::Infix(op));
    }
    match token {
        Token::LParen => Some(LeftDenotation::Call),
        Token::LBracket => Some(LeftDenotation::Index),
        _ => None,
    }
}

/// Parses an expression whose operators all bind more strongly than `rbp`.
///
/// The null denotation of the first token produces the initial left-hand
/// side. The loop then folds in every following token whose left binding
/// power exceeds `rbp`; the first one that does not ends this sub-expression
/// and is left in the stream for the caller.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `rbp`: Minimum binding power an operator needs to extend the expression.
///
/// # Errors
/// - `UnexpectedToken` if the first token cannot start an expression.
/// - `UnexpectedEndOfInput` if the stream is empty.
/// - `AmbiguousOperatorChain` for chained relational operators.
/// - Any error from nested parses.
///
/// # Example
/// ```
/// use tommy::{
///     ast::{Expr, InfixOperator},
///     interpreter::{lexer::tokenize, parser::pratt::parse_expression_bp},
/// };
///
/// let tokens = tokenize("1 - 2 - 3").unwrap();
/// let expr = parse_expression_bp(&mut tokens.iter().peekable(), 0).unwrap();
///
/// assert_eq!(expr.to_string(), "((1 - 2) - 3)");
/// ```
pub fn parse_expression_bp<'a, I>(tokens: &mut Peekable<I>, rbp: u8) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = tokens.next()
                              .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    let nud = null_denotation(token).ok_or_else(|| {
                                         ParseError::UnexpectedToken { token: token.to_string(),
                                                                       line:  *line, }
                                     })?;

    let mut left = apply_null(nud, token, *line, tokens)?;

    while let Some((next, next_line)) = tokens.peek() {
        let Some(led) = left_denotation(next) else {
            break;
        };
        if rbp >= led.left_binding_power() {
            break;
        }

        let line = *next_line;
        tokens.next();
        left = apply_left(led, left, line, tokens)?;
    }

    Ok(left)
}

fn apply_null<'a, I>(nud: NullDenotation,
                     token: &Token,
                     line: usize,
                     tokens: &mut Peekable<I>)
                     -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match nud {
        NullDenotation::Literal | NullDenotation::Variable => parse_atom(token, line),
        NullDenotation::Prefix(op) => {
            let operand = parse_expression_bp(tokens, op.precedence())?;
            Ok(Expr::Prefix { op,
                              operand: Box::new(operand),
                              line })
        },
        NullDenotation::Group => {
            let inner = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, line)?;
            Ok(inner)
        },
        NullDenotation::Lambda => parse_lambda(tokens, line),
        NullDenotation::ArrayLiteral => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::LArray { elements, line })
        },
    }
}

fn apply_left<'a, I>(led: LeftDenotation,
                     left: Expr,
                     line: usize,
                     tokens: &mut Peekable<I>)
                     -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match led {
        LeftDenotation::Infix(op) => {
            let right = parse_expression_bp(tokens, led.right_binding_power())?;

            if op.is_comparison()
               && let Some((next, _)) = tokens.peek()
               && let Some(second) = token_to_infix_operator(next)
               && second.is_comparison()
            {
                return Err(ParseError::AmbiguousOperatorChain { first: op.to_string(),
                                                                second: second.to_string(),
                                                                line });
            }

            Ok(Expr::Infix { left: Box::new(left),
                             op,
                             right: Box::new(right),
                             line })
        },
        LeftDenotation::Call => {
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Expr::FunCall { callee: Box::new(left),
                               arguments,
                               line })
        },
        LeftDenotation::Index => {
            let index = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket, line)?;
            Ok(Expr::ArrayAccess { array: Box::new(left),
                                   index: Box::new(index),
                                   line })
        },
    }
}

fn parse_atom(token: &Token, line: usize) -> ParseResult<Expr> {
    match token {
        Token::Identifier(name) => Ok(Expr::Var { name: name.clone(),
                                                  line }),
        Token::Integer(value) => Ok(Expr::LInt { value: *value,
                                                 line }),
        Token::Str(raw) => Ok(Expr::LString { value: parse_string_literal(raw, line)?,
                                              line }),
        Token::Bool(value) => Ok(Expr::LBool { value: *value,
                                               line }),
        Token::Unit => Ok(Expr::LUnit { line }),
        tok => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                 line }),
    }
}

/// Parses the remainder of `\a, b -> body` after the lambda token.
fn parse_lambda<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();

    if !matches!(tokens.peek(), Some((Token::Arrow, _))) {
        loop {
            params.push(parse_identifier(tokens, line)?);
            match tokens.next() {
                Some((Token::Comma, _)) => {},
                Some((Token::Arrow, _)) => break,
                Some((tok, l)) => {
                    return Err(ParseError::Expected { expected: "',' or '->'".to_string(),
                                                      found:    tok.to_string(),
                                                      line:     *l, });
                },
                None => return Err(ParseError::UnexpectedEndOfInput { line }),
            }
        }
    } else {
        tokens.next();
    }

    let body = parse_expression(tokens)?;

    Ok(Expr::LFunction { lambda: Rc::new(Lambda { params, body }),
                         line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Expr> {
        let tokens = tokenize(source)?;
        let mut iter = tokens.iter().peekable();
        let expr = parse_expression(&mut iter)?;
        assert!(iter.peek().is_none(), "trailing tokens in {source:?}");
        Ok(expr)
    }

    fn shape(source: &str) -> String {
        parse(source).unwrap().to_string()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(shape("2 + 3 * 4"), "(2 + (3 * 4))");
        assert_eq!(shape("2 * 3 + 4"), "((2 * 3) + 4)");
    }

    #[test]
    fn left_and_right_associativity() {
        assert_eq!(shape("10 - 3 - 2"), "((10 - 3) - 2)");
        assert_eq!(shape("2 ** 3 ** 2"), "(2 ** (3 ** 2))");
    }

    #[test]
    fn prefix_operators_use_their_own_precedence() {
        assert_eq!(shape("-2 ** 2"), "(-(2 ** 2))");
        assert_eq!(shape("not a and b"), "((not a) and b)");
        assert_eq!(shape("not a == b"), "(not (a == b))");
        assert_eq!(shape("- - 1"), "(-(-1))");
    }

    #[test]
    fn logical_operators_are_lowest() {
        assert_eq!(shape("a < b or c > d and e"), "((a < b) or ((c > d) and e))");
    }

    #[test]
    fn calls_and_indexing_bind_tightest() {
        assert_eq!(shape("-f(1)[2]"), "(-f(1)[2])");
        assert_eq!(shape("f(1, 2)(3)"), "f(1, 2)(3)");
        assert_eq!(shape("a[i + 1] * 2"), "(a[(i + 1)] * 2)");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(shape("(2 + 3) * 4"), "((2 + 3) * 4)");
    }

    #[test]
    fn literals() {
        assert_eq!(shape(r#"[1, "a\tb", true, unit, []]"#),
                   r#"[1, "a\tb", true, unit, []]"#);
    }

    #[test]
    fn lambda_literals() {
        assert_eq!(shape(r"\x, y -> x + y"), r"(\x, y -> (x + y))");
        assert_eq!(shape(r"\ -> 1"), r"(\ -> 1)");
        assert_eq!(shape("map(λx -> x * 2, xs)"), r"map((\x -> (x * 2)), xs)");
    }

    #[test]
    fn chained_comparison_is_ambiguous() {
        assert!(matches!(parse("1 < 2 < 3"),
                         Err(ParseError::AmbiguousOperatorChain { .. })));
        assert!(parse("(1 < 2) == b").is_ok());
    }

    #[test]
    fn missing_operand_is_reported() {
        assert!(matches!(parse("1 +"), Err(ParseError::UnexpectedEndOfInput { .. })));
        assert!(matches!(parse("* 2"), Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn unclosed_group_is_reported() {
        assert!(matches!(parse("(1 + 2"), Err(ParseError::UnexpectedEndOfInput { .. })));
        assert!(matches!(parse("a[1"), Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
