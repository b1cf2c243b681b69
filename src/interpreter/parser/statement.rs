use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef, IfNext, IfStep, Statement, TypedName},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_body,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier, parse_type, parse_typed_name},
        },
    },
};

/// Parses a single statement.
///
/// The leading token selects the form:
///
/// - `return expr`
/// - `let name(params): Type = body end`, a function definition
/// - `let name: Type = expr` or `let name = expr`
/// - `if`, `while` and `for` blocks
/// - `name = expr`, a reassignment
/// - `array[index] = expr`, an element store
/// - any other expression, evaluated for its effects
///
/// # Errors
/// - `InvalidAssignmentTarget` when `=` follows an expression that is neither
///   a name nor an index.
/// - Any error from the sub-parsers.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Return => {
            tokens.next();
            let value = parse_expression(tokens)?;
            Ok(Statement::Return { value, line })
        },
        Token::Let => {
            tokens.next();
            parse_let(tokens, line)
        },
        Token::If => {
            tokens.next();
            parse_if(tokens, line)
        },
        Token::While => {
            tokens.next();
            parse_while(tokens, line)
        },
        Token::For => {
            tokens.next();
            parse_for(tokens, line)
        },
        _ => {
            if let Some(statement) = parse_reassignment(tokens)? {
                return Ok(statement);
            }
            parse_expression_statement(tokens, line)
        },
    }
}

/// Parses what follows `let`: a function definition or a variable definition.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, line)?;

    match tokens.next() {
        Some((Token::LParen, _)) => parse_function_definition(tokens, name, line),
        Some((Token::Colon, _)) => {
            let ty = parse_type(tokens, line)?;
            expect(tokens, &Token::Equals, line)?;
            let value = parse_expression(tokens)?;
            Ok(Statement::VarDef { target: TypedName { name, ty },
                                   value,
                                   line })
        },
        Some((Token::Equals, _)) => {
            let value = parse_expression(tokens)?;
            Ok(Statement::UntypedVarDef { name, value, line })
        },
        Some((tok, l)) => Err(ParseError::Expected { expected: "'(', ':' or '='".to_string(),
                                                     found:    tok.to_string(),
                                                     line:     *l, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses `(a: T, ...): R = body end` after the function name.
///
/// Grammar:
/// `fundef := "let" name "(" (param ("," param)*)? ")" ":" type "=" body "end"`
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>,
                                    name: String,
                                    line: usize)
                                    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let params = parse_comma_separated(tokens, |t| parse_typed_name(t, line), &Token::RParen)?;
    expect(tokens, &Token::Colon, line)?;
    let return_type = parse_type(tokens, line)?;
    expect(tokens, &Token::Equals, line)?;
    let body = parse_body(tokens, &[Token::End])?;
    expect(tokens, &Token::End, line)?;

    Ok(Statement::FunDef(Rc::new(FunctionDef { name,
                                               params,
                                               return_type,
                                               body,
                                               line })))
}

/// Parses an `if` chain after the `if` keyword.
///
/// The clauses are read flat and then folded from the right, so
/// `if a then .. elseif b then .. else .. end` becomes a step for `a` whose
/// `next` is a step for `b` whose `next` is the `else` body.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    const CLAUSE_END: [Token; 3] = [Token::Elseif, Token::Else, Token::End];

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Then, line)?;
    let body = parse_body(tokens, &CLAUSE_END)?;

    let mut elseifs = Vec::new();
    while let Some((Token::Elseif, l)) = tokens.peek() {
        let l = *l;
        tokens.next();
        let condition = parse_expression(tokens)?;
        expect(tokens, &Token::Then, l)?;
        let body = parse_body(tokens, &CLAUSE_END)?;
        elseifs.push((condition, body, l));
    }

    let else_body = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(parse_body(tokens, &[Token::End])?)
    } else {
        None
    };
    expect(tokens, &Token::End, line)?;

    let mut next = else_body.map(|body| Box::new(IfNext::Else(body)));
    for (condition, body, line) in elseifs.into_iter().rev() {
        next = Some(Box::new(IfNext::Step(IfStep { condition,
                                                   body,
                                                   next,
                                                   line })));
    }

    Ok(Statement::If(IfStep { condition,
                              body,
                              next,
                              line }))
}

/// `while condition do body end`
fn parse_while<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Do, line)?;
    let body = parse_body(tokens, &[Token::End])?;
    expect(tokens, &Token::End, line)?;

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// `for name in iterable do body end`
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = parse_identifier(tokens, line)?;
    expect(tokens, &Token::In, line)?;
    let iterable = parse_expression(tokens)?;
    expect(tokens, &Token::Do, line)?;
    let body = parse_body(tokens, &[Token::End])?;
    expect(tokens, &Token::End, line)?;

    Ok(Statement::For { var,
                        iterable,
                        body,
                        line })
}

/// Attempts to parse `name = expr`.
///
/// Uses a cloned iterator to look two tokens ahead, so nothing is consumed
/// when the statement turns out to be something else.
///
/// # Returns
/// - `Ok(Some(Statement::VarReassign))` if the pattern matches.
/// - `Ok(None)` otherwise.
fn parse_reassignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();

    let Some((Token::Identifier(name), line)) = lookahead.next() else {
        return Ok(None);
    };
    let Some((Token::Equals, _)) = lookahead.next() else {
        return Ok(None);
    };

    tokens.next();
    tokens.next();

    let value = parse_expression(tokens)?;

    Ok(Some(Statement::VarReassign { name: name.clone(),
                                     value,
                                     line: *line }))
}

/// Parses an expression statement, or an element store if `=` follows.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens)?;

    if let Some((Token::Equals, eq_line)) = tokens.peek() {
        let eq_line = *eq_line;
        tokens.next();

        return match expr {
            Expr::ArrayAccess { array, index, .. } => {
                let value = parse_expression(tokens)?;
                Ok(Statement::ArrayAssignment { array: *array,
                                                index: *index,
                                                value,
                                                line })
            },
            other => Err(ParseError::InvalidAssignmentTarget { target: other.to_string(),
                                                               line:   eq_line, }),
        };
    }

    Ok(Statement::EvalExpr { expr, line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::Type, interpreter::lexer::tokenize};

    fn statement(source: &str) -> ParseResult<Statement> {
        let tokens = tokenize(source)?;
        let mut iter = tokens.iter().peekable();
        let stmt = parse_statement(&mut iter)?;
        assert!(iter.peek().is_none(), "trailing tokens in {source:?}");
        Ok(stmt)
    }

    #[test]
    fn variable_definitions() {
        assert!(matches!(statement("let x = 1").unwrap(),
                         Statement::UntypedVarDef { ref name, .. } if name == "x"));

        let Statement::VarDef { target, .. } = statement("let xs: [Int] = []").unwrap() else {
            panic!("expected a typed definition");
        };
        assert_eq!(target.ty, Type::Array);
    }

    #[test]
    fn function_definition() {
        let Statement::FunDef(def) =
            statement("let add(a: Int, b: Int): Int = return a + b end").unwrap()
        else {
            panic!("expected a function definition");
        };
        assert_eq!(def.name, "add");
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.return_type, Type::Int);
        assert_eq!(def.body.len(), 1);
    }

    #[test]
    fn if_chain_is_right_linked() {
        let Statement::If(step) =
            statement("if a then x = 1 elseif b then x = 2 elseif c then x = 3 else x = 4 end")
                .unwrap()
        else {
            panic!("expected an if statement");
        };

        assert_eq!(step.condition.to_string(), "a");
        let Some(next) = step.next else { panic!("missing elseif") };
        let IfNext::Step(second) = *next else { panic!("expected elseif b") };
        assert_eq!(second.condition.to_string(), "b");
        let Some(next) = second.next else { panic!("missing elseif") };
        let IfNext::Step(third) = *next else { panic!("expected elseif c") };
        assert_eq!(third.condition.to_string(), "c");
        let Some(next) = third.next else { panic!("missing else") };
        assert!(matches!(*next, IfNext::Else(ref body) if body.len() == 1));
    }

    #[test]
    fn if_without_else() {
        let Statement::If(step) = statement("if a then end").unwrap() else {
            panic!("expected an if statement");
        };
        assert!(step.body.is_empty());
        assert!(step.next.is_none());
    }

    #[test]
    fn loops() {
        assert!(matches!(statement("while i < 3 do i = i + 1 end").unwrap(),
                         Statement::While { ref body, .. } if body.len() == 1));
        assert!(matches!(statement("for x in [1, 2] do print(x); print(x) end").unwrap(),
                         Statement::For { ref var, ref body, .. } if var == "x" && body.len() == 2));
    }

    #[test]
    fn assignments() {
        assert!(matches!(statement("x = x + 1").unwrap(), Statement::VarReassign { .. }));
        assert!(matches!(statement("xs[0] = 5").unwrap(),
                         Statement::ArrayAssignment { .. }));
        assert!(matches!(statement("m[0][1] = 5").unwrap(),
                         Statement::ArrayAssignment { array: Expr::ArrayAccess { .. }, .. }));
    }

    #[test]
    fn invalid_assignment_target() {
        assert!(matches!(statement("f(x) = 1"),
                         Err(ParseError::InvalidAssignmentTarget { .. })));
        assert!(matches!(statement("1 + 2 = 3"),
                         Err(ParseError::InvalidAssignmentTarget { .. })));
    }

    #[test]
    fn missing_end_is_reported() {
        assert!(matches!(statement("while true do x = 1"),
                         Err(ParseError::UnexpectedEndOfInput { .. })));
    }

    #[test]
    fn expression_statement() {
        assert!(matches!(statement("print(\"hi\")").unwrap(),
                         Statement::EvalExpr { expr: Expr::FunCall { .. }, .. }));
    }
}
