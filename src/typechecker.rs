use std::collections::HashMap;

use crate::{
    ast::{Expr, Statement, Type},
    error::TypeError,
    interpreter::evaluator::{function::builtin::BUILTIN_TABLE, prelude},
};

/// Infers the static type of an expression.
///
/// `context` gives the type of every free name. The expression is checked in
/// one structural pass and is not modified:
///
/// - literals have their own type, array literals are `Array`;
/// - a variable has the type `context` gives it;
/// - operator operands must match the operator's signature, and the result
///   is its result type;
/// - a callee must have a function type (or `Any`), and the arguments must
///   match its parameters in number and type;
/// - indexing needs an `Array` and an `Int` and yields `Any`;
/// - a lambda's parameters are `Any` while its body is inferred.
///
/// `Any` is compatible with every type in both directions.
///
/// # Errors
/// A [`TypeError`] naming the innermost sub-expression that failed.
///
/// # Example
/// ```
/// use tommy::{
///     ast::Type,
///     interpreter::{lexer::tokenize, parser::core::parse_expression},
///     typechecker::{builtin_context, infer},
/// };
///
/// let tokens = tokenize("len(xs) + 1 > 2").unwrap();
/// let expr = parse_expression(&mut tokens.iter().peekable()).unwrap();
///
/// let mut context = builtin_context();
/// context.insert("xs".to_string(), Type::Array);
///
/// assert_eq!(infer(&context, &expr).unwrap(), Type::Bool);
/// ```
pub fn infer(context: &HashMap<String, Type>, expr: &Expr) -> Result<Type, TypeError> {
    match expr {
        Expr::LInt { .. } => Ok(Type::Int),
        Expr::LString { .. } => Ok(Type::String),
        Expr::LBool { .. } => Ok(Type::Bool),
        Expr::LUnit { .. } => Ok(Type::Unit),
        Expr::LArray { elements, .. } => {
            for element in elements {
                infer(context, element)?;
            }
            Ok(Type::Array)
        },
        Expr::Var { name, .. } => {
            context.get(name)
                   .cloned()
                   .ok_or_else(|| TypeError::new(expr, format!("'{name}' has no known type")))
        },
        Expr::Prefix { op, operand, .. } => {
            apply_signature(context, &op.signature(), &[(operand.as_ref(), "operand")], expr)
        },
        Expr::Infix { left, op, right, .. } => {
            apply_signature(context,
                            &op.signature(),
                            &[(left.as_ref(), "left operand"), (right.as_ref(), "right operand")],
                            expr)
        },
        Expr::FunCall { callee, arguments, .. } => match infer(context, callee)? {
            Type::Any => {
                for argument in arguments {
                    infer(context, argument)?;
                }
                Ok(Type::Any)
            },
            Type::Function { domain, codomain } => {
                if domain.len() != arguments.len() {
                    return Err(TypeError::new(expr,
                                              format!("'{callee}' takes {} argument(s) but {} were given",
                                                      domain.len(),
                                                      arguments.len())));
                }
                for (argument, expected) in arguments.iter().zip(&domain) {
                    expect(context, argument, expected, expr, "argument")?;
                }
                Ok(*codomain)
            },
            other => Err(TypeError::new(expr, format!("'{callee}' has type {other} and cannot be called"))),
        },
        Expr::ArrayAccess { array, index, .. } => {
            expect(context, array, &Type::Array, expr, "indexed value")?;
            expect(context, index, &Type::Int, expr, "index")?;
            Ok(Type::Any)
        },
        Expr::LFunction { lambda, .. } => {
            let mut inner = context.clone();
            for param in &lambda.params {
                inner.insert(param.clone(), Type::Any);
            }
            let codomain = infer(&inner, &lambda.body)?;
            Ok(Type::function(vec![Type::Any; lambda.params.len()], codomain))
        },
    }
}

/// Checks operator operands against the operator's signature and yields its
/// result type.
fn apply_signature(context: &HashMap<String, Type>,
                   signature: &Type,
                   operands: &[(&Expr, &str)],
                   parent: &Expr)
                   -> Result<Type, TypeError> {
    let Type::Function { domain, codomain } = signature else {
        return Err(TypeError::new(parent, format!("{signature} is not a function type")));
    };
    for ((operand, role), expected) in operands.iter().zip(domain) {
        expect(context, operand, expected, parent, role)?;
    }
    Ok((**codomain).clone())
}

/// Infers `operand` and checks it against `expected`, blaming `parent` on a
/// mismatch.
fn expect(context: &HashMap<String, Type>,
          operand: &Expr,
          expected: &Type,
          parent: &Expr,
          role: &str)
          -> Result<(), TypeError> {
    let actual = infer(context, operand)?;
    if expected.accepts(&actual) {
        Ok(())
    } else {
        Err(TypeError::new(parent, format!("expected {expected} for the {role}, found {actual}")))
    }
}

/// Types of every function a fresh context starts with: the built-ins and
/// the prelude.
#[must_use]
pub fn builtin_context() -> HashMap<String, Type> {
    let mut context: HashMap<String, Type> =
        BUILTIN_TABLE.iter()
                     .map(|def| {
                         (def.name.to_string(),
                          Type::function(def.params.to_vec(), def.return_type.clone()))
                     })
                     .collect();

    for statement in prelude::definitions() {
        if let Statement::FunDef(def) = statement {
            let domain = def.params.iter().map(|p| p.ty.clone()).collect();
            context.insert(def.name.clone(),
                           Type::function(domain, def.return_type.clone()));
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::{InfixOperator, PrefixOperator},
        interpreter::{lexer::tokenize, parser::core::parse_expression},
    };

    fn check(source: &str, names: &[(&str, Type)]) -> Result<Type, TypeError> {
        let tokens = tokenize(source).unwrap();
        let expr = parse_expression(&mut tokens.iter().peekable()).unwrap();
        let mut context = builtin_context();
        for (name, ty) in names {
            context.insert((*name).to_string(), ty.clone());
        }
        infer(&context, &expr)
    }

    #[test]
    fn operators_follow_their_signatures() {
        assert_eq!(check("1 + 2 * 3", &[]).unwrap(), Type::Int);
        assert_eq!(check(r#""a" ++ "b""#, &[]).unwrap(), Type::String);
        assert_eq!(check("not (1 < 2) or false", &[]).unwrap(), Type::Bool);
    }

    #[test]
    fn operator_results_come_from_their_signatures() {
        let Type::Function { codomain, .. } = InfixOperator::Less.signature() else {
            panic!("operator signatures are function types");
        };
        assert_eq!(check("1 < 2", &[]).unwrap(), *codomain);

        let Type::Function { domain, .. } = PrefixOperator::Not.signature() else {
            panic!("operator signatures are function types");
        };
        assert_eq!(domain, vec![Type::Bool]);
        assert!(check("not 1", &[]).is_err());
    }

    #[test]
    fn mismatch_blames_the_operator_expression() {
        let err = check(r#"1 + "two""#, &[]).unwrap_err();

        assert_eq!(err.expr.to_string(), r#"(1 + "two")"#);
        assert!(err.message.contains("right operand"));
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(check("y + 1", &[]).is_err());
        assert_eq!(check("y + 1", &[("y", Type::Int)]).unwrap(), Type::Int);
    }

    #[test]
    fn calls_check_arity_and_arguments() {
        assert_eq!(check("str(5)", &[]).unwrap(), Type::String);
        assert!(check("len(1)", &[]).is_err());
        assert!(check("push([])", &[]).is_err());
        assert_eq!(check("cons([], 1)", &[]).unwrap(), Type::Array);
        assert!(check("5(1)", &[]).is_err());
    }

    #[test]
    fn indexing_and_lambdas_are_dynamic() {
        assert_eq!(check("[1, 2][0] + 1", &[]).unwrap(), Type::Int);
        assert_eq!(check(r"(\x -> x)(3)", &[]).unwrap(), Type::Any);
        assert_eq!(check(r"\a, b -> a + b", &[]).unwrap(),
                   Type::function(vec![Type::Any, Type::Any], Type::Int));
    }

    #[test]
    fn array_elements_are_still_checked() {
        assert!(check("[1, true and 2]", &[]).is_err());
    }
}
