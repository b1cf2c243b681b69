use std::rc::Rc;

use crate::ast::{Expr, FunctionDef, Statement, Type, TypedName};

// Prelude nodes have no source position.
const LINE: usize = 0;

fn var(name: &str) -> Expr {
    Expr::Var { name: name.to_string(),
                line: LINE, }
}

fn param(name: &str, ty: Type) -> TypedName {
    TypedName { name: name.to_string(),
                ty }
}

/// `callee(args...)` as a statement.
fn call(callee: &str, arguments: Vec<Expr>) -> Statement {
    Statement::EvalExpr { expr: Expr::FunCall { callee: Box::new(var(callee)),
                                                arguments,
                                                line: LINE },
                          line: LINE, }
}

/// `for x in source do push(target, x) end`
fn copy_into(target: &str, source: &str) -> Statement {
    Statement::For { var:      "x".to_string(),
                     iterable: var(source),
                     body:     vec![call("push", vec![var(target), var("x")])],
                     line:     LINE, }
}

fn function(name: &str,
            params: Vec<TypedName>,
            return_type: Type,
            body: Vec<Statement>)
            -> Statement {
    Statement::FunDef(Rc::new(FunctionDef { name: name.to_string(),
                                            params,
                                            return_type,
                                            body,
                                            line: LINE }))
}

/// `let result: [Any] = []`
fn new_array(name: &str) -> Statement {
    Statement::VarDef { target: param(name, Type::Array),
                        value:  Expr::LArray { elements: Vec::new(),
                                               line:     LINE, },
                        line:   LINE, }
}

fn return_var(name: &str) -> Statement {
    Statement::Return { value: var(name),
                        line:  LINE, }
}

/// The prelude program, executed in the global scope of every new context.
///
/// ```text
/// let println(message: Any): Unit =
///     print(message); print("\n")
/// end
/// let cons(list: [Any], elem: Any): [Any] =
///     let result: [Any] = []
///     for x in list do push(result, x) end
///     push(result, elem)
///     return result
/// end
/// let concat(lhs: [Any], rhs: [Any]): [Any] =
///     let result: [Any] = []
///     for x in lhs do push(result, x) end
///     for x in rhs do push(result, x) end
///     return result
/// end
/// ```
///
/// `Any` has no source syntax, which is why these are built as trees rather
/// than parsed. `cons` and `concat` never modify their arguments.
#[must_use]
pub fn definitions() -> Vec<Statement> {
    let println = function("println",
                           vec![param("message", Type::Any)],
                           Type::Unit,
                           vec![call("print", vec![var("message")]),
                                call("print",
                                     vec![Expr::LString { value: "\n".to_string(),
                                                          line:  LINE, }]),]);

    let cons = function("cons",
                        vec![param("list", Type::Array), param("elem", Type::Any)],
                        Type::Array,
                        vec![new_array("result"),
                             copy_into("result", "list"),
                             call("push", vec![var("result"), var("elem")]),
                             return_var("result"),]);

    let concat = function("concat",
                          vec![param("lhs", Type::Array), param("rhs", Type::Array)],
                          Type::Array,
                          vec![new_array("result"),
                               copy_into("result", "lhs"),
                               copy_into("result", "rhs"),
                               return_var("result"),]);

    vec![println, cons, concat]
}
