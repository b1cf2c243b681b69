use std::rc::Rc;

use crate::{
    ast::{IfNext, IfStep, Statement},
    interpreter::{
        evaluator::{
            core::{Context, ControlSignal, EvalResult},
            scope::Scope,
        },
        value::{
            core::Value,
            function::{Closure, ClosureBody, Func},
        },
    },
    util::num::array_index,
};

impl Context {
    /// Executes statements in order until one returns.
    ///
    /// The statements run directly in `scope`; callers that need a fresh
    /// block scope create it first.
    pub fn exec_block(&mut self,
                      statements: &[Statement],
                      scope: &Scope)
                      -> EvalResult<ControlSignal> {
        for statement in statements {
            let signal = self.exec_statement(statement, scope)?;
            if matches!(signal, ControlSignal::Return { .. }) {
                return Ok(signal);
            }
        }
        Ok(ControlSignal::Normal)
    }

    /// Executes a single statement.
    ///
    /// A failure is annotated with this statement unless a statement nested
    /// inside it already annotated it.
    pub fn exec_statement(&mut self,
                          statement: &Statement,
                          scope: &Scope)
                          -> EvalResult<ControlSignal> {
        self.exec_statement_kind(statement, scope)
            .map_err(|err| err.in_statement(statement))
    }

    fn exec_statement_kind(&mut self,
                           statement: &Statement,
                           scope: &Scope)
                           -> EvalResult<ControlSignal> {
        match statement {
            Statement::EvalExpr { expr, .. } => {
                self.eval(expr, scope)?;
            },
            Statement::If(step) => return self.exec_if(step, scope),
            Statement::VarDef { target, value, line } => {
                let value = self.eval(value, scope)?;
                value.check_type(&target.ty, *line)?;
                scope.define(&target.name, value, *line)?;
            },
            Statement::UntypedVarDef { name, value, line } => {
                let value = self.eval(value, scope)?;
                scope.define(name, value, *line)?;
            },
            Statement::VarReassign { name, value, line } => {
                let value = self.eval(value, scope)?;
                scope.assign(name, value, *line)?;
            },
            Statement::ArrayAssignment { array,
                                         index,
                                         value,
                                         line, } => {
                let array = self.eval(array, scope)?;
                let index = self.eval(index, scope)?;
                let value = self.eval(value, scope)?;

                let mut items = array.as_array(*line)?.borrow_mut();
                let position = array_index(index.as_int(*line)?, items.len(), *line)?;
                items[position] = value;
            },
            Statement::FunDef(def) => {
                let closure = Closure { body:  ClosureBody::Block(Rc::clone(def)),
                                        scope: scope.clone(), };
                scope.define(&def.name,
                             Value::Function(Func::Closure(Rc::new(closure))),
                             def.line)?;
            },
            Statement::Return { value, line } => {
                return Ok(ControlSignal::Return { value: self.eval(value, scope)?,
                                                  line:  *line, });
            },
            Statement::While { condition, body, .. } => {
                while self.eval(condition, scope)?.as_bool(condition.line_number())? {
                    let signal = self.exec_block(body, &scope.child())?;
                    if matches!(signal, ControlSignal::Return { .. }) {
                        return Ok(signal);
                    }
                }
            },
            Statement::For { var,
                             iterable,
                             body,
                             line, } => {
                let iterable = self.eval(iterable, scope)?;
                let snapshot = iterable.as_array(*line)?.borrow().clone();

                for element in snapshot {
                    let frame = scope.child();
                    frame.define(var, element, *line)?;

                    let signal = self.exec_block(body, &frame)?;
                    if matches!(signal, ControlSignal::Return { .. }) {
                        return Ok(signal);
                    }
                }
            },
        }
        Ok(ControlSignal::Normal)
    }

    /// Runs the first branch of an `if` chain whose condition holds.
    ///
    /// Conditions are tried in order; each taken body gets its own child
    /// scope. A chain without `else` does nothing when every condition fails.
    fn exec_if(&mut self, step: &IfStep, scope: &Scope) -> EvalResult<ControlSignal> {
        let condition = self.eval(&step.condition, scope)?
                            .as_bool(step.condition.line_number())?;
        if condition {
            return self.exec_block(&step.body, &scope.child());
        }

        match step.next.as_deref() {
            Some(IfNext::Step(next)) => self.exec_if(next, scope),
            Some(IfNext::Else(body)) => self.exec_block(body, &scope.child()),
            None => Ok(ControlSignal::Normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Write, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::RuntimeError, parse};

    #[derive(Clone, Default)]
    struct Captured(Rc<RefCell<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn run(source: &str) -> (Result<(), RuntimeError>, String) {
        let captured = Captured::default();
        let mut context = Context::with_output(Box::new(captured.clone()));
        let result = context.execute(&parse(source).unwrap());
        let output = String::from_utf8(captured.0.borrow().clone()).unwrap();
        (result, output)
    }

    #[test]
    fn if_chain_takes_first_true_branch() {
        let (result, output) =
            run("let x = 2; if x == 1 then print(1) elseif x == 2 then print(2) else print(3) end");
        assert!(result.is_ok());
        assert_eq!(output, "2");
    }

    #[test]
    fn if_condition_must_be_bool() {
        let (result, _) = run("if 1 then print(1) end");
        assert!(matches!(result.unwrap_err().root_cause(),
                         RuntimeError::IncorrectType { .. }));
    }

    #[test]
    fn typed_definition_is_checked() {
        let (result, _) = run(r#"let s: String = 5"#);
        assert!(matches!(result.unwrap_err().root_cause(),
                         RuntimeError::IncorrectType { .. }));
    }

    #[test]
    fn for_iterates_over_snapshot() {
        let (result, output) = run("let xs = [1, 2]; for x in xs do push(xs, x) end; print(len(xs))");
        assert!(result.is_ok());
        assert_eq!(output, "4");
    }

    #[test]
    fn loop_variable_is_fresh_each_iteration() {
        let (result, output) = run(r"let fs = []
                                     for i in [1, 2, 3] do push(fs, \ -> i) end
                                     print(fs[0]() + fs[2]())");
        assert!(result.is_ok());
        assert_eq!(output, "4");
    }

    #[test]
    fn element_assignment_is_visible_through_aliases() {
        let (result, output) = run("let a = [0, 0]; let b = a; b[1] = 9; print(a)");
        assert!(result.is_ok());
        assert_eq!(output, "[0, 9]");
    }

    #[test]
    fn top_level_return_is_rejected() {
        let (result, _) = run("print(1)\nreturn 5");
        let err = result.unwrap_err();
        assert!(matches!(err.root_cause(), RuntimeError::InvalidControlTransfer { line: 2 }));
    }

    #[test]
    fn errors_are_wrapped_once_by_the_innermost_statement() {
        let (result, _) = run("let f(): Int = \n let y = missing\n return 1 end\nf()");
        let RuntimeError::InStatement { statement, source, .. } = result.unwrap_err() else {
            panic!("expected statement context");
        };
        assert!(matches!(*statement, Statement::UntypedVarDef { ref name, .. } if name == "y"));
        assert!(matches!(*source, RuntimeError::UndefinedVariable { line: 2, .. }));
    }
}
