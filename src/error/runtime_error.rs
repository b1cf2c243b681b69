use crate::ast::{Statement, Type};

#[derive(Debug, Clone)]
/// Represents all errors that can occur during evaluation and runtime.
///
/// Every fault carries the line of the expression that raised it. When a
/// fault leaves the statement that was executing, it is wrapped once in
/// [`RuntimeError::InStatement`]; see [`RuntimeError::in_statement`].
pub enum RuntimeError {
    /// Tried to read or assign a name that is not bound in any visible scope.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to `let` a name that already exists in the same scope.
    RedefineVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value did not have the shape an operation required.
    IncorrectType {
        /// The type the operation required.
        expected: Type,
        /// The textual form of the value that was supplied.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The wrong number of arguments was supplied to a function.
    IncorrectArgumentCount {
        /// The name of the callee.
        callee:   String,
        /// The number of parameters it declares.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to access an array element outside its bounds.
    ArrayIndexOutOfRange {
        /// The index that was requested.
        index:  i64,
        /// The length of the array.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Attempted division or remainder by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` escaped every active call frame.
    ///
    /// The parser accepts `return` anywhere, so this is reachable from a
    /// top-level `return`; inside a call it indicates an interpreter defect.
    InvalidControlTransfer {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing program output failed.
    Output {
        /// The underlying I/O error.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A fault annotated with the statement that was executing.
    InStatement {
        /// The statement that was executing.
        statement: Box<Statement>,
        /// The line of that statement.
        line:      usize,
        /// The original fault.
        source:    Box<Self>,
    },
}

impl RuntimeError {
    /// Attaches the executing statement, unless a statement is already
    /// attached.
    ///
    /// ## Example
    /// ```
    /// use tommy::{
    ///     ast::{Expr, Statement},
    ///     error::RuntimeError,
    /// };
    ///
    /// let stmt = Statement::EvalExpr { expr: Expr::Var { name: "x".into(),
    ///                                                    line: 3, },
    ///                                  line: 3, };
    /// let err = RuntimeError::UndefinedVariable { name: "x".into(),
    ///                                             line: 3, };
    ///
    /// let wrapped = err.in_statement(&stmt).in_statement(&stmt);
    /// assert!(matches!(wrapped.root_cause(), RuntimeError::UndefinedVariable { .. }));
    /// assert!(matches!(&wrapped, RuntimeError::InStatement { source, .. }
    ///                  if !matches!(**source, RuntimeError::InStatement { .. })));
    /// ```
    #[must_use]
    pub fn in_statement(self, statement: &Statement) -> Self {
        match self {
            Self::InStatement { .. } => self,
            other => Self::InStatement { statement: Box::new(statement.clone()),
                                         line:      statement.line_number(),
                                         source:    Box::new(other), },
        }
    }

    /// The underlying fault, with any statement context removed.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InStatement { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::RedefineVariable { name, line } => write!(f,
                                                            "Error on line {line}: '{name}' is already defined in this scope."),
            Self::IncorrectType { expected,
                                  found,
                                  line, } => {
                write!(f, "Error on line {line}: Expected a value of type {expected}, found {found}.")
            },
            Self::IncorrectArgumentCount { callee,
                                           expected,
                                           found,
                                           line, } => write!(f,
                                                             "Error on line {line}: '{callee}' expects {expected} argument(s), but {found} were given."),
            Self::ArrayIndexOutOfRange { index, length, line } => write!(f,
                                                                         "Error on line {line}: Index {index} is out of range for an array of length {length}."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::InvalidControlTransfer { line } => {
                write!(f, "Error on line {line}: 'return' outside of a function call.")
            },
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Failed to write output: {details}.")
            },
            Self::InStatement { statement, source, .. } => {
                write!(f, "{source}\n  while executing: {}", statement.describe())
            },
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InStatement { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
