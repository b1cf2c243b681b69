use std::{fmt, rc::Rc};

/// A static type of the language.
///
/// Types appear in variable and parameter annotations, in function return
/// positions and in the signatures of operators and built-ins. `Any` is an
/// escape hatch that disables checking for the position it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 64-bit signed integers.
    Int,
    /// Text.
    String,
    /// `true` or `false`.
    Bool,
    /// The single value `unit`.
    Unit,
    /// Arrays of any element type.
    Array,
    /// A callable with an ordered parameter list and a result type.
    Function {
        /// Parameter types, in order.
        domain:   Vec<Self>,
        /// Result type.
        codomain: Box<Self>,
    },
    /// Matches every type.
    Any,
}

impl Type {
    /// Builds a function type.
    ///
    /// ## Example
    /// ```
    /// use tommy::ast::Type;
    ///
    /// let ty = Type::function(vec![Type::Int, Type::Int], Type::Bool);
    /// assert_eq!(ty.to_string(), "(Int, Int) -> Bool");
    /// ```
    #[must_use]
    pub fn function(domain: Vec<Self>, codomain: Self) -> Self {
        Self::Function { domain,
                         codomain: Box::new(codomain) }
    }

    /// Returns `true` if a value of type `actual` may be used where `self` is
    /// expected. `Any` on either side always accepts.
    #[must_use]
    pub fn accepts(&self, actual: &Self) -> bool {
        match (self, actual) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Function { domain: d1,
                              codomain: c1, },
             Self::Function { domain: d2,
                              codomain: c2, }) => {
                d1.len() == d2.len()
                && d1.iter().zip(d2).all(|(a, b)| a.accepts(b))
                && c1.accepts(c2)
            },
            _ => self == actual,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "Int"),
            Self::String => write!(f, "String"),
            Self::Bool => write!(f, "Bool"),
            Self::Unit => write!(f, "Unit"),
            Self::Array => write!(f, "Array"),
            Self::Any => write!(f, "Any"),
            Self::Function { domain, codomain } => {
                write!(f, "(")?;
                for (index, ty) in domain.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                write!(f, ") -> {codomain}")
            },
        }
    }
}

/// Associativity of an infix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ** b ** c` groups as `a ** (b ** c)`.
    Right,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Numeric identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`not x`).
    Not,
}

impl PrefixOperator {
    /// The source text of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "not",
        }
    }

    /// Binding power used when parsing the operand.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Negate => 13,
            Self::Not => 6,
        }
    }

    /// The type the operand must have.
    #[must_use]
    pub const fn operand_type(self) -> Type {
        match self {
            Self::Plus | Self::Negate => Type::Int,
            Self::Not => Type::Bool,
        }
    }

    /// The type of the result.
    #[must_use]
    pub const fn result_type(self) -> Type {
        self.operand_type()
    }

    /// The functional signature, `T -> T`.
    #[must_use]
    pub fn signature(self) -> Type {
        Type::function(vec![self.operand_type()], self.result_type())
    }
}

/// Represents an infix (binary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating integer division (`/`)
    Div,
    /// Truncating remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// String concatenation (`++`)
    Concat,
    /// Logical and (`and`), short-circuiting
    And,
    /// Logical or (`or`), short-circuiting
    Or,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl InfixOperator {
    /// The source text of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Concat => "++",
            Self::And => "and",
            Self::Or => "or",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        }
    }

    /// Left binding power of the operator.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow | Self::Concat => 14,
            Self::Mod => 12,
            Self::Mul | Self::Div => 11,
            Self::Add | Self::Sub => 10,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual => 9,
            Self::And => 5,
            Self::Or => 4,
        }
    }

    /// How chains of the same operator group.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// The type both operands must have.
    #[must_use]
    pub const fn operand_type(self) -> Type {
        match self {
            Self::Concat => Type::String,
            Self::And | Self::Or => Type::Bool,
            _ => Type::Int,
        }
    }

    /// The type of the result.
    #[must_use]
    pub const fn result_type(self) -> Type {
        match self {
            Self::Concat => Type::String,
            Self::And
            | Self::Or
            | Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual => Type::Bool,
            _ => Type::Int,
        }
    }

    /// The functional signature, `(T, T) -> R`.
    #[must_use]
    pub fn signature(self) -> Type {
        Type::function(vec![self.operand_type(), self.operand_type()],
                       self.result_type())
    }

    /// Returns `true` for the relational operators, which may not be chained.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An anonymous function literal, `\x, y -> x + y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    /// Parameter names. Lambda parameters are untyped.
    pub params: Vec<String>,
    /// The expression computed by a call.
    pub body:   Expr,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions are immutable once parsed. Every node records the source line
/// of its first token for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a variable by name.
    Var {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation (`-x`, `not b`).
    Prefix {
        /// The operator to apply.
        op:      PrefixOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation.
    Infix {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    InfixOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Application of a callee expression to arguments (e.g. `f(1, 2)`).
    FunCall {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Array indexing expression (e.g., `arr[2]`).
    ArrayAccess {
        /// The array to index into.
        array: Box<Self>,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Integer literal.
    LInt {
        /// The constant value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// String literal with escapes already resolved.
    LString {
        /// The constant value.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    LBool {
        /// The constant value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// `unit`.
    LUnit {
        /// Line number in the source code.
        line: usize,
    },
    /// Array literal expression.
    LArray {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Anonymous function literal.
    LFunction {
        /// Parameters and body, shared with the closures built from it.
        lambda: Rc<Lambda>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use tommy::ast::Expr;
    ///
    /// let expr = Expr::Var { name: "x".to_string(),
    ///                        line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Var { line, .. }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::FunCall { line, .. }
            | Self::ArrayAccess { line, .. }
            | Self::LInt { line, .. }
            | Self::LString { line, .. }
            | Self::LBool { line, .. }
            | Self::LUnit { line }
            | Self::LArray { line, .. }
            | Self::LFunction { line, .. } => *line,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Renders expressions back in source syntax, fully parenthesised, for
/// diagnostics.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var { name, .. } => write!(f, "{name}"),
            Self::Prefix { op: PrefixOperator::Not,
                           operand,
                           .. } => write!(f, "(not {operand})"),
            Self::Prefix { op, operand, .. } => write!(f, "({op}{operand})"),
            Self::Infix { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::FunCall { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                write_list(f, arguments)?;
                write!(f, ")")
            },
            Self::ArrayAccess { array, index, .. } => write!(f, "{array}[{index}]"),
            Self::LInt { value, .. } => write!(f, "{value}"),
            Self::LString { value, .. } => write!(f, "{value:?}"),
            Self::LBool { value, .. } => write!(f, "{value}"),
            Self::LUnit { .. } => write!(f, "unit"),
            Self::LArray { elements, .. } => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            },
            Self::LFunction { lambda, .. } => {
                write!(f, "(\\{} -> {})", lambda.params.join(", "), lambda.body)
            },
        }
    }
}

/// A typed name: a parameter or a `let` target with an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedName {
    /// The bound name.
    pub name: String,
    /// The declared type.
    pub ty:   Type,
}

/// Represents a user-defined function definition.
///
/// `let name(a: Int, b: Int): Int = ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// The typed parameters.
    pub params:      Vec<TypedName>,
    /// The declared result type.
    pub return_type: Type,
    /// The statements executed by a call.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// One link of an `if`/`elseif` chain.
///
/// The chain is right-linked: a false condition hands control to `next`, which
/// is either another step or the terminal `else` body.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStep {
    /// The condition; must evaluate to a boolean.
    pub condition: Expr,
    /// Statements run when the condition holds.
    pub body:      Vec<Statement>,
    /// What to try when it does not.
    pub next:      Option<Box<IfNext>>,
    /// Line number in the source code.
    pub line:      usize,
}

/// The continuation of a failed [`IfStep`].
#[derive(Debug, Clone, PartialEq)]
pub enum IfNext {
    /// An `elseif` clause.
    Step(IfStep),
    /// The terminal `else` body.
    Else(Vec<Statement>),
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its effects.
    EvalExpr {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// An `if`/`elseif`/`else` chain.
    If(IfStep),
    /// `let name: Type = value`.
    VarDef {
        /// The bound name and its annotation.
        target: TypedName,
        /// The initial value of the variable.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `let name = value`.
    UntypedVarDef {
        /// The name of the variable.
        name:  String,
        /// The initial value of the variable.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name = value`; the name must already be defined.
    VarReassign {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `array[index] = value`.
    ArrayAssignment {
        /// The expression producing the array.
        array: Expr,
        /// The index to store at.
        index: Expr,
        /// The value to store.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A named function definition.
    FunDef(Rc<FunctionDef>),
    /// `return value`.
    Return {
        /// The value handed back to the caller.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `while condition do body end`.
    While {
        /// Evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for var in iterable do body end`.
    For {
        /// The loop variable name.
        var:      String,
        /// Must evaluate to an array.
        iterable: Expr,
        /// The loop body.
        body:     Vec<Statement>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::If(step) => step.line,
            Self::FunDef(def) => def.line,
            Self::EvalExpr { line, .. }
            | Self::VarDef { line, .. }
            | Self::UntypedVarDef { line, .. }
            | Self::VarReassign { line, .. }
            | Self::ArrayAssignment { line, .. }
            | Self::Return { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. } => *line,
        }
    }

    /// A one-line summary of the statement used in error messages.
    ///
    /// ## Example
    /// ```
    /// use tommy::ast::{Expr, Statement};
    ///
    /// let stmt = Statement::VarReassign { name:  "x".into(),
    ///                                     value: Expr::LInt { value: 1, line: 1 },
    ///                                     line:  1, };
    ///
    /// assert_eq!(stmt.describe(), "x = 1");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::EvalExpr { expr, .. } => expr.to_string(),
            Self::If(step) => format!("if {} then ...", step.condition),
            Self::VarDef { target, value, .. } => {
                format!("let {}: {} = {value}", target.name, target.ty)
            },
            Self::UntypedVarDef { name, value, .. } => format!("let {name} = {value}"),
            Self::VarReassign { name, value, .. } => format!("{name} = {value}"),
            Self::ArrayAssignment { array, index, value, .. } => {
                format!("{array}[{index}] = {value}")
            },
            Self::FunDef(def) => format!("let {}(...) = ... end", def.name),
            Self::Return { value, .. } => format!("return {value}"),
            Self::While { condition, .. } => format!("while {condition} do ... end"),
            Self::For { var, iterable, .. } => format!("for {var} in {iterable} do ... end"),
        }
    }
}
