/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree, evaluating expressions to values and
/// executing statements against a chain of lexical scopes. Function calls,
/// both to closures and to built-ins, go through a single dispatch point.
///
/// # Responsibilities
/// - Evaluates expressions with dynamic type checks on every operation.
/// - Executes statements and threads `return` through control signals.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each paired with the line it starts on. Whitespace, newlines and
/// `//` comments are discarded.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Recognises keywords, type names, literals, identifiers and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Expressions are parsed by a binding-power engine driven by the operator
/// metadata in [`crate::ast`]. Statements are parsed by recursive descent over
/// keyword-delimited forms.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar, reporting errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its textual form.
/// - Provides checked conversions used to validate operand types.
/// - Defines callable values shared by closures and built-ins.
pub mod value;
