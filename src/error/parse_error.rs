#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A specific token was required but something else was found.
    Expected {
        /// What the grammar required at this point.
        expected: String,
        /// The token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A backslash inside a string literal was followed by an unknown
    /// character.
    InvalidEscape {
        /// The offending sequence, including the backslash.
        sequence: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An integer literal does not fit in 64 bits.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of `=` is neither a name nor an indexing expression.
    InvalidAssignmentTarget {
        /// The rejected target, rendered as source.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Relational operators were chained, as in `a < b < c`.
    AmbiguousOperatorChain {
        /// The first operator of the chain.
        first:  String,
        /// The operator that continued it.
        second: String,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl ParseError {
    /// The source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::Expected { line, .. }
            | Self::UnterminatedString { line }
            | Self::InvalidEscape { line, .. }
            | Self::LiteralTooLarge { line }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::AmbiguousOperatorChain { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::Expected { expected,
                             found,
                             line, } => {
                write!(f, "Error on line {line}: Expected {expected}, found {found}.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::InvalidEscape { sequence, line } => write!(f,
                                                             "Error on line {line}: Invalid escape sequence '{sequence}'. Supported escapes are \\t, \\n, \\\" and \\\\."),

            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },

            Self::InvalidAssignmentTarget { target, line } => write!(f,
                                                                     "Error on line {line}: Cannot assign to '{target}'. Only variables and array elements can be assigned."),

            Self::AmbiguousOperatorChain { first,
                                           second,
                                           line, } => write!(f,
                                                             "Error on line {line}: Ambiguous chain of '{first}' and '{second}'. Use parentheses or 'and'."),
        }
    }
}

impl std::error::Error for ParseError {}
