use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, kept verbatim including the quotes. Escapes are
    /// resolved by the parser.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let text         = lex.slice();
        lex.extras.line += text.chars().filter(|&c| c == '\n').count();
        text.to_string()
    })]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `unit`
    #[token("unit")]
    Unit,
    /// `let`
    #[token("let")]
    Let,
    /// `end`
    #[token("end")]
    End,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `elseif`
    #[token("elseif")]
    Elseif,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `return`
    #[token("return")]
    Return,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `Int`
    #[token("Int")]
    IntType,
    /// `String`
    #[token("String")]
    StringType,
    /// `Bool`
    #[token("Bool")]
    BoolType,
    /// `Unit`
    #[token("Unit")]
    UnitType,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// `->`
    #[token("->")]
    #[token("→")]
    Arrow,
    /// `\` or `λ`, introducing a lambda.
    #[token("\\")]
    #[token("λ")]
    Lambda,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `**`
    #[token("**")]
    StarStar,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Integer(n) => return write!(f, "'{n}'"),
            Self::Str(s) => return write!(f, "{s}"),
            Self::Bool(b) => return write!(f, "'{b}'"),
            Self::Identifier(name) => return write!(f, "'{name}'"),
            Self::Unit => "unit",
            Self::Let => "let",
            Self::End => "end",
            Self::If => "if",
            Self::Then => "then",
            Self::Elseif => "elseif",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::In => "in",
            Self::Return => "return",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::IntType => "Int",
            Self::StringType => "String",
            Self::BoolType => "Bool",
            Self::UnitType => "Unit",
            Self::Arrow => "->",
            Self::Lambda => "\\",
            Self::PlusPlus => "++",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::StarStar => "**",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Comment | Self::NewLine | Self::Ignored => "whitespace",
        };
        write!(f, "'{text}'")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Converts source text into `(Token, line)` pairs.
///
/// # Errors
/// - `UnterminatedString` when a `"` has no closing quote.
/// - `LiteralTooLarge` for integer literals that do not fit in an `i64`.
/// - `UnexpectedToken` for any other unrecognised input.
///
/// # Example
/// ```
/// use tommy::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1\nx").unwrap();
///
/// assert_eq!(tokens[0], (Token::Let, 1));
/// assert_eq!(tokens[4], (Token::Identifier("x".into()), 2));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            // A multi-line string has already advanced the counter past its
            // own newlines.
            let line = lexer.extras.line - lexer.slice().matches('\n').count();
            tokens.push((tok, line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;
            if slice.starts_with('"') {
                return Err(ParseError::UnterminatedString { line });
            }
            if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::LiteralTooLarge { line });
            }
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line });
        }
    }

    Ok(tokens)
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("end ending elseif else"),
                   vec![Token::End,
                        Token::Identifier("ending".into()),
                        Token::Elseif,
                        Token::Else]);
    }

    #[test]
    fn longest_match_for_operators() {
        assert_eq!(kinds("** * ++ + -> - == = <= <"),
                   vec![Token::StarStar,
                        Token::Star,
                        Token::PlusPlus,
                        Token::Plus,
                        Token::Arrow,
                        Token::Minus,
                        Token::EqualEqual,
                        Token::Equals,
                        Token::LessEqual,
                        Token::Less]);
    }

    #[test]
    fn comments_and_newlines_advance_lines() {
        let tokens = tokenize("// header\nlet\n\n  x").unwrap();
        assert_eq!(tokens,
                   vec![(Token::Let, 2), (Token::Identifier("x".into()), 4)]);
    }

    #[test]
    fn string_literal_keeps_escapes_verbatim() {
        assert_eq!(kinds(r#""a\"b""#), vec![Token::Str(r#""a\"b""#.into())]);
    }

    #[test]
    fn unterminated_string_is_reported() {
        assert_eq!(tokenize("print(\"abc").unwrap_err(),
                   ParseError::UnterminatedString { line: 1 });
    }

    #[test]
    fn oversized_integer_is_reported() {
        assert_eq!(tokenize("99999999999999999999").unwrap_err(),
                   ParseError::LiteralTooLarge { line: 1 });
    }

    #[test]
    fn multi_line_string_keeps_its_starting_line() {
        let tokens = tokenize("let s = \"a\nb\"\nx").unwrap();

        assert_eq!(tokens[3], (Token::Str("\"a\nb\"".into()), 1));
        assert_eq!(tokens[4], (Token::Identifier("x".into()), 3));
    }
}
