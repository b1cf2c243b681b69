use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Decodes a string literal token into its value.
///
/// `raw` is the literal exactly as written, quotes included. The recognised
/// escapes are `\t`, `\n`, `\"` and `\\`; any other backslash sequence is an
/// error.
///
/// # Errors
/// `InvalidEscape` naming the offending sequence.
///
/// # Example
/// ```
/// use tommy::interpreter::parser::string::parse_string_literal;
///
/// assert_eq!(parse_string_literal(r#""a\tb\\""#, 1).unwrap(), "a\tb\\");
/// assert!(parse_string_literal(r#""\q""#, 1).is_err());
/// ```
pub fn parse_string_literal(raw: &str, line: usize) -> ParseResult<String> {
    let inner = raw.strip_prefix('"')
                   .and_then(|s| s.strip_suffix('"'))
                   .ok_or(ParseError::UnterminatedString { line })?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => value.push('\t'),
            Some('n') => value.push('\n'),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some(other) => {
                return Err(ParseError::InvalidEscape { sequence: format!("\\{other}"),
                                                       line });
            },
            None => {
                return Err(ParseError::InvalidEscape { sequence: "\\".to_string(),
                                                       line });
            },
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_and_escaped() {
        assert_eq!(parse_string_literal(r#""""#, 1).unwrap(), "");
        assert_eq!(parse_string_literal(r#""say \"hi\"\n""#, 1).unwrap(), "say \"hi\"\n");
    }

    #[test]
    fn unknown_escape_names_the_sequence() {
        assert_eq!(parse_string_literal(r#""a\xb""#, 3).unwrap_err(),
                   ParseError::InvalidEscape { sequence: "\\x".to_string(),
                                               line:     3, });
    }

    #[test]
    fn raw_newlines_are_kept() {
        assert_eq!(parse_string_literal("\"a\nb\"", 1).unwrap(), "a\nb");
    }
}
