//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler for fixed-text tokens
//!
//! Both expect `Token`, `Lexer` and `Error` to be in scope at the call site.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
/// * `$newline_before` - Whether a line break precedes the token
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span, false);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr, $newline_before:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
            newline_before: $newline_before,
        }
    };
}

/// Creates a lexer handler for operators and punctuation.
///
/// The generated handler emits a token of the given kind holding the matched
/// text and advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, matched: &str| -> Result<(), Error> {
            let token = MK_TOKEN!(
                $kind,
                String::from(matched),
                lexer.span_of(matched.len()),
                lexer.take_newline()
            );
            lexer.push(token);
            lexer.advance_n(matched.len());
            Ok(())
        }
    };
}
