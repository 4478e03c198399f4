use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, DEFAULT_FILE_NAME, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, LITERAL_LOOKUP, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Tried in order; the first pattern matching at the cursor wins, so
    /// longer operators are listed before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*?)\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new(r#"^"(?:[^"\\]|\\(?s:.))*""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^'(?:[^'\\]|\\(?s:.))*'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r#"^["']"#).unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new(r"^[0-9][0-9A-Za-z_]*(?:\.[0-9][0-9A-Za-z_]*)*").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket) },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket) },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly) },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly) },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen) },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen) },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals) },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals) },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment) },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals) },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals) },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot) },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon) },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon) },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash) },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent) },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret) },
    ];
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    file: Rc<String>,
    newline_pending: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from(DEFAULT_FILE_NAME))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
            newline_pending: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &'a str {
        let source = self.source;
        &source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span of the next `len` bytes.
    ///
    /// Offsets fit in a `u32`; `tokenize_from` rejects longer buffers first.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    /// Span from the cursor to the end of input.
    fn span_to_end(&self) -> Span {
        self.span_of(self.source.len() - self.pos)
    }

    /// Reports and clears whether a line break was skipped since the last
    /// token.
    pub fn take_newline(&mut self) -> bool {
        std::mem::take(&mut self.newline_pending)
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if matched.contains('\n') {
        lexer.newline_pending = true;
    }
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_comment_handler(lexer: &mut Lexer, _matched: &str) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedComment, lexer.span_to_end()))
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: &str) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedString, lexer.span_to_end()))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let token = MK_TOKEN!(
        TokenKind::Number,
        String::from(matched),
        lexer.span_of(matched.len()),
        lexer.take_newline()
    );
    lexer.push(token);
    lexer.advance_n(matched.len());
    Ok(())
}

// Escapes are decoded later by the literal recognizer; the token keeps the
// raw text between the quotes.
fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let inner = &matched[1..matched.len() - 1];

    let token = MK_TOKEN!(
        TokenKind::String,
        String::from(inner),
        lexer.span_of(matched.len()),
        lexer.take_newline()
    );
    lexer.push(token);
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let kind = if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        *kind
    } else if let Some(kind) = LITERAL_LOOKUP.get(matched.to_ascii_lowercase().as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    let token = MK_TOKEN!(
        kind,
        String::from(matched),
        lexer.span_of(matched.len()),
        lexer.take_newline()
    );
    lexer.push(token);
    lexer.advance_n(matched.len());
    Ok(())
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    tokenize_from(source, file, 0)
}

/// Fails if byte offsets into a buffer of `len` bytes would not fit a span.
pub fn check_source_len(len: usize, file: Rc<String>) -> Result<(), Error> {
    if u32::try_from(len).is_ok() {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::SourceTooLarge { len },
        Span {
            start: Position(0, Rc::clone(&file)),
            end: Position(0, file),
        },
    ))
}

/// Tokenizes `source[offset..]`, keeping spans relative to the whole buffer.
pub fn tokenize_from(source: &str, file: Option<String>, offset: usize) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    check_source_len(source.len(), Rc::clone(&lex.file))?;

    if offset > source.len() || !source.is_char_boundary(offset) {
        lex.advance_n(offset.min(source.len()));
        return Err(Error::new(ErrorImpl::InvalidOffset { offset }, lex.span_of(0)));
    }
    lex.advance_n(offset);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(remainder) {
                (pattern.handler)(&mut lex, found.as_str())?;
                matched = true;
                break;
            }
        }

        if !matched {
            let token = remainder.chars().next().map(String::from).unwrap_or_default();
            let span = lex.span_of(token.len());
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, span));
        }
    }

    let eof = MK_TOKEN!(TokenKind::EOF, String::from("EOF"), lex.span_of(0), lex.take_newline());
    lex.push(eof);

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
