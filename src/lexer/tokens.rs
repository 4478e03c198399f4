use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Reserved words. None of these can be used as an identifier.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("fun", TokenKind::Fun);
        map.insert("class", TokenKind::Class);
        map.insert("end", TokenKind::End);
        map.insert("do", TokenKind::Do);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("import", TokenKind::Import);
        map.insert("external", TokenKind::External);
        map.insert("as", TokenKind::As);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map
    };

    /// Literal words, matched case-insensitively (`True`, `NIL`, ...).
    pub static ref LITERAL_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("nil", TokenKind::Nil);
        map
    };
}

/// True if `name` can not be used as a variable name.
pub fn is_keyword(name: &str) -> bool {
    RESERVED_LOOKUP.contains_key(name) || LITERAL_LOOKUP.contains_key(name.to_ascii_lowercase().as_str())
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,
    True,
    False,
    Nil,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Comma,
    Colon,
    Semicolon,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Caret,

    // Reserved
    And,
    Or,
    Not,
    Let,
    Fun,
    Class,
    End,
    Do,
    If,
    Else,
    For,
    In,
    While,
    Return,
    Import,
    External,
    As,
}

impl TokenKind {
    /// How the kind is named in "expected ..." messages.
    pub fn describe(&self) -> String {
        let text = match self {
            TokenKind::EOF => return String::from("end of input"),
            TokenKind::Number => return String::from("number"),
            TokenKind::String => return String::from("string"),
            TokenKind::Identifier => return String::from("identifier"),
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Let => "let",
            TokenKind::Fun => "fun",
            TokenKind::Class => "class",
            TokenKind::End => "end",
            TokenKind::Do => "do",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::Import => "import",
            TokenKind::External => "external",
            TokenKind::As => "as",
        };

        format!("`{}`", text)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source lexeme; for strings the raw text between the quotes.
    pub value: String,
    pub span: Span,
    /// A line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// How the token is named in "found ..." messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => self.kind.describe(),
            TokenKind::String => format!("string \"{}\"", self.value),
            _ => format!("`{}`", self.value),
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
