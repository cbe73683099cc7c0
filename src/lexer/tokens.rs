use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("struct", TokenKind::Struct);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("some", TokenKind::Some);
        map.insert("no", TokenKind::No);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Float,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    LeftArrow,  // <-
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    ShiftLeft,
    ShiftRight,

    Or,
    And,
    Pipe,
    Caret,
    Ampersand,

    Dot,
    QuestionDot,      // ?.
    Question,
    QuestionQuestion, // ??
    Ellipsis,         // ...
    DotDotLess,       // ..<
    Semicolon,
    Colon,
    Comma,
    Arrow,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,
    StarStar,
    Percent,
    Hash,

    // Reserved
    Let,
    Const,
    Struct,
    Fn,
    Return,
    Break,
    If,
    Else,
    While,
    Repeat,
    For,
    In,
    True,
    False,
    Some,
    No,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Identifier | TokenKind::Integer | TokenKind::Float => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
