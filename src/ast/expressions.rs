use std::fmt::Display;

use crate::Span;

use super::{ast::Expr, types::TypeExpr};

/// Binary operators, shared by the parse tree and the typed AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Coalesce,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Less,
    LessEquals,
    Equals,
    NotEquals,
    GreaterEquals,
    Greater,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Coalesce => "??",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Greater => ">",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
            BinaryOp::Power => "**",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Prefix operators, shared by the parse tree and the typed AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
    Length,
    Some,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Length => write!(f, "#"),
            UnaryOp::Some => write!(f, "some"),
        }
    }
}

// LITERALS

/// Integer Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i64,
    pub span: Span,
}

/// Float Expression
#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

/// String Expression
/// Holds the literal with escapes already resolved by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions and types.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPOUND

/// Binary Expression
/// Represents a binary operation, including `??`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Prefix Expression
/// Represents `-e`, `!e`, `#e` and `some e`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: UnaryOp,
    pub right_expr: Box<Expr>,
    pub span: Span,
}

/// Conditional Expression
/// Represents `test ? consequent : alternate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

/// Array Expression
/// A non-empty array literal `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

/// Empty Array Expression
/// `[]T`, an empty array whose element type is written out.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyArrayExpr {
    pub element_type: TypeExpr,
    pub span: Span,
}

/// Empty Optional Expression
/// `no T`, the absent value of `T?`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyOptionalExpr {
    pub base_type: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Member Expression
/// `object.field`, or `object?.field` when `optional` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub field: String,
    pub optional: bool,
    pub span: Span,
}

/// Call Expression
/// A function call or, when the callee names a struct, a constructor call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
