use crate::Span;

use super::{
    expressions::{
        ArrayExpr, BinaryExpr, BooleanExpr, CallExpr, ConditionalExpr, EmptyArrayExpr,
        EmptyOptionalExpr, FloatExpr, IntegerExpr, MemberExpr, PrefixExpr, StringExpr,
        SubscriptExpr, SymbolExpr,
    },
    statements::{
        AssignmentStmt, BreakStmt, ExpressionStmt, FnDeclStmt, ForEachStmt, ForRangeStmt, IfStmt,
        RepeatStmt, ReturnStmt, StructDeclStmt, UpdateStmt, VarDeclStmt, WhileStmt,
    },
};

/// Statement
///
/// Every statement kind the parser can produce. The analyzer matches on this
/// exhaustively, one analysis function per variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    StructDecl(StructDeclStmt),
    FnDecl(FnDeclStmt),
    Assignment(AssignmentStmt),
    Increment(UpdateStmt),
    Decrement(UpdateStmt),
    Break(BreakStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    ForRange(ForRangeStmt),
    ForEach(ForEachStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::StructDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Increment(stmt) | Stmt::Decrement(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Repeat(stmt) => &stmt.span,
            Stmt::ForRange(stmt) => &stmt.span,
            Stmt::ForEach(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }
}

/// Expression
///
/// Every expression kind the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(IntegerExpr),
    Float(FloatExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Conditional(ConditionalExpr),
    Array(ArrayExpr),
    EmptyArray(EmptyArrayExpr),
    EmptyOptional(EmptyOptionalExpr),
    Subscript(SubscriptExpr),
    Member(MemberExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Integer(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Conditional(expr) => &expr.span,
            Expr::Array(expr) => &expr.span,
            Expr::EmptyArray(expr) => &expr.span,
            Expr::EmptyOptional(expr) => &expr.span,
            Expr::Subscript(expr) => &expr.span,
            Expr::Member(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}
