use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt},
    types::TypeExpr,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// Expression Statement
/// Only calls may stand alone as statements; the parser rejects the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// Variable Declaration
///
/// `let x = e;`, `const x = e;`, or the by-reference forms using `<-`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_constant: bool,
    pub by_reference: bool,
    pub assigned_value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub explicit_type: TypeExpr,
    pub span: Span,
}

/// Struct Declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclStmt {
    pub identifier: String,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub explicit_type: TypeExpr,
    pub span: Span,
}

/// Function Declaration
///
/// A missing return type means the function returns `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
    pub body: BlockStmt,
    pub span: Span,
}

/// Assignment Statement
/// `target = value;` or, by reference, `target <- value;`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub assignee: Expr,
    pub value: Expr,
    pub by_reference: bool,
    pub span: Span,
}

/// `target++;` or `target--;`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub target: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(BlockStmt),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<ElseBranch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub count: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// Range operators for numeric `for` loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// `a..<b`
    Exclusive,
    /// `a...b`
    Inclusive,
}

/// Numeric Range Loop
/// `for i in low..<high { }` or `for i in low...high { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForRangeStmt {
    pub iterator: String,
    pub low: Expr,
    pub operator: RangeOp,
    pub high: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// Collection Loop
/// `for x in collection { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub iterator: String,
    pub collection: Expr,
    pub body: BlockStmt,
    pub span: Span,
}
