//! Typed Abstract Syntax Tree definitions.
//!
//! This module contains the nodes produced by the analyzer and rewritten by
//! the optimizer. Unlike the parse tree:
//!
//! - Every expression knows its type
//! - Identifiers are resolved to the shared [`Variable`] or [`Function`]
//! - Struct types are referenced by id into the program's [`TypeTable`]
//!
//! Nodes carry no source positions, so two trees compare equal whenever
//! they describe the same program.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{BinaryOp, UnaryOp},
        statements::RangeOp,
    },
    context::context::{Function, Variable},
    types::types::{StructId, Type, TypeTable},
};

/// An analyzed program together with the struct types it declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub types: TypeTable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let x = e;` / `const x = e;`
    ValueDecl {
        variable: Rc<Variable>,
        initializer: Expr,
    },
    /// `let x <- e;` / `const x <- e;`
    ReferenceDecl {
        variable: Rc<Variable>,
        initializer: Expr,
    },
    TypeDecl(StructId),
    FunctionDecl {
        function: Rc<Function>,
        parameters: Vec<Rc<Variable>>,
        body: Vec<Stmt>,
    },
    AssignValue {
        target: Expr,
        source: Expr,
    },
    AssignReference {
        target: Expr,
        source: Expr,
    },
    Increment(Expr),
    Decrement(Expr),
    Break,
    Return(Expr),
    ShortReturn,
    If {
        test: Expr,
        consequent: Vec<Stmt>,
        alternate: Vec<Stmt>,
    },
    /// An `if` without an `else`.
    ShortIf {
        test: Expr,
        consequent: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    Repeat {
        count: Expr,
        body: Vec<Stmt>,
    },
    ForRange {
        iterator: Rc<Variable>,
        low: Expr,
        op: RangeOp,
        high: Expr,
        body: Vec<Stmt>,
    },
    ForEach {
        iterator: Rc<Variable>,
        collection: Expr,
        body: Vec<Stmt>,
    },
    /// A call evaluated for its effect.
    Call(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Int(_) => Type::INT,
            Literal::Float(_) => Type::FLOAT,
            Literal::Str(_) => Type::STRING,
            Literal::Bool(_) => Type::BOOL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
        ty: Type,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: Type,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        ty: Type,
    },
    Array {
        elements: Vec<Expr>,
        ty: Type,
    },
    /// `[]T`; `ty` is the array type.
    EmptyArray {
        ty: Type,
    },
    /// `no T`; `ty` is the optional type.
    EmptyOptional {
        ty: Type,
    },
    Subscript {
        array: Box<Expr>,
        index: Box<Expr>,
        ty: Type,
    },
    Member {
        object: Box<Expr>,
        field: String,
        optional_chain: bool,
        ty: Type,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        ty: Type,
    },
    Construct {
        id: StructId,
        arguments: Vec<Expr>,
    },
    Variable(Rc<Variable>),
    Function(Rc<Function>),
}

impl Expr {
    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Expr {
        Expr::Literal(Literal::Float(value))
    }

    pub fn string(value: &str) -> Expr {
        Expr::Literal(Literal::Str(String::from(value)))
    }

    pub fn boolean(value: bool) -> Expr {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn ty(&self) -> Type {
        match self {
            Expr::Literal(literal) => literal.ty(),
            Expr::Conditional { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Array { ty, .. }
            | Expr::EmptyArray { ty }
            | Expr::EmptyOptional { ty }
            | Expr::Subscript { ty, .. }
            | Expr::Member { ty, .. }
            | Expr::Call { ty, .. } => ty.clone(),
            Expr::Construct { id, .. } => Type::Struct(*id),
            Expr::Variable(variable) => variable.ty.clone(),
            Expr::Function(function) => function.as_type(),
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}
