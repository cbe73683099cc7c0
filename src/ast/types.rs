//! Type annotations as written in source.
//!
//! These are resolved into [`crate::types::types::Type`] by the analyzer,
//! which looks every named type up in the scope table.

use crate::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A type name such as `int` or a struct name.
    Named { name: String, span: Span },
    /// `[T]`
    Array { element: Box<TypeExpr>, span: Span },
    /// `T?`
    Optional { base: Box<TypeExpr>, span: Span },
    /// `<A, B, ...>`
    Sum { alternatives: Vec<TypeExpr>, span: Span },
    /// `(A, B) -> R`
    Function {
        parameters: Vec<TypeExpr>,
        return_type: Box<TypeExpr>,
        span: Span,
    },
}

impl TypeExpr {
    pub fn get_span(&self) -> &Span {
        match self {
            TypeExpr::Named { span, .. }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Optional { span, .. }
            | TypeExpr::Sum { span, .. }
            | TypeExpr::Function { span, .. } => span,
        }
    }
}
