use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A single, located compilation failure. Compilation stops at the first one.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    /// Syntax errors come from the lexer and parser, before analysis starts.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::UnexpectedTokenDetailed { .. }
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ExpectedTypeClass { .. } => "ExpectedTypeClass",
            ErrorImpl::OperandMismatch { .. } => "OperandMismatch",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::InvalidLoopExit => "InvalidLoopExit",
            ErrorImpl::InvalidReturn { .. } => "InvalidReturn",
            ErrorImpl::RecursiveStructType { .. } => "RecursiveStructType",
            ErrorImpl::DuplicateField { .. } => "DuplicateField",
            ErrorImpl::UnknownMember { .. } => "UnknownMember",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::ExpectedValue { .. } => "ExpectedValue",
            ErrorImpl::ReadOnlyAssignment { .. } => "ReadOnlyAssignment",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::NumberParseError { .. } => {
                ErrorTip::Suggestion(String::from("is it above the integer limit?"))
            }
            ErrorImpl::DuplicateDeclaration { .. } => ErrorTip::Suggestion(String::from(
                "names may only be reused inside a nested block",
            )),
            ErrorImpl::InvalidLoopExit => ErrorTip::Suggestion(String::from(
                "a function body does not inherit the loop it is declared in",
            )),
            ErrorImpl::RecursiveStructType { name } => {
                ErrorTip::Suggestion(format!("use an optional field such as `{}?`", name))
            }
            ErrorImpl::ReadOnlyAssignment {
                name,
                is_function: false,
            } => ErrorTip::Suggestion(format!("declare `{}` with `let` to make it writable", name)),
            ErrorImpl::ReadOnlyAssignment {
                name,
                is_function: true,
            } => ErrorTip::Suggestion(format!(
                "`{}` is a function; hold it in a `let` variable to reassign it",
                name
            )),
            ErrorImpl::ExpectedValue {
                name,
                is_struct: true,
            } => ErrorTip::Suggestion(format!("construct a value with `{}(...)`", name)),
            ErrorImpl::ExpectedValue {
                name,
                is_struct: false,
            } => ErrorTip::Suggestion(format!("use a literal or variable of type `{}`", name)),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.line == 0 {
            write!(f, "{}", self.internal_error)
        } else {
            write!(
                f,
                "{}:{}:{}: {}",
                self.position.file, self.position.line, self.position.column, self.internal_error
            )
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Semantic
    #[error("identifier `{name}` is not declared")]
    UndeclaredIdentifier { name: String },
    #[error("identifier `{name}` is already declared")]
    DuplicateDeclaration { name: String },
    #[error("cannot assign a {received} to a {expected}")]
    TypeMismatch { expected: String, received: String },
    #[error("expected {expected}, found {received}")]
    ExpectedTypeClass { expected: &'static str, received: String },
    #[error("operands do not have the same type: {left} and {right}")]
    OperandMismatch { left: String, right: String },
    #[error("{expected} argument(s) required but {received} passed")]
    ArityMismatch { expected: usize, received: usize },
    #[error("break can only appear in a loop")]
    InvalidLoopExit,
    #[error("{reason}")]
    InvalidReturn { reason: &'static str },
    #[error("struct type `{name}` must not be recursive")]
    RecursiveStructType { name: String },
    #[error("field `{field}` declared more than once in `{name}`")]
    DuplicateField { name: String, field: String },
    #[error("no such field `{field}` on {type_}")]
    UnknownMember { field: String, type_: String },
    #[error("cannot call a value of type {type_}")]
    NotCallable { type_: String },
    #[error("type expected, `{name}` is not a type")]
    NotAType { name: String },
    #[error("type `{name}` cannot be used as a value")]
    ExpectedValue { name: String, is_struct: bool },
    #[error("cannot assign to read-only `{name}`")]
    ReadOnlyAssignment { name: String, is_function: bool },
    #[error("only variables, subscripts and fields can be assigned to")]
    InvalidAssignmentTarget,
}
