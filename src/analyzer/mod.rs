//! Semantic analysis module.
//!
//! This module checks the parse tree and turns it into the typed AST in
//! [`typed_ast`] while:
//!
//! - Resolving every identifier through the scope table
//! - Giving every expression its type and checking operand types
//! - Checking assignments, calls and constructors with assignability
//! - Validating `break` and `return` against their enclosing loop or function
//!
//! Analysis stops at the first error. The names visible before any user
//! declaration come from a [`stdlib::Stdlib`].

pub mod analyzer;
pub mod stdlib;
pub mod typed_ast;
