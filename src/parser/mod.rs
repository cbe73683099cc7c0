//! Parser module for building the parse tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into the untyped tree in [`crate::ast`]. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, assignments, control flow)
//! - Expression parsing (binary ops, calls, member access, literals)
//! - Type parsing for annotations, including sum and function types
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
