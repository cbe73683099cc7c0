//! Error types and error handling for the compiler.
//!
//! Every stage fails fast with a single [`errors::Error`]: the lexer and
//! parser with syntax errors, the analyzer with semantic ones. The optimizer
//! never fails.

pub mod errors;
