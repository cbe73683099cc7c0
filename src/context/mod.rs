//! The scope table.
//!
//! A [`context::Context`] is a stack of lexical scopes. Names resolve
//! innermost first; redeclaring a name is only an error within one scope.

pub mod context;
