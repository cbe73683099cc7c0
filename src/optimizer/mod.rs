//! Optimization module.
//!
//! A single bottom-up rewrite of the typed AST. Children are optimized
//! before their parent, then the parent's local rules are applied:
//!
//! - Constant folding of operators over literals
//! - Algebraic identities such as `x + 0` and `x * 1`
//! - Short-circuit simplification of `||`, `&&` and `??`
//! - Removal of dead branches, dead loops and self-assignments
//!
//! A statement may rewrite to any number of statements, so statement lists
//! are flattened as they are rebuilt. The pass never fails.

pub mod optimizer;
