/// AST (Abstract Syntax Tree) module
/// Contains the untyped parse tree produced by the parser
///
/// Submodules:
/// - ast: The `Stmt` and `Expr` enums tying the node structs together
/// - expressions: Expression nodes and the operator enums
/// - statements: Statement and declaration nodes
/// - types: Type annotations as written in source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
