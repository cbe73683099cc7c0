//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable declarations
//! - Function and struct declarations
//! - Expressions and precedence
//! - Control flow statements
//! - Type annotations

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{BinaryOp, UnaryOp},
        statements::{BlockStmt, ElseBranch, RangeOp},
        types::TypeExpr,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<BlockStmt, Error> {
    let tokens = tokenize(source.to_string(), Some("test.br".to_string()))?;
    parse(tokens, Rc::new("test.br".to_string()))
}

fn parse_one(source: &str) -> Stmt {
    let mut program = parse_source(source).unwrap();
    assert_eq!(program.body.len(), 1);
    program.body.remove(0)
}

fn initializer(source: &str) -> Expr {
    match parse_one(source) {
        Stmt::VarDecl(decl) => decl.assigned_value,
        other => panic!("expected a declaration, got {:?}", other),
    }
}

fn binary_parts(expr: &Expr) -> (&Expr, BinaryOp, &Expr) {
    match expr {
        Expr::Binary(binary) => (binary.left.as_ref(), binary.operator, binary.right.as_ref()),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    match parse_one("let x = 42;") {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier, "x");
            assert!(!decl.is_constant);
            assert!(!decl.by_reference);
            assert!(matches!(decl.assigned_value, Expr::Integer(ref i) if i.value == 42));
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_const_reference_declaration() {
    match parse_one("const PI <- 3.14;") {
        Stmt::VarDecl(decl) => {
            assert!(decl.is_constant);
            assert!(decl.by_reference);
            assert!(matches!(decl.assigned_value, Expr::Float(_)));
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    match parse_one("fn add(a: int, b: int): int { return a + b; }") {
        Stmt::FnDecl(decl) => {
            assert_eq!(decl.identifier, "add");
            assert_eq!(decl.parameters.len(), 2);
            assert_eq!(decl.parameters[1].name, "b");
            assert!(matches!(decl.return_type, Some(TypeExpr::Named { ref name, .. }) if name == "int"));
            assert_eq!(decl.body.body.len(), 1);
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_function_without_return_type() {
    match parse_one("fn greet() { print(\"hi\"); }") {
        Stmt::FnDecl(decl) => {
            assert!(decl.parameters.is_empty());
            assert!(decl.return_type.is_none());
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_struct_definition() {
    match parse_one("struct Point { x: float, y: float, next: Point? }") {
        Stmt::StructDecl(decl) => {
            assert_eq!(decl.identifier, "Point");
            let names: Vec<&str> = decl.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["x", "y", "next"]);
            assert!(matches!(decl.fields[2].explicit_type, TypeExpr::Optional { .. }));
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_if_else_chain() {
    match parse_one("if x > 0 { print(1); } else if x < 0 { print(2); } else { print(3); }") {
        Stmt::If(stmt) => match stmt.else_body {
            Some(ElseBranch::If(inner)) => {
                assert!(matches!(inner.else_body, Some(ElseBranch::Block(_))));
            }
            other => panic!("expected else-if, got {:?}", other),
        },
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_loops() {
    let program = parse_source(
        "while x < 10 { x = x + 1; }
         repeat 3 { break; }
         for i in 0..<10 { print(i); }
         for i in 1...3 { print(i); }
         for c in chars { print(c); }",
    )
    .unwrap();

    assert!(matches!(program.body[0], Stmt::While(_)));
    assert!(matches!(program.body[1], Stmt::Repeat(_)));
    assert!(matches!(program.body[2], Stmt::ForRange(ref f) if f.operator == RangeOp::Exclusive));
    assert!(matches!(program.body[3], Stmt::ForRange(ref f) if f.operator == RangeOp::Inclusive));
    assert!(matches!(program.body[4], Stmt::ForEach(ref f) if f.iterator == "c"));
}

#[test]
fn test_parse_assignments_and_updates() {
    let program = parse_source("x = 1; y <- x; z++; w--; a[0] = 2; p.x = 3.0;").unwrap();

    assert!(matches!(program.body[0], Stmt::Assignment(ref a) if !a.by_reference));
    assert!(matches!(program.body[1], Stmt::Assignment(ref a) if a.by_reference));
    assert!(matches!(program.body[2], Stmt::Increment(_)));
    assert!(matches!(program.body[3], Stmt::Decrement(_)));
    assert!(matches!(program.body[4], Stmt::Assignment(ref a) if matches!(a.assignee, Expr::Subscript(_))));
    assert!(matches!(program.body[5], Stmt::Assignment(ref a) if matches!(a.assignee, Expr::Member(_))));
}

#[test]
fn test_parse_precedence() {
    let expr = initializer("let result = 5 + 3 * 2;");
    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOp::Add);
    assert!(matches!(left, Expr::Integer(_)));
    assert_eq!(binary_parts(right).1, BinaryOp::Multiply);
}

#[test]
fn test_parse_left_associative_subtraction() {
    let expr = initializer("let r = 10 - 4 - 3;");
    let (left, operator, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOp::Subtract);
    assert_eq!(binary_parts(left).1, BinaryOp::Subtract);
}

#[test]
fn test_parse_power_is_right_associative() {
    let expr = initializer("let r = 2 ** 3 ** 2;");
    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOp::Power);
    assert!(matches!(left, Expr::Integer(_)));
    assert_eq!(binary_parts(right).1, BinaryOp::Power);
}

#[test]
fn test_parse_prefix_binds_tighter_than_power() {
    let expr = initializer("let r = -2 ** 2;");
    let (left, operator, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOp::Power);
    assert!(matches!(left, Expr::Prefix(p) if p.operator == UnaryOp::Negate));
}

#[test]
fn test_parse_logical_expression() {
    let expr = initializer("let result = x > 0 && y < 10 || z;");
    let (left, operator, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOp::Or);
    assert_eq!(binary_parts(left).1, BinaryOp::And);
}

#[test]
fn test_parse_conditional_and_coalesce() {
    let expr = initializer("let r = a ?? b ?? c ? 1 : 2;");
    match expr {
        Expr::Conditional(conditional) => {
            let (_, operator, right) = binary_parts(&conditional.test);
            assert_eq!(operator, BinaryOp::Coalesce);
            assert_eq!(binary_parts(right).1, BinaryOp::Coalesce);
        }
        other => panic!("expected conditional, got {:?}", other),
    }
}

#[test]
fn test_parse_postfix_chain() {
    let expr = initializer("let r = a.b?.c[0](1, 2);");
    match expr {
        Expr::Call(call) => {
            assert_eq!(call.arguments.len(), 2);
            match *call.callee {
                Expr::Subscript(subscript) => match *subscript.array {
                    Expr::Member(member) => {
                        assert!(member.optional);
                        assert_eq!(member.field, "c");
                        assert!(matches!(*member.object, Expr::Member(ref m) if !m.optional));
                    }
                    other => panic!("expected member, got {:?}", other),
                },
                other => panic!("expected subscript, got {:?}", other),
            }
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_array_literals() {
    assert!(matches!(initializer("let a = [1, 2, 3];"), Expr::Array(ref a) if a.elements.len() == 3));
    assert!(matches!(initializer("let a = []int;"), Expr::EmptyArray(_)));
    assert!(matches!(initializer("let a = no string;"), Expr::EmptyOptional(_)));
    assert!(matches!(initializer("let a = some 5;"), Expr::Prefix(ref p) if p.operator == UnaryOp::Some));
}

#[test]
fn test_parse_nested_sum_type_closing() {
    match initializer("let a = []<int, <bool, float>>;") {
        Expr::EmptyArray(empty) => match empty.element_type {
            TypeExpr::Sum { alternatives, .. } => {
                assert_eq!(alternatives.len(), 2);
                assert!(matches!(alternatives[1], TypeExpr::Sum { .. }));
            }
            other => panic!("expected sum type, got {:?}", other),
        },
        other => panic!("expected empty array, got {:?}", other),
    }
}

#[test]
fn test_parse_function_type() {
    match initializer("let f = no (int, bool) -> [string];") {
        Expr::EmptyOptional(empty) => match empty.base_type {
            TypeExpr::Function { parameters, return_type, .. } => {
                assert_eq!(parameters.len(), 2);
                assert!(matches!(*return_type, TypeExpr::Array { .. }));
            }
            other => panic!("expected function type, got {:?}", other),
        },
        other => panic!("expected empty optional, got {:?}", other),
    }
}

#[test]
fn test_parse_function_call() {
    assert!(matches!(parse_one("print(\"Hello, World!\");"), Stmt::Expression(_)));
}

#[test]
fn test_parse_rejects_non_call_expression_statement() {
    let error = parse_source("x + 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert!(error.is_syntax_error());
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("let x = 1\nlet y = 2;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 1);
}

#[test]
fn test_parse_integer_overflow() {
    let error = parse_source("let x = 99999999999999999999;").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_parse_unclosed_block() {
    let error = parse_source("while true { print(1);").unwrap_err();
    assert!(error.is_syntax_error());
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_source("").unwrap().body.is_empty());
}
