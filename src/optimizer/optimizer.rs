use std::rc::Rc;

use tracing::{debug, instrument};

use crate::{
    analyzer::typed_ast::{Expr, Literal, Program, Stmt},
    ast::{
        expressions::{BinaryOp, UnaryOp},
        statements::RangeOp,
    },
    types::types::Type,
};

/// Optimizes a whole program. The struct table is passed through untouched.
#[instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
pub fn optimize(program: Program) -> Program {
    let statements = optimize_stmts(program.statements);
    debug!(statements = statements.len(), "optimization finished");

    Program {
        statements,
        types: program.types,
    }
}

fn optimize_stmts(stmts: Vec<Stmt>) -> Vec<Stmt> {
    stmts.into_iter().flat_map(optimize_stmt).collect()
}

fn is_literal_bool(expr: &Expr, value: bool) -> bool {
    matches!(expr.as_literal(), Some(Literal::Bool(b)) if *b == value)
}

fn is_literal_number(expr: &Expr, value: i64) -> bool {
    match expr.as_literal() {
        Some(Literal::Int(n)) => *n == value,
        Some(Literal::Float(f)) => *f == value as f64,
        _ => false,
    }
}

/// A numeric literal of type `ty` with the given value.
fn number_like(ty: &Type, value: i64) -> Expr {
    if *ty == Type::FLOAT {
        Expr::float(value as f64)
    } else {
        Expr::int(value)
    }
}

fn is_self_assignment(target: &Expr, source: &Expr) -> bool {
    matches!((target, source), (Expr::Variable(a), Expr::Variable(b)) if Rc::ptr_eq(a, b))
}

/// Whether a range loop over literal bounds runs zero times.
fn is_empty_range(low: &Expr, op: RangeOp, high: &Expr) -> bool {
    match (low.as_literal(), high.as_literal()) {
        (Some(Literal::Int(low)), Some(Literal::Int(high))) => match op {
            RangeOp::Exclusive => low >= high,
            RangeOp::Inclusive => low > high,
        },
        _ => false,
    }
}

fn optimize_stmt(stmt: Stmt) -> Vec<Stmt> {
    match stmt {
        Stmt::ValueDecl {
            variable,
            initializer,
        } => vec![Stmt::ValueDecl {
            variable,
            initializer: optimize_expr(initializer),
        }],
        Stmt::ReferenceDecl {
            variable,
            initializer,
        } => vec![Stmt::ReferenceDecl {
            variable,
            initializer: optimize_expr(initializer),
        }],
        Stmt::FunctionDecl {
            function,
            parameters,
            body,
        } => vec![Stmt::FunctionDecl {
            function,
            parameters,
            body: optimize_stmts(body),
        }],
        Stmt::AssignValue { target, source } => {
            let target = optimize_expr(target);
            let source = optimize_expr(source);
            if is_self_assignment(&target, &source) {
                debug!(rule = "self-assignment", "removed statement");
                return vec![];
            }
            vec![Stmt::AssignValue { target, source }]
        }
        Stmt::AssignReference { target, source } => {
            let target = optimize_expr(target);
            let source = optimize_expr(source);
            if is_self_assignment(&target, &source) {
                debug!(rule = "self-assignment", "removed statement");
                return vec![];
            }
            vec![Stmt::AssignReference { target, source }]
        }
        Stmt::Increment(target) => vec![Stmt::Increment(optimize_expr(target))],
        Stmt::Decrement(target) => vec![Stmt::Decrement(optimize_expr(target))],
        Stmt::Return(value) => vec![Stmt::Return(optimize_expr(value))],
        Stmt::If {
            test,
            consequent,
            alternate,
        } => {
            let test = optimize_expr(test);
            let consequent = optimize_stmts(consequent);
            let alternate = optimize_stmts(alternate);

            match test.as_literal() {
                Some(Literal::Bool(true)) => {
                    debug!(rule = "dead-branch", "kept consequent");
                    consequent
                }
                Some(Literal::Bool(false)) => {
                    debug!(rule = "dead-branch", "kept alternate");
                    alternate
                }
                _ => vec![Stmt::If {
                    test,
                    consequent,
                    alternate,
                }],
            }
        }
        Stmt::ShortIf { test, consequent } => {
            let test = optimize_expr(test);
            let consequent = optimize_stmts(consequent);

            match test.as_literal() {
                Some(Literal::Bool(true)) => {
                    debug!(rule = "dead-branch", "kept consequent");
                    consequent
                }
                Some(Literal::Bool(false)) => {
                    debug!(rule = "dead-branch", "removed statement");
                    vec![]
                }
                _ => vec![Stmt::ShortIf { test, consequent }],
            }
        }
        Stmt::While { test, body } => {
            let test = optimize_expr(test);
            if is_literal_bool(&test, false) {
                debug!(rule = "dead-loop", "removed while");
                return vec![];
            }
            vec![Stmt::While {
                test,
                body: optimize_stmts(body),
            }]
        }
        Stmt::Repeat { count, body } => {
            let count = optimize_expr(count);
            if matches!(count.as_literal(), Some(Literal::Int(n)) if *n <= 0) {
                debug!(rule = "dead-loop", "removed repeat");
                return vec![];
            }
            vec![Stmt::Repeat {
                count,
                body: optimize_stmts(body),
            }]
        }
        Stmt::ForRange {
            iterator,
            low,
            op,
            high,
            body,
        } => {
            let low = optimize_expr(low);
            let high = optimize_expr(high);
            if is_empty_range(&low, op, &high) {
                debug!(rule = "dead-loop", "removed range loop");
                return vec![];
            }
            vec![Stmt::ForRange {
                iterator,
                low,
                op,
                high,
                body: optimize_stmts(body),
            }]
        }
        Stmt::ForEach {
            iterator,
            collection,
            body,
        } => {
            let collection = optimize_expr(collection);
            if matches!(collection, Expr::EmptyArray { .. }) {
                debug!(rule = "dead-loop", "removed collection loop");
                return vec![];
            }
            vec![Stmt::ForEach {
                iterator,
                collection,
                body: optimize_stmts(body),
            }]
        }
        Stmt::Call(call) => vec![Stmt::Call(optimize_expr(call))],
        Stmt::TypeDecl(_) | Stmt::Break | Stmt::ShortReturn => vec![stmt],
    }
}

fn optimize_boxed(expr: Box<Expr>) -> Box<Expr> {
    Box::new(optimize_expr(*expr))
}

fn optimize_exprs(exprs: Vec<Expr>) -> Vec<Expr> {
    exprs.into_iter().map(optimize_expr).collect()
}

pub fn optimize_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Conditional {
            test,
            consequent,
            alternate,
            ty,
        } => {
            let test = optimize_expr(*test);
            let consequent = optimize_expr(*consequent);
            let alternate = optimize_expr(*alternate);

            match test.as_literal() {
                Some(Literal::Bool(true)) => {
                    debug!(rule = "conditional", "kept consequent");
                    consequent
                }
                Some(Literal::Bool(false)) => {
                    debug!(rule = "conditional", "kept alternate");
                    alternate
                }
                _ => Expr::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                    ty,
                },
            }
        }
        Expr::Binary {
            op,
            left,
            right,
            ty,
        } => optimize_binary(op, optimize_expr(*left), optimize_expr(*right), ty),
        Expr::Unary { op, operand, ty } => optimize_unary(op, optimize_expr(*operand), ty),
        Expr::Array { elements, ty } => Expr::Array {
            elements: optimize_exprs(elements),
            ty,
        },
        Expr::Subscript { array, index, ty } => Expr::Subscript {
            array: optimize_boxed(array),
            index: optimize_boxed(index),
            ty,
        },
        Expr::Member {
            object,
            field,
            optional_chain,
            ty,
        } => Expr::Member {
            object: optimize_boxed(object),
            field,
            optional_chain,
            ty,
        },
        Expr::Call {
            callee,
            arguments,
            ty,
        } => Expr::Call {
            callee: optimize_boxed(callee),
            arguments: optimize_exprs(arguments),
            ty,
        },
        Expr::Construct { id, arguments } => Expr::Construct {
            id,
            arguments: optimize_exprs(arguments),
        },
        Expr::Literal(_)
        | Expr::EmptyArray { .. }
        | Expr::EmptyOptional { .. }
        | Expr::Variable(_)
        | Expr::Function(_) => expr,
    }
}

fn optimize_binary(op: BinaryOp, left: Expr, right: Expr, ty: Type) -> Expr {
    if let (Some(l), Some(r)) = (left.as_literal(), right.as_literal()) {
        if let Some(folded) = fold_binary(op, l, r) {
            debug!(rule = "fold", operator = %op, "folded binary expression");
            return Expr::Literal(folded);
        }
        // Unfoldable literal pairs are left for run time.
        return Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        };
    }

    let simplified = match op {
        BinaryOp::Add if is_literal_number(&right, 0) => left,
        BinaryOp::Add if is_literal_number(&left, 0) => right,
        BinaryOp::Subtract if is_literal_number(&right, 0) => left,
        BinaryOp::Subtract if is_literal_number(&left, 0) => Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(right),
            ty,
        },
        BinaryOp::Multiply if is_literal_number(&right, 1) => left,
        BinaryOp::Multiply if is_literal_number(&left, 1) => right,
        BinaryOp::Multiply if is_literal_number(&left, 0) || is_literal_number(&right, 0) => {
            number_like(&ty, 0)
        }
        BinaryOp::Divide if is_literal_number(&right, 1) => left,
        BinaryOp::Divide if is_literal_number(&left, 0) => number_like(&ty, 0),
        BinaryOp::Power if is_literal_number(&left, 1) || is_literal_number(&right, 0) => {
            number_like(&ty, 1)
        }
        BinaryOp::Or if is_literal_bool(&left, false) => right,
        BinaryOp::Or if is_literal_bool(&right, false) => left,
        BinaryOp::Or if is_literal_bool(&left, true) => Expr::boolean(true),
        BinaryOp::And if is_literal_bool(&left, true) => right,
        BinaryOp::And if is_literal_bool(&right, true) => left,
        BinaryOp::And if is_literal_bool(&left, false) => Expr::boolean(false),
        BinaryOp::Coalesce if matches!(left, Expr::EmptyOptional { .. }) => right,
        _ => {
            return Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                ty,
            }
        }
    };

    debug!(rule = "identity", operator = %op, "simplified binary expression");
    simplified
}

fn optimize_unary(op: UnaryOp, operand: Expr, ty: Type) -> Expr {
    let folded = match (op, operand.as_literal()) {
        (UnaryOp::Negate, Some(Literal::Int(n))) => n.checked_neg().map(Literal::Int),
        (UnaryOp::Negate, Some(Literal::Float(f))) => Some(Literal::Float(-f)),
        (UnaryOp::Not, Some(Literal::Bool(b))) => Some(Literal::Bool(!b)),
        (UnaryOp::Length, None) if matches!(operand, Expr::EmptyArray { .. }) => {
            Some(Literal::Int(0))
        }
        _ => None,
    };

    match folded {
        Some(literal) => {
            debug!(rule = "fold", operator = %op, "folded unary expression");
            Expr::Literal(literal)
        }
        None => Expr::Unary {
            op,
            operand: Box::new(operand),
            ty,
        },
    }
}

fn fold_binary(op: BinaryOp, left: &Literal, right: &Literal) -> Option<Literal> {
    match (left, right) {
        (Literal::Int(a), Literal::Int(b)) => fold_int(op, *a, *b),
        (Literal::Float(a), Literal::Float(b)) => fold_float(op, *a, *b),
        (Literal::Str(a), Literal::Str(b)) => fold_string(op, a, b),
        (Literal::Bool(a), Literal::Bool(b)) => fold_bool(op, *a, *b),
        _ => None,
    }
}

/// Integer folding gives up on overflow, zero divisors, negative exponents
/// and shifts of 64 bits or more, leaving the expression for run time.
fn fold_int(op: BinaryOp, a: i64, b: i64) -> Option<Literal> {
    let value = match op {
        BinaryOp::Add => a.checked_add(b)?,
        BinaryOp::Subtract => a.checked_sub(b)?,
        BinaryOp::Multiply => a.checked_mul(b)?,
        BinaryOp::Divide => a.checked_div(b)?,
        BinaryOp::Remainder => a.checked_rem(b)?,
        BinaryOp::Power => a.checked_pow(u32::try_from(b).ok()?)?,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::BitAnd => a & b,
        BinaryOp::ShiftLeft => a.checked_shl(u32::try_from(b).ok()?)?,
        BinaryOp::ShiftRight => a.checked_shr(u32::try_from(b).ok()?)?,
        _ => return compare(op, &a, &b),
    };
    Some(Literal::Int(value))
}

fn fold_float(op: BinaryOp, a: f64, b: f64) -> Option<Literal> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => a / b,
        BinaryOp::Remainder => a % b,
        BinaryOp::Power => a.powf(b),
        _ => return compare(op, &a, &b),
    };
    // NaN compares unequal to itself.
    if value.is_nan() {
        return None;
    }
    Some(Literal::Float(value))
}

fn fold_string(op: BinaryOp, a: &str, b: &str) -> Option<Literal> {
    match op {
        BinaryOp::Add => Some(Literal::Str(format!("{}{}", a, b))),
        _ => compare(op, a, b),
    }
}

fn fold_bool(op: BinaryOp, a: bool, b: bool) -> Option<Literal> {
    match op {
        BinaryOp::Or => Some(Literal::Bool(a || b)),
        BinaryOp::And => Some(Literal::Bool(a && b)),
        BinaryOp::Equals => Some(Literal::Bool(a == b)),
        BinaryOp::NotEquals => Some(Literal::Bool(a != b)),
        _ => None,
    }
}

fn compare<T: PartialOrd + ?Sized>(op: BinaryOp, a: &T, b: &T) -> Option<Literal> {
    let result = match op {
        BinaryOp::Less => a < b,
        BinaryOp::LessEquals => a <= b,
        BinaryOp::Equals => a == b,
        BinaryOp::NotEquals => a != b,
        BinaryOp::GreaterEquals => a >= b,
        BinaryOp::Greater => a > b,
        _ => return None,
    };
    Some(Literal::Bool(result))
}
