use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, BinaryExpr, BinaryOp, BooleanExpr, CallExpr, ConditionalExpr,
            EmptyArrayExpr, EmptyOptionalExpr, FloatExpr, IntegerExpr, MemberExpr, PrefixExpr,
            StringExpr, SubscriptExpr, SymbolExpr, UnaryOp,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                ))
            }
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => {
                parser.advance();
                Ok(Expr::Integer(IntegerExpr { value, span: token.span }))
            }
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => {
                parser.advance();
                Ok(Expr::Float(FloatExpr { value, span: token.span }))
            }
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::String => {
            parser.advance();
            Ok(Expr::String(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::True | TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(BooleanExpr {
                value: token.kind == TokenKind::True,
                span: token.span,
            }))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::Symbol(SymbolExpr {
                value: token.value,
                span: token.span,
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOp> {
    let operator = match kind {
        TokenKind::QuestionQuestion => BinaryOp::Coalesce,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Ampersand => BinaryOp::BitAnd,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEquals => BinaryOp::LessEquals,
        TokenKind::Equals => BinaryOp::Equals,
        TokenKind::NotEquals => BinaryOp::NotEquals,
        TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
        TokenKind::ShiftRight => BinaryOp::ShiftRight,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Subtract,
        TokenKind::Star => BinaryOp::Multiply,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::Percent => BinaryOp::Remainder,
        TokenKind::StarStar => BinaryOp::Power,
        _ => return None,
    };
    Some(operator)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = binary_operator(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    // `**` and `??` group to the right
    let right_bp = match operator {
        BinaryOp::Power | BinaryOp::Coalesce => bp.lower(),
        _ => bp,
    };
    let right = parse_expr(parser, right_bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_conditional_expr(
    parser: &mut Parser,
    test: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::Question)?;
    let consequent = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_expr(parser, bp.lower())?;

    Ok(Expr::Conditional(ConditionalExpr {
        span: test.get_span().to(alternate.get_span()),
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Negate,
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Hash => UnaryOp::Length,
        TokenKind::Some => UnaryOp::Some,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    // Only postfix operators bind tighter than a prefix operator
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: operator_token.span.to(rhs.get_span()),
        operator,
        right_expr: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses `[a, b, c]` or, when the brackets are empty, `[]T`.
pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;

    if parser.current_token_kind() == TokenKind::CloseBracket {
        parser.advance();
        let element_type = parse_type(parser, BindingPower::Default)?;
        return Ok(Expr::EmptyArray(EmptyArrayExpr {
            element_type,
            span: parser.span_from(start),
        }));
    }

    let mut elements = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        elements.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr {
        elements,
        span: parser.span_from(start),
    }))
}

pub fn parse_empty_optional_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::No)?.span.start;
    let base_type = parse_type(parser, BindingPower::Default)?;

    Ok(Expr::EmptyOptional(EmptyOptionalExpr {
        base_type,
        span: parser.span_from(start),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span().start.clone()),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Subscript(SubscriptExpr {
        span: parser.span_from(left.get_span().start.clone()),
        array: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let optional = parser.advance().kind == TokenKind::QuestionDot;

    let error = parser.unexpected("expected field name after `.`");
    let field = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Expr::Member(MemberExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: field.span.end,
        },
        object: Box::new(left),
        field: field.value,
        optional,
    }))
}
