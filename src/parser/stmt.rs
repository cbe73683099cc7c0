use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            AssignmentStmt, BlockStmt, BreakStmt, ElseBranch, ExpressionStmt, FieldDecl,
            FnDeclStmt, ForEachStmt, ForRangeStmt, IfStmt, Parameter, RangeOp, RepeatStmt,
            ReturnStmt, StructDeclStmt, UpdateStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    let start = expr.get_span().start.clone();

    match parser.current_token_kind() {
        TokenKind::Assignment | TokenKind::LeftArrow => {
            let by_reference = parser.advance().kind == TokenKind::LeftArrow;
            let value = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(Stmt::Assignment(AssignmentStmt {
                assignee: expr,
                value,
                by_reference,
                span: parser.span_from(start),
            }))
        }
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let increment = parser.advance().kind == TokenKind::PlusPlus;
            parser.expect(TokenKind::Semicolon)?;

            let stmt = UpdateStmt {
                target: expr,
                span: parser.span_from(start),
            };
            if increment {
                Ok(Stmt::Increment(stmt))
            } else {
                Ok(Stmt::Decrement(stmt))
            }
        }
        TokenKind::Semicolon => {
            if !matches!(expr, Expr::Call(_)) {
                return Err(parser.unexpected("only calls can be used as statements"));
            }
            parser.advance();

            Ok(Stmt::Expression(ExpressionStmt {
                expression: expr,
                span: parser.span_from(start),
            }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("unclosed block"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();
    let is_constant = start_token.kind == TokenKind::Const;

    let error = parser.unexpected("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let by_reference = match parser.current_token_kind() {
        TokenKind::Assignment => false,
        TokenKind::LeftArrow => true,
        _ => return Err(parser.unexpected("expected `=` or `<-` in declaration")),
    };
    parser.advance();

    let assigned_value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier,
        is_constant,
        by_reference,
        assigned_value,
        span: parser.span_from(start_token.span.start),
    }))
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut fields = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let name_token = parser.expect(TokenKind::Identifier)?;
        parser.expect(TokenKind::Colon)?;
        let explicit_type = parse_type(parser, BindingPower::Default)?;

        fields.push(FieldDecl {
            name: name_token.value,
            explicit_type,
            span: parser.span_from(name_token.span.start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::StructDecl(StructDeclStmt {
        identifier,
        fields,
        span: parser.span_from(start),
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name_token = parser.expect(TokenKind::Identifier)?;
        parser.expect(TokenKind::Colon)?;
        let explicit_type = parse_type(parser, BindingPower::Default)?;

        parameters.push(Parameter {
            name: name_token.value,
            explicit_type,
            span: parser.span_from(name_token.span.start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        identifier,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Break(BreakStmt {
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(ElseBranch::If(Box::new(parse_if(parser)?)))
        } else {
            Some(ElseBranch::Block(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let count = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::Repeat(RepeatStmt {
        count,
        body,
        span: parser.span_from(start),
    }))
}

/// Parses both `for i in a..<b { }` / `for i in a...b { }` and
/// `for x in collection { }`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected loop variable");
    let iterator = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
    parser.expect(TokenKind::In)?;

    let first = parse_expr(parser, BindingPower::Default)?;

    let operator = match parser.current_token_kind() {
        TokenKind::DotDotLess => Some(RangeOp::Exclusive),
        TokenKind::Ellipsis => Some(RangeOp::Inclusive),
        _ => None,
    };

    match operator {
        Some(operator) => {
            parser.advance();
            let high = parse_expr(parser, BindingPower::Default)?;
            let body = parse_block(parser)?;

            Ok(Stmt::ForRange(ForRangeStmt {
                iterator,
                low: first,
                operator,
                high,
                body,
                span: parser.span_from(start),
            }))
        }
        None => {
            let body = parse_block(parser)?;

            Ok(Stmt::ForEach(ForEachStmt {
                iterator,
                collection: first,
                body,
                span: parser.span_from(start),
            }))
        }
    }
}
