//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Named types (`int`, struct names)
//! - Array types (`[T]`)
//! - Optional types (`T?`)
//! - Sum types (`<A, B>`)
//! - Function types (`(A, B) -> R`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::TypeExpr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeExpr, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeExpr, BindingPower) -> Result<TypeExpr, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
    parser.type_nud(TokenKind::Less, parse_sum_type);
    parser.type_nud(TokenKind::OpenParen, parse_function_type);
    parser.type_led(TokenKind::Question, BindingPower::Call, parse_optional_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeExpr::Named {
        name: token.value,
        span: token.span,
    })
}

pub fn parse_array_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let element = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeExpr::Array {
        element: Box::new(element),
        span: parser.span_from(start),
    })
}

pub fn parse_sum_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.expect(TokenKind::Less)?.span.start;

    let mut alternatives = vec![parse_type(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        alternatives.push(parse_type(parser, BindingPower::Default)?);
    }

    // `<a, <b, c>>` lexes its closing brackets as a single `>>`
    parser.split_shift_right();
    parser.expect(TokenKind::Greater)?;

    Ok(TypeExpr::Sum {
        alternatives,
        span: parser.span_from(start),
    })
}

pub fn parse_function_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_type(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let return_type = parse_type(parser, BindingPower::Default)?;

    Ok(TypeExpr::Function {
        parameters,
        return_type: Box::new(return_type),
        span: parser.span_from(start),
    })
}

pub fn parse_optional_type(
    parser: &mut Parser,
    left: TypeExpr,
    _bp: BindingPower,
) -> Result<TypeExpr, Error> {
    parser.expect(TokenKind::Question)?;
    let span = parser.span_from(left.get_span().start.clone());

    Ok(TypeExpr::Optional {
        base: Box::new(left),
        span,
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeExpr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a type"),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => break,
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}
