#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    analyzer::{analyzer::Analyzer, stdlib::Stdlib, typed_ast::Program},
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod context;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;
pub mod types;

extern crate regex;

/// A location in a source file. Lines and columns start at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position { offset, line, column, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span { start: Position::null(), end: Position::null() }
    }

    pub fn to(&self, other: &Span) -> Span {
        Span { start: self.start.clone(), end: other.end.clone() }
    }
}

/// Tokenizes and parses `source` into the untyped parse tree.
pub fn parse_source(source: &str, file: Option<&str>) -> Result<BlockStmt, Error> {
    let file_name = String::from(file.unwrap_or("shell"));
    let tokens = tokenize(String::from(source), Some(file_name.clone()))?;
    parse(tokens, Rc::new(file_name))
}

/// Runs the front end and the semantic analyzer with the standard library.
pub fn analyze_source(source: &str, file: Option<&str>) -> Result<Program, Error> {
    let ast = parse_source(source, file)?;
    Analyzer::new(Stdlib::standard()).analyze(ast)
}

/// Runs the full pipeline: parse, analyze, optimize.
pub fn optimize_source(source: &str, file: Option<&str>) -> Result<Program, Error> {
    Ok(optimize(analyze_source(source, file)?))
}

pub fn get_line_at_position(source: &str, position: &Position) -> Option<(usize, String, usize)> {
    if position.line == 0 {
        return None;
    }

    let line_number = position.line as usize;
    let line = source.split_inclusive('\n').nth(line_number - 1)?;
    Some((line_number, line.to_string(), position.column.saturating_sub(1) as usize))
}

/// Renders an error as a caret diagnostic:
///
/// ```text
/// Error: UndeclaredIdentifier (identifier `y` is not declared)
/// -> main.br
///   |
/// 2 | print(y);
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let mut out = String::new();
    let position = error.get_position();

    match error.get_tip() {
        ErrorTip::None => out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.message())),
        tip => out.push_str(&format!("Error: {} ({}, {})\n", error.get_error_name(), error.message(), tip)),
    }
    out.push_str(&format!("-> {}\n", position.file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
