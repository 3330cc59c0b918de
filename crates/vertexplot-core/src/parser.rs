//! Single-pass parser for free-form vertex text.
//!
//! Floats are separated by whitespace, commas or any other non-numeric
//! character; vertices by newlines; sets by top-level braces. `{ .. }`
//! makes a closed polygon, `[ .. ]` an open polyline and `( .. )` a plain
//! group. Malformed input never aborts the scan: brace problems come back
//! as [`ParseError`]s next to whatever geometry could be read.

use crate::model::VertexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseErrorKind {
    #[error("closing brace without an opening brace")]
    UnmatchedBrace,
    #[error("closing brace does not match the open brace")]
    MismatchedBrace,
    #[error("brace is never closed")]
    UnclosedBrace,
}

/// A diagnostic span in the parsed text. `position` and `length` count
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub position: usize,
    pub length: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Report braces still open at end of input.
    pub strict_braces: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub sets: Vec<VertexSet>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn vertex_count(&self) -> usize {
        self.sets.iter().map(VertexSet::len).sum()
    }
}

pub fn parse(text: &str) -> ParseOutput {
    parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions) -> ParseOutput {
    let mut parser = VertexParser::new();
    for (position, c) in text.chars().enumerate() {
        parser.feed(position, c.to_ascii_lowercase());
    }
    let output = parser.finish(options);

    debug!(
        sets = output.sets.len(),
        vertices = output.vertex_count(),
        errors = output.errors.len(),
        "parsed vertex text"
    );
    if !output.errors.is_empty() {
        warn!(errors = output.errors.len(), "vertex text has brace errors");
    }
    output
}

#[derive(Debug, Default)]
struct FloatToken {
    text: String,
    decimal: bool,
    /// One `-` per token, leading or after the exponent.
    sign: bool,
    exponent: bool,
}

impl FloatToken {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns false when `c` cannot extend the token and should end it.
    fn accept(&mut self, c: char) -> bool {
        match c {
            '0'..='9' => {}
            '.' if !self.decimal => self.decimal = true,
            '-' if !self.sign && (self.text.is_empty() || self.text.ends_with('e')) => {
                self.sign = true
            }
            'e' if !self.exponent && self.decimal && self.text.len() > 1 => self.exponent = true,
            _ => return false,
        }
        self.text.push(c);
        true
    }
}

struct VertexParser {
    token: FloatToken,
    floats: Vec<f64>,
    current: VertexSet,
    sets: Vec<VertexSet>,
    braces: Vec<(char, usize)>,
    errors: Vec<ParseError>,
}

impl VertexParser {
    fn new() -> Self {
        Self {
            token: FloatToken::default(),
            floats: Vec::new(),
            current: VertexSet::new(),
            sets: Vec::new(),
            braces: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn feed(&mut self, position: usize, c: char) {
        match c {
            '0'..='9' | '.' | '-' | 'e' => {
                if !self.token.accept(c) {
                    // The rejected character only delimits; it never starts the next token.
                    self.emit_float();
                }
            }
            ' ' | '\t' => self.emit_float(),
            '\n' | '\r' => self.emit_vertex(),
            '(' | '{' | '[' => self.open_brace(position, c),
            ')' | '}' | ']' => self.close_brace(position, c),
            _ => self.emit_float(),
        }
    }

    fn open_brace(&mut self, position: usize, c: char) {
        self.braces.push((c, position));
        self.emit_vertex();

        if self.braces.len() == 1 {
            match c {
                '{' => {
                    self.current.is_polyline = true;
                    self.current.is_closed = true;
                }
                '[' => {
                    self.current.is_polyline = true;
                    self.current.is_closed = false;
                }
                _ => {}
            }
        }
    }

    fn close_brace(&mut self, position: usize, c: char) {
        let Some(&(open, _)) = self.braces.last() else {
            trace!(position, "unmatched closing brace");
            self.error(position, ParseErrorKind::UnmatchedBrace);
            return;
        };

        if open == matching_open(c) {
            self.braces.pop();
            self.emit_vertex();
        } else {
            trace!(position, open = %open, close = %c, "mismatched closing brace");
            self.error(position, ParseErrorKind::MismatchedBrace);
        }

        if self.braces.is_empty() {
            self.emit_set();
        }
    }

    fn error(&mut self, position: usize, kind: ParseErrorKind) {
        self.errors.push(ParseError {
            position,
            length: 1,
            kind,
        });
    }

    fn emit_float(&mut self) {
        if !self.token.text.is_empty() {
            if let Ok(value) = self.token.text.parse::<f64>() {
                self.floats.push(value);
            }
        }
        self.token.clear();
    }

    fn emit_vertex(&mut self) {
        self.emit_float();
        if self.floats.len() > 1 {
            self.current.add_vertex(&self.floats);
        }
        self.floats.clear();
    }

    fn emit_set(&mut self) {
        self.emit_vertex();
        if !self.current.is_empty() {
            let mut set = std::mem::take(&mut self.current);
            set.auto_set_2d();
            self.sets.push(set);
        }
        self.current.is_polyline = false;
        self.current.is_closed = false;
    }

    fn finish(mut self, options: &ParseOptions) -> ParseOutput {
        if options.strict_braces {
            let unclosed: Vec<usize> = self.braces.iter().map(|&(_, pos)| pos).collect();
            for position in unclosed {
                self.error(position, ParseErrorKind::UnclosedBrace);
            }
        }
        self.emit_set();
        self.errors.sort_by_key(|e| e.position);

        ParseOutput {
            sets: self.sets,
            errors: self.errors,
        }
    }
}

fn matching_open(close: char) -> char {
    match close {
        ')' => '(',
        '}' => '{',
        ']' => '[',
        _ => ' ',
    }
}

/// Lenient single-line reader: keeps digits, spaces, `-`, `.` and `,`,
/// splits on `,`/space and parses what it can. Bad tokens are skipped.
pub fn parse_floats(line: &str) -> Vec<f64> {
    let cleaned: String = line
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | ','))
        .collect();

    cleaned
        .split([',', ' '])
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f64>().ok())
        .collect()
}

/// Line mode: one vertex per line, 2 or 3 values each. Lines with any
/// other number of values are ignored.
pub fn parse_point_lines(text: &str) -> VertexSet {
    let mut set = VertexSet::new();
    for line in text.lines() {
        let values = parse_floats(line);
        if matches!(values.len(), 2 | 3) {
            set.add_vertex(&values);
        }
    }
    set
}
