//! Generic S-expression value model and reader.
//!
//! KiCad board files distinguish bare tokens (`signal`, `smd`) from quoted
//! ones (`"F.Cu"`, `"GND"`), and the two must render differently on output.
//! The reader therefore keeps three atom kinds apart — symbols, strings, and
//! numbers — instead of collapsing everything into text. Numbers remember the
//! lexeme they were parsed from so an untouched value never changes its digit
//! count on the way back out.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("Unbalanced parentheses at position {0}")]
    Unbalanced(usize),
    #[error("Expected a single top-level list, found trailing input at position {0}")]
    TrailingInput(usize),
}

/// A numeric atom carrying both the parsed value and its source lexeme.
///
/// Rendering emits the lexeme verbatim, so `0.50` stays `0.50`. Values built
/// programmatically get the shortest decimal form (`100`, `0.25`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Number {
    raw: String,
    value: f64,
}

impl Number {
    pub fn from_f64(value: f64) -> Self {
        Self {
            raw: format!("{}", value),
            value,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            raw: format!("{}", value),
            value: value as f64,
        }
    }

    /// Build from a source lexeme. Returns `None` if the lexeme does not
    /// match the numeric grammar (optional sign, digits, optional decimal
    /// point, optional exponent).
    pub fn from_lexeme(raw: &str) -> Option<Self> {
        if !is_numeric_lexeme(raw) {
            return None;
        }
        let value = raw.parse::<f64>().ok()?;
        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }

    pub fn as_i64(&self) -> i64 {
        self.value as i64
    }

    pub fn lexeme(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

fn is_numeric_lexeme(s: &str) -> bool {
    let rest = s.strip_prefix(['+', '-']).unwrap_or(s);
    if rest.is_empty() {
        return false;
    }
    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (rest, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = match frac_part {
        // "12.", "12.5", ".5"
        Some(f) => {
            (digits(int_part) || int_part.is_empty())
                && (digits(f) || (f.is_empty() && digits(int_part)))
        }
        None => digits(int_part),
    };
    let exponent_ok = match exponent {
        Some(e) => digits(e.strip_prefix(['+', '-']).unwrap_or(e)),
        None => true,
    };
    mantissa_ok && exponent_ok
}

/// A parsed S-expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Bare identifier; never quoted on output.
    Sym(String),
    /// Quoted literal; quoted on output unless it is a grammar keyword.
    Str(String),
    /// Numeric literal.
    Num(Number),
    /// Boolean, rendered `yes`/`no`. Produced only by lowering typed data;
    /// the reader lexes bare `yes` as a symbol.
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    pub fn num(value: f64) -> Self {
        Value::Num(Number::from_f64(value))
    }

    pub fn int(value: i64) -> Self {
        Value::Num(Number::from_i64(value))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Value::Sym(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a symbol or string atom.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Sym(s) | Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Num(n) => Some(n.as_i64()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Name of the element this list represents: its leading symbol or
    /// string atom.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_text()
    }
}

/// First nested list in `items` whose head names `tag`.
///
/// Duplicate tags resolve to the first occurrence; callers that need every
/// occurrence use [`find_children`].
pub fn find_child<'a>(items: &'a [Value], tag: &str) -> Option<&'a Value> {
    items.iter().find(|item| item.tag() == Some(tag))
}

/// All nested lists in `items` whose head names `tag`, in document order.
pub fn find_children<'a>(items: &'a [Value], tag: &str) -> Vec<&'a Value> {
    items.iter().filter(|item| item.tag() == Some(tag)).collect()
}

/// Second item of the named child, i.e. the `v` of `(tag v)`.
pub fn child_value<'a>(items: &'a [Value], tag: &str) -> Option<&'a Value> {
    find_child(items, tag)?.as_list()?.get(1)
}

pub fn child_text(items: &[Value], tag: &str) -> Option<String> {
    child_value(items, tag)?.as_text().map(|s| s.to_string())
}

pub fn child_f64(items: &[Value], tag: &str) -> Option<f64> {
    child_value(items, tag)?.as_f64()
}

pub fn child_i64(items: &[Value], tag: &str) -> Option<i64> {
    child_value(items, tag)?.as_i64()
}

impl fmt::Display for Value {
    /// Compact single-line rendering for logs and diagnostics. The
    /// format-preserving renderer lives in [`crate::formatter`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Sym(s) => write!(f, "{}", s),
            Value::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Num(n) => write!(f, "{}", n.lexeme()),
            Value::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Character-walking reader for the board file grammar.
pub struct SExpParser {
    input: Vec<char>,
    pos: usize,
}

impl SExpParser {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Parse exactly one top-level list. Trailing non-whitespace input and
    /// unbalanced parentheses are errors.
    pub fn parse(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }
        if self.peek() != '(' {
            return Err(ParseError::UnexpectedToken(format!(
                "expected '(', found '{}'",
                self.peek()
            )));
        }
        let value = self.parse_list()?;
        self.skip_whitespace();
        if !self.is_eof() {
            return Err(ParseError::TrailingInput(self.pos));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }
        match self.peek() {
            '(' => self.parse_list(),
            '"' => self.parse_string(),
            ')' => Err(ParseError::Unbalanced(self.pos)),
            _ => self.parse_token(),
        }
    }

    fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.expect_char('(')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_eof() {
                return Err(ParseError::Unbalanced(self.pos));
            }

            if self.peek() == ')' {
                self.advance();
                break;
            }

            items.push(self.parse_value()?);
        }

        Ok(Value::List(items))
    }

    fn parse_string(&mut self) -> Result<Value, ParseError> {
        self.expect_char('"')?;
        let mut s = String::new();
        let mut escaped = false;
        let mut closed = false;

        while !self.is_eof() {
            let ch = self.peek();

            if escaped {
                match ch {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    '\\' => s.push('\\'),
                    '"' => s.push('"'),
                    _ => s.push(ch),
                }
                escaped = false;
                self.advance();
            } else if ch == '\\' {
                escaped = true;
                self.advance();
            } else if ch == '"' {
                self.advance();
                closed = true;
                break;
            } else {
                s.push(ch);
                self.advance();
            }
        }

        if !closed {
            return Err(ParseError::UnexpectedEof);
        }
        Ok(Value::Str(s))
    }

    /// Bare token: a number if it matches the numeric grammar, else a symbol.
    fn parse_token(&mut self) -> Result<Value, ParseError> {
        let mut s = String::new();

        while !self.is_eof() {
            let ch = self.peek();
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            s.push(ch);
            self.advance();
        }

        if s.is_empty() {
            return Err(ParseError::UnexpectedToken("empty token".to_string()));
        }
        if let Some(number) = Number::from_lexeme(&s) {
            return Ok(Value::Num(number));
        }
        Ok(Value::Sym(s))
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        let ch = self.peek();
        if ch == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(format!(
                "Expected '{}', found '{}'",
                expected, ch
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Value {
        SExpParser::new(input).parse().unwrap()
    }

    #[test]
    fn test_parse_list_of_symbols() {
        let result = parse("(a b c)");
        let items = result.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::sym("a"));
        assert_eq!(items[2], Value::sym("c"));
    }

    #[test]
    fn test_symbol_vs_string_distinction() {
        let result = parse("(layer \"F.Cu\" signal)");
        let items = result.as_list().unwrap();
        assert_eq!(items[1], Value::string("F.Cu"));
        assert_eq!(items[2], Value::sym("signal"));
    }

    #[test]
    fn test_parse_numbers() {
        let result = parse("(at -0.875 0 90)");
        let items = result.as_list().unwrap();
        assert_eq!(items[1].as_f64(), Some(-0.875));
        assert_eq!(items[2].as_i64(), Some(0));
        assert_eq!(items[3].as_f64(), Some(90.0));
    }

    #[test]
    fn test_number_keeps_lexeme() {
        let result = parse("(width 0.50)");
        let items = result.as_list().unwrap();
        match &items[1] {
            Value::Num(n) => assert_eq!(n.lexeme(), "0.50"),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn test_version_like_token_is_numeric() {
        let result = parse("(version 20241229)");
        let items = result.as_list().unwrap();
        assert_eq!(items[1].as_i64(), Some(20241229));
    }

    #[test]
    fn test_dotted_name_is_symbol() {
        // "F.Cu" unquoted would still not match the numeric grammar
        let result = parse("(x F.Cu 1.2.3)");
        let items = result.as_list().unwrap();
        assert_eq!(items[1], Value::sym("F.Cu"));
        assert_eq!(items[2], Value::sym("1.2.3"));
    }

    #[test]
    fn test_parse_nested() {
        let result = parse("(a (b \"c\") d)");
        let items = result.as_list().unwrap();
        assert_eq!(items.len(), 3);
        let nested = items[1].as_list().unwrap();
        assert_eq!(nested[1], Value::string("c"));
    }

    #[test]
    fn test_string_escapes() {
        let result = parse(r#"(name "a \"b\" \\ c")"#);
        let items = result.as_list().unwrap();
        assert_eq!(items[1], Value::string("a \"b\" \\ c"));
    }

    #[test]
    fn test_unbalanced_open_fails() {
        assert!(SExpParser::new("(a (b c)").parse().is_err());
    }

    #[test]
    fn test_trailing_input_fails() {
        assert!(matches!(
            SExpParser::new("(a b) (c d)").parse(),
            Err(ParseError::TrailingInput(_))
        ));
    }

    #[test]
    fn test_top_level_atom_fails() {
        assert!(SExpParser::new("hello").parse().is_err());
    }

    #[test]
    fn test_find_child_first_match_wins() {
        let result = parse("((key 1) (key 2) (other 3))");
        let items = result.as_list().unwrap();
        let child = find_child(items, "key").unwrap();
        assert_eq!(child.as_list().unwrap()[1].as_i64(), Some(1));
        assert_eq!(find_children(items, "key").len(), 2);
    }

    #[test]
    fn test_child_helpers() {
        let result = parse("(pad (at 1.5 2) (layer \"F.Cu\"))");
        let items = result.as_list().unwrap();
        assert_eq!(child_f64(items, "at"), Some(1.5));
        assert_eq!(child_text(items, "layer").as_deref(), Some("F.Cu"));
        assert_eq!(child_i64(items, "missing"), None);
    }

    #[test]
    fn test_display_is_compact() {
        let result = parse("(net 1 \"GND\")");
        assert_eq!(result.to_string(), "(net 1 \"GND\")");
    }
}
