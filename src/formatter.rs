//! Exact-format S-expression renderer.
//!
//! Rendering follows the conventions of KiCad's own writer: two-space
//! indentation, a curated set of tags whose children always stay on one line,
//! and a combined `(kicad_pcb (version …) (generator …) …` header line for
//! the document root. A block element keeps its leading atom arguments on the
//! opening line, puts each list child on its own line one level deeper, and
//! closes with the paren aligned under the opening one.

use thiserror::Error;

use crate::parser::sexp::Value;

const INDENT: &str = "  ";

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("cannot format an empty list")]
    EmptyList,
    #[error("document root must be a (kicad_pcb ...) list")]
    InvalidRoot,
}

/// Tags whose children are always rendered on one line, regardless of
/// nesting depth. Every tag the native tool writes single-line must be
/// listed here or output diverges even when it is semantically equivalent.
pub fn is_inline_tag(tag: &str) -> bool {
    matches!(
        tag,
        "at" | "size"
            | "start"
            | "end"
            | "mid"
            | "center"
            | "xy"
            | "net"
            | "drill"
            | "offset"
            | "stroke"
            | "effects"
            | "font"
            | "justify"
            | "connect_pads"
            | "scale"
            | "rotate"
            | "pad"
    )
}

/// Bare grammar keywords: textual values that render unquoted even when held
/// as strings. Symbols render bare regardless; this table only decides the
/// ambiguous case of a plain string (e.g. one set by a mutation).
pub fn is_bare_keyword(text: &str) -> bool {
    matches!(
        text,
        "yes" | "no"
            | "signal"
            | "user"
            | "power"
            | "mixed"
            | "jumper"
            | "smd"
            | "thru_hole"
            | "np_thru_hole"
            | "connect"
            | "rect"
            | "circle"
            | "oval"
            | "roundrect"
            | "trapezoid"
            | "custom"
            | "solid"
            | "dashed"
            | "dotted"
            | "default"
            | "edge"
            | "full"
            | "none"
            | "not_allowed"
            | "allowed"
            | "front"
            | "back"
            | "left"
            | "right"
            | "top"
            | "bottom"
            | "mirror"
            | "through"
            | "blind"
            | "buried"
            | "micro"
            | "setup"
    )
}

/// Renderer for [`Value`] trees. Indentation starts from zero on every
/// top-level call; the formatter carries no state between invocations.
#[derive(Debug, Default)]
pub struct PcbFormatter;

impl PcbFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render one value. Lists classify as inline or block via
    /// [`is_inline_tag`]; a block list with no list children collapses to one
    /// line anyway (`(fill none)`).
    pub fn format(&self, value: &Value) -> Result<String, FormatError> {
        self.render(value, 0)
    }

    /// Render a whole document. The root must be a `kicad_pcb` list; its
    /// `version`/`generator`/`generator_version` children are assembled onto
    /// the opening line even though `kicad_pcb` itself is a block element.
    pub fn format_pcb(&self, root: &Value) -> Result<String, FormatError> {
        let items = root.as_list().ok_or(FormatError::InvalidRoot)?;
        if items.is_empty() {
            return Err(FormatError::EmptyList);
        }
        if items[0].as_sym() != Some("kicad_pcb") {
            return Err(FormatError::InvalidRoot);
        }

        let mut out = String::from("(kicad_pcb");
        let mut idx = 1;
        while idx < items.len() {
            match items[idx].tag() {
                Some("version") | Some("generator") | Some("generator_version") => {
                    out.push(' ');
                    out.push_str(&self.render_inline(&items[idx])?);
                    idx += 1;
                }
                _ => break,
            }
        }
        for item in &items[idx..] {
            out.push('\n');
            out.push_str(INDENT);
            out.push_str(&self.render(item, 1)?);
        }
        out.push_str("\n)");
        Ok(out)
    }

    fn render(&self, value: &Value, indent: usize) -> Result<String, FormatError> {
        let Value::List(items) = value else {
            return self.render_atom(value);
        };
        if items.is_empty() {
            return Err(FormatError::EmptyList);
        }

        let inline = match items[0].as_text() {
            Some(tag) if is_inline_tag(tag) => true,
            _ => !items.iter().any(Value::is_list),
        };
        if inline {
            return self.render_inline(value);
        }

        let mut out = String::from("(");
        out.push_str(&self.render_atom(&items[0])?);
        let mut idx = 1;
        // leading atom arguments stay on the opening line
        while idx < items.len() && !items[idx].is_list() {
            out.push(' ');
            out.push_str(&self.render_atom(&items[idx])?);
            idx += 1;
        }
        for item in &items[idx..] {
            out.push('\n');
            out.push_str(&INDENT.repeat(indent + 1));
            out.push_str(&self.render(item, indent + 1)?);
        }
        out.push('\n');
        out.push_str(&INDENT.repeat(indent));
        out.push(')');
        Ok(out)
    }

    fn render_inline(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::List(items) => {
                if items.is_empty() {
                    return Err(FormatError::EmptyList);
                }
                let parts: Result<Vec<_>, _> =
                    items.iter().map(|item| self.render_inline(item)).collect();
                Ok(format!("({})", parts?.join(" ")))
            }
            atom => self.render_atom(atom),
        }
    }

    fn render_atom(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::Sym(s) => Ok(s.clone()),
            Value::Str(s) => {
                if is_bare_keyword(s) {
                    Ok(s.clone())
                } else {
                    Ok(quote(s))
                }
            }
            Value::Num(n) => Ok(n.lexeme().to_string()),
            Value::Bool(b) => Ok(if *b { "yes" } else { "no" }.to_string()),
            Value::List(_) => self.render_inline(value),
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
