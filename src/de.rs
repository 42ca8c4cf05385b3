//! Response tokenizer
//!
//! Turns the bracketed array text of a response body into [`WireValue`]s.
//!
//! ## Grammar summary
//! - Elements are separated by commas at nesting depth 0, outside quotes
//! - Strings are wrapped in `'` or `"`; a doubled quote inside is a literal quote
//! - Integers, then floats, are tried on every unquoted element
//! - `[...]` elements are tokenized recursively
//! - Anything else is kept as a bare string
//! - Empty elements (`1,,2`) are dropped
//! - Arrays nest at most [`MAX_DEPTH`] levels

use crate::error::{Error, Result};
use crate::value::WireValue;

/// Deepest array nesting accepted, counting the outer array as level 1.
pub const MAX_DEPTH: usize = 64;

/// Tokenize a bracketed array literal such as `[1,'a',[2,3]]`.
///
/// Exactly one pair of outer brackets is removed; `[]` yields an empty vector.
pub fn tokenize(text: &str) -> Result<Vec<WireValue>> {
    let lead = text.len() - text.trim_start().len();
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(Error::MalformedArray {
            offset: lead,
            reason: "expected a bracketed array",
        })?;
    Tokenizer::new(inner, lead + 1).run()
}

/// Scans the interior of one array, maintaining a byte cursor into the input.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Byte offset of `input` inside the outermost text, for diagnostics.
    base: usize,
    /// Nesting level of this array; the outermost is 1.
    level: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str, base: usize) -> Self {
        Tokenizer {
            input,
            pos: 0,
            base,
            level: 1,
        }
    }

    fn nested(input: &'a str, base: usize, level: usize) -> Self {
        Tokenizer {
            level,
            ..Tokenizer::new(input, base)
        }
    }

    fn malformed(&self, at: usize, reason: &'static str) -> Error {
        Error::MalformedArray {
            offset: self.base + at,
            reason,
        }
    }

    /// Split the interior on top-level commas and classify every element.
    pub fn run(mut self) -> Result<Vec<WireValue>> {
        let bytes = self.input.as_bytes();
        let mut out = Vec::new();
        let mut start = 0;
        let mut depth = 0usize;
        // The quote byte that opened the current string, and where.
        let mut quote: Option<(u8, usize)> = None;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            match quote {
                Some((q, _)) if b == q => {
                    if bytes.get(self.pos + 1) == Some(&q) {
                        // Doubled quote: literal, string stays open.
                        self.pos += 1;
                    } else {
                        quote = None;
                    }
                }
                Some(_) => {}
                None => match b {
                    b'\'' | b'"' => quote = Some((b, self.pos)),
                    b'[' => {
                        depth += 1;
                        if self.level + depth > MAX_DEPTH {
                            return Err(self.malformed(self.pos, "nesting too deep"));
                        }
                    }
                    b']' => {
                        depth = depth
                            .checked_sub(1)
                            .ok_or_else(|| self.malformed(self.pos, "unbalanced closing bracket"))?;
                    }
                    b',' if depth == 0 => {
                        self.push_element(&mut out, start, self.pos)?;
                        start = self.pos + 1;
                    }
                    _ => {}
                },
            }
            self.pos += 1;
        }

        if let Some((_, opened)) = quote {
            return Err(self.malformed(opened, "unterminated string"));
        }
        if depth != 0 {
            return Err(self.malformed(self.pos, "unclosed nested array"));
        }
        self.push_element(&mut out, start, bytes.len())?;
        Ok(out)
    }

    fn push_element(&self, out: &mut Vec<WireValue>, start: usize, end: usize) -> Result<()> {
        let raw = &self.input[start..end];
        let element = raw.trim();
        if element.is_empty() {
            return Ok(());
        }
        let at = self.base + start + (raw.len() - raw.trim_start().len());
        out.push(classify(element, at, self.level)?);
        Ok(())
    }
}

/// Classify one trimmed element. `at` is its offset in the outermost text,
/// `level` the nesting level of the array holding it.
fn classify(element: &str, at: usize, level: usize) -> Result<WireValue> {
    if let Some(s) = quoted(element) {
        return Ok(WireValue::String(s));
    }
    if let Ok(v) = element.parse::<i64>() {
        return Ok(WireValue::Integer(v));
    }
    if let Ok(v) = element.parse::<f64>() {
        return Ok(WireValue::Float(v));
    }
    if let Some(inner) = element.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Tokenizer::nested(inner, at + 1, level + 1)
            .run()
            .map(WireValue::Array);
    }
    Ok(WireValue::String(element.to_string()))
}

/// Strip matching quote delimiters and collapse doubled quotes.
fn quoted(element: &str) -> Option<String> {
    let first = element.chars().next()?;
    if element.len() < 2 || !(first == '\'' || first == '"') || !element.ends_with(first) {
        return None;
    }
    let content = &element[1..element.len() - 1];
    Some(match first {
        '\'' => content.replace("''", "'"),
        _ => content.replace("\"\"", "\""),
    })
}
