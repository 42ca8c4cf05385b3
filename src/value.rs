//! Decoded wire values and the shared string table.

use std::fmt;

/// One element of a decoded response array.
///
/// The grammar only knows four kinds of values; anything the tokenizer cannot
/// classify is kept as a bare [`WireValue::String`].
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<WireValue>),
}

impl WireValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            WireValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the variant, used in shape-mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Integer(_) => "integer",
            WireValue::Float(_) => "float",
            WireValue::String(_) => "string",
            WireValue::Array(_) => "array",
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Integer(v) => write!(f, "{}", v),
            WireValue::Float(v) => write!(f, "{:?}", v),
            WireValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            WireValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The trailing table of a success payload, addressed by one-based indices.
///
/// Index `0` means "absent"; index `n` resolves to the `n-1`th entry.
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    entries: &'a [WireValue],
}

impl<'a> StringTable<'a> {
    pub fn new(entries: &'a [WireValue]) -> Self {
        StringTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entry behind a one-based index, `None` for zero, negative or
    /// out-of-range indices.
    pub fn entry(&self, index: i64) -> Option<&'a WireValue> {
        let slot = usize::try_from(index).ok()?.checked_sub(1)?;
        self.entries.get(slot)
    }

    /// The string behind a one-based index. Non-string entries resolve to `None`
    /// just like absent ones.
    pub fn get(&self, index: i64) -> Option<&'a str> {
        self.entry(index).and_then(WireValue::as_str)
    }

    /// True when `index` resolves to a string starting with `prefix`.
    pub fn has_prefix(&self, index: i64, prefix: &str) -> bool {
        self.get(index).is_some_and(|s| s.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<WireValue> {
        vec![
            WireValue::String("java.util.ArrayList/4159755760".into()),
            WireValue::Integer(3),
            WireValue::String("AUD".into()),
        ]
    }

    #[test]
    fn test_one_based_lookup() {
        let entries = table();
        let table = StringTable::new(&entries);
        assert_eq!(table.get(3), Some("AUD"));
        assert!(table.has_prefix(1, "java.util.ArrayList"));
    }

    #[test]
    fn test_zero_and_out_of_range_are_absent() {
        let entries = table();
        let table = StringTable::new(&entries);
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(-4), None);
        assert_eq!(table.get(4), None);
        assert_eq!(table.entry(i64::MAX), None);
    }

    #[test]
    fn test_non_string_entry_is_not_a_string() {
        let entries = table();
        let table = StringTable::new(&entries);
        assert_eq!(table.entry(2), Some(&WireValue::Integer(3)));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn test_display_renders_array_literal() {
        let v = WireValue::Array(vec![
            WireValue::Integer(1),
            WireValue::String("ab'c".into()),
            WireValue::Array(vec![WireValue::Float(2.5)]),
        ]);
        assert_eq!(v.to_string(), "[1,'ab''c',[2.5]]");
    }
}
