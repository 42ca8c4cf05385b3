/// Undo the backend's string escaping.
///
/// Surrounding double quotes are stripped and every `\xNN` sequence is replaced
/// by the character with code point `0xNN`. A `\x` that is not followed by two
/// hex digits is kept as-is.
pub fn unescape(s: &str) -> String {
    let s = s.trim_matches('"');
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(at) = rest.find("\\x") {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 2..];
        match hex_byte(tail) {
            Some(byte) => {
                out.push(char::from(byte));
                rest = &tail[2..];
            }
            None => {
                out.push_str("\\x");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn hex_byte(s: &str) -> Option<u8> {
    let digits = s.get(..2)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn test_hex_escape() {
        assert_eq!(unescape(r"\x26"), "&");
        assert_eq!(unescape(r"Type \x27Foo\x27"), "Type 'Foo'");
    }

    #[test]
    fn test_strips_surrounding_quotes() {
        assert_eq!(unescape(r#""quoted \x26 done""#), "quoted & done");
    }

    #[test]
    fn test_invalid_escape_passes_through() {
        assert_eq!(unescape(r"\xZZ"), r"\xZZ");
        assert_eq!(unescape(r"tail \x2"), r"tail \x2");
        assert_eq!(unescape(r"\x+1"), r"\x+1");
        assert_eq!(unescape(r"\x\x41"), r"\xA");
    }

    #[test]
    fn test_high_escape_is_latin1() {
        assert_eq!(unescape(r"caf\xe9"), "café");
    }
}
