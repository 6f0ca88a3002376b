//! Backslash-escape decoding for configuration strings.
//!
//! Somewhere between `echo -e`, `printf '%b'`, and a C string literal,
//! with three flow-control specials on top:
//!
//! - `\i` produces nothing (useful to arm de-escaping on an argument that
//!   would otherwise start with a meaningful character),
//! - `\c` ends the string, discarding the rest,
//! - `\C` copies the rest through uninterpreted.
//!
//! Mnemonics cover the usual controls plus `\d` (DEL) and `\e`/`\E` (ESC);
//! `\o`/`\O` are NUL; `\0ooo` and `\1oo`–`\7oo` give octal; `\xHH` gives
//! hex. Anything else decodes to the escaped character itself, so the
//! decoder cannot fail, and input without the escape character is returned
//! unchanged.

/// Decode `input`, interpreting `esc`-introduced escape sequences.
#[must_use]
pub fn unescape(input: &[u8], esc: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;
    while pos < input.len() {
        let c = input[pos];
        pos += 1;
        if c != esc || pos >= input.len() {
            out.push(c);
            continue;
        }
        let e = input[pos];
        pos += 1;
        let decoded = match e {
            b'i' => continue,
            b'C' => {
                out.extend_from_slice(&input[pos..]);
                return out;
            }
            b'c' => return out,
            b'a' => 0x07,
            b'b' => 0x08,
            b'd' => 0x7F,
            b'e' | b'E' => 0x1B,
            b'f' => 0x0C,
            b'n' => 0x0A,
            b'r' => 0x0D,
            b't' => 0x09,
            b'v' => 0x0B,
            b'o' | b'O' => 0x00,
            b'x' => match input.get(pos).copied().and_then(unhex) {
                None => b'x',
                Some(hi) => {
                    pos += 1;
                    match input.get(pos).copied().and_then(unhex) {
                        None => hi,
                        Some(lo) => {
                            pos += 1;
                            (hi << 4) | lo
                        }
                    }
                }
            },
            d @ b'0'..=b'7' => {
                let mut val = d - b'0';
                let mut taken = 0;
                while taken < 3 {
                    // a fourth digit is only read while the value still
                    // fits in one byte
                    if taken >= 1 && val >= 32 {
                        break;
                    }
                    let Some(o) = input.get(pos).copied().and_then(unoct) else {
                        break;
                    };
                    val = (val << 3) | o;
                    pos += 1;
                    taken += 1;
                }
                val
            }
            other => other,
        };
        out.push(decoded);
    }
    out
}

fn unhex(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn unoct(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'7' => Some(c - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::unescape;

    fn un(s: &str) -> Vec<u8> {
        unescape(s.as_bytes(), b'\\')
    }

    #[test]
    fn literal_input_is_identity() {
        assert_eq!(un("plain text, no escapes"), b"plain text, no escapes");
        assert_eq!(un(""), b"");
    }

    #[test]
    fn mnemonics() {
        assert_eq!(un(r"\a\b\d\e\E\f\n\r\t\v\o\O"), b"\x07\x08\x7f\x1b\x1b\x0c\n\r\t\x0b\0\0");
    }

    #[test]
    fn unknown_escapes_decode_to_themselves() {
        assert_eq!(un(r"\\ \' \q"), b"\\ ' q");
    }

    #[test]
    fn hex() {
        assert_eq!(un(r"\x41"), b"A");
        assert_eq!(un(r"\x4"), b"\x04");
        assert_eq!(un(r"\xZZ"), b"xZZ");
    }

    #[test]
    fn octal() {
        assert_eq!(un(r"\0101"), b"A");
        assert_eq!(un(r"\101"), b"A");
        assert_eq!(un(r"\7"), b"\x07");
        // the one-byte guard stops the digit run
        assert_eq!(un(r"\1011"), b"A1");
    }

    #[test]
    fn flow_control_specials() {
        assert_eq!(un(r"\i-\r\n"), b"-\r\n");
        assert_eq!(un(r"shown\chidden"), b"shown");
        assert_eq!(un(r"\Ckept \n as-is"), b"kept \\n as-is");
    }

    #[test]
    fn trailing_escape_is_literal() {
        assert_eq!(un("end\\"), b"end\\");
    }
}
