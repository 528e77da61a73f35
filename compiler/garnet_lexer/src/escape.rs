//! Escape cooking for double-quoted string content.
//!
//! Cooking happens after the raw extent of a literal is known: the scanner
//! finds the closing delimiter first, then hands the content bytes here.
//! Output accumulates as bytes (content may be non-UTF-8 under the BINARY
//! encoding); the scanner converts once at the end. Unknown single-character
//! escapes pass through as the literal character; only structurally
//! malformed escapes (`\x` with no digits, bad `\u`) are errors.

use garnet_ir::Span;

use crate::{LexError, LexErrorKind};

/// Cook double-quoted content. `base` is the byte offset of `src[0]` in the
/// source, used for error spans.
pub(crate) fn cook_double(src: &[u8], base: u32, out: &mut Vec<u8>) -> Result<(), LexError> {
    let mut i = 0usize;
    while i < src.len() {
        let b = src[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let esc_start = base + offset_u32(i);
        i += 1;
        let Some(&e) = src.get(i) else {
            // Trailing backslash at end of content (heredoc last line).
            out.push(b'\\');
            break;
        };
        i += 1;
        match e {
            b'n' => out.push(b'\n'),
            b't' => out.push(b'\t'),
            b'r' => out.push(b'\r'),
            b's' => out.push(b' '),
            b'0' => out.push(0),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'e' => out.push(0x1b),
            b'f' => out.push(0x0c),
            b'v' => out.push(0x0b),
            b'\n' => {} // line continuation
            b'x' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    let Some(d) = src.get(i).copied().and_then(hex_digit) else {
                        break;
                    };
                    value = value * 16 + d;
                    digits += 1;
                    i += 1;
                }
                if digits == 0 {
                    return Err(LexError::new(
                        LexErrorKind::InvalidEscape { escape: 'x' },
                        Span::new(esc_start, base + offset_u32(i)),
                    ));
                }
                out.push((value & 0xFF) as u8);
            }
            b'u' => {
                let scalar = cook_unicode(src, &mut i).ok_or_else(|| {
                    LexError::new(
                        LexErrorKind::InvalidUnicodeEscape,
                        Span::new(esc_start, base + offset_u32(i)),
                    )
                })?;
                let ch = char::from_u32(scalar).ok_or_else(|| {
                    LexError::new(
                        LexErrorKind::InvalidUnicodeEscape,
                        Span::new(esc_start, base + offset_u32(i)),
                    )
                })?;
                push_char(out, ch);
            }
            b'1'..=b'7' => {
                // Up to three octal digits, the first already consumed.
                let mut value = u32::from(e - b'0');
                let mut digits = 1;
                while digits < 3 {
                    let Some(d) = src.get(i).copied().filter(|d| (b'0'..=b'7').contains(d))
                    else {
                        break;
                    };
                    value = value * 8 + u32::from(d - b'0');
                    digits += 1;
                    i += 1;
                }
                out.push((value & 0xFF) as u8);
            }
            _ => out.push(e),
        }
    }
    Ok(())
}

/// Cook single-quoted content: only `\'` and `\\` are escapes.
pub(crate) fn cook_single(src: &[u8], out: &mut Vec<u8>) {
    let mut i = 0usize;
    while i < src.len() {
        let b = src[i];
        if b == b'\\' && matches!(src.get(i + 1), Some(b'\'' | b'\\')) {
            out.push(src[i + 1]);
            i += 2;
        } else {
            out.push(b);
            i += 1;
        }
    }
}

/// Parse the digits of `\uXXXX` or `\u{X...}` with `i` positioned right
/// after the `u`. Returns the scalar value, or `None` when malformed.
fn cook_unicode(src: &[u8], i: &mut usize) -> Option<u32> {
    if src.get(*i) == Some(&b'{') {
        *i += 1;
        let mut value = 0u32;
        let mut digits = 0;
        while let Some(d) = src.get(*i).copied().and_then(hex_digit) {
            value = value.checked_mul(16)?.checked_add(d)?;
            digits += 1;
            *i += 1;
        }
        if src.get(*i) != Some(&b'}') || digits == 0 || digits > 6 {
            return None;
        }
        *i += 1;
        Some(value)
    } else {
        let mut value = 0u32;
        for _ in 0..4 {
            let d = src.get(*i).copied().and_then(hex_digit)?;
            value = value * 16 + d;
            *i += 1;
        }
        Some(value)
    }
}

fn hex_digit(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

fn offset_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cook(src: &[u8]) -> String {
        let mut out = Vec::new();
        cook_double(src, 0, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(cook(br"a\nb\tc"), "a\nb\tc");
        assert_eq!(cook(br"\e\s"), "\x1b ");
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(cook(br"\q"), "q");
    }

    #[test]
    fn hex_and_unicode() {
        assert_eq!(cook(br"\x41\x6"), "A\x06");
        assert_eq!(cook(br"A"), "A");
        assert_eq!(cook(br"\u{1F600}"), "\u{1F600}");
    }

    #[test]
    fn octal() {
        assert_eq!(cook(br"\101"), "A");
        assert_eq!(cook(br"\7"), "\x07");
    }

    #[test]
    fn line_continuation_inside_string() {
        assert_eq!(cook(b"a\\\nb"), "ab");
    }

    #[test]
    fn bad_hex_is_an_error() {
        let mut out = Vec::new();
        let err = cook_double(br"\xZZ", 10, &mut out).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidEscape { escape: 'x' });
        assert_eq!(err.span.start, 10);
    }

    #[test]
    fn bad_unicode_is_an_error() {
        let mut out = Vec::new();
        let err = cook_double(br"\u12", 0, &mut out).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidUnicodeEscape);

        let mut out = Vec::new();
        let err = cook_double(br"\u{110000}", 0, &mut out).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidUnicodeEscape);
    }

    #[test]
    fn single_quoted_rules() {
        let mut out = Vec::new();
        cook_single(br"a\'b\\c\nd", &mut out);
        assert_eq!(out, br"a'b\c\nd");
    }

    #[test]
    fn multibyte_content_survives() {
        assert_eq!(cook("héllo".as_bytes()), "héllo");
    }
}
