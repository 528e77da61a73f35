//! Sentinel-terminated source buffer with encoding resolution.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! letting the scanner detect EOF without explicit bounds checks. The total
//! buffer size is rounded up to the next 64-byte boundary, which also
//! provides safe padding for `peek()`/`peek2()` near the end.
//!
//! # Encoding
//!
//! Ruby sources declare their encoding in a magic comment on the first
//! line (or the second, when the first is a shebang):
//!
//! ```text
//! # coding: us-ascii
//! # -*- coding: utf-8 -*-
//! ```
//!
//! `encoding:` works too since the match only anchors on the `coding`
//! suffix. The default is UTF-8. A UTF-8 BOM is accepted and skipped.
//! The content is validated against the resolved encoding during
//! construction; problems are recorded as [`EncodingIssue`] values which
//! the lexer converts into positioned errors — construction itself never
//! fails.

use memchr::{memchr, memchr_iter};

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Source encodings Garnet understands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Encoding {
    /// UTF-8 (the default).
    #[default]
    Utf8,
    /// 7-bit ASCII.
    UsAscii,
    /// ASCII-8BIT / BINARY: any byte sequence is valid.
    Binary,
}

impl Encoding {
    /// Resolve a magic-comment encoding name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Encoding> {
        if name.eq_ignore_ascii_case("utf-8") {
            Some(Encoding::Utf8)
        } else if name.eq_ignore_ascii_case("us-ascii") || name.eq_ignore_ascii_case("ascii") {
            Some(Encoding::UsAscii)
        } else if name.eq_ignore_ascii_case("ascii-8bit") || name.eq_ignore_ascii_case("binary") {
            Some(Encoding::Binary)
        } else {
            None
        }
    }

    /// Canonical name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Binary => "ASCII-8BIT",
        }
    }
}

/// Encoding problem detected during buffer construction.
///
/// Carries the byte position and length of the offending sequence; the
/// lexer turns these into positioned lex errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte position where the issue was found.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// Magic comment names an encoding Garnet does not know.
    UnknownEncoding { name: Box<str> },
    /// Byte sequence invalid for the declared encoding.
    InvalidByteSequence { encoding: Encoding },
    /// UTF-16 little-endian BOM: wrong encoding for a Ruby source file.
    Utf16LeBom,
    /// UTF-16 big-endian BOM: wrong encoding.
    Utf16BeBom,
    /// NUL byte in source content.
    NulByte,
}

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Resolved source encoding.
    encoding: Encoding,
    /// Offset where scanning should start (skips a UTF-8 BOM).
    content_start: u32,
    /// Byte offsets of line starts, for offset -> line/column queries.
    line_starts: Vec<u32>,
    /// Issues detected during construction.
    issues: Vec<EncodingIssue>,
}

impl SourceBuffer {
    /// Create a buffer from raw source bytes.
    ///
    /// Resolves the encoding (BOM, magic comment, default UTF-8),
    /// validates the content against it, and builds the line index.
    /// Never fails; problems land in [`issues`](Self::issues).
    pub fn new(source: &[u8]) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);

        let padded_len = (source.len() + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..source.len()].copy_from_slice(source);

        let mut issues = Vec::new();
        let content_start = detect_bom(source, &mut issues);
        let encoding = resolve_encoding(source, content_start, &mut issues);
        validate_content(source, content_start, encoding, &mut issues);

        let mut line_starts = vec![0u32];
        for nl in memchr_iter(b'\n', source) {
            line_starts.push(u32::try_from(nl).unwrap_or(u32::MAX - 1) + 1);
        }

        Self {
            buf,
            source_len,
            encoding,
            content_start,
            line_starts,
            issues,
        }
    }

    /// The source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned after any BOM.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len, self.content_start)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// True if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// The resolved source encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Issues detected during construction, in source order.
    pub fn issues(&self) -> &[EncodingIssue] {
        &self.issues
    }

    /// 1-based line and byte column for a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = offset - self.line_starts[line];
        (u32::try_from(line).unwrap_or(u32::MAX - 1) + 1, col + 1)
    }

    /// The text of a 1-based line, without its terminator.
    pub fn line_text(&self, line: u32) -> &[u8] {
        let idx = line.saturating_sub(1) as usize;
        if idx >= self.line_starts.len() {
            return &[];
        }
        let start = self.line_starts[idx] as usize;
        let rest = &self.as_bytes()[start..];
        match memchr(b'\n', rest) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}

/// Skip a UTF-8 BOM; flag UTF-16 BOMs as wrong-encoding issues.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) -> u32 {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return 3;
    }
    if source.starts_with(&[0xFF, 0xFE]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf16LeBom,
            pos: 0,
            len: 2,
        });
    } else if source.starts_with(&[0xFE, 0xFF]) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf16BeBom,
            pos: 0,
            len: 2,
        });
    }
    0
}

/// Find and parse the magic comment, if any.
fn resolve_encoding(source: &[u8], content_start: u32, issues: &mut Vec<EncodingIssue>) -> Encoding {
    let content = &source[content_start as usize..];

    // The magic comment lives on line 1, or line 2 when line 1 is a shebang.
    let (comment_off, line) = if content.starts_with(b"#!") {
        match memchr(b'\n', content) {
            Some(nl) => (nl + 1, &content[nl + 1..]),
            None => return Encoding::default(),
        }
    } else {
        (0, content)
    };
    if !line.starts_with(b"#") {
        return Encoding::default();
    }
    let line = match memchr(b'\n', line) {
        Some(nl) => &line[..nl],
        None => line,
    };

    let Some((name_off, name_len)) = find_coding_name(line) else {
        return Encoding::default();
    };
    let name = String::from_utf8_lossy(&line[name_off..name_off + name_len]);
    match Encoding::from_name(&name) {
        Some(encoding) => encoding,
        None => {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::UnknownEncoding {
                    name: name.into_owned().into_boxed_str(),
                },
                pos: content_start
                    + u32::try_from(comment_off + name_off).unwrap_or(u32::MAX - 1),
                len: u32::try_from(name_len).unwrap_or(0),
            });
            Encoding::default()
        }
    }
}

/// Locate `coding[:=] <name>` inside a comment line. Returns the name's
/// offset and length within `line`. Matching anchors on the `coding`
/// suffix, so `encoding:` works as well.
fn find_coding_name(line: &[u8]) -> Option<(usize, usize)> {
    const KEY: &[u8] = b"coding";
    let mut search_from = 0;
    while search_from + KEY.len() < line.len() {
        let window = &line[search_from..];
        let rel = window
            .windows(KEY.len())
            .position(|w| w.eq_ignore_ascii_case(KEY))?;
        let key_at = search_from + rel;
        let mut at = key_at + KEY.len();
        if at < line.len() && (line[at] == b':' || line[at] == b'=') {
            at += 1;
            while at < line.len() && (line[at] == b' ' || line[at] == b'\t') {
                at += 1;
            }
            let name_start = at;
            while at < line.len() && is_encoding_name_byte(line[at]) {
                at += 1;
            }
            if at > name_start {
                return Some((name_start, at - name_start));
            }
        }
        search_from = key_at + KEY.len();
    }
    None
}

fn is_encoding_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.'
}

/// Validate the content bytes against the resolved encoding.
fn validate_content(
    source: &[u8],
    content_start: u32,
    encoding: Encoding,
    issues: &mut Vec<EncodingIssue>,
) {
    let content = &source[content_start as usize..];
    match encoding {
        Encoding::Utf8 => {
            let mut checked = 0usize;
            while let Err(e) = std::str::from_utf8(&content[checked..]) {
                let bad_at = checked + e.valid_up_to();
                let bad_len = e.error_len().unwrap_or(content.len() - bad_at);
                issues.push(EncodingIssue {
                    kind: EncodingIssueKind::InvalidByteSequence { encoding },
                    pos: content_start + u32::try_from(bad_at).unwrap_or(u32::MAX - 1),
                    len: u32::try_from(bad_len).unwrap_or(1),
                });
                checked = bad_at + bad_len;
                if checked >= content.len() {
                    break;
                }
            }
        }
        Encoding::UsAscii => {
            for (i, &b) in content.iter().enumerate() {
                if b >= 0x80 {
                    issues.push(EncodingIssue {
                        kind: EncodingIssueKind::InvalidByteSequence { encoding },
                        pos: content_start + u32::try_from(i).unwrap_or(u32::MAX - 1),
                        len: 1,
                    });
                }
            }
        }
        Encoding::Binary => {}
    }
    if let Some(nul_at) = memchr(0, content) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::NulByte,
            pos: content_start + u32::try_from(nul_at).unwrap_or(u32::MAX - 1),
            len: 1,
        });
    }
}
