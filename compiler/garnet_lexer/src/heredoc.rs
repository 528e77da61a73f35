//! Heredoc body scanning.
//!
//! A heredoc opener (`<<EOS`, `<<-EOS`, `<<~EOS`, optionally with a quoted
//! terminator) is lexed in place on its line; the body occupies whole lines
//! starting after that line's newline. The scanner extracts and cooks the
//! body eagerly and reports the consumed byte region back to the lexer,
//! which skips it when the main scan reaches it.

use garnet_ir::Span;

use crate::{escape, LexError, LexErrorKind};

/// Indentation mode of the opener.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Indent {
    /// `<<EOS`: the terminator must start at column 0.
    None,
    /// `<<-EOS`: the terminator line may be indented.
    Dash,
    /// `<<~EOS`: indented terminator, and the body is dedented by the
    /// smallest indentation of its non-blank lines.
    Squiggly,
}

/// A scanned heredoc body.
#[derive(Debug)]
pub(crate) struct Body {
    /// Cooked content, one trailing newline per body line.
    pub text: Box<str>,
    /// Byte region consumed: body start through the end of the terminator
    /// line (including its newline, when present).
    pub region: (u32, u32),
}

/// Scan the body starting at `body_start`, looking for `terminator`.
///
/// `raw` disables escape cooking (single-quoted terminator). The opener
/// span is used for the unterminated-heredoc error.
pub(crate) fn scan_body(
    source: &[u8],
    body_start: u32,
    terminator: &[u8],
    indent: Indent,
    raw: bool,
    opener: Span,
) -> Result<Body, LexError> {
    let mut lines: Vec<(usize, usize)> = Vec::new();
    let mut at = body_start as usize;

    let region_end = loop {
        if at >= source.len() {
            return Err(LexError::new(
                LexErrorKind::UnterminatedHeredoc {
                    terminator: String::from_utf8_lossy(terminator).into_owned().into_boxed_str(),
                },
                opener,
            ));
        }
        let line_start = at;
        let line_end = match source[at..].iter().position(|&b| b == b'\n') {
            Some(rel) => at + rel,
            None => source.len(),
        };
        let line = &source[line_start..line_end];
        if is_terminator(line, terminator, indent) {
            break (line_end + 1).min(source.len());
        }
        lines.push((line_start, line_end));
        if line_end == source.len() {
            // Last line had no newline and was not the terminator.
            at = source.len();
        } else {
            at = line_end + 1;
        }
    };

    let strip = match indent {
        Indent::Squiggly => min_indent(source, &lines),
        Indent::None | Indent::Dash => 0,
    };

    let mut body = Vec::new();
    for &(start, end) in &lines {
        let line = &source[start..end];
        let skipped = indent_width(line).min(strip).min(line.len());
        body.extend_from_slice(&line[skipped..]);
        body.push(b'\n');
    }

    let text = if raw {
        body
    } else {
        let mut cooked = Vec::with_capacity(body.len());
        escape::cook_double(&body, body_start, &mut cooked)?;
        cooked
    };

    Ok(Body {
        text: String::from_utf8_lossy(&text).into_owned().into_boxed_str(),
        region: (body_start, u32::try_from(region_end).unwrap_or(u32::MAX)),
    })
}

fn is_terminator(line: &[u8], terminator: &[u8], indent: Indent) -> bool {
    match indent {
        Indent::None => line == terminator,
        Indent::Dash | Indent::Squiggly => {
            let trimmed = &line[indent_width(line)..];
            trimmed == terminator
        }
    }
}

/// Leading whitespace byte count of a line.
fn indent_width(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ' || b == b'\t').count()
}

/// Smallest indentation among non-blank lines, for `<<~` dedenting.
fn min_indent(source: &[u8], lines: &[(usize, usize)]) -> usize {
    lines
        .iter()
        .map(|&(start, end)| &source[start..end])
        .filter(|line| line.iter().any(|&b| b != b' ' && b != b'\t'))
        .map(indent_width)
        .min()
        .unwrap_or(0)
}
