//! Terminal rendering of diagnostics.
//!
//! Renders `severity[code]: message`, then for each label the
//! `file:line:col` header, the source line, and a caret underline. Colors
//! are ANSI escapes, switchable off for non-tty output.

use std::io::{self, Write};

use garnet_ir::Span;
use garnet_lexer_core::SourceBuffer;

use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BLUE: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Renders diagnostics to a writer with optional color.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter for stderr; `colors` should reflect tty detection done by
    /// the caller.
    pub fn stderr(colors: bool) -> Self {
        TerminalEmitter {
            writer: io::stderr(),
            colors,
        }
    }
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, colors: bool) -> Self {
        TerminalEmitter { writer, colors }
    }

    /// Render one diagnostic against the source it refers to.
    ///
    /// `file` is only used for the location header; the buffer supplies
    /// line content and the offset-to-line/column mapping.
    pub fn emit(&mut self, file: &str, buffer: &SourceBuffer, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        let _ = write!(self.writer, "[{}]", diagnostic.code);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.emit_label(file, buffer, label.span, &label.message, label.is_primary);
        }
        for note in &diagnostic.notes {
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn emit_label(
        &mut self,
        file: &str,
        buffer: &SourceBuffer,
        span: Span,
        message: &str,
        primary: bool,
    ) {
        let (line, col) = buffer.line_col(span.start);
        self.write_colored("  --> ", colors::BLUE);
        let _ = writeln!(self.writer, "{file}:{line}:{col}");

        let text = String::from_utf8_lossy(buffer.line_text(line)).into_owned();
        self.write_colored(&format!("{line:4} | "), colors::BLUE);
        let _ = writeln!(self.writer, "{text}");

        // Caret underline, clamped to the line.
        let offset = (col as usize).saturating_sub(1);
        let avail = text.len().saturating_sub(offset);
        let width = (span.len().max(1) as usize).min(avail.max(1));
        let underline = format!(
            "     | {}{}",
            " ".repeat(offset),
            if primary { "^" } else { "-" }.repeat(width),
        );
        let color = if primary { colors::ERROR } else { colors::BLUE };
        self.write_colored(&underline, color);
        if message.is_empty() {
            let _ = writeln!(self.writer);
        } else {
            let _ = writeln!(self.writer, " {message}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}
