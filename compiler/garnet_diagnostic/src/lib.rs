//! Structured diagnostics for the Garnet parser.
//!
//! The parser core never formats errors for humans; it produces
//! [`Diagnostic`] values (message, labeled spans, error code) and leaves
//! rendering to the consumer. [`TerminalEmitter`] is the bundled renderer:
//! `file:line:col`, the offending source line, and a caret underline.

mod diagnostic;
mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::TerminalEmitter;
pub use error_code::ErrorCode;
