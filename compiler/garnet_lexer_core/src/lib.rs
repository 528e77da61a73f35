//! Low-level source machinery for the Garnet lexer.
//!
//! [`SourceBuffer`] owns the raw bytes of one source unit, sentinel
//! terminated for zero-bounds-check scanning, with the declared encoding
//! (magic comment or default) already resolved and the content validated
//! against it. [`Cursor`] is a copyable byte cursor over that buffer.
//!
//! The crate is deliberately standalone so external tooling can address
//! source positions without pulling in the parser.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::{Encoding, EncodingIssue, EncodingIssueKind, SourceBuffer};
