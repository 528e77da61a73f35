//! Table-driven Ruby parser.
//!
//! The pipeline: source bytes → [`garnet_lexer::Lexer`] → token stream →
//! shift-reduce driver (consulting the generated LALR table) → raw tree →
//! post-processing passes → final [`ParseNode`].
//!
//! The grammar table is generated once per process for each
//! [`ParseMode`] and shared immutably behind a `OnceLock`: concurrent
//! parses on separate threads read it without locking. A single parse is
//! strictly sequential, has no suspension points, and either returns a
//! complete, internally consistent tree or an error — never a partial
//! tree.
//!
//! ```
//! let root = garnet_parse::parse(b"a = 1")?;
//! assert_eq!(root.span, garnet_ir::Span::new(0, 5));
//! # Ok::<(), garnet_parse::SyntaxError>(())
//! ```

mod actions;
mod driver;
mod error;
pub mod passes;
mod rules;
mod terms;

pub use error::{ParseError, SyntaxError, ValidationError, ValidationErrorKind};
pub use rules::ParseMode;

use std::sync::OnceLock;

use garnet_grammar::ParseTable;
use garnet_ir::ParseNode;
use garnet_lexer::Lexer;
use garnet_lexer_core::SourceBuffer;

use rules::Lang;

/// Options for [`parse_with_options`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions {
    /// Which entry point the source targets.
    pub mode: ParseMode,
    /// Emit `tracing` debug events for every shift and reduce.
    pub debug: bool,
}

/// Parse a full program.
pub fn parse(source: &[u8]) -> Result<ParseNode, SyntaxError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a single expression.
pub fn parse_expression(source: &[u8]) -> Result<ParseNode, SyntaxError> {
    parse_with_options(
        source,
        &ParseOptions {
            mode: ParseMode::Expression,
            ..ParseOptions::default()
        },
    )
}

/// Parse with explicit options.
pub fn parse_with_options(
    source: &[u8],
    options: &ParseOptions,
) -> Result<ParseNode, SyntaxError> {
    let buffer = SourceBuffer::new(source);
    parse_buffer(&buffer, options)
}

/// Parse an already-constructed source buffer. Lets callers that keep the
/// buffer around for diagnostics avoid building it twice.
pub fn parse_buffer(
    buffer: &SourceBuffer,
    options: &ParseOptions,
) -> Result<ParseNode, SyntaxError> {
    let language = language(options.mode);
    let mut lexer = Lexer::new(buffer);
    let raw = driver::run(&mut lexer, &language.table, &language.lang, options.debug)?;

    // Fixed pass order; each pass is pure and idempotent on its output.
    let tree = passes::fold_literals(raw)?;
    let tree = passes::desugar_op_assign(tree)?;
    let tree = passes::validate(tree)?;
    Ok(tree)
}

struct Language {
    table: ParseTable,
    lang: Lang,
}

/// The per-mode generated table, built on first use and shared after.
fn language(mode: ParseMode) -> &'static Language {
    static PROGRAM: OnceLock<Language> = OnceLock::new();
    static EXPRESSION: OnceLock<Language> = OnceLock::new();
    let cell = match mode {
        ParseMode::Program => &PROGRAM,
        ParseMode::Expression => &EXPRESSION,
    };
    cell.get_or_init(|| {
        let lang = rules::build(mode);
        let table = ParseTable::generate(&lang.grammar);
        tracing::debug!(
            mode = ?mode,
            states = table.n_states(),
            "generated parse table"
        );
        Language { table, lang }
    })
}

#[cfg(test)]
mod tests;
