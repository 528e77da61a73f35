//! CLI command implementations.

use std::io::IsTerminal;
use std::sync::Mutex;

use rayon::prelude::*;

use garnet_diagnostic::TerminalEmitter;
use garnet_ir::NodePrinter;
use garnet_lexer_core::SourceBuffer;
use garnet_parse::{ParseMode, ParseOptions};

/// Options shared by the commands.
#[derive(Copy, Clone, Debug, Default)]
pub struct CliOptions {
    pub mode: ParseMode,
    pub debug: bool,
    pub no_color: bool,
}

impl CliOptions {
    fn parse_options(self) -> ParseOptions {
        ParseOptions {
            mode: self.mode,
            debug: self.debug,
        }
    }

    fn colors(self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

/// Split flags from file arguments.
pub fn parse_cli_options(args: &[String]) -> (CliOptions, Vec<String>) {
    let mut options = CliOptions::default();
    let mut files = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => options.debug = true,
            "--no-color" => options.no_color = true,
            "--mode" => match iter.next().map(String::as_str) {
                Some("expr" | "expression") => options.mode = ParseMode::Expression,
                Some("program") => options.mode = ParseMode::Program,
                other => {
                    eprintln!("error: invalid --mode {other:?} (expected program or expr)");
                    std::process::exit(1);
                }
            },
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option {flag}");
                std::process::exit(1);
            }
            _ => files.push(arg.clone()),
        }
    }
    (options, files)
}

/// Syntax-check files in parallel. Returns the number of failures.
pub fn check_files(files: &[String], options: &CliOptions) -> usize {
    // Diagnostics are rendered under a lock so parallel failures do not
    // interleave their snippets.
    let stderr = Mutex::new(());
    let parse_options = options.parse_options();
    let colors = options.colors();

    files
        .par_iter()
        .map(|file| {
            let source = match std::fs::read(file) {
                Ok(source) => source,
                Err(err) => {
                    let _guard = stderr.lock();
                    eprintln!("garnet: cannot read {file}: {err}");
                    return 1usize;
                }
            };
            let buffer = SourceBuffer::new(&source);
            match garnet_parse::parse_buffer(&buffer, &parse_options) {
                Ok(_) => {
                    let _guard = stderr.lock();
                    println!("{file}: Syntax OK");
                    0
                }
                Err(err) => {
                    let _guard = stderr.lock();
                    TerminalEmitter::stderr(colors).emit(file, &buffer, &err.to_diagnostic());
                    1
                }
            }
        })
        .sum()
}

/// Parse one file and dump its tree as an s-expression. Returns success.
pub fn ast_file(file: &str, options: &CliOptions) -> bool {
    let source = match std::fs::read(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("garnet: cannot read {file}: {err}");
            return false;
        }
    };
    let buffer = SourceBuffer::new(&source);
    match garnet_parse::parse_buffer(&buffer, &options.parse_options()) {
        Ok(root) => {
            println!("{}", NodePrinter::print(&root));
            true
        }
        Err(err) => {
            TerminalEmitter::stderr(options.colors()).emit(file, &buffer, &err.to_diagnostic());
            false
        }
    }
}
