//! Garnet CLI.
//!
//! `garnet check FILES...` syntax-checks files (in parallel) and renders
//! structured diagnostics; `garnet ast FILE` dumps the parse tree as an
//! s-expression.

mod commands;

use commands::{ast_file, check_files, parse_cli_options};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "check" => {
            let (options, files) = parse_cli_options(&args[2..]);
            if files.is_empty() {
                eprintln!("Usage: garnet check [options] <file.rb>...");
                std::process::exit(1);
            }
            let failures = check_files(&files, &options);
            if failures > 0 {
                std::process::exit(1);
            }
        }
        "ast" => {
            let (options, files) = parse_cli_options(&args[2..]);
            let [file] = files.as_slice() else {
                eprintln!("Usage: garnet ast [options] <file.rb>");
                std::process::exit(1);
            };
            if !ast_file(file, &options) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("garnet {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn print_usage() {
    println!("Garnet: a grammar-driven Ruby parser front end");
    println!();
    println!("Usage: garnet <command> [options] <files>");
    println!();
    println!("Commands:");
    println!("  check <files>...   Syntax-check files (like `ruby -c`)");
    println!("  ast <file>         Parse one file and dump the tree");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Options:");
    println!("  --mode <program|expr>   Entry point (default: program)");
    println!("  --debug                 Trace driver shifts/reductions");
    println!("  --no-color              Disable colored diagnostics");
    println!();
    println!("Examples:");
    println!("  garnet check lib/*.rb");
    println!("  garnet ast script.rb");
    println!("  garnet ast --mode expr snippet.rb");
}
