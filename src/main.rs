use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use liva_parser::{format_error, parse_source_with, ParseOptions, DEFAULT_MAX_NESTING_DEPTH};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Parse a liva source file and print its syntax tree.
#[derive(Debug, Parser)]
#[command(name = "liva-parse", about = "Parse a liva source file and print its AST")]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Maximum nesting depth of expressions and blocks
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Only report errors, do not print the tree
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %args.file.display(), "failed to read source file");
            eprintln!("Error: could not read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let options = ParseOptions {
        file: Some(file_name.clone()),
        max_nesting_depth: args.max_depth,
    };

    let start = Instant::now();
    let parsed = parse_source_with(&source, &options);
    debug!(elapsed = ?start.elapsed(), "parse finished");

    match parsed {
        Ok(block) => {
            if !args.quiet {
                println!("{:#?}", block);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", format_error(&err, &source, &file_name));
            ExitCode::FAILURE
        }
    }
}
