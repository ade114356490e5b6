use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use itertools::Itertools;
use reactions::{canonicalize, equation::scanner::tokenize, MergePolicy, ParseOptions};

/// Reads reaction equations and prints them in canonical form.
#[derive(Debug, Parser)]
#[command(name = "reactions")]
struct Args {
    /// Input file; standard input when omitted
    file: Option<PathBuf>,

    /// Merge equal molecules on a side and sum their coefficients
    #[arg(long)]
    combine: bool,

    /// Print the token stream instead of the parsed reactions
    #[arg(long)]
    tokens: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let source = match read_source(&args, io::stdin()) {
        Ok(source) => source,
        Err(error) => {
            tracing::error!(%error, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    let (output, clean) = run(&args, &source);
    println!("{output}");

    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_source(args: &Args, mut stdin: impl Read) -> io::Result<String> {
    match &args.file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            stdin.read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Returns what to print and whether the input was free of diagnostics.
fn run(args: &Args, source: &str) -> (String, bool) {
    if args.tokens {
        let (tokens, errors) = tokenize(source);
        let output = tokens
            .iter()
            .map(|token| format!("{} {}", token.position, token.kind))
            .join("\n");
        (output, errors.is_empty())
    } else {
        let options = ParseOptions {
            merge: if args.combine {
                MergePolicy::Combine
            } else {
                MergePolicy::Distinct
            },
        };
        let parsed = canonicalize(source, options);
        let clean = parsed.is_clean();
        (parsed.value, clean)
    }
}
