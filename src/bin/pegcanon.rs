use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use grammars::{canonicalize_named, logging, GrammarRegistry, InputReader};
use std::io::{self, Write};
use std::process::ExitCode;

/// Canonicalize standard input by removing what a grammar's semantic actions hide
#[derive(Parser, Debug)]
#[command(name = "pegcanon", version)]
struct Cli {
    /// Grammar whose semantic actions drive the canonicalization
    #[arg(short, long, value_name = "NAME", default_value = "peg")]
    grammar: String,

    /// Refuse inputs larger than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = 64 * 1024 * 1024)]
    max_input_bytes: u64,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let registry = GrammarRegistry::with_defaults();

    let text = InputReader::new()
        .max_bytes(cli.max_input_bytes)
        .read(io::stdin().lock())
        .context("failed to read standard input")?;

    let canonical = canonicalize_named(&registry, &cli.grammar, &text)?;

    let mut out = io::stdout().lock();
    out.write_all(canonical.text.as_bytes())?;
    out.flush()?;

    Ok(())
}
