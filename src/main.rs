use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use grammars::{logging, Dispatcher, GrammarError, GrammarRegistry, Input, InputReader, Policy};
use std::io::{self, Write};
use std::process::ExitCode;

/// Report which grammars accept the text on standard input
#[derive(Parser, Debug)]
#[command(name = "grammars", version)]
struct Cli {
    /// Parse with this grammar only
    #[arg(short, long, value_name = "NAME")]
    grammar: Option<String>,

    /// Try every grammar instead of stopping at the first that accepts
    #[arg(short, long, conflicts_with = "grammar")]
    all: bool,

    /// Print the names of accepting grammars instead of syntax trees
    #[arg(short, long)]
    labels: bool,

    /// Print syntax trees as JSON
    #[arg(long, conflicts_with = "labels")]
    json: bool,

    /// Start rule index for --grammar
    #[arg(long, default_value_t = 0, requires = "grammar")]
    rule: usize,

    /// List registered grammars and exit
    #[arg(long)]
    list: bool,

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
            if let Some(GrammarError::NoGrammarMatched(causes)) = err.downcast_ref::<GrammarError>() {
                for rejection in causes {
                    eprintln!("  {rejection}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let registry = GrammarRegistry::with_defaults();
    let mut out = io::stdout().lock();

    if cli.list {
        for grammar in registry.iter() {
            writeln!(out, "{:<10} {}", grammar.name, grammar.description)?;
        }
        return Ok(());
    }

    let text = InputReader::new()
        .max_bytes(cli.max_input_bytes)
        .read(io::stdin().lock())
        .context("failed to read standard input")?;

    let policy = match (&cli.grammar, cli.all) {
        (Some(name), _) => Policy::Named(name.clone()),
        (None, true) => Policy::MatchAll,
        (None, false) => Policy::FirstMatch,
    };

    let report = Dispatcher::new(&registry).dispatch_from(&text, &policy, cli.rule)?;

    let source = Input::new(text);
    for matched in &report.accepted {
        if cli.labels {
            writeln!(out, "{}", matched.grammar)?;
        } else if cli.json {
            serde_json::to_writer_pretty(&mut out, matched)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", matched.tree.pretty(&source))?;
        }
    }
    out.flush()?;

    Ok(())
}
