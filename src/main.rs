//! Horn - forward-chaining rule engine
//!
//! Command-line interface: load facts and rules from the textual notation,
//! saturate, print the resulting fact set.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use horn::{parse, Engine, EngineConfig, Statement, Termination};

#[derive(Parser)]
#[command(name = "horn")]
#[command(version = "0.1.0")]
#[command(about = "Forward-chaining rule engine over first-order terms", long_about = None)]
struct Cli {
    /// Input files to process
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Read input from stdin (implied when no files are given)
    #[arg(long)]
    stdin: bool,

    /// Output only derived facts
    #[arg(long)]
    filter: bool,

    /// Maximum number of saturation passes
    #[arg(long, default_value = "100")]
    max_passes: usize,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print run statistics to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress warnings)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut sources = Vec::new();
    for path in &cli.inputs {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((path.display().to_string(), text));
    }
    if cli.stdin || cli.inputs.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        sources.push(("<stdin>".to_string(), text));
    }

    let mut engine = Engine::with_config(EngineConfig {
        max_passes: cli.max_passes,
    });

    for (name, text) in &sources {
        let statements = parse(text).with_context(|| format!("failed to parse {}", name))?;
        for stmt in statements {
            match stmt {
                Statement::Fact(fact) => {
                    // Non-ground facts are a warning, not a fatal error.
                    if let Err(err) = engine.add_fact(fact) {
                        if !cli.quiet {
                            eprintln!("warning: {}: {}", name, err);
                        }
                    }
                }
                Statement::Rule(rule) => engine.add_rule(rule),
            }
        }
    }

    let initial = engine.facts().to_set();
    let result = engine.infer();

    if cli.verbose {
        eprintln!(
            "passes: {}, rules fired: {}, facts derived: {}",
            result.stats.passes, result.stats.rules_fired, result.stats.facts_derived
        );
    }
    if result.stats.termination == Termination::PassLimit && !cli.quiet {
        eprintln!(
            "warning: pass limit ({}) reached before a fixpoint; output may be incomplete",
            cli.max_passes
        );
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    for fact in &result.facts {
        if cli.filter && initial.contains(fact) {
            continue;
        }
        writeln!(out, "{}.", fact)?;
    }

    Ok(())
}
