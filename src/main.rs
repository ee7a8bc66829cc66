//! Generate C++ compile-time benchmarks

#![deny(missing_docs)]

mod batch;
mod commands;
mod report;
mod suite;

use crate::{
    batch::Outcome,
    commands::{CompilationDatabase, DatabaseError},
    report::ReportError,
    suite::{Suite, SuiteError},
};
use benchgen::{technique, BenchmarkSpec, GenerateError, HeaderPolicy, Operation};
use clap::{Parser, Subcommand};
use std::{
    io::{self, Write},
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
};
use strum::IntoEnumIterator;
use thiserror::Error;

/// Generate C++ metaprogramming benchmarks of various sizes
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Operation to be carried out
    #[clap(subcommand)]
    command: Command,
}

/// Available operations
#[derive(Subcommand, Debug)]
enum Command {
    /// List the known operations and the techniques implementing them
    List,

    /// Generate a single benchmark file
    Generate {
        /// Benchmarked operation (map, foldl, type_foldl, value_foldl, sum)
        operation: Operation,

        /// Technique implementing the operation, e.g. mpl_vector
        variant: String,

        /// Number of independent instances of the operation
        #[clap(short, long, default_value = "1")]
        breadth: usize,

        /// Number of elements in each instance's sequence
        #[clap(short, long)]
        depth: usize,

        /// Number of distinct functions and seeds (type_foldl/value_foldl only)
        #[clap(short, long, default_value = "1")]
        variety: usize,

        /// Header inclusion policy (fair or minimal)
        #[clap(long, default_value = "fair")]
        headers: HeaderPolicy,

        /// Where the benchmark should be written (default: standard output)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate every benchmark file of a suite
    Suite {
        /// Suite file, in TOML format
        suite: PathBuf,

        /// Number of worker threads (default: one per CPU hyperthread)
        #[clap(short, long)]
        jobs: Option<NonZeroUsize>,

        /// Output directory, overriding the one from the suite file
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run a command
fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::List => list(&mut io::stdout().lock())?,
        Command::Generate {
            operation,
            variant,
            breadth,
            depth,
            variety,
            headers,
            output,
        } => {
            let spec = BenchmarkSpec::new(operation, variant, breadth, depth)
                .with_variety(variety)
                .with_headers(headers);
            let source = spec.generate()?;
            match output {
                Some(path) => {
                    batch::write_atomically(&path, source.as_bytes())?;
                    log::info!("Generated {}", path.display());
                }
                None => io::stdout().lock().write_all(source.as_bytes())?,
            }
        }
        Command::Suite {
            suite,
            jobs,
            output,
        } => {
            let suite = Suite::load(suite)?;
            let output_dir = output.unwrap_or_else(|| suite.output_directory().to_owned());
            let outcomes = batch::run(suite.specs()?, &output_dir, jobs);

            let report = report::write(&output_dir, &outcomes)?;
            log::info!("Wrote generation report to {}", report.display());
            if let Some(compiler) = suite.compiler() {
                let database = CompilationDatabase::new(compiler, &output_dir, &outcomes)?;
                if database.is_empty() {
                    log::warn!("No benchmark file was generated, skipping compilation database");
                } else {
                    let location = database.save(&output_dir)?;
                    log::info!(
                        "Wrote {} compile command(s) to {}",
                        database.len(),
                        location.display()
                    );
                }
            }

            let failures = outcomes
                .iter()
                .filter(|outcome| outcome.result.is_err())
                .collect::<Vec<&Outcome>>();
            println!(
                "Generated {} benchmark file(s) into {}",
                outcomes.len() - failures.len(),
                output_dir.display()
            );
            if !failures.is_empty() {
                eprintln!("Failed to generate {} benchmark file(s):", failures.len());
                for Outcome { spec, result, .. } in failures {
                    if let Err(e) = result {
                        eprintln!("- {spec}: {e}");
                    }
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Describe the known operations and techniques
fn list(out: &mut impl Write) -> io::Result<()> {
    for operation in Operation::iter() {
        writeln!(out, "{operation}: {}", operation.description())?;
        for technique in technique::for_operation(operation) {
            let container = technique.container();
            let depths = match technique.max_depth() {
                Some(max) => format!("{}..={max}", technique.min_depth()),
                None => format!("{}..", technique.min_depth()),
            };
            writeln!(
                out,
                "  - {:<22} {} ({}, depth {depths})",
                technique.variant(),
                container.name(),
                container.shape(),
            )?;
        }
    }
    Ok(())
}

/// Failure of a benchcc command
#[derive(Debug, Error)]
enum CliError {
    /// Failed to generate a benchmark
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Failed to load a suite
    #[error(transparent)]
    Suite(#[from] SuiteError),

    /// Failed to write the generation report
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Failed to produce the compilation database
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Failed to write output
    #[error("I/O error ({0})")]
    Io(#[from] io::Error),
}
