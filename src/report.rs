//! Generation report

use crate::batch::Outcome;
use serde::{Deserialize, Serialize};
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Location of the report relative to the output directory
pub const LOCATION: &str = "report.csv";

/// Record from the generation report CSV file
///
/// This summarizes the outcome of generating one benchmark file.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    /// Benchmarked operation
    operation: String,

    /// Technique used to implement the operation
    variant: String,

    /// Number of independent instances of the operation
    breadth: usize,

    /// Number of elements per sequence
    depth: usize,

    /// Number of distinct functions and seeds
    variety: usize,

    /// Path to the benchmark file, starting from the output directory
    file: PathBuf,

    /// Why the benchmark file could not be generated, if it failed
    error: Option<String>,
}
//
impl Record {
    /// Summarize a generation outcome
    pub fn new(outcome: &Outcome, output_dir: &Path) -> Self {
        let point = outcome.spec.point();
        let file = pathdiff::diff_paths(&outcome.path, output_dir)
            .unwrap_or_else(|| outcome.path.clone());
        Self {
            operation: outcome.spec.operation().to_string(),
            variant: outcome.spec.variant().to_owned(),
            breadth: point.breadth,
            depth: point.depth,
            variety: point.variety,
            file,
            error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Write the generation report of a batch into its output directory
///
/// Returns the location of the report.
///
pub fn write(output_dir: &Path, outcomes: &[Outcome]) -> Result<PathBuf, ReportError> {
    let path = output_dir.join(LOCATION);
    std::fs::create_dir_all(output_dir)?;
    let mut writer = csv::Writer::from_path(&path)?;
    for outcome in outcomes {
        writer.serialize(Record::new(outcome, output_dir))?;
    }
    writer.flush()?;
    Ok(path)
}

/// Failure to write a generation report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to serialize the report
    #[error("failed to process generation report ({0})")]
    Csv(#[from] csv::Error),

    /// Failed to access the report file
    #[error("failed to access generation report ({0})")]
    Io(#[from] io::Error),
}
