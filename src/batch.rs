//! Parallel generation of benchmark files

use benchgen::{BenchmarkSpec, GenerateError};
use crossbeam_deque::{Injector, Steal};
use std::{
    io::{self, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::mpsc::{self, Sender},
};
use thiserror::Error;

/// Generate a set of benchmark files into an output directory
///
/// Each file is written at its [`BenchmarkSpec::relative_path()`] within
/// `output_dir`. A failure to generate one file does not prevent others from
/// being generated, the outcome of every job is reported in input order.
///
/// Jobs are distributed over `concurrency` worker threads, one per CPU
/// hyperthread by default.
///
pub fn run(
    specs: Vec<BenchmarkSpec>,
    output_dir: &Path,
    concurrency: Option<NonZeroUsize>,
) -> Vec<Outcome> {
    let num_jobs = specs.len();
    let concurrency = self::concurrency(concurrency).min(num_jobs.max(1));
    log::info!("Will generate {num_jobs} file(s) using {concurrency} worker thread(s)");

    // Set up communication between the main thread and workers
    let jobs = JobQueue::new(specs);
    let (results_sender, results_receiver) = mpsc::channel();

    // Run the worker threads and collect their results
    let mut outcomes = std::thread::scope(|s| {
        for _ in 0..concurrency {
            let results_sender = results_sender.clone();
            let jobs = &jobs;
            s.spawn(move || worker(jobs, results_sender, output_dir));
        }
        std::mem::drop(results_sender);

        let mut outcomes = Vec::with_capacity(num_jobs);
        for (idx, outcome) in results_receiver {
            match &outcome.result {
                Ok(()) => log::info!("Generated {}", outcome.path.display()),
                Err(e) => log::warn!("Failed to generate {}: {e}", outcome.spec),
            }
            outcomes.push((idx, outcome));
        }
        outcomes
    });
    outcomes.sort_unstable_by_key(|(idx, _)| *idx);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Result of a benchmark file generation job
#[derive(Debug)]
pub struct Outcome {
    /// Benchmark that was requested
    pub spec: BenchmarkSpec,

    /// Location of the benchmark file
    pub path: PathBuf,

    /// Whether the file was successfully generated
    pub result: Result<(), JobError>,
}

/// Error while generating one benchmark file
#[derive(Debug, Error)]
pub enum JobError {
    /// The benchmark could not be generated
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The benchmark file could not be written
    #[error("failed to write benchmark file ({0})")]
    Io(#[from] io::Error),
}

/// Determine the number of worker threads to use from the configuration
fn concurrency(concurrency: Option<NonZeroUsize>) -> usize {
    concurrency.map(usize::from).unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(1)
    })
}

/// Worker thread
fn worker(jobs: &JobQueue, output: Sender<(usize, Outcome)>, output_dir: &Path) {
    for (idx, spec) in jobs {
        let path = output_dir.join(spec.relative_path());
        let result = process_job(&spec, &path);
        output
            .send((idx, Outcome { spec, path, result }))
            .expect("Main thread has crashed");
    }
}

/// Generate a single benchmark file
fn process_job(spec: &BenchmarkSpec, path: &Path) -> Result<(), JobError> {
    let source = spec.generate()?;
    write_atomically(path, source.as_bytes())?;
    Ok(())
}

/// Write a file so that readers never observe it partially written
///
/// Missing parent directories are created.
///
pub fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(contents)?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Numbered generation job
type Job = (usize, BenchmarkSpec);

/// Jobs shared by all workers
///
/// Jobs never spawn other jobs, so workers only need to drain one global
/// queue until it is empty.
///
struct JobQueue(Injector<Job>);
//
impl JobQueue {
    /// Enqueue jobs, numbered in input order
    fn new(specs: Vec<BenchmarkSpec>) -> Self {
        let injector = Injector::new();
        for job in specs.into_iter().enumerate() {
            injector.push(job);
        }
        Self(injector)
    }
}
//
impl Iterator for &JobQueue {
    type Item = Job;

    fn next(&mut self) -> Option<Job> {
        loop {
            match self.0.steal() {
                Steal::Success(job) => return Some(job),
                Steal::Empty => return None,
                Steal::Retry => continue,
            }
        }
    }
}
