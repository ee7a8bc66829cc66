//! Compilation database for generated benchmarks
//!
//! When a suite specifies a compiler, a `compile_commands.json` file is
//! written next to the benchmark files, so that any tool that understands
//! compilation databases can be used to build and time them.

use crate::batch::{self, Outcome};
use serde::{Deserialize, Serialize};
use serde_json as json;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Full compilation database
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompilationDatabase(Vec<DatabaseEntry>);
//
impl CompilationDatabase {
    /// Location of the compilation database relative to the output directory
    pub fn location() -> &'static Path {
        Path::new("compile_commands.json")
    }

    /// Build a compilation database for the successfully generated files
    ///
    /// `compiler` is a shell-like command line (e.g. `clang++ -std=c++14`),
    /// to which the path of each benchmark file is appended.
    ///
    pub fn new(
        compiler: &str,
        output_dir: &Path,
        outcomes: &[Outcome],
    ) -> Result<Self, DatabaseError> {
        let compiler = shlex::split(compiler)
            .filter(|args| !args.is_empty())
            .ok_or_else(|| DatabaseError::BadCompiler(compiler.into()))?;
        let directory = output_dir
            .canonicalize()
            .unwrap_or_else(|_| output_dir.to_owned());
        let mut entries = Vec::with_capacity(outcomes.len());
        for outcome in outcomes.iter().filter(|o| o.result.is_ok()) {
            let file = pathdiff::diff_paths(&outcome.path, output_dir)
                .unwrap_or_else(|| outcome.path.clone());
            let file_str = file
                .to_str()
                .ok_or_else(|| DatabaseError::NonUnicodePath(file.clone()))?;
            let command = shlex::try_join(
                compiler
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(file_str)),
            )
            .map_err(|_| DatabaseError::BadCompiler(compiler.join(" ").into()))?;
            entries.push(DatabaseEntry {
                directory: directory.clone().into(),
                command: command.into(),
                file: file.into(),
            });
        }
        Ok(Self(entries))
    }

    /// Save into an output directory, returning the database location
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf, DatabaseError> {
        let path = output_dir.join(Self::location());
        let json = json::to_string_pretty(&self.0)?;
        batch::write_atomically(&path, json.as_bytes())?;
        Ok(path)
    }

    /// Number of database entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that the database has no entry
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Failure to produce a compilation database
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The compiler command could not be split into arguments
    #[error("bad compiler command {0:?}")]
    BadCompiler(Box<str>),

    /// A benchmark file path cannot be written into a command line
    #[error("benchmark path {0:?} is not valid Unicode")]
    NonUnicodePath(PathBuf),

    /// Failed to serialize the compilation database
    #[error("failed to serialize compilation database ({0})")]
    Json(#[from] json::Error),

    /// Failed to write the compilation database
    #[error("failed to write compilation database ({0})")]
    Io(#[from] io::Error),
}

/// One entry from the compilation database
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseEntry {
    /// Working directory for the build command
    directory: Box<Path>,

    /// Build command
    command: Box<str>,

    /// Input file
    file: Box<Path>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use benchgen::{BenchmarkSpec, Operation};
    use pretty_assertions::assert_eq;
    use shlex::Shlex;

    #[test]
    fn database() {
        let output = tempfile::tempdir().unwrap();
        let specs = vec![
            BenchmarkSpec::new(Operation::Map, "hana_list", 1, 2),
            BenchmarkSpec::new(Operation::Map, "mpl_vector", 1, 0),
            BenchmarkSpec::new(Operation::Foldl, "fusion_cons", 2, 2),
        ];
        let outcomes = batch::run(specs, output.path(), None);
        let database = CompilationDatabase::new(
            "clang++ -std=c++14 -I '/opt/my boost/include'",
            output.path(),
            &outcomes,
        )
        .unwrap();

        // The empty mpl_vector benchmark cannot be generated
        assert_eq!(database.len(), 2);
        let path = database.save(output.path()).unwrap();
        assert_eq!(path, output.path().join(CompilationDatabase::location()));
        let entries =
            json::from_str::<Vec<DatabaseEntry>>(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries, database.0);

        let inputs = entries.iter().map(|e| &*e.file).collect::<Vec<_>>();
        assert_eq!(
            inputs,
            [
                Path::new("map/hana_list/b1_d2.cpp"),
                Path::new("foldl/fusion_cons/b2_d2.cpp")
            ]
        );
        for entry in &entries {
            let args = Shlex::new(&entry.command).collect::<Vec<_>>();
            assert_eq!(
                args,
                [
                    "clang++",
                    "-std=c++14",
                    "-I",
                    "/opt/my boost/include",
                    entry.file.to_str().unwrap()
                ]
            );
            assert!(entry.directory.join(&entry.file).is_file());
        }
    }

    #[test]
    fn bad_compiler() {
        let output = tempfile::tempdir().unwrap();
        for compiler in ["", "   ", "clang++ 'unterminated"] {
            assert_matches!(
                CompilationDatabase::new(compiler, output.path(), &[]),
                Err(DatabaseError::BadCompiler(_))
            );
        }
    }
}
