//! Benchmark suite files
//!
//! A suite describes a set of benchmark files to be generated, in TOML:
//!
//! ```toml
//! output_directory = "generated"
//! compiler = "clang++ -std=c++14 -fsyntax-only"
//! headers = "fair"
//!
//! [[benchmark]]
//! operation = "map"
//! variants = ["mpl_vector", "mpl_list"]
//! breadth = 1
//! depth = "0..=100:10"
//!
//! [[benchmark]]
//! operation = "type_foldl"
//! breadth = [1, 5]
//! depth = "10..=50:10"
//! variety = "1..=3"
//! ```
//!
//! Sizes are either a single integer, a list of integers, or a size range
//! string. Variants default to every technique of the operation.

use benchgen::{
    technique, BenchmarkSpec, HeaderPolicy, Operation, ParameterSpace, SizeRange, SizeRangeError,
};
use serde::{Deserialize, Deserializer};
use std::{
    collections::HashSet,
    fmt::Display,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// Set of benchmarks to be generated
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    /// Directory where benchmark files are written
    #[serde(default = "default_output_directory")]
    output_directory: PathBuf,

    /// Compilation command, used to produce a compilation database
    #[serde(default)]
    compiler: Option<String>,

    /// Header inclusion policy
    #[serde(default, deserialize_with = "from_str")]
    headers: HeaderPolicy,

    /// Groups of benchmarks
    #[serde(default, rename = "benchmark")]
    benchmarks: Vec<BenchmarkGroup>,
}
//
impl Suite {
    /// Load a suite file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// Directory where benchmark files are written
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Compilation command, if any
    pub fn compiler(&self) -> Option<&str> {
        self.compiler.as_deref()
    }

    /// Header inclusion policy
    pub fn headers(&self) -> HeaderPolicy {
        self.headers
    }

    /// Every benchmark file of the suite, in declaration order
    ///
    /// Within a group, files are ordered by variant, then by breadth, depth
    /// and variety. Benchmark sizes that a variant does not support are kept,
    /// they will be reported as failures when generating them.
    ///
    /// A benchmark file that several groups (or variant lists) ask for is
    /// only listed once, at its first occurrence.
    ///
    pub fn specs(&self) -> Result<Vec<BenchmarkSpec>, SuiteError> {
        let mut specs = Vec::new();
        let mut paths = HashSet::new();
        for group in &self.benchmarks {
            let space = group.space()?;
            for variant in group.variants()? {
                for point in space.points() {
                    let spec = BenchmarkSpec::at(group.operation, variant, point)
                        .with_headers(self.headers);
                    if paths.insert(spec.relative_path()) {
                        specs.push(spec);
                    } else {
                        log::debug!("Ignoring duplicate benchmark {spec}");
                    }
                }
            }
        }
        Ok(specs)
    }
}
//
impl FromStr for Suite {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Default output directory
fn default_output_directory() -> PathBuf {
    PathBuf::from("benchmarks")
}

/// Deserialize a string using its FromStr implementation
fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Benchmarks of one operation over one parameter space
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct BenchmarkGroup {
    /// Benchmarked operation
    #[serde(deserialize_with = "from_str")]
    operation: Operation,

    /// Techniques to be benchmarked, all of them by default
    #[serde(default)]
    variants: Option<Vec<String>>,

    /// Breadths to be benchmarked
    breadth: Sizes,

    /// Depths to be benchmarked
    depth: Sizes,

    /// Varieties to be benchmarked, 1 by default
    #[serde(default)]
    variety: Option<Sizes>,
}
//
impl BenchmarkGroup {
    /// Parameter space of the group
    fn space(&self) -> Result<ParameterSpace, SuiteError> {
        let variety = match &self.variety {
            Some(variety) => variety.to_range()?,
            None => SizeRange::single(1),
        };
        Ok(ParameterSpace::with_variety(
            self.breadth.to_range()?,
            self.depth.to_range()?,
            variety,
        ))
    }

    /// Techniques of the group, which must all exist
    fn variants(&self) -> Result<Vec<&str>, SuiteError> {
        let Some(variants) = &self.variants else {
            return Ok(technique::for_operation(self.operation)
                .map(|technique| technique.variant())
                .collect());
        };
        for variant in variants {
            if technique::find(self.operation, variant).is_none() {
                return Err(SuiteError::UnknownTechnique {
                    operation: self.operation,
                    variant: variant.clone(),
                });
            }
        }
        Ok(variants.iter().map(String::as_str).collect())
    }
}

/// Benchmark sizes, as written in a suite file
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
enum Sizes {
    /// A single size
    Single(usize),

    /// An explicit list of sizes
    List(Vec<usize>),

    /// A size range, e.g. `0..=100:10`
    Range(String),
}
//
impl Sizes {
    /// Interpret as a size range
    fn to_range(&self) -> Result<SizeRange, SizeRangeError> {
        match self {
            Sizes::Single(size) => Ok(SizeRange::single(*size)),
            Sizes::List(sizes) => SizeRange::from_values(sizes.iter().copied()),
            Sizes::Range(range) => range.parse(),
        }
    }
}

/// Failure to load a suite
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Failed to read the suite file
    #[error("failed to read suite file ({0})")]
    Io(#[from] io::Error),

    /// Failed to parse the suite file
    #[error("failed to parse suite file ({0})")]
    Toml(#[from] toml::de::Error),

    /// Bad benchmark sizes
    #[error("bad benchmark sizes ({0})")]
    Sizes(#[from] SizeRangeError),

    /// A variant does not exist
    #[error("no technique named {variant:?} is known for operation {operation}")]
    UnknownTechnique {
        /// Operation of the benchmark group
        operation: Operation,

        /// Requested variant
        variant: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use benchgen::GridPoint;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let suite = "".parse::<Suite>().unwrap();
        assert_eq!(suite.output_directory(), Path::new("benchmarks"));
        assert_eq!(suite.compiler(), None);
        assert_eq!(suite.headers(), HeaderPolicy::Fair);
        assert!(suite.specs().unwrap().is_empty());
    }

    #[test]
    fn full_suite() {
        let suite = r#"
            output_directory = "out"
            compiler = "clang++ -std=c++14 -fsyntax-only"
            headers = "minimal"

            [[benchmark]]
            operation = "fmap"
            variants = ["mpl_list", "hana_list"]
            breadth = 1
            depth = "0..=20:10"

            [[benchmark]]
            operation = "value_foldl"
            variants = ["fusion_list"]
            breadth = [2, 1]
            depth = 3
            variety = "1..=2"
        "#
        .parse::<Suite>()
        .unwrap();
        assert_eq!(suite.output_directory(), Path::new("out"));
        assert_eq!(suite.compiler(), Some("clang++ -std=c++14 -fsyntax-only"));
        assert_eq!(suite.headers(), HeaderPolicy::Minimal);

        let specs = suite.specs().unwrap();
        assert!(specs.iter().all(|s| s.headers() == HeaderPolicy::Minimal));
        let summary = specs
            .iter()
            .map(|s| {
                let GridPoint {
                    breadth,
                    depth,
                    variety,
                } = s.point();
                (s.operation(), s.variant(), breadth, depth, variety)
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            [
                (Operation::Map, "mpl_list", 1, 0, 1),
                (Operation::Map, "mpl_list", 1, 10, 1),
                (Operation::Map, "mpl_list", 1, 20, 1),
                (Operation::Map, "hana_list", 1, 0, 1),
                (Operation::Map, "hana_list", 1, 10, 1),
                (Operation::Map, "hana_list", 1, 20, 1),
                (Operation::ValueFoldl, "fusion_list", 1, 3, 1),
                (Operation::ValueFoldl, "fusion_list", 1, 3, 2),
                (Operation::ValueFoldl, "fusion_list", 2, 3, 1),
                (Operation::ValueFoldl, "fusion_list", 2, 3, 2),
            ]
        );
    }

    #[test]
    fn all_variants() {
        let suite = r#"
            [[benchmark]]
            operation = "sum"
            breadth = 1
            depth = 5
        "#
        .parse::<Suite>()
        .unwrap();
        let variants = suite
            .specs()
            .unwrap()
            .iter()
            .map(|s| s.variant().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(variants, ["constexpr", "mpl11_variadic_foldl"]);
    }

    #[test]
    fn duplicates() {
        let suite = r#"
            [[benchmark]]
            operation = "map"
            variants = ["mpl_list", "mpl_list", "hana_list"]
            breadth = 1
            depth = "1..=2"

            [[benchmark]]
            operation = "fmap"
            variants = ["hana_list"]
            breadth = 1
            depth = "2..=3"
        "#
        .parse::<Suite>()
        .unwrap();
        let paths = suite
            .specs()
            .unwrap()
            .iter()
            .map(BenchmarkSpec::relative_path)
            .collect::<Vec<_>>();
        let expected = [
            "map/mpl_list/b1_d1.cpp",
            "map/mpl_list/b1_d2.cpp",
            "map/hana_list/b1_d1.cpp",
            "map/hana_list/b1_d2.cpp",
            "map/hana_list/b1_d3.cpp",
        ]
        .map(PathBuf::from);
        assert_eq!(paths, expected);
    }

    #[test]
    fn errors() {
        assert_matches!("headers = 'lazy'".parse::<Suite>(), Err(SuiteError::Toml(_)));
        assert_matches!(
            "[[benchmark]]\noperation = 'reduce'\nbreadth = 1\ndepth = 1".parse::<Suite>(),
            Err(SuiteError::Toml(_))
        );
        assert_matches!("unknown_key = 1".parse::<Suite>(), Err(SuiteError::Toml(_)));

        let bad_variant = "[[benchmark]]\noperation = 'map'\nvariants = ['fusion_cons']\n\
                           breadth = 1\ndepth = 1"
            .parse::<Suite>()
            .unwrap();
        assert_matches!(
            bad_variant.specs(),
            Err(SuiteError::UnknownTechnique { operation: Operation::Map, variant }) => {
                assert_eq!(variant, "fusion_cons");
            }
        );

        let bad_range = "[[benchmark]]\noperation = 'map'\nbreadth = 1\ndepth = '5..1'"
            .parse::<Suite>()
            .unwrap();
        assert_matches!(
            bad_range.specs(),
            Err(SuiteError::Sizes(SizeRangeError::Empty))
        );

        assert_matches!(
            Suite::load("/this/suite/does/not/exist.toml"),
            Err(SuiteError::Io(_))
        );
    }
}
