//! Generation of complete benchmark files

use crate::{
    driver::{ComposeError, Composer},
    emitter::HeaderPolicy,
    fragment::{Fragment, Prelude},
    grid::{Grid, GridError, GridPoint},
    operation::{Operation, Scaffold},
    registry::TemplateRegistry,
    technique::{self, Body, Technique},
    template::Bindings,
};
use log::debug;
use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};
use thiserror::Error;

/// Description of one benchmark file
///
/// Generating the file is a pure function of this description: generating
/// the same description twice produces the same text.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BenchmarkSpec {
    /// Operation that is benchmarked
    operation: Operation,

    /// Technique used to perform the operation
    variant: Box<str>,

    /// Benchmark size
    point: GridPoint,

    /// Header inclusion policy
    headers: HeaderPolicy,
}
//
impl BenchmarkSpec {
    /// Describe a benchmark with a single operator and fair headers
    pub fn new(
        operation: Operation,
        variant: impl Into<Box<str>>,
        breadth: usize,
        depth: usize,
    ) -> Self {
        Self {
            operation,
            variant: variant.into(),
            point: GridPoint {
                breadth,
                depth,
                variety: 1,
            },
            headers: HeaderPolicy::default(),
        }
    }

    /// Describe a benchmark at some point of a parameter space
    pub fn at(operation: Operation, variant: impl Into<Box<str>>, point: GridPoint) -> Self {
        Self {
            point,
            ..Self::new(operation, variant, point.breadth, point.depth)
        }
    }

    /// Set the number of distinct operators of a hybrid operation
    pub fn with_variety(mut self, variety: usize) -> Self {
        self.point.variety = variety;
        self
    }

    /// Set the header inclusion policy
    pub fn with_headers(mut self, headers: HeaderPolicy) -> Self {
        self.headers = headers;
        self
    }

    /// Operation that is benchmarked
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Technique used to perform the operation
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Benchmark size
    pub fn point(&self) -> GridPoint {
        self.point
    }

    /// Header inclusion policy
    pub fn headers(&self) -> HeaderPolicy {
        self.headers
    }

    /// Path of the benchmark file, relative to an output directory
    ///
    /// Files are laid out as `<operation>/<variant>/b<breadth>_d<depth>.cpp`,
    /// with a `_v<variety>` suffix for hybrid operations.
    ///
    pub fn relative_path(&self) -> PathBuf {
        let GridPoint {
            breadth,
            depth,
            variety,
        } = self.point;
        let file_name = if self.operation.is_hybrid() {
            format!("b{breadth}_d{depth}_v{variety}.cpp")
        } else {
            format!("b{breadth}_d{depth}.cpp")
        };
        [self.operation.to_string(), self.variant.to_string(), file_name]
            .iter()
            .collect()
    }

    /// Look up the technique and check that it supports this benchmark's size
    ///
    /// Nothing is generated if this fails.
    ///
    pub fn validate(&self) -> Result<(&'static Technique, Grid), GenerateError> {
        let technique = technique::find(self.operation, &self.variant).ok_or_else(|| {
            GenerateError::UnknownTechnique {
                operation: self.operation,
                variant: self.variant.clone(),
            }
        })?;
        let grid = self.point.resolve().map_err(ConfigError::from)?;
        let depth = grid.depth();
        if depth < technique.min_depth() {
            return Err(ConfigError::DepthTooSmall {
                depth,
                min: technique.min_depth(),
            }
            .into());
        }
        if let Some(max) = technique.max_depth() {
            if depth > max {
                return Err(ConfigError::DepthTooLarge { depth, max }.into());
            }
        }
        if grid.variety() > 1 && !self.operation.is_hybrid() {
            return Err(ConfigError::VarietyUnsupported {
                operation: self.operation,
                variety: grid.variety(),
            }
            .into());
        }
        Ok((technique, grid))
    }

    /// Generate the benchmark file using the built-in templates
    pub fn generate(&self) -> Result<String, GenerateError> {
        self.generate_with(TemplateRegistry::builtin())
    }

    /// Generate the benchmark file using custom templates
    pub fn generate_with(&self, registry: &TemplateRegistry) -> Result<String, GenerateError> {
        let (technique, grid) = self.validate()?;
        debug!("Generating {self}");
        let composer = Composer::new(registry, grid);

        let mut prelude = Prelude::new();
        prelude.define(technique.defines().iter().copied());
        prelude.include(technique.includes().iter().copied());

        let preamble = match technique.preamble() {
            Some(name) => composer.render_once(name, &Bindings::new())?,
            None => Fragment::empty(),
        };

        let container = technique.container();
        let policy = self.headers;
        let body = match (self.operation.scaffold(), technique.body()) {
            (Scaffold::Main(main), Body::Main(declare)) => composer.render(main, |instance| {
                let sequence = container.emit(instance.sequence(), policy)?;
                prelude.include(sequence.headers());
                Ok(declare(&sequence, instance)?)
            })?,
            (Scaffold::Hybrid { operator, hybrid }, Body::Hybrid(declare)) => {
                composer.render_hybrid(operator, hybrid, |instance| {
                    let sequence = container.emit(instance.sequence(), policy)?;
                    prelude.include(sequence.headers());
                    Ok(declare(&sequence, instance)?)
                })?
            }
            _ => unreachable!("Technique bodies should match their operation's scaffold"),
        };

        let file = composer.render_file(&prelude, preamble, body)?;
        debug!("Generated {} bytes for {self}", file.len());
        Ok(file)
    }
}
//
impl Display for BenchmarkSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let GridPoint {
            breadth,
            depth,
            variety,
        } = self.point;
        write!(
            f,
            "{}/{} (breadth {breadth}, depth {depth}",
            self.operation, self.variant
        )?;
        if self.operation.is_hybrid() {
            write!(f, ", variety {variety}")?;
        }
        write!(f, ")")
    }
}

/// Benchmark size that a technique does not support
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Invalid grid
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Depth is below the technique's minimum
    #[error("depth {depth} is below the supported minimum of {min}")]
    DepthTooSmall {
        /// Requested depth
        depth: usize,

        /// Smallest supported depth
        min: usize,
    },

    /// Depth is above the technique's maximum
    #[error("depth {depth} is above the supported maximum of {max}")]
    DepthTooLarge {
        /// Requested depth
        depth: usize,

        /// Largest supported depth
        max: usize,
    },

    /// Several operators were requested for a non-hybrid operation
    #[error("{operation} does not support a variety of {variety}, only hybrid operations do")]
    VarietyUnsupported {
        /// Requested operation
        operation: Operation,

        /// Requested variety
        variety: usize,
    },
}

/// Failure to generate a benchmark file
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GenerateError {
    /// No technique is registered for this (operation, variant) pair
    #[error("no technique named {variant:?} is known for operation {operation}")]
    UnknownTechnique {
        /// Requested operation
        operation: Operation,

        /// Requested variant
        variant: Box<str>,
    },

    /// The benchmark size is not supported
    #[error("invalid benchmark configuration: {0}")]
    Config(#[from] ConfigError),

    /// The file could not be composed
    #[error("failed to compose benchmark file: {0}")]
    Compose(#[from] ComposeError),
}
