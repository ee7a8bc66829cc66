//! Generation of C++ compile-time benchmarks
//!
//! This crate produces C++ source files that measure how expensive it is for
//! a compiler to perform some metaprogramming operation (mapping or folding
//! a sequence of types or values) with various libraries, at various problem
//! sizes. Each file holds `breadth` independent instances of the operation,
//! each of which operates on a sequence of `depth` synthetic elements.
//!
//! ```
//! use benchgen::{BenchmarkSpec, Operation};
//!
//! let file = BenchmarkSpec::new(Operation::Map, "mpl_vector", 2, 3).generate()?;
//! assert!(file.contains("using go1 = boost::mpl::transform<"));
//! # Ok::<(), benchgen::GenerateError>(())
//! ```

#![deny(missing_docs)]

pub mod benchmark;
pub mod driver;
pub mod emitter;
pub mod fragment;
pub mod grid;
pub mod ident;
pub mod operation;
pub mod registry;
pub mod technique;
pub mod template;

pub use crate::{
    benchmark::{BenchmarkSpec, ConfigError, GenerateError},
    driver::{Binding, ComposeError, Composer},
    emitter::{Container, HeaderPolicy, Level, Shape},
    fragment::Fragment,
    grid::{Grid, GridError, GridPoint, ParameterSpace, SizeRange, SizeRangeError},
    operation::Operation,
    registry::TemplateRegistry,
    technique::Technique,
};
