//! Library-specific container emitters
//!
//! Each emitter knows how to spell one third-party container in C++, given
//! a sequence of synthetic elements, and which headers must be included for
//! that spelling to compile.

mod fusion;
mod hana;
mod mpl;
mod mpl11;
mod pack;

pub use self::{
    fusion::{FusionCons, FusionList, FusionVector},
    hana::{HanaList, HanaListT, HanaTypelist},
    mpl::{MplList, MplVector},
    mpl11::Mpl11List,
    pack::Pack,
};

use crate::{
    fragment::{Fragment, FragmentError},
    ident::Sequence,
};
use thiserror::Error;

/// Structural family of a container
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumIter)]
pub enum Shape {
    /// Arity-numbered, random-access container (`vectorN<...>`)
    #[strum(to_string = "flat-vector")]
    FlatVector,

    /// Recursively nested head/tail container
    #[strum(to_string = "linked-cons")]
    LinkedCons,

    /// Variadic list-like container
    #[strum(to_string = "generic-list")]
    GenericList,

    /// Bare comma-separated list of elements, for variadic templates
    #[strum(to_string = "variadic-pack")]
    VariadicPack,
}
//
impl Shape {
    /// Minimal number of elements supported by containers of this shape
    ///
    /// Flat vectors are spelled with arity-numbered templates, which we only
    /// emit for non-empty sequences.
    ///
    pub fn min_len(self) -> usize {
        match self {
            Shape::FlatVector => 1,
            Shape::LinkedCons | Shape::GenericList | Shape::VariadicPack => 0,
        }
    }
}

/// Whether an expression denotes a type or a value
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Level {
    /// Type expression, e.g. `boost::mpl::vector1<x0<0>>`
    Type,

    /// Value expression, e.g. `boost::hana::list(x0<0>{})`
    Value,
}

/// Which headers are included for arity-numbered containers
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum HeaderPolicy {
    /// Always include the complete header set of the container
    ///
    /// Header parsing cost is then the same at every benchmark size, so that
    /// only the cost of the operation itself varies with depth.
    ///
    #[default]
    Fair,

    /// Include the smallest header set that supports the sequence's length
    Minimal,
}

/// Source text constructing a container, with the headers it requires
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerFragment {
    /// Expression constructing the container
    expression: Fragment,

    /// Whether the expression is a type or a value
    level: Level,

    /// Required header paths, in inclusion order
    headers: Box<[Box<str>]>,
}
//
impl ContainerFragment {
    /// Expression constructing the container, at its natural level
    pub fn expression(&self) -> &Fragment {
        &self.expression
    }

    /// Whether the expression is a type or a value
    pub fn level(&self) -> Level {
        self.level
    }

    /// Required header paths, in inclusion order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|header| &**header)
    }

    /// Spell the container as a type
    pub fn as_type(&self) -> Result<Fragment, FragmentError> {
        match self.level {
            Level::Type => Ok(self.expression.clone()),
            Level::Value => Fragment::new(format!("decltype({})", self.expression)),
        }
    }

    /// Spell the container as a value
    pub fn as_value(&self) -> Result<Fragment, FragmentError> {
        match self.level {
            Level::Type => Fragment::new(format!("{}{{}}", self.expression)),
            Level::Value => Ok(self.expression.clone()),
        }
    }
}

/// Strategy for spelling one library's container
pub trait Container: Send + Sync {
    /// Name of the container, e.g. `mpl::vector`
    fn name(&self) -> &'static str;

    /// Structural family of the container
    fn shape(&self) -> Shape;

    /// Whether the container is spelled as a type or a value
    fn level(&self) -> Level;

    /// Minimal supported number of elements
    fn min_len(&self) -> usize {
        self.shape().min_len()
    }

    /// Maximal supported number of elements, if there is one
    fn max_len(&self) -> Option<usize> {
        None
    }

    /// Headers needed to construct a container of a certain length
    fn headers(&self, len: usize, policy: HeaderPolicy) -> Vec<Box<str>>;

    /// Spell the container holding the elements of a sequence
    ///
    /// Called only after the sequence length has been checked against
    /// `min_len()` and `max_len()`.
    ///
    fn construct(&self, sequence: &Sequence) -> String;

    /// Check that a container of a certain length can be constructed
    fn check_len(&self, len: usize) -> Result<(), EmitError> {
        if len < self.min_len() {
            return Err(EmitError::EmptySequence {
                container: self.name(),
                shape: self.shape(),
            });
        }
        if let Some(max) = self.max_len() {
            if len > max {
                return Err(EmitError::TooLong {
                    container: self.name(),
                    len,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Produce the container fragment for a sequence
    fn emit(
        &self,
        sequence: &Sequence,
        policy: HeaderPolicy,
    ) -> Result<ContainerFragment, EmitError> {
        self.check_len(sequence.len())?;
        Ok(ContainerFragment {
            expression: Fragment::new(self.construct(sequence))?,
            level: self.level(),
            headers: self.headers(sequence.len(), policy).into(),
        })
    }
}

/// Every known container
pub fn all() -> [&'static dyn Container; 10] {
    [
        &MplVector,
        &MplList,
        &FusionVector,
        &FusionCons,
        &FusionList,
        &HanaList,
        &HanaListT,
        &HanaTypelist,
        &Mpl11List,
        &Pack,
    ]
}

/// Arity of the numbered header that declares a container of a certain length
///
/// Numbered headers come in multiples of ten, up to some library limit.
///
fn numbered_arity(len: usize, max: usize, policy: HeaderPolicy) -> usize {
    match policy {
        HeaderPolicy::Fair => max,
        HeaderPolicy::Minimal => len.div_ceil(10).saturating_mul(10).min(max),
    }
}

/// Failure to emit a container
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EmitError {
    /// The container cannot be empty
    #[error("{container} ({shape}) needs at least one element")]
    EmptySequence {
        /// Container name
        container: &'static str,

        /// Container shape
        shape: Shape,
    },

    /// The container has a fixed maximal arity
    #[error("{container} supports at most {max} elements, {len} were requested")]
    TooLong {
        /// Container name
        container: &'static str,

        /// Requested length
        len: usize,

        /// Maximal supported length
        max: usize,
    },

    /// The container was spelled with unbalanced delimiters
    #[error("invalid container expression ({0})")]
    Fragment(#[from] FragmentError),
}
