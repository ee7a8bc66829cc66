//! Benchmark sizes
//!
//! A benchmark file is sized by its breadth (number of independent instances),
//! its depth (number of elements per instance) and, for hybrid operations,
//! its variety (number of distinct operators). Sets of sizes are described
//! by [`SizeRange`]s, whose cartesian product forms a [`ParameterSpace`].

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0},
    combinator::{map_res, opt},
    multi::separated_list1,
    sequence::{preceded, tuple},
    Parser,
};
use std::str::FromStr;
use thiserror::Error;

/// Result type returned by size range parsers
type IResult<'a, O> = nom::IResult<&'a str, O, nom::error::Error<&'a str>>;

/// Size of one benchmark file
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Grid {
    /// Number of independent instances
    breadth: usize,

    /// Number of elements per instance
    depth: usize,

    /// Number of distinct operators, for hybrid operations
    variety: usize,
}
//
impl Grid {
    /// Grid with a single operator
    pub fn new(breadth: usize, depth: usize) -> Result<Self, GridError> {
        Self::with_variety(breadth, depth, 1)
    }

    /// Grid with several operators
    pub fn with_variety(breadth: usize, depth: usize, variety: usize) -> Result<Self, GridError> {
        if breadth == 0 {
            return Err(GridError::ZeroBreadth);
        }
        if variety == 0 {
            return Err(GridError::ZeroVariety);
        }
        Ok(Self {
            breadth,
            depth,
            variety,
        })
    }

    /// Number of independent instances
    pub fn breadth(&self) -> usize {
        self.breadth
    }

    /// Number of elements per instance
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of distinct operators
    pub fn variety(&self) -> usize {
        self.variety
    }

    /// Number of instances of a hybrid operation
    pub fn hybrid_instances(&self) -> usize {
        self.breadth * self.variety
    }
}

/// Invalid benchmark size
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum GridError {
    /// Breadth must be at least one
    #[error("breadth must be at least 1")]
    ZeroBreadth,

    /// Variety must be at least one
    #[error("variety must be at least 1")]
    ZeroVariety,
}

/// Point of a [`ParameterSpace`], not validated yet
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridPoint {
    /// Number of independent instances
    pub breadth: usize,

    /// Number of elements per instance
    pub depth: usize,

    /// Number of distinct operators
    pub variety: usize,
}
//
impl GridPoint {
    /// Check this point and turn it into a grid
    pub fn resolve(self) -> Result<Grid, GridError> {
        Grid::with_variety(self.breadth, self.depth, self.variety)
    }
}

/// Sorted set of sizes
///
/// Written as a comma-separated list of items, where each item is either a
/// size `N`, a half-open range `A..B` or a closed range `A..=B`. Ranges may
/// be followed by a step, as in `0..=100:10`.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SizeRange(Box<[usize]>);
//
impl SizeRange {
    /// Largest number of sizes that a range may expand into
    pub const MAX_VALUES: usize = 100_000;

    /// Range containing a single size
    pub fn single(size: usize) -> Self {
        Self(vec![size].into())
    }

    /// Range containing some sizes, which must not be empty
    pub fn from_values(values: impl IntoIterator<Item = usize>) -> Result<Self, SizeRangeError> {
        let mut values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return Err(SizeRangeError::Empty);
        }
        if values.len() > Self::MAX_VALUES {
            return Err(SizeRangeError::TooLarge);
        }
        values.sort_unstable();
        values.dedup();
        Ok(Self(values.into()))
    }

    /// Sizes in ascending order
    pub fn values(&self) -> &[usize] {
        &self.0
    }

    /// Number of sizes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a size range contains at least one size
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Smallest size
    pub fn min(&self) -> usize {
        self.0[0]
    }

    /// Largest size
    pub fn max(&self) -> usize {
        self.0[self.0.len() - 1]
    }
}
//
impl FromStr for SizeRange {
    type Err = SizeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use nom_supreme::final_parser::final_parser;
        let items: Result<Vec<RangeItem>, nom::error::Error<&str>> =
            final_parser(range_items)(s.trim());
        let items = items.map_err(|e| SizeRangeError::Syntax {
            input: s.into(),
            excerpt: e.input.into(),
        })?;
        let mut values = Vec::new();
        for item in items {
            let step = item.step.unwrap_or(1);
            if step == 0 {
                return Err(SizeRangeError::ZeroStep);
            }
            match item.end {
                None => values.push(item.start),
                Some(RangeEnd::Exclusive(end)) => {
                    let len = end.saturating_sub(item.start).div_ceil(step);
                    if values.len().saturating_add(len) > Self::MAX_VALUES {
                        return Err(SizeRangeError::TooLarge);
                    }
                    values.extend((item.start..end).step_by(step))
                }
                Some(RangeEnd::Inclusive(end)) => {
                    let len = end
                        .checked_sub(item.start)
                        .map_or(0, |span| (span / step).saturating_add(1));
                    if values.len().saturating_add(len) > Self::MAX_VALUES {
                        return Err(SizeRangeError::TooLarge);
                    }
                    values.extend((item.start..=end).step_by(step))
                }
            }
        }
        Self::from_values(values)
    }
}

/// One item of a size range
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct RangeItem {
    /// First size
    start: usize,

    /// End of the range, if this is a range
    end: Option<RangeEnd>,

    /// Increment between sizes
    step: Option<usize>,
}

/// End of a range item
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RangeEnd {
    /// `..end`
    Exclusive(usize),

    /// `..=end`
    Inclusive(usize),
}

/// Parser for a comma-separated list of range items
fn range_items(s: &str) -> IResult<Vec<RangeItem>> {
    separated_list1(tuple((space0, char(','), space0)), range_item).parse(s)
}

/// Parser for a single range item
fn range_item(s: &str) -> IResult<RangeItem> {
    let range_end = alt((
        preceded(tag("..="), size).map(RangeEnd::Inclusive),
        preceded(tag(".."), size).map(RangeEnd::Exclusive),
    ));
    tuple((size, opt(range_end), opt(preceded(char(':'), size))))
        .map(|(start, end, step)| RangeItem { start, end, step })
        .parse(s)
}

/// Parser for a decimal size
fn size(s: &str) -> IResult<usize> {
    map_res(digit1, str::parse::<usize>)(s)
}

/// Invalid size range
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SizeRangeError {
    /// The range could not be parsed
    #[error("bad size range {input:?} (unexpected {excerpt:?})")]
    Syntax {
        /// Full size range
        input: Box<str>,

        /// Remaining input at the point where parsing failed
        excerpt: Box<str>,
    },

    /// A step of zero was specified
    #[error("size range steps must be at least 1")]
    ZeroStep,

    /// The range contains no size, e.g. `5..5`
    #[error("size range contains no size")]
    Empty,

    /// The range expands into too many sizes
    #[error("size range contains more than {} sizes", SizeRange::MAX_VALUES)]
    TooLarge,
}

/// Set of benchmark sizes, as a cartesian product of size ranges
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterSpace {
    /// Breadths to be benchmarked
    breadth: SizeRange,

    /// Depths to be benchmarked
    depth: SizeRange,

    /// Varieties to be benchmarked
    variety: SizeRange,
}
//
impl ParameterSpace {
    /// Parameter space with a variety of 1
    pub fn new(breadth: SizeRange, depth: SizeRange) -> Self {
        Self::with_variety(breadth, depth, SizeRange::single(1))
    }

    /// Parameter space with explicit varieties
    pub fn with_variety(breadth: SizeRange, depth: SizeRange, variety: SizeRange) -> Self {
        Self {
            breadth,
            depth,
            variety,
        }
    }

    /// Breadths to be benchmarked
    pub fn breadth(&self) -> &SizeRange {
        &self.breadth
    }

    /// Depths to be benchmarked
    pub fn depth(&self) -> &SizeRange {
        &self.depth
    }

    /// Varieties to be benchmarked
    pub fn variety(&self) -> &SizeRange {
        &self.variety
    }

    /// Number of points in the space
    pub fn len(&self) -> usize {
        self.breadth.len() * self.depth.len() * self.variety.len()
    }

    /// Always false, a parameter space contains at least one point
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Points in ascending (breadth, depth, variety) order
    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.breadth.values().iter().flat_map(move |&breadth| {
            self.depth.values().iter().flat_map(move |&depth| {
                self.variety.values().iter().map(move |&variety| GridPoint {
                    breadth,
                    depth,
                    variety,
                })
            })
        })
    }
}
