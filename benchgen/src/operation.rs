//! Benchmarked operations

/// Logical operation performed by a benchmark
///
/// Every technique of an operation computes the same thing, using a
/// different library or implementation strategy, so that their compile times
/// can be compared.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Apply a function to every element of a sequence
    #[strum(to_string = "map", serialize = "fmap")]
    Map,

    /// Left fold of a sequence, with one seed per instance
    Foldl,

    /// Type-level left fold, with several distinct operators
    TypeFoldl,

    /// Value-level left fold, with several distinct operators
    ValueFoldl,

    /// Sum of a variadic pack of integral constants
    Sum,
}
//
impl Operation {
    /// Truth that instances of this operation are (operator, sequence) pairs
    pub fn is_hybrid(self) -> bool {
        matches!(self, Operation::TypeFoldl | Operation::ValueFoldl)
    }

    /// One-line description of the operation
    pub fn description(self) -> &'static str {
        match self {
            Operation::Map => "apply a metafunction or function object to every element",
            Operation::Foldl => "left fold with a per-instance seed",
            Operation::TypeFoldl => "type-level left fold with `variety` distinct operators",
            Operation::ValueFoldl => "value-level left fold with `variety` distinct operators",
            Operation::Sum => "sum of integral constants through a variadic fold",
        }
    }

    /// Templates used to lay out the instances of this operation
    pub fn scaffold(self) -> Scaffold {
        match self {
            Operation::Map => Scaffold::Main("map/main"),
            Operation::Foldl => Scaffold::Main("foldl/main"),
            Operation::Sum => Scaffold::Main("sum/main"),
            Operation::TypeFoldl => Scaffold::Hybrid {
                operator: "type_foldl/operator",
                hybrid: "type_foldl/hybrid",
            },
            Operation::ValueFoldl => Scaffold::Hybrid {
                operator: "value_foldl/operator",
                hybrid: "value_foldl/hybrid",
            },
        }
    }
}

/// Names of the templates laying out an operation's instances
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scaffold {
    /// One template rendered per breadth-index
    Main(&'static str),

    /// Operators are declared once each, then one template is rendered per
    /// breadth-index, holding one instance per operator
    Hybrid {
        /// Template declaring one operator
        operator: &'static str,

        /// Template declaring the instances of one breadth-index
        hybrid: &'static str,
    },
}
