//! Synthetic sequence elements and the names they are declared with

use std::fmt::{self, Display, Formatter};

/// Symbolic name of one synthetic element of a benchmark sequence
///
/// The element at position `p` of the sequence of instance `i` is written
/// `xi<p>`, where `xi` is a class template declared once per instance. Names
/// are thus unique within a generated file and stable across regenerations.
///
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Identifier {
    /// Breadth-index of the instance this element belongs to
    instance: usize,

    /// Depth-index of the element within its sequence
    position: usize,
}
//
impl Identifier {
    /// Name the element at some position of some instance's sequence
    pub fn new(instance: usize, position: usize) -> Self {
        Self { instance, position }
    }

    /// Breadth-index of the instance
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// Depth-index within the sequence
    pub fn position(&self) -> usize {
        self.position
    }

    /// Value-level spelling of this element, i.e. a default-constructed object
    pub fn value(&self) -> String {
        format!("{self}{{}}")
    }
}
//
impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", element_name(self.instance), self.position)
    }
}

/// Sequence of synthetic elements for one benchmark instance
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sequence {
    /// Breadth-index of the instance
    instance: usize,

    /// Number of elements
    len: usize,
}
//
impl Sequence {
    /// Sequence of `depth` elements for the instance with a given breadth-index
    pub fn new(instance: usize, depth: usize) -> Self {
        Self {
            instance,
            len: depth,
        }
    }

    /// Breadth-index of the instance
    pub fn instance(&self) -> usize {
        self.instance
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Truth that the sequence has no element
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements in ascending depth-index order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Identifier> + ExactSizeIterator + '_ {
        (0..self.len).map(|position| Identifier::new(self.instance, position))
    }

    /// Type-level spelling of the elements, comma-separated
    pub fn types(&self) -> String {
        self.iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Value-level spelling of the elements, comma-separated
    pub fn values(&self) -> String {
        self.iter().map(|x| x.value()).collect::<Vec<_>>().join(", ")
    }
}

/// Name of the class template whose specializations are an instance's elements
pub fn element_name(instance: usize) -> String {
    format!("x{instance}")
}

/// Name of the fold seed of an instance or of a hybrid operator
pub fn seed_name(index: usize) -> String {
    format!("state{index}")
}

/// Name of the reducing function of a hybrid operator
pub fn function_name(operator: usize) -> String {
    format!("f{operator}")
}

/// Name bound to the result of an instance
pub fn result_name(instance: usize) -> String {
    format!("go{instance}")
}

/// Name bound to the result of a hybrid instance
pub fn hybrid_result_name(instance: usize, operator: usize) -> String {
    format!("go{instance}_{operator}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifier() {
        let x = Identifier::new(3, 14);
        assert_eq!(x.instance(), 3);
        assert_eq!(x.position(), 14);
        assert_eq!(x.to_string(), "x3<14>");
        assert_eq!(x.value(), "x3<14>{}");
    }

    #[test]
    fn sequence() {
        let empty = Sequence::new(2, 0);
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
        assert_eq!(empty.types(), "");

        let seq = Sequence::new(1, 3);
        assert_eq!(seq.instance(), 1);
        assert_eq!(seq.len(), 3);
        assert_eq!(
            seq.iter().collect::<Vec<_>>(),
            [
                Identifier::new(1, 0),
                Identifier::new(1, 1),
                Identifier::new(1, 2)
            ]
        );
        assert_eq!(seq.types(), "x1<0>, x1<1>, x1<2>");
        assert_eq!(seq.values(), "x1<0>{}, x1<1>{}, x1<2>{}");
    }

    #[test]
    fn names() {
        assert_eq!(element_name(4), "x4");
        assert_eq!(seed_name(4), "state4");
        assert_eq!(function_name(1), "f1");
        assert_eq!(result_name(0), "go0");
        assert_eq!(hybrid_result_name(2, 1), "go2_1");
    }
}
