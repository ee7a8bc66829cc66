//! Boost.MPL11 containers

use super::{Container, HeaderPolicy, Level, Shape};
use crate::ident::Sequence;

/// `boost::mpl11::list<...>`
#[derive(Clone, Copy, Debug, Default)]
pub struct Mpl11List;
//
impl Container for Mpl11List {
    fn name(&self) -> &'static str {
        "mpl11::list"
    }

    fn shape(&self) -> Shape {
        Shape::GenericList
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/mpl11/list.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!("boost::mpl11::list<{}>", sequence.types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spelling() {
        assert_eq!(
            Mpl11List.construct(&Sequence::new(4, 2)),
            "boost::mpl11::list<x4<0>, x4<1>>"
        );
        assert_eq!(
            Mpl11List.construct(&Sequence::new(4, 0)),
            "boost::mpl11::list<>"
        );
    }
}
