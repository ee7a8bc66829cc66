//! Boost.MPL containers
//!
//! MPL only ships numbered container templates up to 50 elements. Longer
//! sequences are built by chaining the internal item nodes onto a maximal
//! numbered container, which is what `push_back` and `push_front` would
//! produce.

use super::{numbered_arity, Container, HeaderPolicy, Level, Shape};
use crate::ident::Sequence;

/// Largest arity of MPL's numbered containers
const MAX_NUMBERED_ARITY: usize = 50;

/// Headers of an MPL container family (`vector` or `list`)
fn headers(family: &str, len: usize, policy: HeaderPolicy) -> Vec<Box<str>> {
    let arity = numbered_arity(len, MAX_NUMBERED_ARITY, policy);
    let mut headers = vec![format!("boost/mpl/{family}/{family}{arity}.hpp").into()];
    if policy == HeaderPolicy::Fair || len > MAX_NUMBERED_ARITY {
        headers.push(format!("boost/mpl/{family}/aux_/item.hpp").into());
    }
    headers
}

/// `boost::mpl::vector`
#[derive(Clone, Copy, Debug, Default)]
pub struct MplVector;
//
impl Container for MplVector {
    fn name(&self) -> &'static str {
        "mpl::vector"
    }

    fn shape(&self) -> Shape {
        Shape::FlatVector
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, len: usize, policy: HeaderPolicy) -> Vec<Box<str>> {
        headers("vector", len, policy)
    }

    fn construct(&self, sequence: &Sequence) -> String {
        let elements = sequence.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        let (initial, rest) = elements.split_at(elements.len().min(MAX_NUMBERED_ARITY));
        let vector = format!(
            "boost::mpl::vector{}<{}>",
            initial.len(),
            initial.join(", ")
        );
        rest.iter().fold(vector, |init, x| {
            format!("boost::mpl::v_item<{x}, {init}, 0>")
        })
    }
}

/// `boost::mpl::list`
#[derive(Clone, Copy, Debug, Default)]
pub struct MplList;
//
impl Container for MplList {
    fn name(&self) -> &'static str {
        "mpl::list"
    }

    fn shape(&self) -> Shape {
        Shape::LinkedCons
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, len: usize, policy: HeaderPolicy) -> Vec<Box<str>> {
        headers("list", len, policy)
    }

    fn construct(&self, sequence: &Sequence) -> String {
        let elements = sequence.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        let (init, tail) =
            elements.split_at(elements.len().saturating_sub(MAX_NUMBERED_ARITY));
        let list = format!("boost::mpl::list{}<{}>", tail.len(), tail.join(", "));
        init.iter()
            .rev()
            .zip(MAX_NUMBERED_ARITY + 1..)
            .fold(list, |tail, (x, size)| {
                format!("boost::mpl::l_item<boost::mpl::long_<{size}>, {x}, {tail}>")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn vector() {
        assert_eq!(
            MplVector.construct(&Sequence::new(0, 3)),
            "boost::mpl::vector3<x0<0>, x0<1>, x0<2>>"
        );

        let long = MplVector.construct(&Sequence::new(1, 52));
        assert!(long.starts_with("boost::mpl::v_item<x1<51>, boost::mpl::v_item<x1<50>, "));
        assert!(long.contains("boost::mpl::vector50<x1<0>, "));
        assert!(long.ends_with("x1<49>>, 0>, 0>"));
    }

    #[test]
    fn list() {
        assert_eq!(
            MplList.construct(&Sequence::new(0, 0)),
            "boost::mpl::list0<>"
        );
        assert_eq!(
            MplList.construct(&Sequence::new(2, 2)),
            "boost::mpl::list2<x2<0>, x2<1>>"
        );

        let long = MplList.construct(&Sequence::new(0, 52));
        assert!(long.starts_with(
            "boost::mpl::l_item<boost::mpl::long_<52>, x0<0>, \
             boost::mpl::l_item<boost::mpl::long_<51>, x0<1>, \
             boost::mpl::list50<x0<2>, "
        ));
        assert!(long.ends_with("x0<51>>>>"));
    }

    #[test]
    fn headers() {
        let strings = |headers: Vec<Box<str>>| {
            headers.iter().map(|h| h.to_string()).collect::<Vec<_>>()
        };
        assert_eq!(
            strings(MplVector.headers(3, HeaderPolicy::Fair)),
            [
                "boost/mpl/vector/vector50.hpp",
                "boost/mpl/vector/aux_/item.hpp"
            ]
        );
        assert_eq!(
            strings(MplVector.headers(3, HeaderPolicy::Minimal)),
            ["boost/mpl/vector/vector10.hpp"]
        );
        assert_eq!(
            strings(MplList.headers(0, HeaderPolicy::Minimal)),
            ["boost/mpl/list/list0.hpp"]
        );
        assert_eq!(
            strings(MplList.headers(51, HeaderPolicy::Minimal)),
            [
                "boost/mpl/list/list50.hpp",
                "boost/mpl/list/aux_/item.hpp"
            ]
        );
    }
}
