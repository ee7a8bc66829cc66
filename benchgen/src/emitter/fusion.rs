//! Boost.Fusion containers

use super::{numbered_arity, Container, HeaderPolicy, Level, Shape};
use crate::ident::Sequence;

/// Largest `boost::fusion::vectorN` shipped by Fusion
const MAX_VECTOR_ARITY: usize = 50;

/// Default value of `FUSION_MAX_LIST_SIZE`
const MAX_LIST_SIZE: usize = 10;

/// `boost::fusion::cons`, terminated by `boost::fusion::nil_`
#[derive(Clone, Copy, Debug, Default)]
pub struct FusionCons;
//
impl Container for FusionCons {
    fn name(&self) -> &'static str {
        "fusion::cons"
    }

    fn shape(&self) -> Shape {
        Shape::LinkedCons
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/fusion/container/list/cons.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        sequence
            .iter()
            .rev()
            .fold("boost::fusion::nil_".to_owned(), |tail, head| {
                format!("boost::fusion::cons<{head}, {tail}>")
            })
    }
}

/// `boost::fusion::vectorN`
#[derive(Clone, Copy, Debug, Default)]
pub struct FusionVector;
//
impl Container for FusionVector {
    fn name(&self) -> &'static str {
        "fusion::vector"
    }

    fn shape(&self) -> Shape {
        Shape::FlatVector
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn max_len(&self) -> Option<usize> {
        Some(MAX_VECTOR_ARITY)
    }

    fn headers(&self, len: usize, policy: HeaderPolicy) -> Vec<Box<str>> {
        let arity = numbered_arity(len, MAX_VECTOR_ARITY, policy);
        vec![format!("boost/fusion/container/vector/vector{arity}.hpp").into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!(
            "boost::fusion::vector{}<{}>",
            sequence.len(),
            sequence.types()
        )
    }
}

/// `boost::fusion::list`
#[derive(Clone, Copy, Debug, Default)]
pub struct FusionList;
//
impl Container for FusionList {
    fn name(&self) -> &'static str {
        "fusion::list"
    }

    fn shape(&self) -> Shape {
        Shape::GenericList
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn max_len(&self) -> Option<usize> {
        Some(MAX_LIST_SIZE)
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/fusion/container/list.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!("boost::fusion::list<{}>", sequence.types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cons() {
        assert_eq!(
            FusionCons.construct(&Sequence::new(0, 0)),
            "boost::fusion::nil_"
        );
        assert_eq!(
            FusionCons.construct(&Sequence::new(1, 2)),
            "boost::fusion::cons<x1<0>, boost::fusion::cons<x1<1>, boost::fusion::nil_>>"
        );
    }

    #[test]
    fn vector() {
        assert_eq!(
            FusionVector.construct(&Sequence::new(0, 2)),
            "boost::fusion::vector2<x0<0>, x0<1>>"
        );
        assert_eq!(
            FusionVector.headers(2, HeaderPolicy::Fair)[0].to_string(),
            "boost/fusion/container/vector/vector50.hpp"
        );
        assert_eq!(
            FusionVector.headers(12, HeaderPolicy::Minimal)[0].to_string(),
            "boost/fusion/container/vector/vector20.hpp"
        );
    }

    #[test]
    fn list() {
        assert_eq!(
            FusionList.construct(&Sequence::new(0, 0)),
            "boost::fusion::list<>"
        );
        assert_eq!(
            FusionList.construct(&Sequence::new(3, 1)),
            "boost::fusion::list<x3<0>>"
        );
    }
}
