//! Boost.Hana containers

use super::{Container, HeaderPolicy, Level, Shape};
use crate::ident::Sequence;

/// `boost::hana::list(...)`, a value-level heterogeneous list
#[derive(Clone, Copy, Debug, Default)]
pub struct HanaList;
//
impl Container for HanaList {
    fn name(&self) -> &'static str {
        "hana::list"
    }

    fn shape(&self) -> Shape {
        Shape::GenericList
    }

    fn level(&self) -> Level {
        Level::Value
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/hana/list.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!("boost::hana::list({})", sequence.values())
    }
}

/// `boost::hana::list_t<...>`, the type-level spelling of a Hana list
#[derive(Clone, Copy, Debug, Default)]
pub struct HanaListT;
//
impl Container for HanaListT {
    fn name(&self) -> &'static str {
        "hana::list_t"
    }

    fn shape(&self) -> Shape {
        Shape::GenericList
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/hana/list.hpp".into(), "boost/hana/type.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!("boost::hana::list_t<{}>", sequence.types())
    }
}

/// `boost::hana::typelist<...>`
#[derive(Clone, Copy, Debug, Default)]
pub struct HanaTypelist;
//
impl Container for HanaTypelist {
    fn name(&self) -> &'static str {
        "hana::typelist"
    }

    fn shape(&self) -> Shape {
        Shape::GenericList
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        vec!["boost/hana/type.hpp".into(), "boost/hana/typelist.hpp".into()]
    }

    fn construct(&self, sequence: &Sequence) -> String {
        format!("boost::hana::typelist<{}>", sequence.types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spelling() {
        let seq = Sequence::new(0, 2);
        assert_eq!(
            HanaList.construct(&seq),
            "boost::hana::list(x0<0>{}, x0<1>{})"
        );
        assert_eq!(
            HanaListT.construct(&seq),
            "boost::hana::list_t<x0<0>, x0<1>>"
        );
        assert_eq!(
            HanaTypelist.construct(&seq),
            "boost::hana::typelist<x0<0>, x0<1>>"
        );
        assert_eq!(
            HanaList.construct(&Sequence::new(0, 0)),
            "boost::hana::list()"
        );
    }
}
