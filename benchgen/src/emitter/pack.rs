//! Bare template argument packs

use super::{Container, HeaderPolicy, Level, Shape};
use crate::ident::Sequence;

/// Comma-separated element types, to be expanded into a variadic template
///
/// No header is needed, the variadic template receiving the pack is
/// declared by the benchmark itself.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct Pack;
//
impl Container for Pack {
    fn name(&self) -> &'static str {
        "pack"
    }

    fn shape(&self) -> Shape {
        Shape::VariadicPack
    }

    fn level(&self) -> Level {
        Level::Type
    }

    fn headers(&self, _len: usize, _policy: HeaderPolicy) -> Vec<Box<str>> {
        Vec::new()
    }

    fn construct(&self, sequence: &Sequence) -> String {
        sequence.types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling() {
        assert_eq!(Pack.construct(&Sequence::new(1, 2)), "x1<0>, x1<1>");
        assert_eq!(Pack.construct(&Sequence::new(1, 0)), "");
        assert!(Pack.headers(100, HeaderPolicy::Minimal).is_empty());
    }
}
