//! Registered (operation, variant) pairs
//!
//! A technique is one way of performing an operation, usually with one
//! specific library container. It contributes the preprocessor directives
//! and harness preamble of a benchmark file, and spells the declaration of
//! every instance from the container fragment of that instance's elements.

use crate::{
    driver::{Binding, HybridInstance, Instance},
    emitter::{
        Container, ContainerFragment, FusionCons, FusionList, FusionVector, HanaList, HanaListT,
        HanaTypelist, Mpl11List, MplList, MplVector, Pack,
    },
    fragment::{Fragment, FragmentError},
    operation::Operation,
};
use std::fmt::{self, Debug, Formatter};

/// Spelling of one instance's result
#[derive(Clone, Copy)]
pub enum Body {
    /// Result of a single-operator instance
    Main(fn(&ContainerFragment, &Instance) -> Result<Binding, FragmentError>),

    /// Result of a hybrid instance
    Hybrid(fn(&ContainerFragment, &HybridInstance) -> Result<Binding, FragmentError>),
}

/// One way of performing an operation
pub struct Technique {
    /// Operation that is performed
    operation: Operation,

    /// Name of the technique, unique within an operation
    variant: &'static str,

    /// One-line description
    description: &'static str,

    /// Macros defined before anything is included
    defines: &'static [&'static str],

    /// Headers included before the container's own headers
    includes: &'static [&'static str],

    /// Template declaring the harness, if any
    preamble: Option<&'static str>,

    /// Container holding each instance's elements
    container: &'static dyn Container,

    /// Smallest supported depth, on top of the container's own limits
    min_depth: usize,

    /// Spelling of each instance's result
    body: Body,
}
//
impl Technique {
    /// Operation that is performed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Name of the technique
    pub fn variant(&self) -> &'static str {
        self.variant
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Macros defined before anything is included
    pub fn defines(&self) -> &'static [&'static str] {
        self.defines
    }

    /// Headers included before the container's own headers
    pub fn includes(&self) -> &'static [&'static str] {
        self.includes
    }

    /// Template declaring the harness, if any
    pub fn preamble(&self) -> Option<&'static str> {
        self.preamble
    }

    /// Container holding each instance's elements
    pub fn container(&self) -> &'static dyn Container {
        self.container
    }

    /// Spelling of each instance's result
    pub fn body(&self) -> Body {
        self.body
    }

    /// Smallest supported depth
    pub fn min_depth(&self) -> usize {
        self.min_depth.max(self.container.min_len())
    }

    /// Largest supported depth, if there is one
    pub fn max_depth(&self) -> Option<usize> {
        self.container.max_len()
    }
}
//
impl Debug for Technique {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Technique")
            .field("operation", &self.operation)
            .field("variant", &self.variant)
            .field("container", &self.container.name())
            .field("min_depth", &self.min_depth())
            .field("max_depth", &self.max_depth())
            .finish_non_exhaustive()
    }
}

/// Every known technique, grouped by operation
static TECHNIQUES: [Technique; 14] = [
    Technique {
        operation: Operation::Map,
        variant: "hana_list",
        description: "boost::hana::fmap over a boost::hana::list",
        defines: &[],
        includes: &[],
        preamble: Some("map/function_object"),
        container: &HanaList,
        min_depth: 0,
        body: Body::Main(hana_fmap),
    },
    Technique {
        operation: Operation::Map,
        variant: "mpl11_list",
        description: "boost::mpl11::fmap over a boost::mpl11::list",
        defines: &[],
        includes: &[],
        preamble: Some("map/mpl11_metafunction_class"),
        container: &Mpl11List,
        min_depth: 0,
        body: Body::Main(mpl11_fmap),
    },
    Technique {
        operation: Operation::Map,
        variant: "mpl_list",
        description: "boost::mpl::transform over a boost::mpl::list",
        defines: &[],
        includes: &["boost/mpl/transform.hpp"],
        preamble: Some("map/metafunction_class"),
        container: &MplList,
        min_depth: 0,
        body: Body::Main(mpl_transform),
    },
    Technique {
        operation: Operation::Map,
        variant: "mpl_vector",
        description: "boost::mpl::transform over a boost::mpl::vector",
        defines: &[],
        includes: &["boost/mpl/transform.hpp"],
        preamble: Some("map/metafunction_class"),
        container: &MplVector,
        min_depth: 0,
        body: Body::Main(mpl_transform),
    },
    Technique {
        operation: Operation::Foldl,
        variant: "fusion_cons",
        description: "boost::fusion::fold over a boost::fusion::cons",
        defines: &[],
        includes: &["boost/fusion/algorithm/iteration/fold.hpp"],
        preamble: Some("foldl/function_object"),
        container: &FusionCons,
        min_depth: 0,
        body: Body::Main(fusion_foldl),
    },
    Technique {
        operation: Operation::Foldl,
        variant: "hana_list",
        description: "boost::hana::foldl over a boost::hana::list",
        defines: &[],
        includes: &[],
        preamble: Some("foldl/function_object"),
        container: &HanaList,
        min_depth: 0,
        body: Body::Main(hana_foldl),
    },
    Technique {
        operation: Operation::TypeFoldl,
        variant: "hana_list",
        description: "boost::hana::foldl over a boost::hana::list_t of types",
        defines: &[],
        includes: &[],
        preamble: None,
        container: &HanaListT,
        min_depth: 0,
        body: Body::Hybrid(hana_type_foldl),
    },
    Technique {
        operation: Operation::TypeFoldl,
        variant: "hana_typelist",
        description: "boost::hana::foldl over a boost::hana::typelist",
        defines: &[],
        includes: &[],
        preamble: None,
        container: &HanaTypelist,
        min_depth: 0,
        body: Body::Hybrid(hana_type_foldl),
    },
    Technique {
        operation: Operation::TypeFoldl,
        variant: "mpl11_list",
        description: "boost::mpl11::foldl over a boost::mpl11::list",
        defines: &["BOOST_MPL11_NO_ASSERTIONS"],
        includes: &[],
        preamble: None,
        container: &Mpl11List,
        min_depth: 0,
        body: Body::Hybrid(mpl11_type_foldl),
    },
    Technique {
        operation: Operation::ValueFoldl,
        variant: "fusion_list",
        description: "boost::fusion::fold over a boost::fusion::list",
        defines: &[],
        includes: &["boost/fusion/algorithm/iteration/fold.hpp"],
        preamble: Some("value_foldl/preamble"),
        container: &FusionList,
        min_depth: 0,
        body: Body::Hybrid(fusion_value_foldl),
    },
    Technique {
        operation: Operation::ValueFoldl,
        variant: "fusion_vector",
        description: "boost::fusion::fold over a boost::fusion::vector",
        defines: &[],
        includes: &["boost/fusion/algorithm/iteration/fold.hpp"],
        preamble: Some("value_foldl/preamble"),
        container: &FusionVector,
        min_depth: 0,
        body: Body::Hybrid(fusion_value_foldl),
    },
    Technique {
        operation: Operation::ValueFoldl,
        variant: "hana_list",
        description: "boost::hana::foldl over a boost::hana::list",
        defines: &[],
        includes: &[],
        preamble: Some("value_foldl/preamble"),
        container: &HanaList,
        min_depth: 0,
        body: Body::Hybrid(hana_value_foldl),
    },
    Technique {
        operation: Operation::Sum,
        variant: "constexpr",
        description: "constexpr loop over an array of the constants' values",
        defines: &[],
        includes: &["boost/mpl11/integer.hpp"],
        preamble: Some("sum/constexpr"),
        container: &Pack,
        // Zero-sized arrays are ill-formed
        min_depth: 1,
        body: Body::Main(variadic_sum),
    },
    Technique {
        operation: Operation::Sum,
        variant: "mpl11_variadic_foldl",
        description: "boost::mpl11's internal variadic left fold",
        defines: &[],
        includes: &[
            "boost/mpl11/detail/left_folds/variadic.hpp",
            "boost/mpl11/integer.hpp",
        ],
        preamble: Some("sum/mpl11_variadic_foldl"),
        container: &Pack,
        min_depth: 0,
        body: Body::Main(variadic_sum),
    },
];

/// `boost::hana::fmap` of a Hana list
fn hana_fmap(list: &ContainerFragment, _: &Instance) -> Result<Binding, FragmentError> {
    Ok(Binding::Constant(Fragment::new(format!(
        "boost::hana::fmap(f, {})",
        list.as_value()?
    ))?))
}

/// `boost::mpl11::fmap` of an MPL11 list
fn mpl11_fmap(list: &ContainerFragment, _: &Instance) -> Result<Binding, FragmentError> {
    Ok(Binding::Alias(Fragment::new(format!(
        "boost::mpl11::fmap<f, {}>::type",
        list.as_type()?
    ))?))
}

/// `boost::mpl::transform` of an MPL sequence
fn mpl_transform(sequence: &ContainerFragment, _: &Instance) -> Result<Binding, FragmentError> {
    Ok(Binding::Alias(Fragment::new(format!(
        "boost::mpl::transform<{}, f>::type",
        sequence.as_type()?
    ))?))
}

/// `boost::fusion::fold` of a Fusion sequence, from the instance's seed
fn fusion_foldl(
    sequence: &ContainerFragment,
    instance: &Instance,
) -> Result<Binding, FragmentError> {
    Ok(Binding::Constant(Fragment::new(format!(
        "boost::fusion::fold({}, {}, f)",
        sequence.as_value()?,
        instance.seed()
    ))?))
}

/// `boost::hana::foldl` of a Hana list, from the instance's seed
fn hana_foldl(list: &ContainerFragment, instance: &Instance) -> Result<Binding, FragmentError> {
    Ok(Binding::Constant(Fragment::new(format!(
        "boost::hana::foldl(f, {}, {})",
        instance.seed(),
        list.as_value()?
    ))?))
}

/// `boost::hana::foldl` of a Hana sequence of types
fn hana_type_foldl(
    sequence: &ContainerFragment,
    instance: &HybridInstance,
) -> Result<Binding, FragmentError> {
    Ok(Binding::Alias(Fragment::new(format!(
        "decltype(boost::hana::foldl(boost::hana::lift<{}::apply>, boost::hana::type<{}>, {}))::type",
        instance.function(),
        instance.seed(),
        sequence.expression()
    ))?))
}

/// `boost::fusion::fold` of a Fusion sequence
fn fusion_value_foldl(
    sequence: &ContainerFragment,
    instance: &HybridInstance,
) -> Result<Binding, FragmentError> {
    Ok(Binding::Constant(Fragment::new(format!(
        "boost::fusion::fold({}, {}, {})",
        sequence.as_value()?,
        instance.seed(),
        instance.function()
    ))?))
}

/// `boost::mpl11::foldl` of an MPL11 list
fn mpl11_type_foldl(
    list: &ContainerFragment,
    instance: &HybridInstance,
) -> Result<Binding, FragmentError> {
    Ok(Binding::Alias(Fragment::new(format!(
        "boost::mpl11::foldl<{}, {}, {}>::type",
        instance.function(),
        instance.seed(),
        list.as_type()?
    ))?))
}

/// `boost::hana::foldl` of a Hana list of values
fn hana_value_foldl(
    list: &ContainerFragment,
    instance: &HybridInstance,
) -> Result<Binding, FragmentError> {
    Ok(Binding::Constant(Fragment::new(format!(
        "boost::hana::foldl({}, {}, {})",
        instance.function(),
        instance.seed(),
        list.as_value()?
    ))?))
}

/// `sum` of a pack of integral constants
fn variadic_sum(pack: &ContainerFragment, _: &Instance) -> Result<Binding, FragmentError> {
    Ok(Binding::Alias(Fragment::new(format!(
        "sum<{}>",
        pack.expression()
    ))?))
}

/// Every known technique
pub fn all() -> &'static [Technique] {
    &TECHNIQUES
}

/// Techniques of an operation, in registration order
pub fn for_operation(operation: Operation) -> impl Iterator<Item = &'static Technique> {
    TECHNIQUES
        .iter()
        .filter(move |technique| technique.operation == operation)
}

/// Look up a technique
pub fn find(operation: Operation, variant: &str) -> Option<&'static Technique> {
    for_operation(operation).find(|technique| technique.variant == variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{emitter::HeaderPolicy, ident::Sequence, registry::TemplateRegistry};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn registry() {
        let mut pairs = HashSet::new();
        for technique in all() {
            assert!(pairs.insert((technique.operation(), technique.variant())));
            assert_eq!(
                technique.operation().is_hybrid(),
                matches!(technique.body(), Body::Hybrid(_)),
                "{technique:?}"
            );
            if let Some(preamble) = technique.preamble() {
                assert!(TemplateRegistry::builtin().get(preamble).is_ok());
            }
        }
        for operation in Operation::iter() {
            assert!(for_operation(operation).count() >= 2);
        }
        assert_eq!(
            for_operation(Operation::Map)
                .map(Technique::variant)
                .collect::<Vec<_>>(),
            ["hana_list", "mpl11_list", "mpl_list", "mpl_vector"]
        );
        assert!(find(Operation::Sum, "constexpr").is_some());
        assert!(find(Operation::Sum, "hana_list").is_none());
    }

    #[test]
    fn depth_limits() {
        let limits = |operation, variant| {
            let technique = find(operation, variant).unwrap();
            (technique.min_depth(), technique.max_depth())
        };
        assert_eq!(limits(Operation::Map, "mpl_vector"), (1, None));
        assert_eq!(limits(Operation::Map, "mpl_list"), (0, None));
        assert_eq!(limits(Operation::Sum, "constexpr"), (1, None));
        assert_eq!(limits(Operation::Sum, "mpl11_variadic_foldl"), (0, None));
        assert_eq!(limits(Operation::ValueFoldl, "fusion_list"), (0, Some(10)));
        assert_eq!(limits(Operation::ValueFoldl, "fusion_vector"), (1, Some(50)));
    }

    #[test]
    fn bodies() {
        let emit = |technique: &Technique, seq: &Sequence| {
            technique
                .container()
                .emit(seq, HeaderPolicy::Fair)
                .unwrap()
        };

        let map = find(Operation::Map, "mpl_vector").unwrap();
        let instance = Instance::new(1, 2);
        let Body::Main(body) = map.body() else {
            panic!("map should not be hybrid")
        };
        assert_eq!(
            body(&emit(map, instance.sequence()), &instance).unwrap(),
            Binding::Alias(
                Fragment::new("boost::mpl::transform<boost::mpl::vector2<x1<0>, x1<1>>, f>::type")
                    .unwrap()
            )
        );

        let foldl = find(Operation::Foldl, "fusion_cons").unwrap();
        let instance = Instance::new(0, 1);
        let Body::Main(body) = foldl.body() else {
            panic!("foldl should not be hybrid")
        };
        assert_eq!(
            body(&emit(foldl, instance.sequence()), &instance).unwrap(),
            Binding::Constant(
                Fragment::new(
                    "boost::fusion::fold(boost::fusion::cons<x0<0>, boost::fusion::nil_>{}, state0, f)"
                )
                .unwrap()
            )
        );

        let value_foldl = find(Operation::ValueFoldl, "hana_list").unwrap();
        let instance = HybridInstance::new(2, 1, 1);
        let Body::Hybrid(body) = value_foldl.body() else {
            panic!("value_foldl should be hybrid")
        };
        assert_eq!(
            body(&emit(value_foldl, instance.sequence()), &instance).unwrap(),
            Binding::Constant(
                Fragment::new("boost::hana::foldl(f1, state1, boost::hana::list(x2<0>{}))")
                    .unwrap()
            )
        );

        let type_foldl = find(Operation::TypeFoldl, "hana_typelist").unwrap();
        let instance = HybridInstance::new(0, 0, 0);
        let Body::Hybrid(body) = type_foldl.body() else {
            panic!("type_foldl should be hybrid")
        };
        assert_eq!(
            body(&emit(type_foldl, instance.sequence()), &instance).unwrap(),
            Binding::Alias(
                Fragment::new(
                    "decltype(boost::hana::foldl(boost::hana::lift<f0::apply>, \
                     boost::hana::type<state0>, boost::hana::typelist<>))::type"
                )
                .unwrap()
            )
        );
    }
}
