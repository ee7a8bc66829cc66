//! Template composition driver
//!
//! The driver expands a parameter grid into C++ declarations. An operation's
//! sub-template is rendered once per instance of the benchmark, and a
//! caller-provided rendering callback supplies the declaration that each
//! instance binds to its result name.

use crate::{
    emitter::EmitError,
    fragment::{Fragment, FragmentError, Prelude},
    grid::Grid,
    ident::{self, Sequence},
    registry::TemplateRegistry,
    template::Bindings,
};
use log::trace;
use thiserror::Error;

/// Declaration of a benchmark result, before it is given a name
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Binding {
    /// Type-level result, declared as `using NAME = TYPE;`
    Alias(Fragment),

    /// Value-level result, declared as `static const auto NAME = VALUE;`
    Constant(Fragment),
}
//
impl Binding {
    /// Declare the result under some name
    pub fn declare(&self, name: &str) -> Result<Fragment, FragmentError> {
        match self {
            Binding::Alias(ty) => Fragment::new(format!("using {name} = {ty};")),
            Binding::Constant(value) => {
                Fragment::new(format!("static const auto {name} = {value};"))
            }
        }
    }
}

/// One independent instance of a benchmark
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    /// Synthetic elements of this instance
    sequence: Sequence,
}
//
impl Instance {
    /// Instance with some breadth-index, operating on `depth` elements
    pub fn new(index: usize, depth: usize) -> Self {
        Self {
            sequence: Sequence::new(index, depth),
        }
    }

    /// Breadth-index of this instance
    pub fn index(&self) -> usize {
        self.sequence.instance()
    }

    /// Number of elements
    pub fn depth(&self) -> usize {
        self.sequence.len()
    }

    /// Elements of this instance
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Name of the class template declaring the elements
    pub fn element(&self) -> String {
        ident::element_name(self.index())
    }

    /// Name of this instance's fold seed
    pub fn seed(&self) -> String {
        ident::seed_name(self.index())
    }

    /// Name bound to this instance's result
    pub fn name(&self) -> String {
        ident::result_name(self.index())
    }
}

/// One instance of a hybrid benchmark, i.e. one (operator, sequence) pair
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HybridInstance {
    /// Synthetic elements of this instance
    sequence: Sequence,

    /// Index of the operator applied to the elements
    operator: usize,
}
//
impl HybridInstance {
    /// Instance combining the sequence of some breadth-index with an operator
    pub fn new(index: usize, operator: usize, depth: usize) -> Self {
        Self {
            sequence: Sequence::new(index, depth),
            operator,
        }
    }

    /// Breadth-index of this instance
    pub fn index(&self) -> usize {
        self.sequence.instance()
    }

    /// Operator index of this instance
    pub fn operator(&self) -> usize {
        self.operator
    }

    /// Elements of this instance
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Name of the operator's reducing function
    pub fn function(&self) -> String {
        ident::function_name(self.operator)
    }

    /// Name of the operator's seed
    pub fn seed(&self) -> String {
        ident::seed_name(self.operator)
    }

    /// Name bound to this instance's result
    pub fn name(&self) -> String {
        ident::hybrid_result_name(self.index(), self.operator)
    }
}

/// Renders templates over a parameter grid
///
/// A composer performs no I/O and holds no mutable state, so the same
/// registry can be shared by any number of composers running in parallel.
///
#[derive(Clone, Copy, Debug)]
pub struct Composer<'registry> {
    /// Where templates are looked up
    registry: &'registry TemplateRegistry,

    /// Size of the benchmark
    grid: Grid,
}
//
impl<'registry> Composer<'registry> {
    /// Set up a composer
    pub fn new(registry: &'registry TemplateRegistry, grid: Grid) -> Self {
        Self { registry, grid }
    }

    /// Size of the benchmark
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Render a named template once, with explicit bindings
    pub fn render_once(
        &self,
        template: &str,
        bindings: &Bindings,
    ) -> Result<Fragment, ComposeError> {
        self.registry.get(template)?.render(bindings)
    }

    /// Render a per-instance template for every breadth-index
    ///
    /// The callback is invoked once per instance, in ascending breadth-index
    /// order, and the declaration it returns is bound to the instance's
    /// result name. The template can use the slots `index`, `breadth`,
    /// `depth`, `element`, `seed` and `instance`. Rendered instances are
    /// separated by a blank line.
    ///
    pub fn render(
        &self,
        template: &str,
        mut callback: impl FnMut(&Instance) -> Result<Binding, ComposeError>,
    ) -> Result<Fragment, ComposeError> {
        let template = self.registry.get(template)?;
        let mut instances = Vec::with_capacity(self.grid.breadth());
        for index in 0..self.grid.breadth() {
            let instance = Instance::new(index, self.grid.depth());
            trace!("Rendering {} for instance {index}", template.name());
            let declaration = callback(&instance)?.declare(&instance.name())?;
            let bindings = Bindings::new()
                .bind("index", index)
                .bind("breadth", self.grid.breadth())
                .bind("depth", self.grid.depth())
                .bind("element", Fragment::new(instance.element())?)
                .bind("seed", Fragment::new(instance.seed())?)
                .bind("instance", declaration);
            instances.push(template.render(&bindings)?);
        }
        Ok(Fragment::join(instances, "\n\n"))
    }

    /// Render a per-operator template for every operator index
    ///
    /// The template can use the slots `index`, `function` and `seed`.
    ///
    pub fn render_operators(&self, template: &str) -> Result<Fragment, ComposeError> {
        let template = self.registry.get(template)?;
        let mut operators = Vec::with_capacity(self.grid.variety());
        for index in 0..self.grid.variety() {
            let bindings = Bindings::new()
                .bind("index", index)
                .bind("function", Fragment::new(ident::function_name(index))?)
                .bind("seed", Fragment::new(ident::seed_name(index))?);
            operators.push(template.render(&bindings)?);
        }
        Ok(Fragment::join(operators, "\n\n"))
    }

    /// Render a hybrid benchmark
    ///
    /// Every operator is declared using the `operator` template, then the
    /// `hybrid` template is rendered once per breadth-index with its
    /// `instances` slot holding one declaration per operator. Instances thus
    /// span the cartesian product of breadth and variety, in ascending
    /// breadth-index order, then ascending operator order. Besides
    /// `instances`, the hybrid template can use the slots `index`, `breadth`,
    /// `depth`, `variety` and `element`.
    ///
    pub fn render_hybrid(
        &self,
        operator: &str,
        hybrid: &str,
        mut callback: impl FnMut(&HybridInstance) -> Result<Binding, ComposeError>,
    ) -> Result<Fragment, ComposeError> {
        let operators = self.render_operators(operator)?;
        let hybrid = self.registry.get(hybrid)?;
        let mut groups = Vec::with_capacity(self.grid.breadth());
        for index in 0..self.grid.breadth() {
            let mut declarations = Vec::with_capacity(self.grid.variety());
            for operator in 0..self.grid.variety() {
                let instance = HybridInstance::new(index, operator, self.grid.depth());
                trace!(
                    "Rendering {} for instance {index} of operator {operator}",
                    hybrid.name()
                );
                declarations.push(callback(&instance)?.declare(&instance.name())?);
            }
            let bindings = Bindings::new()
                .bind("index", index)
                .bind("breadth", self.grid.breadth())
                .bind("depth", self.grid.depth())
                .bind("variety", self.grid.variety())
                .bind("element", Fragment::new(ident::element_name(index))?)
                .bind("instances", Fragment::join(declarations, "\n"));
            groups.push(hybrid.render(&bindings)?);
        }
        Ok(Fragment::join(
            [operators, Fragment::join(groups, "\n\n")],
            "\n\n",
        ))
    }

    /// Assemble a complete source file
    ///
    /// The preamble and body are separated by a blank line, and an empty
    /// preamble is left out. The file ends with a newline.
    ///
    pub fn render_file(
        &self,
        prelude: &Prelude,
        preamble: Fragment,
        body: Fragment,
    ) -> Result<String, ComposeError> {
        let sections = [preamble, body].into_iter().filter(|s| !s.is_empty());
        let bindings = Bindings::new()
            .bind("prelude", prelude.to_fragment()?)
            .bind("sections", Fragment::join(sections, "\n\n"));
        let mut file = self.render_once("file", &bindings)?.to_string();
        file.push('\n');
        Ok(file)
    }
}

/// Failure to compose a source file
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ComposeError {
    /// No template is registered under this name
    #[error("no template named {0:?}")]
    MissingTemplate(Box<str>),

    /// A template uses a slot that was not bound
    #[error("slot {slot:?} of template {template} is not bound")]
    UnboundSlot {
        /// Template name
        template: Box<str>,

        /// Slot name
        slot: Box<str>,
    },

    /// Rendering a template produced unbalanced source text
    #[error("template {template} produced invalid source ({source})")]
    InvalidOutput {
        /// Template name
        template: Box<str>,

        /// What is wrong with the output
        source: FragmentError,
    },

    /// Some generated source text was invalid
    #[error("invalid source fragment ({0})")]
    Fragment(#[from] FragmentError),

    /// A container could not be emitted
    #[error(transparent)]
    Emit(#[from] EmitError),
}
