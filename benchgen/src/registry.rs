//! Named templates
//!
//! Benchmark source files are assembled from templates that are looked up by
//! name. The built-in templates are compiled into the library and parsed
//! once, on first use, into a registry that is shared by every thread.

use crate::{
    driver::ComposeError,
    template::{Template, TemplateError},
};
use phf::phf_map;
use std::{collections::BTreeMap, sync::OnceLock};

/// Source text of the built-in templates
static BUILTIN_TEMPLATES: phf::Map<&'static str, &'static str> = phf_map! {
    "file" => include_str!("../templates/file.cpp.tpl"),
    "map/function_object" => include_str!("../templates/map/function_object.cpp.tpl"),
    "map/metafunction_class" => include_str!("../templates/map/metafunction_class.cpp.tpl"),
    "map/mpl11_metafunction_class" => include_str!("../templates/map/mpl11_metafunction_class.cpp.tpl"),
    "map/main" => include_str!("../templates/map/main.cpp.tpl"),
    "foldl/function_object" => include_str!("../templates/foldl/function_object.cpp.tpl"),
    "foldl/main" => include_str!("../templates/foldl/main.cpp.tpl"),
    "type_foldl/operator" => include_str!("../templates/type_foldl/operator.cpp.tpl"),
    "type_foldl/hybrid" => include_str!("../templates/type_foldl/hybrid.cpp.tpl"),
    "value_foldl/preamble" => include_str!("../templates/value_foldl/preamble.cpp.tpl"),
    "value_foldl/operator" => include_str!("../templates/value_foldl/operator.cpp.tpl"),
    "value_foldl/hybrid" => include_str!("../templates/value_foldl/hybrid.cpp.tpl"),
    "sum/constexpr" => include_str!("../templates/sum/constexpr.cpp.tpl"),
    "sum/mpl11_variadic_foldl" => include_str!("../templates/sum/mpl11_variadic_foldl.cpp.tpl"),
    "sum/main" => include_str!("../templates/sum/main.cpp.tpl"),
};

/// Set of templates, indexed by name
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry(BTreeMap<Box<str>, Template>);
//
impl TemplateRegistry {
    /// Start with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the built-in templates into a new registry
    ///
    /// Template files end with a newline, which is stripped so that templates
    /// can be spliced into one another without introducing blank lines.
    ///
    pub fn with_builtins() -> Result<Self, TemplateError> {
        let mut registry = Self::new();
        for (name, source) in BUILTIN_TEMPLATES.entries() {
            registry.insert(Template::parse(name, source.trim_end())?);
        }
        Ok(registry)
    }

    /// Process-wide registry of built-in templates
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<TemplateRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::with_builtins().expect("Built-in templates should have valid syntax")
        })
    }

    /// Add a template, replacing any previous template with the same name
    ///
    /// Returns the template that was replaced, if any.
    ///
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.0.insert(template.name().into(), template)
    }

    /// Look up a template
    pub fn get(&self, name: &str) -> Result<&Template, ComposeError> {
        self.0
            .get(name)
            .ok_or_else(|| ComposeError::MissingTemplate(name.into()))
    }

    /// Names of the known templates, in lexicographic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|name| &**name)
    }
}
