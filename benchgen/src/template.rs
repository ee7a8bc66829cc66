//! Source templates with named slots
//!
//! A template is C++ source text in which `${name}` marks a slot. Templates
//! are parsed once into a sequence of literal text and slots, then rendered
//! any number of times by filling every slot with a [`Fragment`].

use crate::{driver::ComposeError, fragment::Fragment};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until1},
    character::complete::{alpha1, alphanumeric1, char},
    combinator::{recognize, rest, verify},
    multi::{many0, many0_count},
    sequence::pair,
    Parser,
};
use nom_supreme::ParserExt;
use thiserror::Error;

/// Result type returned by template syntax parsers
type IResult<'a, O> = nom::IResult<&'a str, O, nom::error::Error<&'a str>>;

/// Parsed template
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    /// Name under which the template is registered
    name: Box<str>,

    /// Literal text and slots, in order
    pieces: Box<[Piece]>,
}
//
impl Template {
    /// Parse a template
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        use nom_supreme::final_parser::final_parser;
        let pieces: Result<Vec<Piece>, nom::error::Error<&str>> = final_parser(pieces)(source);
        match pieces {
            Ok(pieces) => Ok(Self {
                name: name.into(),
                pieces: pieces.into(),
            }),
            Err(e) => {
                let offset = source.len() - e.input.len();
                Err(TemplateError {
                    template: name.into(),
                    offset,
                    excerpt: e.input.chars().take(20).collect::<String>().into(),
                })
            }
        }
    }

    /// Name of the template
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slots used by the template, in order of first appearance
    pub fn slots(&self) -> Vec<&str> {
        let mut slots = Vec::new();
        for piece in self.pieces.iter() {
            if let Piece::Slot(slot) = piece {
                if !slots.contains(&&**slot) {
                    slots.push(&**slot);
                }
            }
        }
        slots
    }

    /// Fill every slot of the template
    ///
    /// Bindings that the template does not use are ignored, but every slot of
    /// the template must be bound.
    ///
    pub fn render(&self, bindings: &Bindings) -> Result<Fragment, ComposeError> {
        let mut output = String::new();
        for piece in self.pieces.iter() {
            match piece {
                Piece::Literal(text) => output.push_str(text),
                Piece::Slot(slot) => {
                    let value = bindings
                        .get(slot)
                        .ok_or_else(|| ComposeError::UnboundSlot {
                            template: self.name.clone(),
                            slot: slot.clone(),
                        })?;
                    output.push_str(value.as_str());
                }
            }
        }
        Fragment::new(output).map_err(|source| ComposeError::InvalidOutput {
            template: self.name.clone(),
            source,
        })
    }
}

/// Component of a template
#[derive(Clone, Debug, Eq, PartialEq)]
enum Piece {
    /// Text that is emitted as is
    Literal(Box<str>),

    /// Named slot
    Slot(Box<str>),
}

/// Parser for a complete template
fn pieces(s: &str) -> IResult<Vec<Piece>> {
    many0(alt((slot, literal))).parse(s)
}

/// Parser for a `${name}` slot
fn slot(s: &str) -> IResult<Piece> {
    slot_name
        .preceded_by(tag("${"))
        .terminated(char('}'))
        .map(|name: &str| Piece::Slot(name.into()))
        .parse(s)
}

/// Parser for slot names, which follow C identifier rules
fn slot_name(s: &str) -> IResult<&str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))
    .parse(s)
}

/// Parser for literal text up to the next slot
fn literal(s: &str) -> IResult<Piece> {
    alt((
        take_until1("${"),
        verify(rest, |text: &str| !text.is_empty() && !text.contains("${")),
    ))
    .map(|text: &str| Piece::Literal(text.into()))
    .parse(s)
}

/// Values of template slots
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bindings(Vec<(&'static str, Fragment)>);
//
impl Bindings {
    /// Start with no binding
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot, replacing any previous binding with the same name
    pub fn bind(mut self, slot: &'static str, value: impl Into<Fragment>) -> Self {
        let value = value.into();
        if let Some(binding) = self.0.iter_mut().find(|(name, _)| *name == slot) {
            binding.1 = value;
        } else {
            self.0.push((slot, value));
        }
        self
    }

    /// Value bound to a slot, if any
    pub fn get(&self, slot: &str) -> Option<&Fragment> {
        self.0
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, value)| value)
    }
}

/// Template source text that could not be parsed
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("bad slot syntax in template {template} at byte {offset} (near {excerpt:?})")]
pub struct TemplateError {
    /// Name of the template
    pub template: Box<str>,

    /// Byte offset of the syntax error
    pub offset: usize,

    /// Source text starting at the syntax error
    pub excerpt: Box<str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn fragment(s: &str) -> Fragment {
        Fragment::new(s).unwrap()
    }

    #[test]
    fn parse() {
        let template = Template::parse("t", "using ${name} = ${value};\n${name}").unwrap();
        assert_eq!(template.name(), "t");
        assert_eq!(template.slots(), ["name", "value"]);
        assert_eq!(
            &*template.pieces,
            [
                Piece::Literal("using ".into()),
                Piece::Slot("name".into()),
                Piece::Literal(" = ".into()),
                Piece::Slot("value".into()),
                Piece::Literal(";\n".into()),
                Piece::Slot("name".into()),
            ]
        );

        let empty = Template::parse("empty", "").unwrap();
        assert!(empty.slots().is_empty());
        assert_eq!(empty.render(&Bindings::new()).unwrap(), Fragment::empty());

        let literal = Template::parse("literal", "struct f { };").unwrap();
        assert!(literal.slots().is_empty());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Template::parse("bad", "int ${0x};"),
            Err(TemplateError {
                template: "bad".into(),
                offset: 4,
                excerpt: "${0x};".into(),
            })
        );
        assert_matches!(
            Template::parse("unclosed", "${slot"),
            Err(TemplateError { offset: 0, .. })
        );
        assert_matches!(
            Template::parse("trailing", "text ${"),
            Err(TemplateError { offset: 5, .. })
        );
    }

    #[test]
    fn bindings() {
        let bindings = Bindings::new()
            .bind("a", fragment("1"))
            .bind("b", 2usize)
            .bind("a", fragment("3"));
        assert_eq!(bindings.get("a"), Some(&fragment("3")));
        assert_eq!(bindings.get("b"), Some(&fragment("2")));
        assert_eq!(bindings.get("c"), None);
    }

    #[test]
    fn render() {
        let template = Template::parse("decl", "template <int> struct ${element} { };").unwrap();
        let bindings = Bindings::new()
            .bind("element", fragment("x3"))
            .bind("unused", fragment("whatever"));
        assert_eq!(
            template.render(&bindings).unwrap().as_str(),
            "template <int> struct x3 { };"
        );

        assert_matches!(
            template.render(&Bindings::new()),
            Err(ComposeError::UnboundSlot { template, slot }) => {
                assert_eq!(&*template, "decl");
                assert_eq!(&*slot, "element");
            }
        );

        let unbalanced = Template::parse("unbalanced", "struct ${name} {").unwrap();
        assert_matches!(
            unbalanced.render(&Bindings::new().bind("name", fragment("s"))),
            Err(ComposeError::InvalidOutput { .. })
        );
    }
}
