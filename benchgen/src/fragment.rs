//! Validated pieces of C++ source text

use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Piece of C++ source text that can be spliced into a template slot
///
/// Fragments have balanced `()`, `[]` and `{}` delimiters and never contain a
/// `$` character, which is reserved for template slots. Splicing a fragment
/// into a template can thus neither unbalance the surrounding code nor
/// introduce new slots. Angle brackets are not checked, since `<` and `>` are
/// also comparison operators in C++.
///
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Fragment(Box<str>);
//
impl Fragment {
    /// Validate some source text
    pub fn new(text: impl Into<Box<str>>) -> Result<Self, FragmentError> {
        let text = text.into();
        check_delimiters(&text)?;
        Ok(Self(text))
    }

    /// Empty fragment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenate fragments, inserting a separator between them
    ///
    /// The separator must not contain any delimiter or `$`.
    ///
    pub fn join(fragments: impl IntoIterator<Item = Fragment>, separator: &str) -> Self {
        debug_assert!(
            !separator.contains(['(', ')', '[', ']', '{', '}', '$']),
            "Fragment separators must not contain delimiters"
        );
        let mut result = String::new();
        for (idx, fragment) in fragments.into_iter().enumerate() {
            if idx > 0 {
                result.push_str(separator);
            }
            result.push_str(&fragment.0);
        }
        Self(result.into())
    }

    /// Source text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truth that this fragment contains no text
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
//
impl Display for Fragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
//
impl From<usize> for Fragment {
    fn from(value: usize) -> Self {
        Self(value.to_string().into())
    }
}
//
impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Check that delimiters are balanced and that no `$` is present
fn check_delimiters(text: &str) -> Result<(), FragmentError> {
    let mut open = Vec::new();
    for (offset, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => open.push((c, offset)),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match open.pop() {
                    Some((opener, _)) if opener == expected => {}
                    Some((opener, open_offset)) => {
                        return Err(FragmentError::Mismatched {
                            open: opener,
                            open_offset,
                            close: c,
                            offset,
                        })
                    }
                    None => return Err(FragmentError::UnexpectedClose { found: c, offset }),
                }
            }
            '$' => return Err(FragmentError::ReservedDollar { offset }),
            _ => {}
        }
    }
    match open.pop() {
        Some((open, offset)) => Err(FragmentError::Unclosed { open, offset }),
        None => Ok(()),
    }
}

/// Source text that cannot be used as a fragment
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FragmentError {
    /// A closing delimiter has no matching opening delimiter
    #[error("unexpected closing delimiter '{found}' at byte {offset}")]
    UnexpectedClose {
        /// Closing delimiter that was found
        found: char,

        /// Byte offset of the delimiter
        offset: usize,
    },

    /// An opening delimiter is closed by the wrong kind of delimiter
    #[error("'{open}' at byte {open_offset} is closed by '{close}' at byte {offset}")]
    Mismatched {
        /// Opening delimiter
        open: char,

        /// Byte offset of the opening delimiter
        open_offset: usize,

        /// Closing delimiter
        close: char,

        /// Byte offset of the closing delimiter
        offset: usize,
    },

    /// An opening delimiter is never closed
    #[error("'{open}' at byte {offset} is never closed")]
    Unclosed {
        /// Opening delimiter
        open: char,

        /// Byte offset of the delimiter
        offset: usize,
    },

    /// A `$` character was found
    #[error("'$' at byte {offset} is reserved for template slots")]
    ReservedDollar {
        /// Byte offset of the character
        offset: usize,
    },
}

/// Preprocessor directive emitted at the top of a generated file
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Directive {
    /// `#define NAME`
    Define(Box<str>),

    /// `#include <path>`
    Include(Box<str>),
}
//
impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Define(name) => write!(f, "#define {name}"),
            Directive::Include(path) => write!(f, "#include <{path}>"),
        }
    }
}

/// Ordered set of preprocessor directives
///
/// Directives are kept in insertion order, and inserting a directive that is
/// already present has no effect.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Prelude(Vec<Directive>);
//
impl Prelude {
    /// Start with no directive
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive, returns false if it was already present
    pub fn push(&mut self, directive: Directive) -> bool {
        if self.0.contains(&directive) {
            false
        } else {
            self.0.push(directive);
            true
        }
    }

    /// Add `#include <path>` for each path in order
    pub fn include<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) {
        for path in paths {
            self.push(Directive::Include(path.into()));
        }
    }

    /// Add `#define name` for each name in order
    pub fn define<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.push(Directive::Define(name.into()));
        }
    }

    /// Directives in insertion order
    pub fn directives(&self) -> &[Directive] {
        &self.0
    }

    /// Included header paths in insertion order
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|directive| match directive {
            Directive::Include(path) => Some(&**path),
            Directive::Define(_) => None,
        })
    }

    /// Render the directives, one per line
    pub fn to_fragment(&self) -> Result<Fragment, FragmentError> {
        let lines = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        Fragment::new(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn fragment() {
        let good = Fragment::new("boost::hana::list(x0<0>{}, x0<1>{})").unwrap();
        assert_eq!(good.as_str(), "boost::hana::list(x0<0>{}, x0<1>{})");
        assert_eq!(good.to_string(), good.as_str());
        assert!(!good.is_empty());
        assert!(Fragment::empty().is_empty());
        assert_eq!(Fragment::from(42usize).as_str(), "42");

        assert_eq!(
            Fragment::new("f(x))"),
            Err(FragmentError::UnexpectedClose {
                found: ')',
                offset: 4
            })
        );
        assert_eq!(
            Fragment::new("f(x]"),
            Err(FragmentError::Mismatched {
                open: '(',
                open_offset: 1,
                close: ']',
                offset: 3
            })
        );
        assert_eq!(
            Fragment::new("struct { int x;"),
            Err(FragmentError::Unclosed {
                open: '{',
                offset: 7
            })
        );
        assert_matches!(
            Fragment::new("${slot}"),
            Err(FragmentError::ReservedDollar { offset: 0 })
        );
    }

    #[test]
    fn join() {
        let parts = ["a", "b(c)", "{}"].map(|s| Fragment::new(s).unwrap());
        assert_eq!(Fragment::join(parts, ", ").as_str(), "a, b(c), {}");
        assert!(Fragment::join([], "\n").is_empty());
    }

    #[test]
    fn prelude() {
        let mut prelude = Prelude::new();
        prelude.define(["BOOST_MPL11_NO_ASSERTIONS"]);
        prelude.include(["boost/mpl/transform.hpp", "boost/mpl/vector/vector50.hpp"]);
        assert!(!prelude.push(Directive::Include("boost/mpl/transform.hpp".into())));
        prelude.include(["boost/mpl/vector/aux_/item.hpp"]);
        assert_eq!(
            prelude.includes().collect::<Vec<_>>(),
            [
                "boost/mpl/transform.hpp",
                "boost/mpl/vector/vector50.hpp",
                "boost/mpl/vector/aux_/item.hpp"
            ]
        );
        assert_eq!(
            prelude.to_fragment().unwrap().as_str(),
            "#define BOOST_MPL11_NO_ASSERTIONS\n\
             #include <boost/mpl/transform.hpp>\n\
             #include <boost/mpl/vector/vector50.hpp>\n\
             #include <boost/mpl/vector/aux_/item.hpp>"
        );
    }
}
