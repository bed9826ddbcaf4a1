//! Authored declarations for one element.

use crate::resolved::ResolvedStyle;
use crate::value::DeclaredValue;

/// Declarations in authoring order plus the element preset they sit on top of.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclaredStyle {
    /// Element type whose preset forms the lowest layer (`h1`, `img`, ...).
    pub preset: Option<String>,
    /// `(name, value)` pairs; later declarations win. Names may be camelCase or kebab-case.
    pub declarations: Vec<(String, DeclaredValue)>,
}

impl DeclaredStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations layered over the preset for `element_type`.
    pub fn for_element(element_type: &str) -> Self {
        Self {
            preset: Some(element_type.to_owned()),
            declarations: Vec::new(),
        }
    }

    /// Builder-style declaration.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<DeclaredValue>) -> Self {
        self.declare(name, value);
        self
    }

    pub fn declare(&mut self, name: &str, value: impl Into<DeclaredValue>) {
        self.declarations.push((name.to_owned(), value.into()));
    }
}

impl From<&ResolvedStyle> for DeclaredStyle {
    /// Re-declare every resolved longhand explicitly, so that expanding the result
    /// against the same inherited style yields the same resolved style.
    fn from(resolved: &ResolvedStyle) -> Self {
        Self {
            preset: None,
            declarations: resolved
                .iter()
                .map(|(property, value)| (property.name().to_owned(), DeclaredValue::from(value)))
                .collect(),
        }
    }
}
