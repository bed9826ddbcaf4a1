//! The flat, shorthand-free style map produced by expansion.

use std::collections::BTreeMap;

use css_values_units::Viewport;

use crate::property::Property;
use crate::value::{Keyword, StyleValue};

/// Environment every relative unit resolves against. It travels with each style.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleEnv {
    /// Font size of the root element, used for `rem` and as the initial `font-size`.
    pub root_font_size: f32,
    /// Viewport for `vw`/`vh`/`vmin`/`vmax`.
    pub viewport: Option<Viewport>,
}

impl Default for StyleEnv {
    fn default() -> Self {
        Self {
            root_font_size: 16.0,
            viewport: None,
        }
    }
}

/// Canonical longhand to value. Every longhand is present.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    values: BTreeMap<Property, StyleValue>,
    env: StyleEnv,
}

impl ResolvedStyle {
    /// Style holding only initial values; the inherited input for a root element.
    pub fn initial(env: StyleEnv) -> Self {
        let values = Property::ALL
            .iter()
            .map(|property| (*property, property.initial_value(env.root_font_size)))
            .collect();
        Self { values, env }
    }

    pub const fn env(&self) -> StyleEnv {
        self.env
    }

    /// Value of a longhand.
    pub fn get(&self, property: Property) -> &StyleValue {
        self.values
            .get(&property)
            .unwrap_or(&StyleValue::Keyword(Keyword::Auto))
    }

    pub(crate) fn set(&mut self, property: Property, value: StyleValue) {
        self.values.insert(property, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &StyleValue)> {
        self.values.iter().map(|(property, value)| (*property, value))
    }

    pub fn keyword(&self, property: Property) -> Option<Keyword> {
        self.get(property).as_keyword()
    }

    pub fn number(&self, property: Property) -> Option<f32> {
        self.get(property).as_number()
    }

    pub fn text(&self, property: Property) -> Option<&str> {
        self.get(property).as_text()
    }

    /// Computed font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.number(Property::FontSize)
            .unwrap_or(self.env.root_font_size)
    }
}
