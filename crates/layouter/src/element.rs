//! Read-only element tree consumed by a layout pass.

use style_engine::{DeclaredStyle, DeclaredValue};

use crate::measure::ContentSize;

/// Non-style facts about an element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementProps {
    /// Text content of a text leaf.
    pub text: Option<String>,
    /// Natural size of replaced content, e.g. an image's pixel dimensions.
    pub natural_size: Option<ContentSize>,
    /// `width` attribute, used when style leaves the width `auto`.
    pub width: Option<f32>,
    /// `height` attribute, used when style leaves the height `auto`.
    pub height: Option<f32>,
}

/// One element: its type, authored style, props and ordered children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub element_type: String,
    pub style: DeclaredStyle,
    pub props: ElementProps,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(element_type: &str) -> Self {
        Self {
            element_type: element_type.to_owned(),
            ..Self::default()
        }
    }

    /// A text leaf.
    pub fn text(element_type: &str, text: &str) -> Self {
        let mut element = Self::new(element_type);
        element.props.text = Some(text.to_owned());
        element
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<DeclaredValue>) -> Self {
        self.style.declare(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_natural_size(mut self, width: f32, height: f32) -> Self {
        self.props.natural_size = Some(ContentSize::new(width, height));
        self
    }

    /// Replaced elements size from their own content rather than their children.
    pub fn is_replaced(&self) -> bool {
        matches!(self.element_type.as_str(), "img" | "image" | "video" | "canvas")
    }

    /// Leaves with text or replaced content get a measurement hook; containers never do.
    pub fn has_measurable_content(&self) -> bool {
        self.children.is_empty()
            && (self.is_replaced() || self.props.text.as_deref().is_some_and(|text| !text.is_empty()))
    }

    /// Declared style with this element's preset as the lowest layer.
    pub(crate) fn declared_style(&self) -> DeclaredStyle {
        let mut style = self.style.clone();
        if style.preset.is_none() {
            style.preset = Some(self.element_type.clone());
        }
        style
    }
}
