//! Resolved and declared value representations.

use std::fmt;

/// Fixed keywords a resolved property may hold. Aliases are folded into these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Auto,
    None,
    Flex,
    Grid,
    Static,
    Relative,
    Absolute,
    Row,
    RowReverse,
    Column,
    ColumnReverse,
    NoWrap,
    Wrap,
    WrapReverse,
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Visible,
    Hidden,
    Scroll,
}

impl Keyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
            Self::Flex => "flex",
            Self::Grid => "grid",
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Row => "row",
            Self::RowReverse => "row-reverse",
            Self::Column => "column",
            Self::ColumnReverse => "column-reverse",
            Self::NoWrap => "nowrap",
            Self::Wrap => "wrap",
            Self::WrapReverse => "wrap-reverse",
            Self::FlexStart => "flex-start",
            Self::FlexEnd => "flex-end",
            Self::Center => "center",
            Self::Stretch => "stretch",
            Self::Baseline => "baseline",
            Self::SpaceBetween => "space-between",
            Self::SpaceAround => "space-around",
            Self::SpaceEvenly => "space-evenly",
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Scroll => "scroll",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A resolved value: lengths are pixels, percentages stay percentages (0..=100).
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Number(f32),
    Percent(f32),
    Keyword(Keyword),
    /// Structured text kept for a later parser (grid templates, areas, lines, auto-flow).
    Text(String),
}

impl StyleValue {
    pub const fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self {
            Self::Keyword(keyword) => Some(*keyword),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    /// Percentages print as `"<n>%"`, the form declarations accept back.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Percent(percent) => write!(formatter, "{percent}%"),
            Self::Keyword(keyword) => formatter.write_str(keyword.as_str()),
            Self::Text(text) => formatter.write_str(text),
        }
    }
}

/// A declared value as authored: a bare number (pixels for lengths) or text.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclaredValue {
    Number(f32),
    Text(String),
}

impl From<f32> for DeclaredValue {
    fn from(number: f32) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for DeclaredValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for DeclaredValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&StyleValue> for DeclaredValue {
    fn from(value: &StyleValue) -> Self {
        match value {
            StyleValue::Number(number) => Self::Number(*number),
            other @ (StyleValue::Percent(_) | StyleValue::Keyword(_) | StyleValue::Text(_)) => {
                Self::Text(other.to_string())
            }
        }
    }
}

impl fmt::Display for DeclaredValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Text(text) => formatter.write_str(text),
        }
    }
}
