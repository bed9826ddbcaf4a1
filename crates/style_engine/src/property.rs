//! Canonical property names, shorthands and name aliasing.

use std::fmt;

use crate::value::{Keyword, StyleValue};

/// A canonical longhand property. Every key of a `ResolvedStyle` is one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Property {
    Display,
    Position,
    Top,
    Right,
    Bottom,
    Left,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    AspectRatio,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    FlexDirection,
    FlexWrap,
    FlexGrow,
    FlexShrink,
    FlexBasis,
    JustifyContent,
    AlignItems,
    AlignSelf,
    AlignContent,
    RowGap,
    ColumnGap,
    OverflowX,
    OverflowY,
    GridTemplateColumns,
    GridTemplateRows,
    GridTemplateAreas,
    GridAutoColumns,
    GridAutoRows,
    GridAutoFlow,
    GridRowStart,
    GridRowEnd,
    GridColumnStart,
    GridColumnEnd,
    FontSize,
    LineHeight,
}

/// How a longhand's raw value is parsed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ValueKind {
    /// `<length-percentage> | auto`
    LengthPercentageAuto,
    /// `<length-percentage>`, non-negative
    LengthPercentage,
    /// `<length> | thin | medium | thick`, non-negative
    BorderWidth,
    /// `<length-percentage> | auto`, non-negative
    MinSize,
    /// `<length-percentage> | none`, non-negative
    MaxSize,
    /// Non-negative `<number>`
    Factor,
    /// `auto | <ratio>`
    AspectRatio,
    /// One keyword out of a fixed table
    Keyword(&'static [(&'static str, Keyword)]),
    /// `none | <track-list>`
    TrackList,
    /// `none | <string>+`
    Areas,
    /// `[row | column] || dense`
    AutoFlow,
    /// `auto | <integer> | span <integer> | <ident>`
    GridLine,
    FontSize,
    LineHeight,
}

const DISPLAY: &[(&str, Keyword)] = &[
    ("flex", Keyword::Flex),
    ("grid", Keyword::Grid),
    ("none", Keyword::None),
    ("block", Keyword::Flex),
    ("-webkit-box", Keyword::Flex),
    ("inline-flex", Keyword::Flex),
    ("inline-block", Keyword::Flex),
    ("inline", Keyword::Flex),
    ("inline-grid", Keyword::Grid),
];

const POSITION: &[(&str, Keyword)] = &[
    ("static", Keyword::Static),
    ("relative", Keyword::Relative),
    ("absolute", Keyword::Absolute),
    ("fixed", Keyword::Absolute),
    ("sticky", Keyword::Relative),
];

const FLEX_DIRECTION: &[(&str, Keyword)] = &[
    ("row", Keyword::Row),
    ("row-reverse", Keyword::RowReverse),
    ("column", Keyword::Column),
    ("column-reverse", Keyword::ColumnReverse),
];

const FLEX_WRAP: &[(&str, Keyword)] = &[
    ("nowrap", Keyword::NoWrap),
    ("wrap", Keyword::Wrap),
    ("wrap-reverse", Keyword::WrapReverse),
];

const JUSTIFY_CONTENT: &[(&str, Keyword)] = &[
    ("flex-start", Keyword::FlexStart),
    ("flex-end", Keyword::FlexEnd),
    ("center", Keyword::Center),
    ("space-between", Keyword::SpaceBetween),
    ("space-around", Keyword::SpaceAround),
    ("space-evenly", Keyword::SpaceEvenly),
    ("start", Keyword::FlexStart),
    ("left", Keyword::FlexStart),
    ("normal", Keyword::FlexStart),
    ("stretch", Keyword::FlexStart),
    ("end", Keyword::FlexEnd),
    ("right", Keyword::FlexEnd),
];

const ALIGN_ITEMS: &[(&str, Keyword)] = &[
    ("flex-start", Keyword::FlexStart),
    ("flex-end", Keyword::FlexEnd),
    ("center", Keyword::Center),
    ("stretch", Keyword::Stretch),
    ("baseline", Keyword::Baseline),
    ("start", Keyword::FlexStart),
    ("self-start", Keyword::FlexStart),
    ("end", Keyword::FlexEnd),
    ("self-end", Keyword::FlexEnd),
    ("normal", Keyword::Stretch),
];

const ALIGN_SELF: &[(&str, Keyword)] = &[
    ("auto", Keyword::Auto),
    ("flex-start", Keyword::FlexStart),
    ("flex-end", Keyword::FlexEnd),
    ("center", Keyword::Center),
    ("stretch", Keyword::Stretch),
    ("baseline", Keyword::Baseline),
    ("start", Keyword::FlexStart),
    ("self-start", Keyword::FlexStart),
    ("end", Keyword::FlexEnd),
    ("self-end", Keyword::FlexEnd),
    ("normal", Keyword::Auto),
];

const ALIGN_CONTENT: &[(&str, Keyword)] = &[
    ("flex-start", Keyword::FlexStart),
    ("flex-end", Keyword::FlexEnd),
    ("center", Keyword::Center),
    ("stretch", Keyword::Stretch),
    ("space-between", Keyword::SpaceBetween),
    ("space-around", Keyword::SpaceAround),
    ("space-evenly", Keyword::SpaceEvenly),
    ("start", Keyword::FlexStart),
    ("end", Keyword::FlexEnd),
    ("normal", Keyword::Stretch),
];

const OVERFLOW: &[(&str, Keyword)] = &[
    ("visible", Keyword::Visible),
    ("hidden", Keyword::Hidden),
    ("scroll", Keyword::Scroll),
    ("clip", Keyword::Hidden),
    ("auto", Keyword::Scroll),
];

impl Property {
    /// Every longhand, in a stable order.
    pub const ALL: [Self; 50] = [
        Self::Display,
        Self::Position,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
        Self::Width,
        Self::Height,
        Self::MinWidth,
        Self::MinHeight,
        Self::MaxWidth,
        Self::MaxHeight,
        Self::AspectRatio,
        Self::MarginTop,
        Self::MarginRight,
        Self::MarginBottom,
        Self::MarginLeft,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::BorderTopWidth,
        Self::BorderRightWidth,
        Self::BorderBottomWidth,
        Self::BorderLeftWidth,
        Self::FlexDirection,
        Self::FlexWrap,
        Self::FlexGrow,
        Self::FlexShrink,
        Self::FlexBasis,
        Self::JustifyContent,
        Self::AlignItems,
        Self::AlignSelf,
        Self::AlignContent,
        Self::RowGap,
        Self::ColumnGap,
        Self::OverflowX,
        Self::OverflowY,
        Self::GridTemplateColumns,
        Self::GridTemplateRows,
        Self::GridTemplateAreas,
        Self::GridAutoColumns,
        Self::GridAutoRows,
        Self::GridAutoFlow,
        Self::GridRowStart,
        Self::GridRowEnd,
        Self::GridColumnStart,
        Self::GridColumnEnd,
        Self::FontSize,
        Self::LineHeight,
    ];

    /// Canonical kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Position => "position",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Width => "width",
            Self::Height => "height",
            Self::MinWidth => "min-width",
            Self::MinHeight => "min-height",
            Self::MaxWidth => "max-width",
            Self::MaxHeight => "max-height",
            Self::AspectRatio => "aspect-ratio",
            Self::MarginTop => "margin-top",
            Self::MarginRight => "margin-right",
            Self::MarginBottom => "margin-bottom",
            Self::MarginLeft => "margin-left",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::BorderTopWidth => "border-top-width",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftWidth => "border-left-width",
            Self::FlexDirection => "flex-direction",
            Self::FlexWrap => "flex-wrap",
            Self::FlexGrow => "flex-grow",
            Self::FlexShrink => "flex-shrink",
            Self::FlexBasis => "flex-basis",
            Self::JustifyContent => "justify-content",
            Self::AlignItems => "align-items",
            Self::AlignSelf => "align-self",
            Self::AlignContent => "align-content",
            Self::RowGap => "row-gap",
            Self::ColumnGap => "column-gap",
            Self::OverflowX => "overflow-x",
            Self::OverflowY => "overflow-y",
            Self::GridTemplateColumns => "grid-template-columns",
            Self::GridTemplateRows => "grid-template-rows",
            Self::GridTemplateAreas => "grid-template-areas",
            Self::GridAutoColumns => "grid-auto-columns",
            Self::GridAutoRows => "grid-auto-rows",
            Self::GridAutoFlow => "grid-auto-flow",
            Self::GridRowStart => "grid-row-start",
            Self::GridRowEnd => "grid-row-end",
            Self::GridColumnStart => "grid-column-start",
            Self::GridColumnEnd => "grid-column-end",
            Self::FontSize => "font-size",
            Self::LineHeight => "line-height",
        }
    }

    pub(crate) const fn kind(self) -> ValueKind {
        match self {
            Self::Display => ValueKind::Keyword(DISPLAY),
            Self::Position => ValueKind::Keyword(POSITION),
            Self::FlexDirection => ValueKind::Keyword(FLEX_DIRECTION),
            Self::FlexWrap => ValueKind::Keyword(FLEX_WRAP),
            Self::JustifyContent => ValueKind::Keyword(JUSTIFY_CONTENT),
            Self::AlignItems => ValueKind::Keyword(ALIGN_ITEMS),
            Self::AlignSelf => ValueKind::Keyword(ALIGN_SELF),
            Self::AlignContent => ValueKind::Keyword(ALIGN_CONTENT),
            Self::OverflowX | Self::OverflowY => ValueKind::Keyword(OVERFLOW),
            Self::Top
            | Self::Right
            | Self::Bottom
            | Self::Left
            | Self::Width
            | Self::Height
            | Self::FlexBasis
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft => ValueKind::LengthPercentageAuto,
            Self::MinWidth | Self::MinHeight => ValueKind::MinSize,
            Self::MaxWidth | Self::MaxHeight => ValueKind::MaxSize,
            Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::RowGap
            | Self::ColumnGap => ValueKind::LengthPercentage,
            Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth => ValueKind::BorderWidth,
            Self::FlexGrow | Self::FlexShrink => ValueKind::Factor,
            Self::AspectRatio => ValueKind::AspectRatio,
            Self::GridTemplateColumns
            | Self::GridTemplateRows
            | Self::GridAutoColumns
            | Self::GridAutoRows => ValueKind::TrackList,
            Self::GridTemplateAreas => ValueKind::Areas,
            Self::GridAutoFlow => ValueKind::AutoFlow,
            Self::GridRowStart | Self::GridRowEnd | Self::GridColumnStart | Self::GridColumnEnd => {
                ValueKind::GridLine
            }
            Self::FontSize => ValueKind::FontSize,
            Self::LineHeight => ValueKind::LineHeight,
        }
    }

    /// Whether children take this property from their parent when they do not declare it.
    pub const fn is_inherited(self) -> bool {
        matches!(self, Self::FontSize | Self::LineHeight)
    }

    /// Initial value. `font-size` starts at the environment's root font size.
    pub fn initial_value(self, root_font_size: f32) -> StyleValue {
        match self {
            Self::Display => StyleValue::Keyword(Keyword::Flex),
            Self::Position => StyleValue::Keyword(Keyword::Static),
            Self::FlexDirection => StyleValue::Keyword(Keyword::Row),
            Self::FlexWrap => StyleValue::Keyword(Keyword::NoWrap),
            Self::JustifyContent => StyleValue::Keyword(Keyword::FlexStart),
            Self::AlignItems | Self::AlignContent => StyleValue::Keyword(Keyword::Stretch),
            Self::OverflowX | Self::OverflowY => StyleValue::Keyword(Keyword::Visible),
            Self::FlexShrink => StyleValue::Number(1.0),
            Self::FontSize => StyleValue::Number(root_font_size),
            Self::LineHeight => StyleValue::Number(1.2),
            Self::MaxWidth
            | Self::MaxHeight
            | Self::GridTemplateColumns
            | Self::GridTemplateRows
            | Self::GridTemplateAreas => StyleValue::Keyword(Keyword::None),
            Self::GridAutoFlow => StyleValue::Text("row".to_owned()),
            Self::GridAutoColumns | Self::GridAutoRows => StyleValue::Text("auto".to_owned()),
            Self::FlexGrow
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth
            | Self::RowGap
            | Self::ColumnGap => StyleValue::Number(0.0),
            Self::AlignSelf
            | Self::Top
            | Self::Right
            | Self::Bottom
            | Self::Left
            | Self::Width
            | Self::Height
            | Self::MinWidth
            | Self::MinHeight
            | Self::AspectRatio
            | Self::FlexBasis
            | Self::GridRowStart
            | Self::GridRowEnd
            | Self::GridColumnStart
            | Self::GridColumnEnd => StyleValue::Keyword(Keyword::Auto),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A shorthand that fans out into several longhands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shorthand {
    Flex,
    FlexFlow,
    Margin,
    Padding,
    BorderWidth,
    Border,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    Inset,
    Gap,
    Overflow,
    GridRow,
    GridColumn,
    GridArea,
    PlaceContent,
    PlaceItems,
}

impl Shorthand {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::FlexFlow => "flex-flow",
            Self::Margin => "margin",
            Self::Padding => "padding",
            Self::BorderWidth => "border-width",
            Self::Border => "border",
            Self::BorderTop => "border-top",
            Self::BorderRight => "border-right",
            Self::BorderBottom => "border-bottom",
            Self::BorderLeft => "border-left",
            Self::Inset => "inset",
            Self::Gap => "gap",
            Self::Overflow => "overflow",
            Self::GridRow => "grid-row",
            Self::GridColumn => "grid-column",
            Self::GridArea => "grid-area",
            Self::PlaceContent => "place-content",
            Self::PlaceItems => "place-items",
        }
    }

    /// Longhands this shorthand sets, in declaration order.
    pub const fn longhands(self) -> &'static [Property] {
        match self {
            Self::Flex => &[Property::FlexGrow, Property::FlexShrink, Property::FlexBasis],
            Self::FlexFlow => &[Property::FlexDirection, Property::FlexWrap],
            Self::Margin => &[
                Property::MarginTop,
                Property::MarginRight,
                Property::MarginBottom,
                Property::MarginLeft,
            ],
            Self::Padding => &[
                Property::PaddingTop,
                Property::PaddingRight,
                Property::PaddingBottom,
                Property::PaddingLeft,
            ],
            Self::BorderWidth | Self::Border => &[
                Property::BorderTopWidth,
                Property::BorderRightWidth,
                Property::BorderBottomWidth,
                Property::BorderLeftWidth,
            ],
            Self::BorderTop => &[Property::BorderTopWidth],
            Self::BorderRight => &[Property::BorderRightWidth],
            Self::BorderBottom => &[Property::BorderBottomWidth],
            Self::BorderLeft => &[Property::BorderLeftWidth],
            Self::Inset => &[Property::Top, Property::Right, Property::Bottom, Property::Left],
            Self::Gap => &[Property::RowGap, Property::ColumnGap],
            Self::Overflow => &[Property::OverflowX, Property::OverflowY],
            Self::GridRow => &[Property::GridRowStart, Property::GridRowEnd],
            Self::GridColumn => &[Property::GridColumnStart, Property::GridColumnEnd],
            Self::GridArea => &[
                Property::GridRowStart,
                Property::GridColumnStart,
                Property::GridRowEnd,
                Property::GridColumnEnd,
            ],
            Self::PlaceContent => &[Property::AlignContent, Property::JustifyContent],
            Self::PlaceItems => &[Property::AlignItems],
        }
    }
}

/// A recognised declaration name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PropertyName {
    Longhand(Property),
    Shorthand(Shorthand),
}

impl PropertyName {
    /// Look up a declaration name given in kebab-case or camelCase.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = to_kebab_case(raw.trim());
        if let Some(property) = Property::ALL
            .iter()
            .copied()
            .find(|property| property.name() == name)
        {
            return Some(Self::Longhand(property));
        }
        let shorthand = match name.as_str() {
            "flex" => Shorthand::Flex,
            "flex-flow" => Shorthand::FlexFlow,
            "margin" => Shorthand::Margin,
            "padding" => Shorthand::Padding,
            "border-width" => Shorthand::BorderWidth,
            "border" => Shorthand::Border,
            "border-top" => Shorthand::BorderTop,
            "border-right" => Shorthand::BorderRight,
            "border-bottom" => Shorthand::BorderBottom,
            "border-left" => Shorthand::BorderLeft,
            "inset" => Shorthand::Inset,
            "gap" | "grid-gap" => Shorthand::Gap,
            "overflow" => Shorthand::Overflow,
            "grid-row" => Shorthand::GridRow,
            "grid-column" => Shorthand::GridColumn,
            "grid-area" => Shorthand::GridArea,
            "place-content" => Shorthand::PlaceContent,
            "place-items" => Shorthand::PlaceItems,
            "grid-row-gap" => return Some(Self::Longhand(Property::RowGap)),
            "grid-column-gap" => return Some(Self::Longhand(Property::ColumnGap)),
            _ => return None,
        };
        Some(Self::Shorthand(shorthand))
    }
}

/// `flexDirection` becomes `flex-direction`; kebab-case input is returned lowercased.
fn to_kebab_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for character in raw.chars() {
        if character.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_names_alias_to_longhands() {
        assert_eq!(
            PropertyName::parse("flexDirection"),
            Some(PropertyName::Longhand(Property::FlexDirection))
        );
        assert_eq!(
            PropertyName::parse("borderTopWidth"),
            Some(PropertyName::Longhand(Property::BorderTopWidth))
        );
        assert_eq!(
            PropertyName::parse("gridGap"),
            Some(PropertyName::Shorthand(Shorthand::Gap))
        );
        assert_eq!(PropertyName::parse("colour"), None);
    }

    #[test]
    fn every_longhand_round_trips_its_name() {
        for property in Property::ALL {
            assert_eq!(
                PropertyName::parse(property.name()),
                Some(PropertyName::Longhand(property))
            );
        }
    }
}
