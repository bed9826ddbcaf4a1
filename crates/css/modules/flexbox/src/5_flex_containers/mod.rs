//! Flex Containers: container properties and native enums
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-containers>
//!
//! Discriminants are the engine's native numeric constants. They do not follow
//! CSS declaration order; callers speaking another vocabulary must translate.

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexDirection {
    Column = 0,
    ColumnReverse = 1,
    #[default]
    Row = 2,
    RowReverse = 3,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property>
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexWrap {
    #[default]
    NoWrap = 0,
    Wrap = 1,
    WrapReverse = 2,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#justify-content-property>
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Justify {
    #[default]
    FlexStart = 0,
    Center = 1,
    FlexEnd = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
}

/// Shared alignment constant for `align-items`, `align-self` and `align-content`.
///
/// `Auto` is only meaningful for `align-self`; the `Space*` values only for `align-content`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Align {
    #[default]
    Auto = 0,
    FlexStart = 1,
    Center = 2,
    FlexEnd = 3,
    Stretch = 4,
    Baseline = 5,
    SpaceBetween = 6,
    SpaceAround = 7,
    SpaceEvenly = 8,
}

/// Positioning scheme of a node.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PositionType {
    /// In flow; insets are ignored.
    #[default]
    Static = 0,
    /// In flow; insets shift the box after layout.
    Relative = 1,
    /// Out of flow; positioned against the parent's padding box.
    Absolute = 2,
}

/// Whether the node takes part in layout at all.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Display {
    #[default]
    Flex = 0,
    None = 1,
}

/// Overflow behaviour, recorded for consumers that clip.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Overflow {
    #[default]
    Visible = 0,
    Hidden = 1,
    Scroll = 2,
}

/// Native edge constants. Physical edges come first, then logical and grouped edges.
///
/// Lookup precedence for a physical edge: the edge itself, then its logical alias
/// (`Start`/`End` map to left/right), then its axis group, then `All`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    Start = 4,
    End = 5,
    Horizontal = 6,
    Vertical = 7,
    All = 8,
}

impl Edge {
    /// Number of edge slots stored per box-model property.
    pub const COUNT: usize = 9;

    /// Slot index of this edge.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Edges consulted, in order, when resolving a physical edge.
    pub(crate) const fn lookup_chain(self) -> &'static [Self] {
        match self {
            Self::Left => &[Self::Left, Self::Start, Self::Horizontal, Self::All],
            Self::Right => &[Self::Right, Self::End, Self::Horizontal, Self::All],
            Self::Top => &[Self::Top, Self::Vertical, Self::All],
            Self::Bottom => &[Self::Bottom, Self::Vertical, Self::All],
            Self::Start => &[Self::Start, Self::Horizontal, Self::All],
            Self::End => &[Self::End, Self::Horizontal, Self::All],
            Self::Horizontal => &[Self::Horizontal, Self::All],
            Self::Vertical => &[Self::Vertical, Self::All],
            Self::All => &[Self::All],
        }
    }
}

/// Gap selector.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Gutter {
    Column = 0,
    Row = 1,
    All = 2,
}
