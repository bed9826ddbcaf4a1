//! Flex Items: per-node style storage and resolution helpers
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-items>

use crate::chapter5::{
    Align, Display, Edge, FlexDirection, FlexWrap, Justify, Overflow, PositionType,
};
use crate::geometry::{Rect, Size};

/// A style length in the engine's native units: points or percent (0..=100).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Not set; resolves through edge fallbacks or to the property default.
    #[default]
    Undefined,
    Point(f32),
    Percent(f32),
    Auto,
}

impl Value {
    /// Resolve to points against `base`; `None` when auto/undefined or the base is indefinite.
    #[inline]
    pub fn resolve(self, base: Option<f32>) -> Option<f32> {
        match self {
            Self::Point(points) => Some(points),
            Self::Percent(percent) => base.map(|reference| reference * percent / 100.0),
            Self::Undefined | Self::Auto => None,
        }
    }

    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

/// Everything the solver reads from a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeStyle {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: Justify,
    pub align_items: Align,
    pub align_self: Align,
    pub align_content: Align,
    pub position_type: PositionType,
    pub display: Display,
    pub overflow: Overflow,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Value,
    pub width: Value,
    pub height: Value,
    pub min_width: Value,
    pub min_height: Value,
    pub max_width: Value,
    pub max_height: Value,
    pub aspect_ratio: Option<f32>,
    pub margin: [Value; Edge::COUNT],
    pub padding: [Value; Edge::COUNT],
    pub border: [Value; Edge::COUNT],
    pub position: [Value; Edge::COUNT],
    /// `[column, row]`
    pub gap: [Value; 2],
}

impl Default for NodeStyle {
    /// Web defaults: row direction, stretch alignment, shrink factor 1.
    fn default() -> Self {
        Self {
            direction: FlexDirection::Row,
            wrap: FlexWrap::NoWrap,
            justify_content: Justify::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            align_content: Align::Stretch,
            position_type: PositionType::Static,
            display: Display::Flex,
            overflow: Overflow::Visible,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Value::Auto,
            width: Value::Auto,
            height: Value::Auto,
            min_width: Value::Undefined,
            min_height: Value::Undefined,
            max_width: Value::Undefined,
            max_height: Value::Undefined,
            aspect_ratio: None,
            margin: [Value::Undefined; Edge::COUNT],
            padding: [Value::Undefined; Edge::COUNT],
            border: [Value::Undefined; Edge::COUNT],
            position: [Value::Undefined; Edge::COUNT],
            gap: [Value::Undefined; 2],
        }
    }
}

impl NodeStyle {
    /// Style sizes resolved against the containing block.
    pub fn size(&self, base: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.width.resolve(base.width),
            height: self.height.resolve(base.height),
        }
    }

    pub fn min_size(&self, base: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.min_width.resolve(base.width),
            height: self.min_height.resolve(base.height),
        }
    }

    pub fn max_size(&self, base: Size<Option<f32>>) -> Size<Option<f32>> {
        Size {
            width: self.max_width.resolve(base.width),
            height: self.max_height.resolve(base.height),
        }
    }

    /// Usable aspect ratio, if any.
    pub fn ratio(&self) -> Option<f32> {
        self.aspect_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
    }
}

/// Value stored for a physical edge after walking its fallback chain.
pub fn edge_value(values: &[Value; Edge::COUNT], edge: Edge) -> Value {
    edge.lookup_chain()
        .iter()
        .map(|candidate| values[candidate.index()])
        .find(|value| value.is_defined())
        .unwrap_or_default()
}

/// Resolve four physical edges to points; percentages use the containing block width.
pub fn resolve_edges(values: &[Value; Edge::COUNT], width_base: Option<f32>) -> Rect<f32> {
    let resolve = |edge| edge_value(values, edge).resolve(width_base).unwrap_or(0.0);
    Rect {
        left: resolve(Edge::Left),
        top: resolve(Edge::Top),
        right: resolve(Edge::Right),
        bottom: resolve(Edge::Bottom),
    }
}

/// Which physical edges are `auto`.
pub fn auto_edges(values: &[Value; Edge::COUNT]) -> Rect<bool> {
    Rect {
        left: edge_value(values, Edge::Left).is_auto(),
        top: edge_value(values, Edge::Top).is_auto(),
        right: edge_value(values, Edge::Right).is_auto(),
        bottom: edge_value(values, Edge::Bottom).is_auto(),
    }
}

/// Resolve a physical inset; `None` when unset or auto.
pub fn inset(style: &NodeStyle, edge: Edge, base: Option<f32>) -> Option<f32> {
    edge_value(&style.position, edge).resolve(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_lookup_prefers_specific_then_logical_then_group() {
        let mut values = [Value::Undefined; Edge::COUNT];
        values[Edge::All.index()] = Value::Point(1.0);
        values[Edge::Horizontal.index()] = Value::Point(2.0);
        values[Edge::Start.index()] = Value::Point(3.0);
        values[Edge::Bottom.index()] = Value::Percent(10.0);
        let rect = resolve_edges(&values, Some(200.0));
        assert!((rect.left - 3.0).abs() < f32::EPSILON);
        assert!((rect.right - 2.0).abs() < f32::EPSILON);
        assert!((rect.top - 1.0).abs() < f32::EPSILON);
        assert!((rect.bottom - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn percentages_need_a_definite_base() {
        assert_eq!(Value::Percent(50.0).resolve(None), None);
        let resolved = Value::Percent(50.0).resolve(Some(80.0)).unwrap_or_default();
        assert!((resolved - 40.0).abs() < f32::EPSILON);
        assert_eq!(Value::Auto.resolve(Some(80.0)), None);
    }

    #[test]
    fn auto_margins_are_detected_through_fallbacks() {
        let mut values = [Value::Undefined; Edge::COUNT];
        values[Edge::Horizontal.index()] = Value::Auto;
        let autos = auto_edges(&values);
        assert!(autos.left && autos.right);
        assert!(!autos.top && !autos.bottom);
    }
}
