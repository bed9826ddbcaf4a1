//! Adapter for the object-per-node flex engine in `css_flexbox`.
//!
//! Every setter lands on the native node immediately. The engine knows nothing
//! about grid, so grid setters keep their default no-op.

use std::rc::Rc;

use css_flexbox::{
    Align, Config, Display, Edge as NativeEdge, FlexDirection as NativeDirection,
    FlexWrap as NativeWrap, Gutter, Justify, MeasureFunc, MeasureMode, Node, Overflow as NativeOverflow,
    PositionType as NativePosition, Rect, Size, Value,
};
use log::debug;
use tracing::debug_span;

use crate::backend::{BackendKind, LayoutEngine};
use crate::error::LayoutError;
use crate::measure::{MeasureBridge, WidthConstraint};
use crate::tree::{
    AlignContent, AlignItems, BoxEdge, Dimension, DisplayMode, Edge, FlexDirection, FlexWrap,
    Geometry, GridAxis, JustifyContent, LayoutTree, Length, NodeHandle, Overflow, PositionType,
};

/// The flex engine. Stateless apart from its rounding configuration.
#[derive(Debug, Default)]
pub struct FlexboxEngine {
    config: Config,
}

impl FlexboxEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutEngine for FlexboxEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Flexbox
    }

    fn supports_grid(&self) -> bool {
        false
    }

    fn new_tree(&self) -> Box<dyn LayoutTree> {
        Box::new(FlexboxTree {
            nodes: Vec::new(),
            config: self.config,
            solved: false,
        })
    }
}

/// One native node per handle.
pub struct FlexboxTree {
    nodes: Vec<Node>,
    config: Config,
    solved: bool,
}

// Canonical side order is top/right/bottom/left; the native order starts at left.
// All edge translation for this backend happens in these two functions.
const fn native_edge(edge: Edge) -> NativeEdge {
    match edge {
        Edge::Top => NativeEdge::Top,
        Edge::Right => NativeEdge::Right,
        Edge::Bottom => NativeEdge::Bottom,
        Edge::Left => NativeEdge::Left,
    }
}

const fn native_side(rect: &Rect<f32>, edge: Edge) -> f32 {
    match edge {
        Edge::Top => rect.top,
        Edge::Right => rect.right,
        Edge::Bottom => rect.bottom,
        Edge::Left => rect.left,
    }
}

const fn value(length: Length) -> Value {
    match length {
        Length::Points(points) => Value::Point(points),
        Length::Percent(percent) => Value::Percent(percent),
        Length::Auto => Value::Auto,
    }
}

/// `auto` (or `none` for max sizes) leaves the native value unset.
const fn bound(length: Length) -> Value {
    match length {
        Length::Auto => Value::Undefined,
        other @ (Length::Points(_) | Length::Percent(_)) => value(other),
    }
}

const fn native_align(align: AlignItems) -> Align {
    match align {
        AlignItems::FlexStart => Align::FlexStart,
        AlignItems::FlexEnd => Align::FlexEnd,
        AlignItems::Center => Align::Center,
        AlignItems::Stretch => Align::Stretch,
        AlignItems::Baseline => Align::Baseline,
    }
}

const fn overflow(overflow: Overflow) -> NativeOverflow {
    match overflow {
        Overflow::Visible => NativeOverflow::Visible,
        Overflow::Hidden => NativeOverflow::Hidden,
        Overflow::Scroll => NativeOverflow::Scroll,
    }
}

/// Native measure modes to the bridge's three-way width constraint.
fn width_constraint(width: f32, mode: MeasureMode) -> WidthConstraint {
    match mode {
        MeasureMode::Undefined => WidthConstraint::GrowToFill,
        MeasureMode::AtMost if width <= 0.0 => WidthConstraint::ShrinkToMin,
        MeasureMode::AtMost | MeasureMode::Exactly if width.is_finite() => {
            WidthConstraint::Definite(width)
        }
        MeasureMode::AtMost | MeasureMode::Exactly => WidthConstraint::GrowToFill,
    }
}

impl FlexboxTree {
    fn node(&self, handle: NodeHandle) -> Result<&Node, LayoutError> {
        self.nodes
            .get(handle.index())
            .ok_or(LayoutError::UnknownNode(handle))
    }

    /// Look up a node for writing; any write invalidates the last solve.
    fn write(&mut self, handle: NodeHandle) -> Result<&Node, LayoutError> {
        self.solved = false;
        self.nodes
            .get(handle.index())
            .ok_or(LayoutError::UnknownNode(handle))
    }

    fn solved_node(&self, handle: NodeHandle) -> Result<&Node, LayoutError> {
        let node = self.node(handle)?;
        if !self.solved {
            return Err(LayoutError::NotSolved { node: handle });
        }
        Ok(node)
    }
}

impl LayoutTree for FlexboxTree {
    fn backend(&self) -> BackendKind {
        BackendKind::Flexbox
    }

    fn create_node(&mut self) -> Result<NodeHandle, LayoutError> {
        self.solved = false;
        self.nodes.push(Node::new());
        Ok(NodeHandle(self.nodes.len() - 1))
    }

    fn insert_child(
        &mut self,
        parent: NodeHandle,
        child: NodeHandle,
        index: usize,
    ) -> Result<(), LayoutError> {
        let child_node = self.node(child)?.clone();
        self.write(parent)?
            .insert_child(&child_node, index)
            .map_err(|err| LayoutError::Backend(err.to_string()))
    }

    fn child_count(&self, node: NodeHandle) -> Result<usize, LayoutError> {
        Ok(self.node(node)?.child_count())
    }

    fn set_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        let native = self.write(node)?;
        match dimension {
            Dimension::Width => native.set_width(value(length)),
            Dimension::Height => native.set_height(value(length)),
        }
        Ok(())
    }

    fn set_min_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        let native = self.write(node)?;
        match dimension {
            Dimension::Width => native.set_min_width(bound(length)),
            Dimension::Height => native.set_min_height(bound(length)),
        }
        Ok(())
    }

    fn set_max_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        let native = self.write(node)?;
        match dimension {
            Dimension::Width => native.set_max_width(bound(length)),
            Dimension::Height => native.set_max_height(bound(length)),
        }
        Ok(())
    }

    fn set_aspect_ratio(
        &mut self,
        node: NodeHandle,
        ratio: Option<f32>,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_aspect_ratio(ratio);
        Ok(())
    }

    fn set_flex_direction(
        &mut self,
        node: NodeHandle,
        direction: FlexDirection,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_flex_direction(match direction {
            FlexDirection::Row => NativeDirection::Row,
            FlexDirection::RowReverse => NativeDirection::RowReverse,
            FlexDirection::Column => NativeDirection::Column,
            FlexDirection::ColumnReverse => NativeDirection::ColumnReverse,
        });
        Ok(())
    }

    fn set_flex_wrap(&mut self, node: NodeHandle, wrap: FlexWrap) -> Result<(), LayoutError> {
        self.write(node)?.set_flex_wrap(match wrap {
            FlexWrap::NoWrap => NativeWrap::NoWrap,
            FlexWrap::Wrap => NativeWrap::Wrap,
            FlexWrap::WrapReverse => NativeWrap::WrapReverse,
        });
        Ok(())
    }

    fn set_flex_grow(&mut self, node: NodeHandle, grow: f32) -> Result<(), LayoutError> {
        self.write(node)?.set_flex_grow(grow);
        Ok(())
    }

    fn set_flex_shrink(&mut self, node: NodeHandle, shrink: f32) -> Result<(), LayoutError> {
        self.write(node)?.set_flex_shrink(shrink);
        Ok(())
    }

    fn set_flex_basis(&mut self, node: NodeHandle, basis: Length) -> Result<(), LayoutError> {
        self.write(node)?.set_flex_basis(value(basis));
        Ok(())
    }

    fn set_justify_content(
        &mut self,
        node: NodeHandle,
        justify: JustifyContent,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_justify_content(match justify {
            JustifyContent::FlexStart => Justify::FlexStart,
            JustifyContent::FlexEnd => Justify::FlexEnd,
            JustifyContent::Center => Justify::Center,
            JustifyContent::SpaceBetween => Justify::SpaceBetween,
            JustifyContent::SpaceAround => Justify::SpaceAround,
            JustifyContent::SpaceEvenly => Justify::SpaceEvenly,
        });
        Ok(())
    }

    fn set_align_items(&mut self, node: NodeHandle, align: AlignItems) -> Result<(), LayoutError> {
        self.write(node)?.set_align_items(native_align(align));
        Ok(())
    }

    fn set_align_self(
        &mut self,
        node: NodeHandle,
        align: Option<AlignItems>,
    ) -> Result<(), LayoutError> {
        self.write(node)?
            .set_align_self(align.map_or(Align::Auto, native_align));
        Ok(())
    }

    fn set_align_content(
        &mut self,
        node: NodeHandle,
        align: AlignContent,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_align_content(match align {
            AlignContent::FlexStart => Align::FlexStart,
            AlignContent::FlexEnd => Align::FlexEnd,
            AlignContent::Center => Align::Center,
            AlignContent::Stretch => Align::Stretch,
            AlignContent::SpaceBetween => Align::SpaceBetween,
            AlignContent::SpaceAround => Align::SpaceAround,
            AlignContent::SpaceEvenly => Align::SpaceEvenly,
        });
        Ok(())
    }

    fn set_gap(&mut self, node: NodeHandle, axis: GridAxis, gap: Length) -> Result<(), LayoutError> {
        let gutter = match axis {
            GridAxis::Row => Gutter::Row,
            GridAxis::Column => Gutter::Column,
        };
        self.write(node)?.set_gap(gutter, bound(gap));
        Ok(())
    }

    fn set_margin(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        margin: Length,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_margin(native_edge(edge), value(margin));
        Ok(())
    }

    fn set_padding(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        padding: Length,
    ) -> Result<(), LayoutError> {
        self.write(node)?
            .set_padding(native_edge(edge), bound(padding));
        Ok(())
    }

    fn set_border(&mut self, node: NodeHandle, edge: Edge, width: f32) -> Result<(), LayoutError> {
        self.write(node)?.set_border(native_edge(edge), width);
        Ok(())
    }

    fn set_inset(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        offset: Length,
    ) -> Result<(), LayoutError> {
        self.write(node)?
            .set_position(native_edge(edge), bound(offset));
        Ok(())
    }

    fn set_position_type(
        &mut self,
        node: NodeHandle,
        position: PositionType,
    ) -> Result<(), LayoutError> {
        self.write(node)?.set_position_type(match position {
            PositionType::Static => NativePosition::Static,
            PositionType::Relative => NativePosition::Relative,
            PositionType::Absolute => NativePosition::Absolute,
        });
        Ok(())
    }

    fn set_display(&mut self, node: NodeHandle, display: DisplayMode) -> Result<(), LayoutError> {
        self.write(node)?.set_display(match display {
            DisplayMode::Flex | DisplayMode::Grid => Display::Flex,
            DisplayMode::None => Display::None,
        });
        Ok(())
    }

    fn set_overflow(
        &mut self,
        node: NodeHandle,
        horizontal: Overflow,
        vertical: Overflow,
    ) -> Result<(), LayoutError> {
        // One native overflow for both axes; any clipping axis makes the node clip.
        let combined = if horizontal == Overflow::Visible {
            vertical
        } else {
            horizontal
        };
        self.write(node)?.set_overflow(overflow(combined));
        Ok(())
    }

    fn set_measure(
        &mut self,
        node: NodeHandle,
        bridge: Option<Rc<MeasureBridge>>,
    ) -> Result<(), LayoutError> {
        let measure = bridge.map(|hook| -> MeasureFunc {
            Box::new(
                move |width: f32, width_mode: MeasureMode, height: f32, height_mode: MeasureMode| {
                    let height = match height_mode {
                        MeasureMode::Exactly | MeasureMode::AtMost if height.is_finite() => {
                            Some(height)
                        }
                        MeasureMode::Exactly | MeasureMode::AtMost | MeasureMode::Undefined => {
                            None
                        }
                    };
                    let size = hook.measure(width_constraint(width, width_mode), height);
                    Size {
                        width: size.width,
                        height: size.height,
                    }
                },
            )
        });
        self.write(node)?
            .set_measure_func(measure)
            .map_err(|err| LayoutError::Backend(err.to_string()))
    }

    fn calculate_layout(
        &mut self,
        root: NodeHandle,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError> {
        let _span = debug_span!("layouter.solve", backend = "flexbox").entered();
        let node = self.node(root)?;
        debug!(
            target: "layouter::flexbox",
            "[SOLVE] root {root} available {width:?} x {height:?} over {} nodes",
            self.nodes.len()
        );
        node.calculate_layout(
            width.unwrap_or(f32::NAN),
            height.unwrap_or(f32::NAN),
            &self.config,
        );
        self.solved = true;
        Ok(())
    }

    fn geometry(&self, node: NodeHandle) -> Result<Geometry, LayoutError> {
        let layout = self.solved_node(node)?.layout();
        Ok(Geometry {
            left: layout.left,
            top: layout.top,
            width: layout.width,
            height: layout.height,
        })
    }

    fn edge(&self, node: NodeHandle, kind: BoxEdge, edge: Edge) -> Result<f32, LayoutError> {
        let layout = self.solved_node(node)?.layout();
        let rect = match kind {
            BoxEdge::Margin => &layout.margin,
            BoxEdge::Border => &layout.border,
            BoxEdge::Padding => &layout.padding,
        };
        Ok(native_side(rect, edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Native measure modes map onto the three normalised constraints.
    ///
    /// # Panics
    /// Panics if a mode maps to the wrong constraint.
    fn measure_modes_normalise() {
        assert_eq!(
            width_constraint(f32::NAN, MeasureMode::Undefined),
            WidthConstraint::GrowToFill
        );
        assert_eq!(
            width_constraint(0.0, MeasureMode::AtMost),
            WidthConstraint::ShrinkToMin
        );
        assert_eq!(
            width_constraint(80.0, MeasureMode::AtMost),
            WidthConstraint::Definite(80.0)
        );
        assert_eq!(
            width_constraint(80.0, MeasureMode::Exactly),
            WidthConstraint::Definite(80.0)
        );
    }

    #[test]
    /// Edges written in canonical order come back on the same sides.
    ///
    /// # Panics
    /// Panics if any side is swapped.
    fn edges_keep_their_sides() {
        let mut tree = FlexboxEngine::new().new_tree();
        let Ok(root) = tree.create_node() else {
            return;
        };
        for (edge, amount) in Edge::ALL.into_iter().zip([1.0f32, 2.0, 3.0, 4.0]) {
            assert!(matches!(tree.set_margin(root, edge, Length::Points(amount)), Ok(_)));
            assert!(matches!(tree.set_padding(root, edge, Length::Points(amount * 10.0)), Ok(_)));
        }
        assert!(matches!(
            tree.geometry(root),
            Err(LayoutError::NotSolved { .. })
        ));
        assert!(matches!(tree.calculate_layout(root, Some(200.0), Some(200.0)), Ok(_)));

        let edges = tree.edges(root).unwrap_or_default();
        assert!((edges.margin.top - 1.0).abs() < 0.01);
        assert!((edges.margin.right - 2.0).abs() < 0.01);
        assert!((edges.margin.bottom - 3.0).abs() < 0.01);
        assert!((edges.margin.left - 4.0).abs() < 0.01);
        assert!((edges.padding.left - 40.0).abs() < 0.01);
    }
}
