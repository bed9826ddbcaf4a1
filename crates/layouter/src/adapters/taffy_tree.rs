//! Adapter for `taffy`: one shared tree, nodes addressed by id.
//!
//! Re-solving per property write is far too slow, so setters edit a staged copy
//! of the node's style. Staged styles reach the tree in one flush right before a
//! solve: the whole subtree, in document order, parent before children.

use std::collections::HashMap;
use std::rc::Rc;

use css_grid::{GridAutoFlow, GridPlacement, GridTrack, TrackBreadth};
use log::{debug, trace};
use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AvailableSpace,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyDirection,
    FlexWrap as TaffyWrap, GridAutoFlow as TaffyAutoFlow, GridPlacement as TaffyPlacement,
    GridTemplateComponent, JustifyContent as TaffyJustify, Layout, LengthPercentage,
    LengthPercentageAuto, MaxTrackSizingFunction, MinTrackSizingFunction, NodeId,
    Overflow as TaffyOverflow, Position, Rect, Size, Style, TaffyError, TaffyTree,
    TrackSizingFunction,
};
use tracing::debug_span;

use crate::backend::{BackendKind, LayoutEngine};
use crate::error::LayoutError;
use crate::measure::{MeasureBridge, WidthConstraint};
use crate::tree::{
    AlignContent, AlignItems, BoxEdge, Dimension, DisplayMode, Edge, FlexDirection, FlexWrap,
    Geometry, GridAxis, JustifyContent, LayoutTree, Length, NodeHandle, Overflow, PositionType,
};

/// The taffy engine. Each pass gets a fresh shared tree.
#[derive(Debug, Default)]
pub struct TaffyEngine;

impl TaffyEngine {
    pub const fn new() -> Self {
        Self
    }
}

impl LayoutEngine for TaffyEngine {
    fn kind(&self) -> BackendKind {
        BackendKind::Taffy
    }

    fn supports_grid(&self) -> bool {
        true
    }

    fn new_tree(&self) -> Box<dyn LayoutTree> {
        Box::new(TaffyLayoutTree::new())
    }
}

/// Handles index `ids`; `staged` holds each node's not-yet-applied style.
pub struct TaffyLayoutTree {
    tree: TaffyTree<Rc<MeasureBridge>>,
    ids: Vec<NodeId>,
    handles: HashMap<NodeId, NodeHandle>,
    staged: Vec<Option<Style>>,
    margins: Vec<Rect<Length>>,
    solved: bool,
}

fn backend_error(err: TaffyError) -> LayoutError {
    LayoutError::Backend(err.to_string())
}

// Canonical sides to taffy's named rect fields. All edge translation for this
// backend happens in these two functions.
const fn side_mut<T>(rect: &mut Rect<T>, edge: Edge) -> &mut T {
    match edge {
        Edge::Top => &mut rect.top,
        Edge::Right => &mut rect.right,
        Edge::Bottom => &mut rect.bottom,
        Edge::Left => &mut rect.left,
    }
}

const fn side(rect: &Rect<f32>, edge: Edge) -> f32 {
    match edge {
        Edge::Top => rect.top,
        Edge::Right => rect.right,
        Edge::Bottom => rect.bottom,
        Edge::Left => rect.left,
    }
}

// Percentages are 0..=100 here and 0..=1 in taffy.
fn taffy_dimension(length: Length) -> TaffyDimension {
    match length {
        Length::Points(points) => TaffyDimension::length(points),
        Length::Percent(percent) => TaffyDimension::percent(percent / 100.0),
        Length::Auto => TaffyDimension::auto(),
    }
}

fn length_percentage_auto(length: Length) -> LengthPercentageAuto {
    match length {
        Length::Points(points) => LengthPercentageAuto::length(points),
        Length::Percent(percent) => LengthPercentageAuto::percent(percent / 100.0),
        Length::Auto => LengthPercentageAuto::auto(),
    }
}

fn length_percentage(length: Length) -> LengthPercentage {
    match length {
        Length::Points(points) => LengthPercentage::length(points),
        Length::Percent(percent) => LengthPercentage::percent(percent / 100.0),
        Length::Auto => LengthPercentage::length(0.0),
    }
}

const fn align_items(align: AlignItems) -> TaffyAlignItems {
    match align {
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    }
}

const fn overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

fn min_track(breadth: TrackBreadth) -> MinTrackSizingFunction {
    match breadth {
        TrackBreadth::Length(pixels) => MinTrackSizingFunction::length(pixels),
        TrackBreadth::Percentage(percent) => MinTrackSizingFunction::percent(percent / 100.0),
        TrackBreadth::MinContent => MinTrackSizingFunction::min_content(),
        TrackBreadth::MaxContent => MinTrackSizingFunction::max_content(),
        TrackBreadth::Flex(_) | TrackBreadth::Auto => MinTrackSizingFunction::auto(),
    }
}

fn max_track(breadth: TrackBreadth) -> MaxTrackSizingFunction {
    match breadth {
        TrackBreadth::Length(pixels) => MaxTrackSizingFunction::length(pixels),
        TrackBreadth::Percentage(percent) => MaxTrackSizingFunction::percent(percent / 100.0),
        TrackBreadth::Flex(share) => MaxTrackSizingFunction::fr(share),
        TrackBreadth::MinContent => MaxTrackSizingFunction::min_content(),
        TrackBreadth::MaxContent => MaxTrackSizingFunction::max_content(),
        TrackBreadth::Auto => MaxTrackSizingFunction::auto(),
    }
}

fn track(track: &GridTrack) -> TrackSizingFunction {
    let max = match *track {
        GridTrack::FitContent(TrackBreadth::Percentage(percent)) => {
            MaxTrackSizingFunction::fit_content_percent(percent / 100.0)
        }
        GridTrack::FitContent(TrackBreadth::Length(pixels)) => {
            MaxTrackSizingFunction::fit_content_px(pixels)
        }
        GridTrack::Breadth(_) | GridTrack::MinMax(..) | GridTrack::FitContent(_) => {
            max_track(track.max_breadth())
        }
    };
    TrackSizingFunction {
        min: min_track(track.min_breadth()),
        max,
    }
}

fn placement(placement: &GridPlacement) -> TaffyPlacement {
    match placement {
        GridPlacement::Line(line) => TaffyPlacement::Line((*line).into()),
        GridPlacement::Span(span) => TaffyPlacement::Span(*span),
        GridPlacement::Auto | GridPlacement::Named(_) => TaffyPlacement::Auto,
    }
}

/// Taffy's available space and known size to the bridge's three-way width constraint.
fn width_constraint(known: Option<f32>, available: AvailableSpace) -> WidthConstraint {
    match (known, available) {
        (Some(width), _) | (None, AvailableSpace::Definite(width)) => {
            WidthConstraint::Definite(width)
        }
        (None, AvailableSpace::MaxContent) => WidthConstraint::GrowToFill,
        (None, AvailableSpace::MinContent) => WidthConstraint::ShrinkToMin,
    }
}

const ZERO_MARGIN: Rect<Length> = Rect {
    top: Length::Points(0.0),
    right: Length::Points(0.0),
    bottom: Length::Points(0.0),
    left: Length::Points(0.0),
};

/// Pixels of margin along one side; percentages resolve against the owner width.
fn margin_px(margin: Length, owner_width: Option<f32>) -> f32 {
    match margin {
        Length::Points(points) => points,
        Length::Percent(percent) => owner_width.map_or(0.0, |width| width * percent / 100.0),
        Length::Auto => 0.0,
    }
}

fn available(size: Option<f32>) -> AvailableSpace {
    size.map_or(AvailableSpace::MaxContent, AvailableSpace::Definite)
}

impl Default for TaffyLayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TaffyLayoutTree {
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            ids: Vec::new(),
            handles: HashMap::new(),
            staged: Vec::new(),
            margins: Vec::new(),
            solved: false,
        }
    }

    fn id(&self, handle: NodeHandle) -> Result<NodeId, LayoutError> {
        self.ids
            .get(handle.index())
            .copied()
            .ok_or(LayoutError::UnknownNode(handle))
    }

    /// Stage a style edit. The first edit since the last flush copies the applied style.
    fn stage(
        &mut self,
        handle: NodeHandle,
        edit: impl FnOnce(&mut Style),
    ) -> Result<(), LayoutError> {
        let id = self.id(handle)?;
        self.solved = false;
        let slot = self
            .staged
            .get_mut(handle.index())
            .ok_or(LayoutError::UnknownNode(handle))?;
        let mut style = match slot.take() {
            Some(style) => style,
            None => self.tree.style(id).map_err(backend_error)?.clone(),
        };
        edit(&mut style);
        self.staged[handle.index()] = Some(style);
        Ok(())
    }

    /// Apply staged styles for `root` and all its descendants, parents first.
    fn flush_subtree(&mut self, root: NodeId) -> Result<usize, LayoutError> {
        let mut applied = 0usize;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let staged = self
                .handles
                .get(&id)
                .and_then(|handle| self.staged.get_mut(handle.index()))
                .and_then(Option::take);
            if let Some(style) = staged {
                self.tree.set_style(id, style).map_err(backend_error)?;
                applied += 1;
            }
            let children = self.tree.children(id).map_err(backend_error)?;
            stack.extend(children.into_iter().rev());
        }
        Ok(applied)
    }

    /// Give an auto-sized root the available size less its margins. The authored
    /// style goes back into the staging slot so the next flush restores it.
    fn fill_root(
        &mut self,
        root: NodeHandle,
        root_id: NodeId,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError> {
        let authored = self.tree.style(root_id).map_err(backend_error)?.clone();
        let margin = self.margins.get(root.index()).copied().unwrap_or(ZERO_MARGIN);
        let fill = |size: Option<f32>, dimension: TaffyDimension, start: Length, end: Length| {
            size.filter(|_| dimension.is_auto()).map(|offered| {
                let edges = margin_px(start, width) + margin_px(end, width);
                TaffyDimension::length((offered - edges).max(0.0))
            })
        };
        let filled_width = fill(width, authored.size.width, margin.left, margin.right);
        let filled_height = fill(height, authored.size.height, margin.top, margin.bottom);
        if filled_width.is_none() && filled_height.is_none() {
            return Ok(());
        }
        let mut style = authored.clone();
        style.size = Size {
            width: filled_width.unwrap_or(authored.size.width),
            height: filled_height.unwrap_or(authored.size.height),
        };
        trace!(
            target: "layouter::taffy",
            "[FILL] root {root} sized {:?}x{:?}",
            filled_width,
            filled_height
        );
        self.tree.set_style(root_id, style).map_err(backend_error)?;
        if let Some(slot) = self.staged.get_mut(root.index())
            && slot.is_none()
        {
            *slot = Some(authored);
        }
        Ok(())
    }

    fn solved_layout(&self, handle: NodeHandle) -> Result<&Layout, LayoutError> {
        let id = self.id(handle)?;
        if !self.solved {
            return Err(LayoutError::NotSolved { node: handle });
        }
        self.tree.layout(id).map_err(backend_error)
    }
}

impl LayoutTree for TaffyLayoutTree {
    fn backend(&self) -> BackendKind {
        BackendKind::Taffy
    }

    fn supports_grid(&self) -> bool {
        true
    }

    fn create_node(&mut self) -> Result<NodeHandle, LayoutError> {
        let handle = NodeHandle(self.ids.len());
        let style = Style {
            display: Display::Flex,
            ..Style::default()
        };
        let id = self.tree.new_leaf(style.clone()).map_err(backend_error)?;
        self.ids.push(id);
        self.handles.insert(id, handle);
        self.staged.push(Some(style));
        self.margins.push(ZERO_MARGIN);
        self.solved = false;
        Ok(handle)
    }

    fn insert_child(
        &mut self,
        parent: NodeHandle,
        child: NodeHandle,
        index: usize,
    ) -> Result<(), LayoutError> {
        let parent_id = self.id(parent)?;
        let child_id = self.id(child)?;
        self.solved = false;
        self.tree
            .insert_child_at_index(parent_id, index, child_id)
            .map_err(backend_error)
    }

    fn child_count(&self, node: NodeHandle) -> Result<usize, LayoutError> {
        let id = self.id(node)?;
        Ok(self.tree.children(id).map_err(backend_error)?.len())
    }

    fn set_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| match dimension {
            Dimension::Width => style.size.width = taffy_dimension(length),
            Dimension::Height => style.size.height = taffy_dimension(length),
        })
    }

    fn set_min_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| match dimension {
            Dimension::Width => style.min_size.width = taffy_dimension(length),
            Dimension::Height => style.min_size.height = taffy_dimension(length),
        })
    }

    fn set_max_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| match dimension {
            Dimension::Width => style.max_size.width = taffy_dimension(length),
            Dimension::Height => style.max_size.height = taffy_dimension(length),
        })
    }

    fn set_aspect_ratio(
        &mut self,
        node: NodeHandle,
        ratio: Option<f32>,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| style.aspect_ratio = ratio)
    }

    fn set_flex_direction(
        &mut self,
        node: NodeHandle,
        direction: FlexDirection,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.flex_direction = match direction {
                FlexDirection::Row => TaffyDirection::Row,
                FlexDirection::RowReverse => TaffyDirection::RowReverse,
                FlexDirection::Column => TaffyDirection::Column,
                FlexDirection::ColumnReverse => TaffyDirection::ColumnReverse,
            };
        })
    }

    fn set_flex_wrap(&mut self, node: NodeHandle, wrap: FlexWrap) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.flex_wrap = match wrap {
                FlexWrap::NoWrap => TaffyWrap::NoWrap,
                FlexWrap::Wrap => TaffyWrap::Wrap,
                FlexWrap::WrapReverse => TaffyWrap::WrapReverse,
            };
        })
    }

    fn set_flex_grow(&mut self, node: NodeHandle, grow: f32) -> Result<(), LayoutError> {
        self.stage(node, |style| style.flex_grow = grow)
    }

    fn set_flex_shrink(&mut self, node: NodeHandle, shrink: f32) -> Result<(), LayoutError> {
        self.stage(node, |style| style.flex_shrink = shrink)
    }

    fn set_flex_basis(&mut self, node: NodeHandle, basis: Length) -> Result<(), LayoutError> {
        self.stage(node, |style| style.flex_basis = taffy_dimension(basis))
    }

    fn set_justify_content(
        &mut self,
        node: NodeHandle,
        justify: JustifyContent,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.justify_content = Some(match justify {
                JustifyContent::FlexStart => TaffyJustify::FlexStart,
                JustifyContent::FlexEnd => TaffyJustify::FlexEnd,
                JustifyContent::Center => TaffyJustify::Center,
                JustifyContent::SpaceBetween => TaffyJustify::SpaceBetween,
                JustifyContent::SpaceAround => TaffyJustify::SpaceAround,
                JustifyContent::SpaceEvenly => TaffyJustify::SpaceEvenly,
            });
        })
    }

    fn set_align_items(&mut self, node: NodeHandle, align: AlignItems) -> Result<(), LayoutError> {
        self.stage(node, |style| style.align_items = Some(align_items(align)))
    }

    fn set_align_self(
        &mut self,
        node: NodeHandle,
        align: Option<AlignItems>,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| style.align_self = align.map(align_items))
    }

    fn set_align_content(
        &mut self,
        node: NodeHandle,
        align: AlignContent,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.align_content = Some(match align {
                AlignContent::FlexStart => TaffyAlignContent::FlexStart,
                AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
                AlignContent::Center => TaffyAlignContent::Center,
                AlignContent::Stretch => TaffyAlignContent::Stretch,
                AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
                AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
                AlignContent::SpaceEvenly => TaffyAlignContent::SpaceEvenly,
            });
        })
    }

    fn set_gap(&mut self, node: NodeHandle, axis: GridAxis, gap: Length) -> Result<(), LayoutError> {
        self.stage(node, |style| match axis {
            GridAxis::Row => style.gap.height = length_percentage(gap),
            GridAxis::Column => style.gap.width = length_percentage(gap),
        })
    }

    fn set_margin(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        margin: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            *side_mut(&mut style.margin, edge) = length_percentage_auto(margin);
        })?;
        if let Some(sides) = self.margins.get_mut(node.index()) {
            *side_mut(sides, edge) = margin;
        }
        Ok(())
    }

    fn set_padding(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        padding: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            *side_mut(&mut style.padding, edge) = length_percentage(padding);
        })
    }

    fn set_border(&mut self, node: NodeHandle, edge: Edge, width: f32) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            *side_mut(&mut style.border, edge) = LengthPercentage::length(width);
        })
    }

    fn set_inset(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        offset: Length,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            *side_mut(&mut style.inset, edge) = length_percentage_auto(offset);
        })
    }

    fn set_position_type(
        &mut self,
        node: NodeHandle,
        position: PositionType,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.position = match position {
                PositionType::Static | PositionType::Relative => Position::Relative,
                PositionType::Absolute => Position::Absolute,
            };
        })
    }

    fn set_display(&mut self, node: NodeHandle, display: DisplayMode) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.display = match display {
                DisplayMode::Flex => Display::Flex,
                DisplayMode::Grid => Display::Grid,
                DisplayMode::None => Display::None,
            };
        })
    }

    fn set_overflow(
        &mut self,
        node: NodeHandle,
        horizontal: Overflow,
        vertical: Overflow,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.overflow.x = overflow(horizontal);
            style.overflow.y = overflow(vertical);
        })
    }

    fn set_grid_template(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        tracks: &[GridTrack],
    ) -> Result<(), LayoutError> {
        let components: Vec<_> = tracks
            .iter()
            .map(|grid_track| GridTemplateComponent::Single(track(grid_track)))
            .collect();
        self.stage(node, |style| match axis {
            GridAxis::Row => style.grid_template_rows = components,
            GridAxis::Column => style.grid_template_columns = components,
        })
    }

    fn set_grid_auto_tracks(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        tracks: &[GridTrack],
    ) -> Result<(), LayoutError> {
        let functions: Vec<TrackSizingFunction> = tracks.iter().map(track).collect();
        self.stage(node, |style| match axis {
            GridAxis::Row => style.grid_auto_rows = functions,
            GridAxis::Column => style.grid_auto_columns = functions,
        })
    }

    fn set_grid_auto_flow(
        &mut self,
        node: NodeHandle,
        flow: GridAutoFlow,
    ) -> Result<(), LayoutError> {
        self.stage(node, |style| {
            style.grid_auto_flow = match flow {
                GridAutoFlow::Row => TaffyAutoFlow::Row,
                GridAutoFlow::Column => TaffyAutoFlow::Column,
                GridAutoFlow::RowDense => TaffyAutoFlow::RowDense,
                GridAutoFlow::ColumnDense => TaffyAutoFlow::ColumnDense,
            };
        })
    }

    fn set_grid_placement(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        start: &GridPlacement,
        end: &GridPlacement,
    ) -> Result<(), LayoutError> {
        let (start, end) = (placement(start), placement(end));
        self.stage(node, |style| {
            let line = match axis {
                GridAxis::Row => &mut style.grid_row,
                GridAxis::Column => &mut style.grid_column,
            };
            line.start = start;
            line.end = end;
        })
    }

    fn set_measure(
        &mut self,
        node: NodeHandle,
        bridge: Option<Rc<MeasureBridge>>,
    ) -> Result<(), LayoutError> {
        let id = self.id(node)?;
        if bridge.is_some() && !self.tree.children(id).map_err(backend_error)?.is_empty() {
            return Err(LayoutError::Backend(format!(
                "node {node} has children and cannot be measured"
            )));
        }
        self.solved = false;
        self.tree.set_node_context(id, bridge).map_err(backend_error)
    }

    fn flush(&mut self) -> Result<(), LayoutError> {
        let roots: Vec<NodeId> = self
            .ids
            .iter()
            .copied()
            .filter(|id| self.tree.parent(*id).is_none())
            .collect();
        for root in roots {
            self.flush_subtree(root)?;
        }
        Ok(())
    }

    fn calculate_layout(
        &mut self,
        root: NodeHandle,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError> {
        let _span = debug_span!("layouter.solve", backend = "taffy").entered();
        let root_id = self.id(root)?;
        let applied = self.flush_subtree(root_id)?;
        debug!(
            target: "layouter::taffy",
            "[FLUSH] applied {applied} staged styles under {root}"
        );
        self.fill_root(root, root_id, width, height)?;
        let space = Size {
            width: available(width),
            height: available(height),
        };
        self.tree
            .compute_layout_with_measure(
                root_id,
                space,
                |known, available_space, _id, context, _style| {
                    let Some(bridge) = context else {
                        return Size::ZERO;
                    };
                    if let Size {
                        width: Some(width),
                        height: Some(height),
                    } = known
                    {
                        return Size { width, height };
                    }
                    let constraint = width_constraint(known.width, available_space.width);
                    let height = known.height.or(match available_space.height {
                        AvailableSpace::Definite(height) => Some(height),
                        AvailableSpace::MinContent | AvailableSpace::MaxContent => None,
                    });
                    let measured = bridge.measure(constraint, height);
                    Size {
                        width: known.width.unwrap_or(measured.width),
                        height: known.height.unwrap_or(measured.height),
                    }
                },
            )
            .map_err(backend_error)?;
        trace!(target: "layouter::taffy", "[SOLVE] root {root} done");
        self.solved = true;
        Ok(())
    }

    fn geometry(&self, node: NodeHandle) -> Result<Geometry, LayoutError> {
        let layout = self.solved_layout(node)?;
        // Taffy leaves a root at the origin; its margin still offsets it.
        let root = self.tree.parent(self.id(node)?).is_none();
        let (left, top) = if root {
            (layout.location.x + layout.margin.left, layout.location.y + layout.margin.top)
        } else {
            (layout.location.x, layout.location.y)
        };
        Ok(Geometry {
            left,
            top,
            width: layout.size.width,
            height: layout.size.height,
        })
    }

    fn edge(&self, node: NodeHandle, kind: BoxEdge, edge: Edge) -> Result<f32, LayoutError> {
        let layout = self.solved_layout(node)?;
        let rect = match kind {
            BoxEdge::Margin => &layout.margin,
            BoxEdge::Border => &layout.border,
            BoxEdge::Padding => &layout.padding,
        };
        Ok(side(rect, edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_width(tree: &TaffyLayoutTree, node: NodeHandle) -> f32 {
        tree.geometry(node).map_or(f32::NAN, |geometry| geometry.width)
    }

    #[test]
    /// `fit-content` limits reach taffy as fit-content maxima over an auto minimum.
    ///
    /// # Panics
    /// Panics if the limit is lost or its percentage is not rescaled.
    fn fit_content_tracks_keep_their_limit() {
        let pixels = track(&GridTrack::FitContent(TrackBreadth::Length(120.0)));
        let percent = track(&GridTrack::FitContent(TrackBreadth::Percentage(40.0)));

        assert_eq!(pixels.min, MinTrackSizingFunction::auto());
        assert_eq!(pixels.max, MaxTrackSizingFunction::fit_content_px(120.0));
        assert_eq!(percent.max, MaxTrackSizingFunction::fit_content_percent(0.4));
    }

    #[test]
    /// Styles written to a child after its parent was flushed still reach the solve.
    ///
    /// # Panics
    /// Panics if the late write is lost.
    fn late_child_writes_are_flushed() {
        let _ignored = env_logger::builder().is_test(true).try_init();
        let mut tree = TaffyLayoutTree::new();
        let (Ok(root), Ok(child)) = (tree.create_node(), tree.create_node()) else {
            return;
        };
        assert!(matches!(tree.insert_child(root, child, 0), Ok(_)));
        assert!(matches!(tree.set_size(root, Dimension::Width, Length::Points(300.0)), Ok(_)));
        assert!(matches!(tree.flush(), Ok(_)));

        assert!(matches!(tree.set_size(child, Dimension::Width, Length::Percent(25.0)), Ok(_)));
        assert!(matches!(tree.calculate_layout(root, None, None), Ok(_)));

        assert!((solved_width(&tree, child) - 75.0).abs() < 0.5);
    }

    #[test]
    /// Geometry reads fail before a solve and after any later write.
    ///
    /// # Panics
    /// Panics if stale geometry is served.
    fn writes_invalidate_geometry() {
        let mut tree = TaffyLayoutTree::new();
        let Ok(root) = tree.create_node() else {
            return;
        };
        assert!(matches!(
            tree.geometry(root),
            Err(LayoutError::NotSolved { .. })
        ));
        assert!(matches!(tree.calculate_layout(root, Some(10.0), Some(10.0)), Ok(_)));
        assert!(matches!(tree.geometry(root), Ok(_)));
        assert!(matches!(tree.set_flex_grow(root, 1.0), Ok(_)));
        assert!(matches!(
            tree.geometry(root),
            Err(LayoutError::NotSolved { .. })
        ));
        assert!(matches!(
            tree.geometry(NodeHandle(7)),
            Err(LayoutError::UnknownNode(_))
        ));
    }

    #[test]
    /// An auto-sized root fills the offered size less its margins, and the
    /// fill never outlives the solve it was made for.
    ///
    /// # Panics
    /// Panics if the root shrinks to content or keeps a stale fill.
    fn auto_root_fills_each_solve() {
        let mut tree = TaffyLayoutTree::new();
        let Ok(root) = tree.create_node() else {
            return;
        };
        assert!(matches!(tree.set_margin(root, Edge::Left, Length::Percent(10.0)), Ok(_)));
        assert!(matches!(tree.set_margin(root, Edge::Right, Length::Percent(10.0)), Ok(_)));
        assert!(matches!(tree.calculate_layout(root, Some(200.0), Some(100.0)), Ok(_)));
        let first = tree.geometry(root).unwrap_or_default();
        assert!((first.width - 160.0).abs() < 0.5 && (first.left - 20.0).abs() < 0.5);
        assert!((first.height - 100.0).abs() < 0.5);

        assert!(matches!(tree.calculate_layout(root, Some(300.0), None), Ok(_)));
        assert!((solved_width(&tree, root) - 240.0).abs() < 0.5);

        assert!(matches!(tree.set_size(root, Dimension::Width, Length::Points(50.0)), Ok(_)));
        assert!(matches!(tree.calculate_layout(root, Some(300.0), None), Ok(_)));
        assert!((solved_width(&tree, root) - 50.0).abs() < 0.5);
    }

    #[test]
    /// Known widths and taffy's content probes map onto the three constraints.
    ///
    /// # Panics
    /// Panics if a probe maps to the wrong constraint.
    fn available_space_normalises() {
        assert_eq!(
            width_constraint(None, AvailableSpace::MaxContent),
            WidthConstraint::GrowToFill
        );
        assert_eq!(
            width_constraint(None, AvailableSpace::MinContent),
            WidthConstraint::ShrinkToMin
        );
        assert_eq!(
            width_constraint(Some(12.0), AvailableSpace::MinContent),
            WidthConstraint::Definite(12.0)
        );
        assert_eq!(
            width_constraint(None, AvailableSpace::Definite(40.0)),
            WidthConstraint::Definite(40.0)
        );
    }
}
