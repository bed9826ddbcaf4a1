//! The layout node abstraction every backend adapter implements.
//!
//! Nodes are opaque [`NodeHandle`]s owned by one [`LayoutTree`]. Style is written
//! through setters, the whole tree is solved from its root, and geometry is read
//! back per node. Lengths keep percentages as percentages; resolving them against
//! the parent is the backend's job.

use core::fmt;
use std::rc::Rc;

use css_grid::{GridAutoFlow, GridPlacement, GridTrack};

use crate::backend::BackendKind;
use crate::error::LayoutError;
use crate::measure::MeasureBridge;

/// Opaque node identifier, valid only for the tree that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// A style length: pixels, a percentage of the containing block (0..=100), or `auto`.
///
/// For `min-*` sizes `Auto` means "no minimum", for `max-*` sizes it means `none`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Length {
    Points(f32),
    Percent(f32),
    #[default]
    Auto,
}

/// Box sides in canonical (CSS shorthand) order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Edge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

/// Which computed box-model edge a getter reads.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoxEdge {
    Margin,
    Border,
    Padding,
}

/// Width or height.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

/// Rows or columns, for gaps and grid tracks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GridAxis {
    Row,
    Column,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DisplayMode {
    #[default]
    Flex,
    Grid,
    None,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PositionType {
    #[default]
    Static,
    Relative,
    Absolute,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// `align-items` / `align-self`. `auto` for `align-self` is `None` at the setter.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
    Baseline,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Solved border-box geometry, relative to the parent's border box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Four resolved side values in canonical order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    pub const fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub const fn set(&mut self, edge: Edge, value: f32) {
        match edge {
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
        }
    }
}

/// Solved margin, border and padding of a node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxEdges {
    pub margin: Sides,
    pub border: Sides,
    pub padding: Sides,
}

/// A tree of layout nodes inside one backend.
///
/// Setters may apply immediately or be staged until [`LayoutTree::flush`]; either
/// way [`LayoutTree::calculate_layout`] sees every write made before it. Any write
/// after a solve invalidates geometry until the next solve.
///
/// Grid setters default to no-ops; callers check [`LayoutTree::supports_grid`] first.
pub trait LayoutTree {
    fn backend(&self) -> BackendKind;

    fn supports_grid(&self) -> bool {
        false
    }

    /// Create a detached node with default style.
    ///
    /// # Errors
    /// Backend refusal.
    fn create_node(&mut self) -> Result<NodeHandle, LayoutError>;

    /// Attach `child` as the `index`-th child of `parent`.
    ///
    /// # Errors
    /// Unknown handles, an out-of-range index, or a backend refusal.
    fn insert_child(
        &mut self,
        parent: NodeHandle,
        child: NodeHandle,
        index: usize,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn child_count(&self, node: NodeHandle) -> Result<usize, LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_min_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_max_size(
        &mut self,
        node: NodeHandle,
        dimension: Dimension,
        length: Length,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_aspect_ratio(&mut self, node: NodeHandle, ratio: Option<f32>)
    -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_flex_direction(
        &mut self,
        node: NodeHandle,
        direction: FlexDirection,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_flex_wrap(&mut self, node: NodeHandle, wrap: FlexWrap) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_flex_grow(&mut self, node: NodeHandle, grow: f32) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_flex_shrink(&mut self, node: NodeHandle, shrink: f32) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_flex_basis(&mut self, node: NodeHandle, basis: Length) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_justify_content(
        &mut self,
        node: NodeHandle,
        justify: JustifyContent,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_align_items(&mut self, node: NodeHandle, align: AlignItems) -> Result<(), LayoutError>;

    /// `None` is `align-self: auto`.
    ///
    /// # Errors
    /// Unknown handle.
    fn set_align_self(
        &mut self,
        node: NodeHandle,
        align: Option<AlignItems>,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_align_content(
        &mut self,
        node: NodeHandle,
        align: AlignContent,
    ) -> Result<(), LayoutError>;

    /// `GridAxis::Row` is `row-gap`, the space between rows.
    ///
    /// # Errors
    /// Unknown handle.
    fn set_gap(&mut self, node: NodeHandle, axis: GridAxis, gap: Length)
    -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_margin(&mut self, node: NodeHandle, edge: Edge, margin: Length)
    -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_padding(
        &mut self,
        node: NodeHandle,
        edge: Edge,
        padding: Length,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_border(&mut self, node: NodeHandle, edge: Edge, width: f32) -> Result<(), LayoutError>;

    /// Position offset (`top`, `right`, ...).
    ///
    /// # Errors
    /// Unknown handle.
    fn set_inset(&mut self, node: NodeHandle, edge: Edge, offset: Length)
    -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_position_type(
        &mut self,
        node: NodeHandle,
        position: PositionType,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_display(&mut self, node: NodeHandle, display: DisplayMode) -> Result<(), LayoutError>;

    /// # Errors
    /// Unknown handle.
    fn set_overflow(
        &mut self,
        node: NodeHandle,
        horizontal: Overflow,
        vertical: Overflow,
    ) -> Result<(), LayoutError>;

    /// `GridAxis::Column` is `grid-template-columns`.
    ///
    /// # Errors
    /// Unknown handle.
    fn set_grid_template(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        tracks: &[GridTrack],
    ) -> Result<(), LayoutError> {
        let _unused = (node, axis, tracks);
        Ok(())
    }

    /// # Errors
    /// Unknown handle.
    fn set_grid_auto_tracks(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        tracks: &[GridTrack],
    ) -> Result<(), LayoutError> {
        let _unused = (node, axis, tracks);
        Ok(())
    }

    /// # Errors
    /// Unknown handle.
    fn set_grid_auto_flow(
        &mut self,
        node: NodeHandle,
        flow: GridAutoFlow,
    ) -> Result<(), LayoutError> {
        let _unused = (node, flow);
        Ok(())
    }

    /// Item placement on one axis. Named lines must already be resolved to numbers.
    ///
    /// # Errors
    /// Unknown handle.
    fn set_grid_placement(
        &mut self,
        node: NodeHandle,
        axis: GridAxis,
        start: &GridPlacement,
        end: &GridPlacement,
    ) -> Result<(), LayoutError> {
        let _unused = (node, axis, start, end);
        Ok(())
    }

    /// Register or clear the intrinsic-measurement hook of a leaf.
    ///
    /// # Errors
    /// Unknown handle, or the node already has children.
    fn set_measure(
        &mut self,
        node: NodeHandle,
        bridge: Option<Rc<MeasureBridge>>,
    ) -> Result<(), LayoutError>;

    /// Apply staged style writes. Eager backends have nothing to do.
    ///
    /// # Errors
    /// Backend refusal.
    fn flush(&mut self) -> Result<(), LayoutError> {
        Ok(())
    }

    /// Solve the subtree rooted at `root` against an optional available size.
    ///
    /// A root with an `auto` width or height fills the given size along that
    /// axis, less its own margins.
    ///
    /// # Errors
    /// Unknown handle or a backend failure.
    fn calculate_layout(
        &mut self,
        root: NodeHandle,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<(), LayoutError>;

    /// # Errors
    /// [`LayoutError::NotSolved`] before a solve or after a later write.
    fn geometry(&self, node: NodeHandle) -> Result<Geometry, LayoutError>;

    /// One computed edge value.
    ///
    /// # Errors
    /// [`LayoutError::NotSolved`] before a solve or after a later write.
    fn edge(&self, node: NodeHandle, kind: BoxEdge, edge: Edge) -> Result<f32, LayoutError>;

    /// # Errors
    /// [`LayoutError::NotSolved`] before a solve or after a later write.
    fn edges(&self, node: NodeHandle) -> Result<BoxEdges, LayoutError> {
        let mut edges = BoxEdges::default();
        for edge in Edge::ALL {
            edges.margin.set(edge, self.edge(node, BoxEdge::Margin, edge)?);
            edges.border.set(edge, self.edge(node, BoxEdge::Border, edge)?);
            edges.padding.set(edge, self.edge(node, BoxEdge::Padding, edge)?);
        }
        Ok(edges)
    }
}
