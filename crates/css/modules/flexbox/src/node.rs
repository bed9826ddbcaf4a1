//! Node tree handles: style setters, child management, measure callbacks and results.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;

use crate::chapter5::{
    Align, Display, Edge, FlexDirection, FlexWrap, Gutter, Justify, Overflow, PositionType,
};
use crate::chapter6::{NodeStyle, Value};
use crate::chapter9::{self, LayoutInput};
use crate::geometry::{Rect, Size};

/// How a measured dimension is constrained.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MeasureMode {
    /// No constraint; the paired value is NaN.
    #[default]
    Undefined = 0,
    /// The dimension must equal the paired value.
    Exactly = 1,
    /// The dimension may not exceed the paired value.
    AtMost = 2,
}

/// Content measurement callback: `(width, width_mode, height, height_mode) -> content size`.
///
/// The returned size excludes padding and border.
pub type MeasureFunc = Box<dyn FnMut(f32, MeasureMode, f32, MeasureMode) -> Size<f32>>;

/// Engine-wide configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Device pixels per layout point; results are snapped to this grid. Zero disables rounding.
    pub point_scale_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_scale_factor: 1.0,
        }
    }
}

/// Errors raised by tree mutation.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum NodeError {
    #[error("child already has a parent")]
    ChildHasParent,
    #[error("child index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("a node with a measure function cannot have children")]
    MeasuredNodeWithChildren,
    #[error("node is not a child of this parent")]
    NotAChild,
    #[error("a node cannot be inserted into itself")]
    SelfInsertion,
}

/// Computed layout of a node, relative to its parent's border box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub margin: Rect<f32>,
    pub padding: Rect<f32>,
    pub border: Rect<f32>,
}

pub(crate) type CacheEntry = (LayoutInput, Size<f32>);

pub(crate) struct NodeData {
    pub(crate) style: NodeStyle,
    pub(crate) children: Vec<Node>,
    parent: Option<Weak<RefCell<NodeData>>>,
    measure: Option<MeasureFunc>,
    pub(crate) unrounded: Layout,
    layout: Layout,
    dirty: bool,
    pub(crate) cache: Vec<CacheEntry>,
}

/// Shared handle to a layout node. Cloning yields another handle to the same node.
pub struct Node {
    inner: Rc<RefCell<NodeData>>,
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        formatter
            .debug_struct("Node")
            .field("children", &data.children.len())
            .field("measured", &data.measure.is_some())
            .field("layout", &data.layout)
            .finish()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a detached node with default style.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                style: NodeStyle::default(),
                children: Vec::new(),
                parent: None,
                measure: None,
                unrounded: Layout::default(),
                layout: Layout::default(),
                dirty: true,
                cache: Vec::new(),
            })),
        }
    }

    /// Current style snapshot.
    pub fn style(&self) -> NodeStyle {
        self.inner.borrow().style
    }

    /// Replace the whole style.
    pub fn set_style(&self, style: NodeStyle) {
        self.update_style(|current| *current = style);
    }

    fn update_style(&self, apply: impl FnOnce(&mut NodeStyle)) {
        {
            let mut data = self.inner.borrow_mut();
            let before = data.style;
            apply(&mut data.style);
            if data.style == before {
                return;
            }
        }
        self.mark_dirty();
    }

    pub fn set_flex_direction(&self, direction: FlexDirection) {
        self.update_style(|style| style.direction = direction);
    }

    pub fn set_flex_wrap(&self, wrap: FlexWrap) {
        self.update_style(|style| style.wrap = wrap);
    }

    pub fn set_justify_content(&self, justify: Justify) {
        self.update_style(|style| style.justify_content = justify);
    }

    pub fn set_align_items(&self, align: Align) {
        self.update_style(|style| style.align_items = align);
    }

    pub fn set_align_self(&self, align: Align) {
        self.update_style(|style| style.align_self = align);
    }

    pub fn set_align_content(&self, align: Align) {
        self.update_style(|style| style.align_content = align);
    }

    pub fn set_position_type(&self, position_type: PositionType) {
        self.update_style(|style| style.position_type = position_type);
    }

    pub fn set_display(&self, display: Display) {
        self.update_style(|style| style.display = display);
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        self.update_style(|style| style.overflow = overflow);
    }

    pub fn set_flex_grow(&self, grow: f32) {
        self.update_style(|style| style.flex_grow = grow.max(0.0));
    }

    pub fn set_flex_shrink(&self, shrink: f32) {
        self.update_style(|style| style.flex_shrink = shrink.max(0.0));
    }

    pub fn set_flex_basis(&self, basis: Value) {
        self.update_style(|style| style.flex_basis = basis);
    }

    pub fn set_width(&self, width: Value) {
        self.update_style(|style| style.width = width);
    }

    pub fn set_height(&self, height: Value) {
        self.update_style(|style| style.height = height);
    }

    pub fn set_min_width(&self, width: Value) {
        self.update_style(|style| style.min_width = width);
    }

    pub fn set_min_height(&self, height: Value) {
        self.update_style(|style| style.min_height = height);
    }

    pub fn set_max_width(&self, width: Value) {
        self.update_style(|style| style.max_width = width);
    }

    pub fn set_max_height(&self, height: Value) {
        self.update_style(|style| style.max_height = height);
    }

    /// Width / height ratio; `None` clears it.
    pub fn set_aspect_ratio(&self, ratio: Option<f32>) {
        self.update_style(|style| style.aspect_ratio = ratio);
    }

    pub fn set_margin(&self, edge: Edge, value: Value) {
        self.update_style(|style| style.margin[edge.index()] = value);
    }

    pub fn set_padding(&self, edge: Edge, value: Value) {
        self.update_style(|style| style.padding[edge.index()] = value);
    }

    /// Border widths are plain points.
    pub fn set_border(&self, edge: Edge, width: f32) {
        self.update_style(|style| style.border[edge.index()] = Value::Point(width.max(0.0)));
    }

    pub fn set_position(&self, edge: Edge, value: Value) {
        self.update_style(|style| style.position[edge.index()] = value);
    }

    pub fn set_gap(&self, gutter: Gutter, value: Value) {
        self.update_style(|style| match gutter {
            Gutter::Column => style.gap[0] = value,
            Gutter::Row => style.gap[1] = value,
            Gutter::All => style.gap = [value; 2],
        });
    }

    /// Insert `child` at `index` (0..=len).
    ///
    /// # Errors
    /// Fails when the child is attached elsewhere, the index is past the end,
    /// or this node measures its own content.
    pub fn insert_child(&self, child: &Self, index: usize) -> Result<(), NodeError> {
        if self == child {
            return Err(NodeError::SelfInsertion);
        }
        if child.inner.borrow().parent.is_some() {
            return Err(NodeError::ChildHasParent);
        }
        {
            let mut data = self.inner.borrow_mut();
            if data.measure.is_some() {
                return Err(NodeError::MeasuredNodeWithChildren);
            }
            let len = data.children.len();
            if index > len {
                return Err(NodeError::IndexOutOfBounds { index, len });
            }
            data.children.insert(index, child.clone());
        }
        child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        self.mark_dirty();
        Ok(())
    }

    /// Detach `child`.
    ///
    /// # Errors
    /// Fails when `child` is not a direct child of this node.
    pub fn remove_child(&self, child: &Self) -> Result<(), NodeError> {
        {
            let mut data = self.inner.borrow_mut();
            let position = data
                .children
                .iter()
                .position(|candidate| candidate == child)
                .ok_or(NodeError::NotAChild)?;
            data.children.remove(position);
        }
        child.inner.borrow_mut().parent = None;
        self.mark_dirty();
        Ok(())
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn child(&self, index: usize) -> Option<Self> {
        self.inner.borrow().children.get(index).cloned()
    }

    pub fn parent(&self) -> Option<Self> {
        self.inner
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Self { inner })
    }

    /// Install or clear the content measure callback.
    ///
    /// # Errors
    /// Fails when installing a callback on a node that has children.
    pub fn set_measure_func(&self, measure: Option<MeasureFunc>) -> Result<(), NodeError> {
        {
            let mut data = self.inner.borrow_mut();
            if measure.is_some() && !data.children.is_empty() {
                return Err(NodeError::MeasuredNodeWithChildren);
            }
            data.measure = measure;
        }
        self.mark_dirty();
        Ok(())
    }

    pub fn has_measure_func(&self) -> bool {
        self.inner.borrow().measure.is_some()
    }

    /// Flag this node and every ancestor for re-layout.
    pub fn mark_dirty(&self) {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            {
                let mut data = node.inner.borrow_mut();
                data.dirty = true;
                data.cache.clear();
            }
            current = node.parent();
        }
    }

    /// Whether this node changed since the last layout.
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty
    }

    /// Rounded layout from the last `calculate_layout`.
    pub fn layout(&self) -> Layout {
        self.inner.borrow().layout
    }

    /// Lay out the subtree rooted here. NaN for either dimension means unconstrained.
    pub fn calculate_layout(&self, width: f32, height: f32, config: &Config) {
        let owner = Size {
            width: (!width.is_nan()).then_some(width),
            height: (!height.is_nan()).then_some(height),
        };
        trace!(
            target: "css::flexbox::node",
            "[LAYOUT] root width={width} height={height} scale={}",
            config.point_scale_factor
        );
        self.clear_caches();
        chapter9::layout_root(self, owner);
        self.round_subtree(0.0, 0.0, config.point_scale_factor);
    }

    fn clear_caches(&self) {
        let children = {
            let mut data = self.inner.borrow_mut();
            data.cache.clear();
            data.children.clone()
        };
        for child in &children {
            child.clear_caches();
        }
    }

    fn round_subtree(&self, parent_left: f32, parent_top: f32, scale: f32) {
        let round = |value: f32| {
            if scale > 0.0 {
                (value * scale).round() / scale
            } else {
                value
            }
        };
        let children = {
            let mut data = self.inner.borrow_mut();
            let raw = data.unrounded;
            let abs_left = parent_left + raw.left;
            let abs_top = parent_top + raw.top;
            data.layout = Layout {
                left: round(abs_left) - round(parent_left),
                top: round(abs_top) - round(parent_top),
                width: round(abs_left + raw.width) - round(abs_left),
                height: round(abs_top + raw.height) - round(abs_top),
                ..raw
            };
            data.dirty = false;
            data.children.clone()
        };
        let raw = self.inner.borrow().unrounded;
        for child in &children {
            child.round_subtree(parent_left + raw.left, parent_top + raw.top, scale);
        }
    }

    pub(crate) fn data(&self) -> &RefCell<NodeData> {
        &self.inner
    }

    /// Run the measure callback, if any, without holding a borrow of the node.
    pub(crate) fn measure(
        &self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> Option<Size<f32>> {
        let mut measure = self.inner.borrow_mut().measure.take()?;
        let size = measure(width, width_mode, height, height_mode);
        self.inner.borrow_mut().measure = Some(measure);
        Some(size)
    }
}
