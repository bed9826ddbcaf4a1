//! CSS Flexible Box Layout Module Level 1: a retained-tree flex layout engine.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/>
//!
//! Nodes are shared handles carrying their own style; `Node::calculate_layout`
//! solves a subtree and `Node::layout` reads the rounded result back.

// Chapter modules mapped to the Flexbox Level 1 spec structure.
// Spec: §5, Flex Containers
#[path = "5_flex_containers/mod.rs"]
mod chapter5;
// Spec: §6, Flex Items
#[path = "6_flex_items/mod.rs"]
mod chapter6;
// Spec: §7, Axis and Order
#[path = "7_axis_and_order/mod.rs"]
mod chapter7;
// Spec: §9, Flex Layout Algorithm
#[path = "9_layout_algorithm/mod.rs"]
mod chapter9;

mod geometry;
mod node;

pub use chapter5::{
    Align, Display, Edge, FlexDirection, FlexWrap, Gutter, Justify, Overflow, PositionType,
};
pub use chapter6::{NodeStyle, Value, edge_value, resolve_edges};
pub use chapter7::{Axes, resolve_axes};
pub use geometry::{Rect, Size};
pub use node::{Config, Layout, MeasureFunc, MeasureMode, Node, NodeError};
