//! Absolutely positioned children.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#abspos-items>

use crate::chapter5::Edge;
use crate::chapter6::{inset, resolve_edges};
use crate::geometry::{Rect, Size};
use crate::node::Node;

use super::{AvailableSpace, LayoutInput, compute, set_placement};

/// Size and place an out-of-flow child against the container's padding box.
///
/// Without insets the child sits at the content-box start.
pub(super) fn layout_absolute_child(
    child: &Node,
    container: Size<f32>,
    border: Rect<f32>,
    pb: Rect<f32>,
) {
    let style = child.style();
    let padding_box = Size {
        width: (container.width - border.horizontal()).max(0.0),
        height: (container.height - border.vertical()).max(0.0),
    };
    let containing = Size {
        width: Some(padding_box.width),
        height: Some(padding_box.height),
    };
    let margin = resolve_edges(&style.margin, containing.width);
    let left = inset(&style, Edge::Left, containing.width);
    let right = inset(&style, Edge::Right, containing.width);
    let top = inset(&style, Edge::Top, containing.height);
    let bottom = inset(&style, Edge::Bottom, containing.height);

    let stretched = |start: Option<f32>, end: Option<f32>, space: f32, margins: f32| {
        start
            .zip(end)
            .map(|(from, to)| (space - from - to - margins).max(0.0))
    };
    let known = Size {
        width: style.width.resolve(containing.width).or_else(|| {
            stretched(left, right, padding_box.width, margin.horizontal())
        }),
        height: style.height.resolve(containing.height).or_else(|| {
            stretched(top, bottom, padding_box.height, margin.vertical())
        }),
    };
    let available = Size {
        width: AvailableSpace::Definite((padding_box.width - margin.horizontal()).max(0.0)),
        height: AvailableSpace::Definite((padding_box.height - margin.vertical()).max(0.0)),
    };
    let size = compute(
        child,
        LayoutInput {
            known,
            parent: containing,
            available,
            perform: false,
        },
    );
    compute(
        child,
        LayoutInput {
            known: Size {
                width: Some(size.width),
                height: Some(size.height),
            },
            parent: containing,
            available,
            perform: true,
        },
    );

    let left_pos = match (left, right) {
        (Some(from), _) => border.left + from + margin.left,
        (None, Some(to)) => container.width - border.right - to - size.width - margin.right,
        (None, None) => pb.left + margin.left,
    };
    let top_pos = match (top, bottom) {
        (Some(from), _) => border.top + from + margin.top,
        (None, Some(to)) => container.height - border.bottom - to - size.height - margin.bottom,
        (None, None) => pb.top + margin.top,
    };
    set_placement(child, left_pos, top_pos, margin);
}
