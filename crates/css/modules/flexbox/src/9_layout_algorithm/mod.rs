//! Flex layout algorithm
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>
//!
//! Sizes handled here are border-box sizes. Measured leaves report content sizes
//! and get their padding and border added back.

mod absolute;
pub mod cross_axis;
pub mod distribution;
pub mod multi_line;


use log::{debug, trace};

use crate::chapter5::{Align, Display, Edge, FlexWrap, Overflow, PositionType};
use crate::chapter6::{NodeStyle, Value, auto_edges, inset, resolve_edges};
use crate::chapter7::{Axes, resolve_axes};
use crate::geometry::{Rect, Size, clamp_opt};
use crate::node::{Layout, MeasureMode, Node};
use cross_axis::{CrossSize, cross_offset, resolve_cross_size};
use distribution::{FlexFactors, distribute_auto_margins, justify_params, resolve_flexible_lengths};
use multi_line::{LineRange, align_content_params, break_into_lines, stretch_line_crosses};

/// Space a box may occupy along one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AvailableSpace {
    Definite(f32),
    MinContent,
    MaxContent,
}

impl AvailableSpace {
    /// Reduce a definite amount, never below zero.
    #[inline]
    pub fn shrink(self, amount: f32) -> Self {
        match self {
            Self::Definite(value) => Self::Definite((value - amount).max(0.0)),
            other => other,
        }
    }

    #[inline]
    pub fn from_option(value: Option<f32>) -> Self {
        value.map_or(Self::MaxContent, Self::Definite)
    }
}

/// Inputs to one sizing or layout request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutInput {
    /// Border-box sizes imposed by the parent.
    pub known: Size<Option<f32>>,
    /// Containing block used for percentages.
    pub parent: Size<Option<f32>>,
    /// Space for the border box, margins already excluded.
    pub available: Size<AvailableSpace>,
    /// When false only the size is wanted and descendants are not positioned.
    pub perform: bool,
}

const CACHE_SIZE: usize = 16;

/// Lay out a root node against its owner size.
pub(crate) fn layout_root(root: &Node, owner: Size<Option<f32>>) {
    let style = root.style();
    let margin = resolve_edges(&style.margin, owner.width);
    let fill = |owner_size: Option<f32>, edges: f32| owner_size.map(|size| (size - edges).max(0.0));
    let known = Size {
        width: style
            .width
            .resolve(owner.width)
            .is_none()
            .then(|| fill(owner.width, margin.horizontal()))
            .flatten(),
        height: style
            .height
            .resolve(owner.height)
            .is_none()
            .then(|| fill(owner.height, margin.vertical()))
            .flatten(),
    };
    let input = LayoutInput {
        known,
        parent: owner,
        available: Size {
            width: AvailableSpace::from_option(owner.width).shrink(margin.horizontal()),
            height: AvailableSpace::from_option(owner.height).shrink(margin.vertical()),
        },
        perform: true,
    };
    compute(root, input);
    set_placement(root, margin.left, margin.top, margin);
}

/// Size (and, when `perform` is set, lay out) a node.
pub(crate) fn compute(node: &Node, input: LayoutInput) -> Size<f32> {
    if !input.perform
        && let Some(hit) = cached(node, &input)
    {
        return hit;
    }
    let (style, children) = {
        let data = node.data().borrow();
        (data.style, data.children.clone())
    };
    if style.display == Display::None {
        if input.perform {
            hide_subtree(node);
        }
        return Size::ZERO;
    }

    let padding = resolve_edges(&style.padding, input.parent.width);
    let border = resolve_edges(&style.border, input.parent.width);
    let pb = padding + border;
    let bounds = Bounds::new(&style, input.parent, pb);

    let mut known = Size {
        width: input
            .known
            .width
            .or_else(|| style.width.resolve(input.parent.width).map(|width| bounds.width(width))),
        height: input.known.height.or_else(|| {
            style
                .height
                .resolve(input.parent.height)
                .map(|height| bounds.height(height))
        }),
    };
    if let Some(ratio) = style.ratio() {
        match (known.width, known.height) {
            (Some(width), None) => known.height = Some(bounds.height(width / ratio)),
            (None, Some(height)) => known.width = Some(bounds.width(height * ratio)),
            _ => {}
        }
    }

    let size = if let (Some(width), Some(height), false) = (known.width, known.height, input.perform)
    {
        Size { width, height }
    } else if children.is_empty() {
        leaf_size(node, &input, known, pb, &bounds)
    } else {
        let container = Container {
            node,
            style: &style,
            children: &children,
            input: &input,
            known,
            padding,
            border,
            bounds: &bounds,
        };
        container.layout()
    };

    if input.perform {
        let mut data = node.data().borrow_mut();
        data.unrounded.width = size.width;
        data.unrounded.height = size.height;
        data.unrounded.padding = padding;
        data.unrounded.border = border;
    } else {
        store_cache(node, input, size);
    }
    size
}

/// Min/max clamp for one node, floored at its padding and border.
struct Bounds {
    min: Size<Option<f32>>,
    max: Size<Option<f32>>,
    floor: Size<f32>,
}

impl Bounds {
    fn new(style: &NodeStyle, parent: Size<Option<f32>>, pb: Rect<f32>) -> Self {
        Self {
            min: style.min_size(parent),
            max: style.max_size(parent),
            floor: Size {
                width: pb.horizontal(),
                height: pb.vertical(),
            },
        }
    }

    fn width(&self, value: f32) -> f32 {
        clamp_opt(value, self.min.width, self.max.width).max(self.floor.width)
    }

    fn height(&self, value: f32) -> f32 {
        clamp_opt(value, self.min.height, self.max.height).max(self.floor.height)
    }
}

fn leaf_size(
    node: &Node,
    input: &LayoutInput,
    known: Size<Option<f32>>,
    pb: Rect<f32>,
    bounds: &Bounds,
) -> Size<f32> {
    let constraint = |known_size: Option<f32>, available: AvailableSpace, edges: f32| {
        known_size.map_or_else(
            || match available {
                AvailableSpace::Definite(space) => ((space - edges).max(0.0), MeasureMode::AtMost),
                AvailableSpace::MinContent => (0.0, MeasureMode::AtMost),
                AvailableSpace::MaxContent => (f32::NAN, MeasureMode::Undefined),
            },
            |size| ((size - edges).max(0.0), MeasureMode::Exactly),
        )
    };
    let (width, width_mode) = constraint(known.width, input.available.width, pb.horizontal());
    let (height, height_mode) = constraint(known.height, input.available.height, pb.vertical());
    let content = if known.width.is_some() && known.height.is_some() {
        None
    } else {
        node.measure(width, width_mode, height, height_mode)
    };
    if let Some(measured) = content {
        trace!(
            target: "css::flexbox::measure",
            "[MEASURE] {width:.3}/{width_mode:?} x {height:.3}/{height_mode:?} -> {:.3} x {:.3}",
            measured.width,
            measured.height
        );
    }
    let content = content.unwrap_or(Size::ZERO);
    Size {
        width: known
            .width
            .unwrap_or_else(|| bounds.width(content.width.max(0.0) + pb.horizontal())),
        height: known
            .height
            .unwrap_or_else(|| bounds.height(content.height.max(0.0) + pb.vertical())),
    }
}

/// Working state of one in-flow child.
struct FlexItem {
    node: Node,
    style: NodeStyle,
    margin: Rect<f32>,
    auto_margin: Rect<bool>,
    align: Align,
    bounds: Bounds,
    size: Size<Option<f32>>,
    base: f32,
    hypothetical: f32,
    min_main: f32,
    max_main: f32,
    target: f32,
    cross: CrossSize,
    final_cross: f32,
    main_pos: f32,
    cross_pos: f32,
}

impl FlexItem {
    fn main_margins(&self, axes: Axes) -> f32 {
        axes.main_start(self.margin) + axes.main_end(self.margin)
    }

    fn cross_margins(&self, axes: Axes) -> f32 {
        axes.cross_start(self.margin) + axes.cross_end(self.margin)
    }
}

struct Container<'layout> {
    node: &'layout Node,
    style: &'layout NodeStyle,
    children: &'layout [Node],
    input: &'layout LayoutInput,
    known: Size<Option<f32>>,
    padding: Rect<f32>,
    border: Rect<f32>,
    bounds: &'layout Bounds,
}

impl Container<'_> {
    #[expect(clippy::too_many_lines, reason = "follows the algorithm's numbered steps")]
    fn layout(&self) -> Size<f32> {
        let style = self.style;
        let axes = resolve_axes(style.direction);
        let pb = self.padding + self.border;
        let pb_main = axes.main_start(pb) + axes.main_end(pb);
        let pb_cross = axes.cross_start(pb) + axes.cross_end(pb);
        let inner_known = Size {
            width: self.known.width.map(|width| (width - pb.horizontal()).max(0.0)),
            height: self.known.height.map(|height| (height - pb.vertical()).max(0.0)),
        };
        let inner_available = Size {
            width: inner_known.width.map_or_else(
                || self.input.available.width.shrink(pb.horizontal()),
                AvailableSpace::Definite,
            ),
            height: inner_known.height.map_or_else(
                || self.input.available.height.shrink(pb.vertical()),
                AvailableSpace::Definite,
            ),
        };
        let column_gap = style.gap[0].resolve(inner_known.width).unwrap_or(0.0).max(0.0);
        let row_gap = style.gap[1].resolve(inner_known.height).unwrap_or(0.0).max(0.0);
        let (main_gap, cross_gap) = if axes.main_is_row {
            (column_gap, row_gap)
        } else {
            (row_gap, column_gap)
        };
        let main_known = axes.main(inner_known);
        let cross_known = axes.cross(inner_known);

        // Flex base and hypothetical main sizes.
        let mut items: Vec<FlexItem> = self
            .children
            .iter()
            .filter(|child| {
                let child_style = child.style();
                child_style.display != Display::None
                    && child_style.position_type != PositionType::Absolute
            })
            .map(|child| self.collect_item(child, axes, inner_known, inner_available))
            .collect();

        // Line collection and the container main size.
        let outer_hypothetical: Vec<f32> = items
            .iter()
            .map(|item| item.hypothetical + item.main_margins(axes))
            .collect();
        let lines: Vec<LineRange> = if style.wrap == FlexWrap::NoWrap {
            break_into_lines(None, main_gap, &outer_hypothetical)
        } else {
            let limit = main_known.or(match axes.main(inner_available) {
                AvailableSpace::Definite(space) => Some(space),
                AvailableSpace::MinContent => Some(0.0),
                AvailableSpace::MaxContent => None,
            });
            break_into_lines(limit, main_gap, &outer_hypothetical)
        };
        let gaps_for = |count: usize, gap: f32| count.saturating_sub(1) as f32 * gap;
        let inner_main = main_known.unwrap_or_else(|| {
            let longest = lines
                .iter()
                .map(|&(start, end)| {
                    outer_hypothetical[start..end].iter().sum::<f32>() + gaps_for(end - start, main_gap)
                })
                .fold(0.0f32, f32::max);
            let mut content = longest;
            if lines.len() > 1
                && let AvailableSpace::Definite(space) = axes.main(inner_available)
            {
                content = content.max(space);
            }
            let outer = content + pb_main;
            let clamped = if axes.main_is_row {
                self.bounds.width(outer)
            } else {
                self.bounds.height(outer)
            };
            clamped - pb_main
        });

        // Resolve flexible lengths.
        for &(start, end) in &lines {
            let line = &mut items[start..end];
            let factors: Vec<FlexFactors> = line
                .iter()
                .map(|item| FlexFactors {
                    grow: item.style.flex_grow,
                    shrink: item.style.flex_shrink,
                    base: item.base,
                    hypothetical: item.hypothetical,
                    min_main: item.min_main,
                    max_main: item.max_main,
                    margins: item.main_margins(axes),
                })
                .collect();
            let targets =
                resolve_flexible_lengths(&factors, inner_main - gaps_for(line.len(), main_gap));
            for (item, target) in line.iter_mut().zip(targets) {
                item.target = target;
            }
        }

        // Hypothetical cross sizes.
        let inner_main_size = axes.size(Some(inner_main), cross_known);
        for item in &mut items {
            let stretch = item.align == Align::Stretch
                && axes.cross(item.size).is_none()
                && !axes.cross_start(item.auto_margin)
                && !axes.cross_end(item.auto_margin);
            let measured = axes.cross(item.size).unwrap_or_else(|| {
                let available_cross = axes
                    .cross(inner_available)
                    .shrink(item.cross_margins(axes));
                let size = compute(
                    &item.node,
                    LayoutInput {
                        known: axes.size(Some(item.target), None),
                        parent: inner_main_size,
                        available: axes
                            .size(AvailableSpace::Definite(item.target), available_cross),
                        perform: false,
                    },
                );
                let cross = axes.cross(size);
                if axes.main_is_row {
                    item.bounds.height(cross)
                } else {
                    item.bounds.width(cross)
                }
            });
            item.cross = if stretch {
                CrossSize::Stretch(measured)
            } else {
                CrossSize::Explicit(measured)
            };
        }

        // Line cross sizes and the container cross size.
        let mut line_crosses: Vec<f32> = lines
            .iter()
            .map(|&(start, end)| {
                items[start..end]
                    .iter()
                    .map(|item| item.cross.intrinsic_size() + item.cross_margins(axes))
                    .fold(0.0f32, f32::max)
            })
            .collect();
        if style.wrap == FlexWrap::NoWrap
            && let (Some(cross), Some(line)) = (cross_known, line_crosses.first_mut())
        {
            *line = cross;
        }
        let inner_cross = cross_known.unwrap_or_else(|| {
            let content =
                line_crosses.iter().sum::<f32>() + gaps_for(line_crosses.len(), cross_gap);
            let outer = content + pb_cross;
            let clamped = if axes.main_is_row {
                self.bounds.height(outer)
            } else {
                self.bounds.width(outer)
            };
            clamped - pb_cross
        });
        if style.wrap == FlexWrap::NoWrap
            && let Some(line) = line_crosses.first_mut()
        {
            *line = inner_cross;
        }

        let cross_free = |crosses: &[f32]| {
            inner_cross - crosses.iter().sum::<f32>() - gaps_for(crosses.len(), cross_gap)
        };
        let (mut line_offset, between_lines) = if style.wrap == FlexWrap::NoWrap {
            (0.0, 0.0)
        } else {
            stretch_line_crosses(style.align_content, cross_free(&line_crosses), &mut line_crosses);
            align_content_params(style.align_content, cross_free(&line_crosses), lines.len())
        };
        debug!(
            target: "css::flexbox::container",
            "[FLEX] items={} lines={} inner_main={inner_main:.3} inner_cross={inner_cross:.3}",
            items.len(),
            lines.len()
        );

        // Main-axis placement, stretching and cross-axis placement.
        for (&(start, end), line_cross) in lines.iter().zip(&line_crosses) {
            let line = &mut items[start..end];
            place_main(line, axes, style, inner_main, main_gap);
            for item in line.iter_mut() {
                let cross_margins = item.cross_margins(axes);
                let (min_cross, max_cross, floor) = if axes.main_is_row {
                    (item.bounds.min.height, item.bounds.max.height, item.bounds.floor.height)
                } else {
                    (item.bounds.min.width, item.bounds.max.width, item.bounds.floor.width)
                };
                item.final_cross = resolve_cross_size(
                    item.cross,
                    *line_cross,
                    cross_margins,
                    min_cross.unwrap_or(0.0),
                    max_cross.unwrap_or(f32::INFINITY),
                )
                .max(floor);
                let free = *line_cross - item.final_cross - cross_margins;
                let auto_start = axes.cross_start(item.auto_margin);
                let auto_end = axes.cross_end(item.auto_margin);
                let offset = if auto_start || auto_end {
                    let share = free.max(0.0);
                    let (start_extra, end_extra) = match (auto_start, auto_end) {
                        (true, true) => (share * 0.5, share * 0.5),
                        (true, false) => (share, 0.0),
                        (false, _) => (0.0, share),
                    };
                    add_cross_margins(&mut item.margin, axes, start_extra, end_extra);
                    0.0
                } else {
                    cross_offset(item.align, *line_cross, item.final_cross + cross_margins)
                };
                item.cross_pos = line_offset + offset + axes.cross_start(item.margin);
                if style.wrap == FlexWrap::WrapReverse {
                    item.cross_pos = inner_cross - item.cross_pos - item.final_cross;
                }
            }
            line_offset += line_cross + cross_gap + between_lines;
        }

        let container_size = axes.size(inner_main + pb_main, inner_cross + pb_cross);
        if self.input.perform {
            let inner = axes.size(Some(inner_main), Some(inner_cross));
            for item in &items {
                self.finalize_item(item, axes, inner, pb);
            }
            for child in self.children {
                let child_style = child.style();
                if child_style.display == Display::None {
                    hide_subtree(child);
                } else if child_style.position_type == PositionType::Absolute {
                    absolute::layout_absolute_child(child, container_size, self.border, pb);
                }
            }
            trace!(
                target: "css::flexbox::container",
                "[FLEX] laid out {:?} as {:.3} x {:.3}",
                self.node,
                container_size.width,
                container_size.height
            );
        }
        Size {
            width: self.known.width.unwrap_or(container_size.width),
            height: self.known.height.unwrap_or(container_size.height),
        }
    }

    fn collect_item(
        &self,
        child: &Node,
        axes: Axes,
        inner_known: Size<Option<f32>>,
        inner_available: Size<AvailableSpace>,
    ) -> FlexItem {
        let style = child.style();
        let margin = resolve_edges(&style.margin, inner_known.width);
        let auto_margin = auto_edges(&style.margin);
        let align = if style.align_self == Align::Auto {
            self.style.align_items
        } else {
            style.align_self
        };
        let child_pb = resolve_edges(&style.padding, inner_known.width)
            + resolve_edges(&style.border, inner_known.width);
        let bounds = Bounds::new(&style, inner_known, child_pb);
        let mut size = Size {
            width: style.width.resolve(inner_known.width).map(|width| bounds.width(width)),
            height: style
                .height
                .resolve(inner_known.height)
                .map(|height| bounds.height(height)),
        };
        if let Some(ratio) = style.ratio() {
            match (size.width, size.height) {
                (Some(width), None) => size.height = Some(bounds.height(width / ratio)),
                (None, Some(height)) => size.width = Some(bounds.width(height * ratio)),
                _ => {}
            }
        }
        let main_floor = axes.main(bounds.floor);
        let min_main_style = axes.main(bounds.min);
        let max_main = axes.main(bounds.max).unwrap_or(f32::INFINITY);

        let cross_margins = axes.cross_start(margin) + axes.cross_end(margin);
        let stretched_cross = (self.style.wrap == FlexWrap::NoWrap
            && align == Align::Stretch
            && !axes.cross_start(auto_margin)
            && !axes.cross_end(auto_margin))
        .then(|| axes.cross(inner_known))
        .flatten()
        .map(|cross| {
            let value = (cross - cross_margins).max(0.0);
            if axes.main_is_row {
                bounds.height(value)
            } else {
                bounds.width(value)
            }
        });
        let cross_known = axes.cross(size).or(stretched_cross);
        let cross_available = axes.cross(inner_available).shrink(cross_margins);
        let content_main = |mode: AvailableSpace| {
            let measured = compute(
                child,
                LayoutInput {
                    known: axes.size(None, cross_known),
                    parent: inner_known,
                    available: axes.size(mode, cross_available),
                    perform: false,
                },
            );
            axes.main(measured)
        };
        let content_mode = if axes.main(inner_available) == AvailableSpace::MinContent {
            AvailableSpace::MinContent
        } else {
            AvailableSpace::MaxContent
        };

        let basis = match style.flex_basis {
            basis @ (Value::Point(_) | Value::Percent(_)) => basis.resolve(axes.main(inner_known)),
            Value::Undefined | Value::Auto => None,
        }
        .or(axes.main(size));
        let base = basis
            .unwrap_or_else(|| content_main(content_mode))
            .max(main_floor);

        let has_content = child.has_measure_func() || child.child_count() > 0;
        let min_main = min_main_style
            .unwrap_or_else(|| {
                if style.overflow == Overflow::Visible && has_content {
                    let suggestion = content_main(AvailableSpace::MinContent);
                    axes.main(size).map_or(suggestion, |specified| suggestion.min(specified))
                        .min(max_main)
                } else {
                    0.0
                }
            })
            .max(main_floor);
        let hypothetical = clamp_opt(base, Some(min_main), Some(max_main)).max(main_floor);

        FlexItem {
            node: child.clone(),
            style,
            margin,
            auto_margin,
            align,
            bounds,
            size,
            base,
            hypothetical,
            min_main,
            max_main,
            target: hypothetical,
            cross: CrossSize::Explicit(0.0),
            final_cross: 0.0,
            main_pos: 0.0,
            cross_pos: 0.0,
        }
    }

    fn finalize_item(&self, item: &FlexItem, axes: Axes, inner: Size<Option<f32>>, pb: Rect<f32>) {
        let size = axes.size(item.target, item.final_cross);
        compute(
            &item.node,
            LayoutInput {
                known: Size {
                    width: Some(size.width),
                    height: Some(size.height),
                },
                parent: inner,
                available: Size {
                    width: AvailableSpace::Definite(size.width),
                    height: AvailableSpace::Definite(size.height),
                },
                perform: true,
            },
        );
        let position = axes.size(item.main_pos, item.cross_pos);
        let mut left = pb.left + position.width;
        let mut top = pb.top + position.height;
        if item.style.position_type == PositionType::Relative {
            left += inset(&item.style, Edge::Left, inner.width)
                .or_else(|| inset(&item.style, Edge::Right, inner.width).map(|right| -right))
                .unwrap_or(0.0);
            top += inset(&item.style, Edge::Top, inner.height)
                .or_else(|| inset(&item.style, Edge::Bottom, inner.height).map(|bottom| -bottom))
                .unwrap_or(0.0);
        }
        set_placement(&item.node, left, top, item.margin);
    }
}

/// Main-axis sizes are final; resolve auto margins and justification for one line.
fn place_main(line: &mut [FlexItem], axes: Axes, style: &NodeStyle, inner_main: f32, gap: f32) {
    let used: f32 = line
        .iter()
        .map(|item| item.target + item.main_margins(axes))
        .sum::<f32>()
        + line.len().saturating_sub(1) as f32 * gap;
    let free = inner_main - used;
    let autos: Vec<(bool, bool)> = line
        .iter()
        .map(|item| {
            (
                axes.main_start(item.auto_margin),
                axes.main_end(item.auto_margin),
            )
        })
        .collect();
    let extras = distribute_auto_margins(free, &autos);
    let (start, between) = if extras.is_some() {
        (0.0, 0.0)
    } else {
        justify_params(style.justify_content, free, line.len())
    };
    let mut cursor = start;
    for (index, item) in line.iter_mut().enumerate() {
        let (extra_start, extra_end) = extras
            .as_ref()
            .and_then(|shares| shares.get(index).copied())
            .unwrap_or((0.0, 0.0));
        add_main_margins(&mut item.margin, axes, extra_start, extra_end);
        cursor += axes.main_start(item.margin);
        item.main_pos = if axes.main_reverse {
            inner_main - cursor - item.target
        } else {
            cursor
        };
        cursor += item.target + axes.main_end(item.margin) + gap + between;
    }
}

fn add_main_margins(margin: &mut Rect<f32>, axes: Axes, start: f32, end: f32) {
    if axes.main_is_row {
        margin.left += start;
        margin.right += end;
    } else {
        margin.top += start;
        margin.bottom += end;
    }
}

fn add_cross_margins(margin: &mut Rect<f32>, axes: Axes, start: f32, end: f32) {
    if axes.main_is_row {
        margin.top += start;
        margin.bottom += end;
    } else {
        margin.left += start;
        margin.right += end;
    }
}

pub(crate) fn set_placement(node: &Node, left: f32, top: f32, margin: Rect<f32>) {
    let mut data = node.data().borrow_mut();
    data.unrounded.left = left;
    data.unrounded.top = top;
    data.unrounded.margin = margin;
}

fn hide_subtree(node: &Node) {
    let children = {
        let mut data = node.data().borrow_mut();
        data.unrounded = Layout::default();
        data.children.clone()
    };
    for child in &children {
        hide_subtree(child);
    }
}

fn cached(node: &Node, input: &LayoutInput) -> Option<Size<f32>> {
    node.data()
        .borrow()
        .cache
        .iter()
        .find(|(key, _)| key == input)
        .map(|(_, size)| *size)
}

fn store_cache(node: &Node, input: LayoutInput, size: Size<f32>) {
    let mut data = node.data().borrow_mut();
    if data.cache.len() >= CACHE_SIZE {
        data.cache.remove(0);
    }
    data.cache.push((input, size));
}
