//! Box-model translator: resolved style in, layout-node setter calls out.
//!
//! The translator only talks to [`LayoutTree`]. It checks capabilities
//! (`supports_grid`) but never which backend it is driving.

use core::fmt;
use std::collections::HashMap;
use std::rc::Rc;

use css_grid::{
    GridArea, GridPlacement, parse_area, parse_auto_flow, parse_placement, parse_template_with,
    resolve_areas,
};
use css_values_units::UnitContext;
use log::{debug, warn};
use style_engine::{Keyword, Property, ResolvedStyle, StyleValue};

use crate::backend::BackendKind;
use crate::element::Element;
use crate::error::LayoutError;
use crate::measure::{ContentRef, ContentSize, MeasureBridge, MeasureContent, WidthConstraint};
use crate::tree::{
    AlignContent, AlignItems, Dimension, DisplayMode, Edge, FlexDirection, FlexWrap, GridAxis,
    JustifyContent, LayoutTree, Length, NodeHandle, Overflow, PositionType,
};

/// Named grid areas of a container, for resolving its children's named lines.
pub type GridAreas = HashMap<String, GridArea>;

/// An unsupported-feature fallback taken during a pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub backend: BackendKind,
    pub feature: &'static str,
    /// The first element that needed the fallback.
    pub element: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "`{}` is not supported by the {} backend (first used by {}); laid out as flex",
            self.feature, self.backend, self.element
        )
    }
}

/// Result of translating one element.
#[derive(Debug)]
pub struct Translated {
    pub node: NodeHandle,
    /// Areas declared by this node when it is a grid container.
    pub areas: Option<GridAreas>,
}

/// Writes resolved styles into one tree for the duration of a pass.
pub struct Translator<'tree> {
    tree: &'tree mut dyn LayoutTree,
    measurer: Rc<dyn MeasureContent>,
    diagnostics: Vec<Diagnostic>,
}

/// `type /0/2` for diagnostics and errors.
pub fn describe(element_type: &str, path: &[usize]) -> String {
    let mut described = format!("{element_type} /");
    let indices: Vec<String> = path.iter().map(ToString::to_string).collect();
    described.push_str(&indices.join("/"));
    described
}

fn length(value: &StyleValue) -> Length {
    match value {
        StyleValue::Number(pixels) => Length::Points(*pixels),
        StyleValue::Percent(percent) => Length::Percent(*percent),
        StyleValue::Keyword(_) | StyleValue::Text(_) => Length::Auto,
    }
}

fn number(style: &ResolvedStyle, property: Property) -> f32 {
    style.number(property).unwrap_or(0.0)
}

fn align_items(keyword: Option<Keyword>) -> Option<AlignItems> {
    match keyword? {
        Keyword::FlexStart => Some(AlignItems::FlexStart),
        Keyword::FlexEnd => Some(AlignItems::FlexEnd),
        Keyword::Center => Some(AlignItems::Center),
        Keyword::Stretch => Some(AlignItems::Stretch),
        Keyword::Baseline => Some(AlignItems::Baseline),
        _ => None,
    }
}

fn justify_content(keyword: Option<Keyword>) -> JustifyContent {
    match keyword {
        Some(Keyword::FlexEnd) => JustifyContent::FlexEnd,
        Some(Keyword::Center) => JustifyContent::Center,
        Some(Keyword::SpaceBetween) => JustifyContent::SpaceBetween,
        Some(Keyword::SpaceAround) => JustifyContent::SpaceAround,
        Some(Keyword::SpaceEvenly) => JustifyContent::SpaceEvenly,
        _ => JustifyContent::FlexStart,
    }
}

fn align_content(keyword: Option<Keyword>) -> AlignContent {
    match keyword {
        Some(Keyword::FlexStart) => AlignContent::FlexStart,
        Some(Keyword::FlexEnd) => AlignContent::FlexEnd,
        Some(Keyword::Center) => AlignContent::Center,
        Some(Keyword::SpaceBetween) => AlignContent::SpaceBetween,
        Some(Keyword::SpaceAround) => AlignContent::SpaceAround,
        Some(Keyword::SpaceEvenly) => AlignContent::SpaceEvenly,
        _ => AlignContent::Stretch,
    }
}

fn overflow(keyword: Option<Keyword>) -> Overflow {
    match keyword {
        Some(Keyword::Hidden) => Overflow::Hidden,
        Some(Keyword::Scroll) => Overflow::Scroll,
        _ => Overflow::Visible,
    }
}

fn placement(style: &ResolvedStyle, property: Property) -> GridPlacement {
    style
        .text(property)
        .map_or(GridPlacement::Auto, parse_placement)
}

/// Replace a named line with the matching edge of the named area.
fn resolve_named(
    placement: GridPlacement,
    areas: Option<&GridAreas>,
    line_of: fn(&GridArea) -> u16,
) -> GridPlacement {
    match placement {
        GridPlacement::Named(name) => areas
            .and_then(|declared| declared.get(&name))
            .and_then(|area| i16::try_from(line_of(area)).ok())
            .map_or(GridPlacement::Auto, GridPlacement::Line),
        other @ (GridPlacement::Auto | GridPlacement::Line(_) | GridPlacement::Span(_)) => other,
    }
}

impl<'tree> Translator<'tree> {
    pub fn new(tree: &'tree mut dyn LayoutTree, measurer: Rc<dyn MeasureContent>) -> Self {
        Self {
            tree,
            measurer,
            diagnostics: Vec::new(),
        }
    }

    /// Fallback diagnostics gathered so far, at most one per unsupported feature.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Attach a translated child under its parent.
    ///
    /// # Errors
    /// Unknown handles or a backend refusal.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle, index: usize) -> Result<(), LayoutError> {
        self.tree.insert_child(parent, child, index)
    }

    /// Create a node for `element` and write its resolved style.
    ///
    /// # Errors
    /// [`LayoutError::MissingIntrinsicSize`] for an unsizeable replaced element,
    /// or any backend failure.
    pub fn translate(
        &mut self,
        element: &Element,
        style: &ResolvedStyle,
        path: &[usize],
        parent_areas: Option<&GridAreas>,
    ) -> Result<Translated, LayoutError> {
        let node = self.tree.create_node()?;
        let display = self.display(style, element, path);
        self.tree.set_display(node, display)?;
        self.apply_position(node, style)?;
        self.apply_sizes(node, style, element, path)?;
        self.apply_flex(node, style)?;
        self.apply_edges(node, style)?;
        self.tree.set_overflow(
            node,
            overflow(style.keyword(Property::OverflowX)),
            overflow(style.keyword(Property::OverflowY)),
        )?;

        let mut areas = None;
        if self.tree.supports_grid() {
            self.apply_grid_item(node, style, parent_areas)?;
            if display == DisplayMode::Grid {
                areas = self.apply_grid_container(node, style)?;
            }
        }

        if !element.is_replaced() && element.has_measurable_content() {
            self.tree
                .set_measure(node, Some(self.text_bridge(element, style, path)))?;
        }
        Ok(Translated { node, areas })
    }

    fn display(&mut self, style: &ResolvedStyle, element: &Element, path: &[usize]) -> DisplayMode {
        match style.keyword(Property::Display) {
            Some(Keyword::None) => DisplayMode::None,
            Some(Keyword::Grid) if self.tree.supports_grid() => DisplayMode::Grid,
            Some(Keyword::Grid) => {
                self.report_unsupported("display: grid", element, path);
                DisplayMode::Flex
            }
            _ => DisplayMode::Flex,
        }
    }

    fn report_unsupported(&mut self, feature: &'static str, element: &Element, path: &[usize]) {
        if self
            .diagnostics
            .iter()
            .any(|diagnostic| diagnostic.feature == feature)
        {
            return;
        }
        let diagnostic = Diagnostic {
            backend: self.tree.backend(),
            feature,
            element: describe(&element.element_type, path),
        };
        warn!(target: "layouter::translate", "[FALLBACK] {diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn apply_position(&mut self, node: NodeHandle, style: &ResolvedStyle) -> Result<(), LayoutError> {
        let position = match style.keyword(Property::Position) {
            Some(Keyword::Absolute) => PositionType::Absolute,
            Some(Keyword::Relative) => PositionType::Relative,
            _ => PositionType::Static,
        };
        self.tree.set_position_type(node, position)?;
        if position == PositionType::Static {
            return Ok(());
        }
        let insets = [
            (Edge::Top, Property::Top),
            (Edge::Right, Property::Right),
            (Edge::Bottom, Property::Bottom),
            (Edge::Left, Property::Left),
        ];
        for (edge, property) in insets {
            self.tree.set_inset(node, edge, length(style.get(property)))?;
        }
        Ok(())
    }

    fn apply_sizes(
        &mut self,
        node: NodeHandle,
        style: &ResolvedStyle,
        element: &Element,
        path: &[usize],
    ) -> Result<(), LayoutError> {
        let declared = |property: Property, attribute: Option<f32>| match length(style.get(property)) {
            Length::Auto => attribute.map_or(Length::Auto, Length::Points),
            explicit @ (Length::Points(_) | Length::Percent(_)) => explicit,
        };
        let mut width = declared(Property::Width, element.props.width);
        let mut height = declared(Property::Height, element.props.height);
        let mut ratio = style.number(Property::AspectRatio);

        if element.is_replaced() {
            (width, height, ratio) = self.replaced_size(element, style, path, width, height, ratio)?;
        }

        self.tree.set_size(node, Dimension::Width, width)?;
        self.tree.set_size(node, Dimension::Height, height)?;
        self.tree.set_aspect_ratio(node, ratio)?;
        for (dimension, min, max) in [
            (Dimension::Width, Property::MinWidth, Property::MaxWidth),
            (Dimension::Height, Property::MinHeight, Property::MaxHeight),
        ] {
            self.tree.set_min_size(node, dimension, length(style.get(min)))?;
            self.tree.set_max_size(node, dimension, length(style.get(max)))?;
        }
        Ok(())
    }

    /// Sizing for replaced content: explicit sizes win, a single explicit size
    /// takes the other from the natural aspect ratio, and no explicit size uses
    /// the natural size.
    fn replaced_size(
        &self,
        element: &Element,
        style: &ResolvedStyle,
        path: &[usize],
        width: Length,
        height: Length,
        ratio: Option<f32>,
    ) -> Result<(Length, Length, Option<f32>), LayoutError> {
        if width != Length::Auto && height != Length::Auto {
            return Ok((width, height, ratio));
        }
        let natural = element.props.natural_size.or_else(|| {
            let content = ContentRef {
                element_type: &element.element_type,
                props: &element.props,
                font_size: style.font_size(),
                line_height: style.number(Property::LineHeight).unwrap_or(1.2),
            };
            self.measurer
                .measure(&content, WidthConstraint::GrowToFill, None)
        });
        let natural_ratio = natural
            .filter(|size| size.width > 0.0 && size.height > 0.0)
            .map(|size| size.width / size.height);

        let sized = match (width, height, natural) {
            (Length::Auto, Length::Auto, Some(size)) => {
                (Length::Points(size.width), Length::Points(size.height), ratio)
            }
            (Length::Auto, Length::Auto, None) => {
                return Err(LayoutError::MissingIntrinsicSize {
                    element: describe(&element.element_type, path),
                });
            }
            (Length::Points(points), Length::Auto, _) => natural_ratio
                .map_or((width, height, ratio), |aspect| {
                    (width, Length::Points(points / aspect), ratio)
                }),
            (Length::Auto, Length::Points(points), _) => natural_ratio
                .map_or((width, height, ratio), |aspect| {
                    (Length::Points(points * aspect), height, ratio)
                }),
            _ => (width, height, ratio.or(natural_ratio)),
        };
        debug!(
            target: "layouter::translate",
            "[REPLACED] {} natural={natural:?} -> {:?} x {:?}",
            describe(&element.element_type, path),
            sized.0,
            sized.1
        );
        Ok(sized)
    }

    fn apply_flex(&mut self, node: NodeHandle, style: &ResolvedStyle) -> Result<(), LayoutError> {
        let direction = match style.keyword(Property::FlexDirection) {
            Some(Keyword::RowReverse) => FlexDirection::RowReverse,
            Some(Keyword::Column) => FlexDirection::Column,
            Some(Keyword::ColumnReverse) => FlexDirection::ColumnReverse,
            _ => FlexDirection::Row,
        };
        let wrap = match style.keyword(Property::FlexWrap) {
            Some(Keyword::Wrap) => FlexWrap::Wrap,
            Some(Keyword::WrapReverse) => FlexWrap::WrapReverse,
            _ => FlexWrap::NoWrap,
        };
        self.tree.set_flex_direction(node, direction)?;
        self.tree.set_flex_wrap(node, wrap)?;
        self.tree
            .set_flex_grow(node, number(style, Property::FlexGrow))?;
        self.tree
            .set_flex_shrink(node, style.number(Property::FlexShrink).unwrap_or(1.0))?;
        self.tree
            .set_flex_basis(node, length(style.get(Property::FlexBasis)))?;
        self.tree.set_justify_content(
            node,
            justify_content(style.keyword(Property::JustifyContent)),
        )?;
        self.tree.set_align_items(
            node,
            align_items(style.keyword(Property::AlignItems)).unwrap_or_default(),
        )?;
        self.tree
            .set_align_self(node, align_items(style.keyword(Property::AlignSelf)))?;
        self.tree
            .set_align_content(node, align_content(style.keyword(Property::AlignContent)))?;
        self.tree
            .set_gap(node, GridAxis::Row, length(style.get(Property::RowGap)))?;
        self.tree
            .set_gap(node, GridAxis::Column, length(style.get(Property::ColumnGap)))?;
        Ok(())
    }

    fn apply_edges(&mut self, node: NodeHandle, style: &ResolvedStyle) -> Result<(), LayoutError> {
        let sides = [
            (Edge::Top, Property::MarginTop, Property::PaddingTop, Property::BorderTopWidth),
            (Edge::Right, Property::MarginRight, Property::PaddingRight, Property::BorderRightWidth),
            (Edge::Bottom, Property::MarginBottom, Property::PaddingBottom, Property::BorderBottomWidth),
            (Edge::Left, Property::MarginLeft, Property::PaddingLeft, Property::BorderLeftWidth),
        ];
        for (edge, margin, padding, border) in sides {
            self.tree.set_margin(node, edge, length(style.get(margin)))?;
            self.tree.set_padding(node, edge, length(style.get(padding)))?;
            self.tree.set_border(node, edge, number(style, border))?;
        }
        Ok(())
    }

    fn apply_grid_container(
        &mut self,
        node: NodeHandle,
        style: &ResolvedStyle,
    ) -> Result<Option<GridAreas>, LayoutError> {
        let env = style.env();
        let units = UnitContext {
            font_size_px: style.font_size(),
            root_font_size_px: env.root_font_size,
            viewport: env.viewport,
        };
        let tracks = |property: Property| {
            style
                .text(property)
                .map(|raw| parse_template_with(raw, &units))
                .unwrap_or_default()
        };
        self.tree
            .set_grid_template(node, GridAxis::Column, &tracks(Property::GridTemplateColumns))?;
        self.tree
            .set_grid_template(node, GridAxis::Row, &tracks(Property::GridTemplateRows))?;
        self.tree
            .set_grid_auto_tracks(node, GridAxis::Column, &tracks(Property::GridAutoColumns))?;
        self.tree
            .set_grid_auto_tracks(node, GridAxis::Row, &tracks(Property::GridAutoRows))?;
        if let Some(flow) = style.text(Property::GridAutoFlow).and_then(parse_auto_flow) {
            self.tree.set_grid_auto_flow(node, flow)?;
        }

        Ok(style
            .text(Property::GridTemplateAreas)
            .map(|raw| resolve_areas(&parse_area(raw)))
            .filter(|areas| !areas.is_empty()))
    }

    fn apply_grid_item(
        &mut self,
        node: NodeHandle,
        style: &ResolvedStyle,
        parent_areas: Option<&GridAreas>,
    ) -> Result<(), LayoutError> {
        let line = |property: Property, line_of: fn(&GridArea) -> u16| {
            resolve_named(placement(style, property), parent_areas, line_of)
        };
        let row_start = line(Property::GridRowStart, |area| area.row_start);
        let row_end = line(Property::GridRowEnd, |area| area.row_end);
        let column_start = line(Property::GridColumnStart, |area| area.col_start);
        let column_end = line(Property::GridColumnEnd, |area| area.col_end);
        self.tree
            .set_grid_placement(node, GridAxis::Row, &row_start, &row_end)?;
        self.tree
            .set_grid_placement(node, GridAxis::Column, &column_start, &column_end)
    }

    fn text_bridge(&self, element: &Element, style: &ResolvedStyle, path: &[usize]) -> Rc<MeasureBridge> {
        let measurer = Rc::clone(&self.measurer);
        let element_type = element.element_type.clone();
        let props = element.props.clone();
        let font_size = style.font_size();
        let line_height = style.number(Property::LineHeight).unwrap_or(1.2);
        Rc::new(MeasureBridge::new(
            describe(&element.element_type, path),
            move |width, height| {
                let content = ContentRef {
                    element_type: &element_type,
                    props: &props,
                    font_size,
                    line_height,
                };
                measurer
                    .measure(&content, width, height)
                    .unwrap_or(ContentSize::ZERO)
            },
        ))
    }
}
