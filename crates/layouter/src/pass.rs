//! One layout pass: expand styles, build and translate the tree, solve once,
//! read geometry back.

use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use log::debug;
use style_engine::{ResolvedStyle, StyleEnv, Viewport, expand};
use tracing::info_span;

use crate::backend::{BackendKind, LayoutEngine};
use crate::element::Element;
use crate::error::LayoutError;
use crate::measure::MeasureContent;
use crate::registry::EngineRegistry;
use crate::translate::{Diagnostic, GridAreas, Translator, describe};
use crate::tree::{BoxEdges, Geometry, LayoutTree, NodeHandle};

/// Inputs of a pass besides the element tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Available width for the root; `None` lays out at content width.
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Per-pass backend; wins over the registry's selection.
    pub backend: Option<BackendKind>,
    pub root_font_size: f32,
    /// Basis for `vw`/`vh`/`vmin`/`vmax`; falls back to `width` x `height` when
    /// both are definite.
    pub viewport: Option<Viewport>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            backend: None,
            root_font_size: 16.0,
            viewport: None,
        }
    }
}

impl LayoutOptions {
    /// Options for a definite available size.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            backend: None,
            root_font_size: 16.0,
            viewport: None,
        }
    }

    #[must_use]
    pub const fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    fn env(&self) -> StyleEnv {
        let available = self
            .width
            .zip(self.height)
            .map(|(width_px, height_px)| Viewport {
                width_px,
                height_px,
            });
        StyleEnv {
            root_font_size: self.root_font_size,
            viewport: self.viewport.or(available),
        }
    }
}

/// Computed box of one element. `geometry` is in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLayout {
    /// Child indices from the root; the root's path is empty.
    pub path: Vec<usize>,
    pub element_type: String,
    pub geometry: Geometry,
    pub edges: BoxEdges,
}

/// Everything a pass produced, in document order.
#[derive(Clone, Debug)]
pub struct LayoutResult {
    pub backend: BackendKind,
    pub nodes: Vec<NodeLayout>,
    /// Unsupported-feature fallbacks taken during the pass.
    pub diagnostics: Vec<Diagnostic>,
}

impl LayoutResult {
    pub fn get(&self, path: &[usize]) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.path == path)
    }

    pub fn root(&self) -> Option<&NodeLayout> {
        self.get(&[])
    }
}

/// A node created during the build, with the index of its parent entry.
struct Placed {
    path: Vec<usize>,
    element_type: String,
    node: NodeHandle,
    parent: Option<usize>,
}

/// A layout pass bound to one engine. The engine is resolved once, so changing
/// the registry's selection afterwards does not affect this pass.
#[derive(Debug)]
pub struct LayoutPass {
    engine: Arc<dyn LayoutEngine>,
    options: LayoutOptions,
}

impl LayoutPass {
    /// Resolve the engine from the process-wide registry.
    ///
    /// # Errors
    /// [`LayoutError::BackendUnavailable`] when the chosen backend is not compiled in.
    pub async fn prepare(options: LayoutOptions) -> Result<Self, LayoutError> {
        Self::prepare_with(EngineRegistry::global(), options).await
    }

    /// Resolve the engine from a specific registry.
    ///
    /// # Errors
    /// [`LayoutError::BackendUnavailable`] when the chosen backend is not compiled in.
    pub async fn prepare_with(
        registry: &EngineRegistry,
        options: LayoutOptions,
    ) -> Result<Self, LayoutError> {
        let engine = registry.acquire(options.backend).await?;
        Ok(Self::with_engine(engine, options))
    }

    pub const fn with_engine(engine: Arc<dyn LayoutEngine>, options: LayoutOptions) -> Self {
        Self { engine, options }
    }

    pub fn backend(&self) -> BackendKind {
        self.engine.kind()
    }

    /// Lay out `root` and everything below it.
    ///
    /// # Errors
    /// A replaced element that cannot be sized, or a backend failure. The
    /// underlying [`LayoutError`] can be recovered with `downcast_ref`.
    pub fn run(&self, root: &Element, measurer: Rc<dyn MeasureContent>) -> Result<LayoutResult> {
        let backend = self.engine.kind();
        let _span = info_span!("layout_pass", backend = backend.name()).entered();

        let mut tree = self.engine.new_tree();
        let mut placed = Vec::new();
        let diagnostics = {
            let mut translator = Translator::new(tree.as_mut(), measurer);
            let inherited = ResolvedStyle::initial(self.options.env());
            build(
                &mut translator,
                root,
                &inherited,
                &mut Vec::new(),
                None,
                &mut placed,
            )?;
            translator.into_diagnostics()
        };

        let root_node = placed
            .first()
            .map(|entry| entry.node)
            .context("layout pass produced no root node")?;
        tree.calculate_layout(root_node, self.options.width, self.options.height)
            .with_context(|| format!("solving the {backend} layout"))?;

        let nodes = harvest(tree.as_ref(), &placed)?;
        debug!(
            target: "layouter::pass",
            "[PASS] {backend}: {} nodes, {} fallbacks",
            nodes.len(),
            diagnostics.len()
        );
        Ok(LayoutResult {
            backend,
            nodes,
            diagnostics,
        })
    }
}

/// Where a node is being attached.
#[derive(Copy, Clone)]
struct Parent<'areas> {
    entry: usize,
    node: NodeHandle,
    areas: Option<&'areas GridAreas>,
}

/// Expand, create and translate `element`, attach it, then recurse into its
/// children. Nodes are created in document order.
fn build(
    translator: &mut Translator<'_>,
    element: &Element,
    inherited: &ResolvedStyle,
    path: &mut Vec<usize>,
    parent: Option<Parent<'_>>,
    placed: &mut Vec<Placed>,
) -> Result<()> {
    let style = expand(&element.declared_style(), inherited);
    let translated = translator
        .translate(element, &style, path, parent.and_then(|outer| outer.areas))
        .with_context(|| format!("translating {}", describe(&element.element_type, path)))?;

    if let Some(outer) = parent {
        let index = path.last().copied().unwrap_or_default();
        translator
            .attach(outer.node, translated.node, index)
            .with_context(|| format!("attaching {}", describe(&element.element_type, path)))?;
    }

    let entry = placed.len();
    placed.push(Placed {
        path: path.clone(),
        element_type: element.element_type.clone(),
        node: translated.node,
        parent: parent.map(|outer| outer.entry),
    });

    let this = Parent {
        entry,
        node: translated.node,
        areas: translated.areas.as_ref(),
    };
    for (index, child) in element.children.iter().enumerate() {
        path.push(index);
        build(translator, child, &style, path, Some(this), placed)?;
        path.pop();
    }
    Ok(())
}

/// Read every node's geometry, offsetting each by its parent's document position.
fn harvest(tree: &dyn LayoutTree, placed: &[Placed]) -> Result<Vec<NodeLayout>> {
    let mut nodes: Vec<NodeLayout> = Vec::with_capacity(placed.len());
    for entry in placed {
        let mut geometry = tree.geometry(entry.node)?;
        if let Some(parent) = entry.parent.and_then(|index| nodes.get(index)) {
            geometry.left += parent.geometry.left;
            geometry.top += parent.geometry.top;
        }
        nodes.push(NodeLayout {
            path: entry.path.clone(),
            element_type: entry.element_type.clone(),
            geometry,
            edges: tree.edges(entry.node)?,
        });
    }
    Ok(nodes)
}
