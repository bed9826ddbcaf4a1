//! Layout resolution over interchangeable flex/grid backends.
//!
//! A [`LayoutPass`] expands each element's declared style, translates it into
//! setter calls on a backend-neutral [`LayoutTree`], solves once and reads the
//! geometry back. Two backends are available: the in-crate flex engine
//! (`flexbox`, no grid) and `taffy` (flex and grid). Grid on a backend without
//! grid support falls back to flex and reports a [`Diagnostic`].

mod adapters;
mod backend;
mod element;
mod error;
mod measure;
mod pass;
mod registry;
mod translate;
mod tree;

#[cfg(feature = "backend-flexbox")]
pub use adapters::{FlexboxEngine, FlexboxTree};
#[cfg(feature = "backend-taffy")]
pub use adapters::{TaffyEngine, TaffyLayoutTree};
pub use backend::{BackendKind, LayoutEngine, UnknownBackend};
pub use element::{Element, ElementProps};
pub use error::LayoutError;
pub use measure::{
    ContentRef, ContentSize, MAX_MEASURE_DEPTH, MeasureBridge, MeasureContent, NoContent,
    WidthConstraint,
};
pub use pass::{LayoutOptions, LayoutPass, LayoutResult, NodeLayout};
pub use registry::{EngineRegistry, EngineState};
pub use translate::{Diagnostic, GridAreas, Translated, Translator};
pub use tree::{
    AlignContent, AlignItems, BoxEdge, BoxEdges, Dimension, DisplayMode, Edge, FlexDirection,
    FlexWrap, Geometry, GridAxis, JustifyContent, LayoutTree, Length, NodeHandle, Overflow,
    PositionType, Sides,
};

pub use style_engine::{DeclaredStyle, DeclaredValue, Viewport};
