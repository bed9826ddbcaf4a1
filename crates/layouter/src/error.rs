//! Errors surfaced by the layout layer.

use thiserror::Error;

use crate::backend::BackendKind;
use crate::tree::NodeHandle;

/// Failures that stop a layout pass. Malformed style never gets here: it is
/// absorbed during expansion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    /// The requested backend was compiled out or failed to start.
    #[error("layout backend `{requested}` is unavailable; select `{alternative}` instead")]
    BackendUnavailable {
        requested: BackendKind,
        alternative: BackendKind,
    },
    /// A replaced element has no explicit size, no natural size and nothing to measure.
    #[error("replaced element {element} has no explicit size, natural size or measurable content")]
    MissingIntrinsicSize { element: String },
    /// Geometry was read before the tree was solved, or after a later style write.
    #[error("geometry of node {node} read before the tree was solved")]
    NotSolved { node: NodeHandle },
    #[error("unknown layout node {0}")]
    UnknownNode(NodeHandle),
    /// The backend rejected an operation.
    #[error("layout backend error: {0}")]
    Backend(String),
}
