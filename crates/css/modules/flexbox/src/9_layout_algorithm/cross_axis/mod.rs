//! Cross-axis alignment.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#cross-alignment>

pub mod alignment;

pub use alignment::{CrossSize, cross_offset, resolve_cross_size};
