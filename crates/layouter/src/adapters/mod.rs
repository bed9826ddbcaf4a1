//! Backend adapters. Each one implements [`crate::tree::LayoutTree`] over a
//! native engine and owns every conversion into that engine's vocabulary.

#[cfg(feature = "backend-flexbox")]
mod flexbox;
#[cfg(feature = "backend-taffy")]
mod taffy_tree;

#[cfg(feature = "backend-flexbox")]
pub use flexbox::{FlexboxEngine, FlexboxTree};
#[cfg(feature = "backend-taffy")]
pub use taffy_tree::{TaffyEngine, TaffyLayoutTree};
