//! CSS Grid Layout Module Level 2: template and placement syntax.
//! Spec: <https://www.w3.org/TR/css-grid-2/>
//!
//! This crate turns grid shorthand strings into backend-independent track and
//! placement descriptors. It never fails: grid is an enhancement, so anything it
//! cannot classify is dropped with a warning.

// Track descriptors
mod types;
pub use types::{GridAutoFlow, GridTrack, TrackBreadth, parse_auto_flow};

// `grid-template-rows` / `grid-template-columns` / `grid-auto-*`
mod template;
pub use template::{parse_template, parse_template_with};

// `grid-template-areas`
mod areas;
pub use areas::{GridArea, parse_area, resolve_areas};

// `grid-row-start` and friends
mod placement;
pub use placement::{GridPlacement, parse_placement};
