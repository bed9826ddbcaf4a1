//! Main-axis sizing and distribution.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

pub mod flex_algorithm;
pub mod main_axis;

pub use flex_algorithm::{FlexFactors, resolve_flexible_lengths};
pub use main_axis::{distribute_auto_margins, justify_params};
