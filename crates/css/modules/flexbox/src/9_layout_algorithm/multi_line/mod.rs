//! Multi-line flex containers.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-lines>

pub mod align_content;
pub mod line_breaking;

pub use align_content::{align_content_params, stretch_line_crosses};
pub use line_breaking::{LineRange, break_into_lines};
