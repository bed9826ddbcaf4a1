//! Cross-axis alignment and sizing for flex items.

use crate::chapter5::Align;
use crate::geometry::clamp;

/// Cross-size specification for flex items, distinguishing between
/// explicit sizes and items that should stretch to fill their line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CrossSize {
    /// Item has explicit cross-size (or intrinsic size with no stretch)
    Explicit(f32),
    /// Item should stretch to the line; value is the measured hypothetical size
    Stretch(f32),
}

impl CrossSize {
    /// The cross size before stretching.
    pub fn intrinsic_size(self) -> f32 {
        match self {
            Self::Explicit(size) | Self::Stretch(size) => size,
        }
    }
}

/// Final border-box cross size of an item inside a line of `line_cross` (margins excluded).
pub fn resolve_cross_size(
    size: CrossSize,
    line_cross: f32,
    margins: f32,
    min_cross: f32,
    max_cross: f32,
) -> f32 {
    match size {
        CrossSize::Stretch(_) => clamp(line_cross - margins, min_cross, max_cross),
        CrossSize::Explicit(explicit) => explicit,
    }
}

/// Offset of an item's outer box within its line for the effective `align-self`.
///
/// Baseline alignment is not tracked and packs like `flex-start`.
pub fn cross_offset(align: Align, line_cross: f32, outer_cross: f32) -> f32 {
    let free = line_cross - outer_cross;
    match align {
        Align::FlexEnd => free,
        Align::Center => free * 0.5,
        _ => 0.0,
    }
}
