//! Grid track type definitions.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

/// One sizing breadth of a track.
///
/// Spec: §7.2.1 Track Sizing Functions
/// <https://www.w3.org/TR/css-grid-2/#track-sizing>
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackBreadth {
    /// Length in pixels
    Length(f32),
    /// Percentage of the grid container, on the 0..=100 scale
    Percentage(f32),
    /// Flex factor (fr units)
    Flex(f32),
    /// Minimum content size
    MinContent,
    /// Maximum content size
    MaxContent,
    /// Automatic sizing
    Auto,
}

impl TrackBreadth {
    /// Check if this breadth is flexible (uses fr units).
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Flex(_))
    }
}

/// A single row or column definition.
///
/// Spec: §7.2.1 Track Sizing Functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridTrack {
    /// A single breadth used as both minimum and maximum.
    Breadth(TrackBreadth),
    /// `minmax(min, max)`
    MinMax(TrackBreadth, TrackBreadth),
    /// `fit-content(limit)`: a length or percentage cap on a content-sized track.
    FitContent(TrackBreadth),
}

impl GridTrack {
    /// Shorthand for a fixed pixel track.
    pub const fn px(value: f32) -> Self {
        Self::Breadth(TrackBreadth::Length(value))
    }

    /// Shorthand for a flexible `fr` track.
    pub const fn fr(factor: f32) -> Self {
        Self::Breadth(TrackBreadth::Flex(factor))
    }

    /// Get the minimum breadth for this track.
    pub fn min_breadth(&self) -> TrackBreadth {
        match *self {
            Self::Breadth(TrackBreadth::Flex(_)) | Self::FitContent(_) => TrackBreadth::Auto,
            Self::Breadth(breadth) | Self::MinMax(breadth, _) => breadth,
        }
    }

    /// Get the maximum breadth for this track. A `fit-content` track reports
    /// `max-content`; its limit is only visible through the variant.
    pub fn max_breadth(&self) -> TrackBreadth {
        match *self {
            Self::Breadth(breadth) | Self::MinMax(_, breadth) => breadth,
            Self::FitContent(_) => TrackBreadth::MaxContent,
        }
    }
}

/// Auto-placement algorithm direction.
///
/// Spec: §8.5 Grid Item Placement Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAutoFlow {
    /// Place items row by row
    #[default]
    Row,
    /// Place items column by column
    Column,
    /// Pack items densely (try to fill holes)
    RowDense,
    /// Pack items densely in columns
    ColumnDense,
}

/// Parse a `grid-auto-flow` value. Unknown values yield `None`.
pub fn parse_auto_flow(raw: &str) -> Option<GridAutoFlow> {
    let mut column = false;
    let mut dense = false;
    let mut seen_any = false;
    for word in raw.split_ascii_whitespace() {
        seen_any = true;
        if word.eq_ignore_ascii_case("row") {
            column = false;
        } else if word.eq_ignore_ascii_case("column") {
            column = true;
        } else if word.eq_ignore_ascii_case("dense") {
            dense = true;
        } else {
            return None;
        }
    }
    if !seen_any {
        return None;
    }
    Some(match (column, dense) {
        (false, false) => GridAutoFlow::Row,
        (false, true) => GridAutoFlow::RowDense,
        (true, false) => GridAutoFlow::Column,
        (true, true) => GridAutoFlow::ColumnDense,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_breadth_has_auto_minimum() {
        assert_eq!(GridTrack::fr(2.0).min_breadth(), TrackBreadth::Auto);
        assert_eq!(GridTrack::fr(2.0).max_breadth(), TrackBreadth::Flex(2.0));
        let track = GridTrack::MinMax(TrackBreadth::Length(20.0), TrackBreadth::Flex(1.0));
        assert_eq!(track.min_breadth(), TrackBreadth::Length(20.0));
    }

    #[test]
    fn auto_flow_keywords_combine() {
        assert_eq!(parse_auto_flow("row"), Some(GridAutoFlow::Row));
        assert_eq!(parse_auto_flow("dense"), Some(GridAutoFlow::RowDense));
        assert_eq!(parse_auto_flow("column dense"), Some(GridAutoFlow::ColumnDense));
        assert_eq!(parse_auto_flow("sideways"), None);
        assert_eq!(parse_auto_flow(""), None);
    }
}
