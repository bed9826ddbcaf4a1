//! CSS Values and Units Module Level 3: numbers, percentages and lengths.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;

pub use chapter_4_numbers::{Number, parse_number, parse_number_str};
pub use chapter_5_percentages::{Percentage, parse_percentage};
pub use chapter_6_dimensions::{
    Length, LengthOrPercentage, LengthUnit, UnitContext, Viewport, compute_length_px,
    parse_length, parse_length_or_percentage, parse_length_or_percentage_str,
};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A value parsed but trailing input remained.
    TrailingInput,
    /// The parsed number was NaN or infinite.
    NonFinite,
}
