//! CSS Values & Units Level 3: §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

use crate::ParseError;
use cssparser::{Parser, Token};

/// A CSS <percentage>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentage(pub f32); // stored as 0.0..=1.0

impl Percentage {
    /// The percentage expressed on the 0..=100 scale used in serialized CSS.
    ///
    /// Rounded to three decimals so that re-parsing a serialized value is stable.
    #[inline]
    pub fn as_percent(self) -> f32 {
        (self.0 * 100_000.0).round() / 1000.0
    }
}

/// Parse a CSS <percentage> (§5.1).
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<percentage>`.
pub fn parse_percentage(input: &mut Parser) -> Result<Percentage, ParseError> {
    if let Ok(token) = input.next()
        && let Token::Percentage { unit_value, .. } = token.clone()
    {
        if !unit_value.is_finite() {
            return Err(ParseError::NonFinite);
        }
        return Ok(Percentage(unit_value));
    }
    Err(ParseError::UnexpectedToken)
}
