//! CSS Values & Units Level 3: §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::{ParseError, Percentage};
use cssparser::{Parser, ParserInput, Token};

/// Supported subset of CSS <length> units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
    ViewportWidth,
    ViewportHeight,
    ViewportMin,
    ViewportMax,
    Points,
    Picas,
    Inches,
    Centimeters,
    Millimeters,
}

impl LengthUnit {
    /// Map a dimension unit suffix (case-insensitive) to a `LengthUnit`.
    pub fn from_suffix(unit: &str) -> Option<Self> {
        let lower = unit.to_ascii_lowercase();
        let unit_kind = match lower.as_str() {
            "px" => Self::Pixels,
            "em" => Self::Ems,
            "rem" => Self::RootEms,
            "vw" => Self::ViewportWidth,
            "vh" => Self::ViewportHeight,
            "vmin" => Self::ViewportMin,
            "vmax" => Self::ViewportMax,
            "pt" => Self::Points,
            "pc" => Self::Picas,
            "in" => Self::Inches,
            "cm" => Self::Centimeters,
            "mm" => Self::Millimeters,
            _ => return None,
        };
        Some(unit_kind)
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    /// Construct a pixel length.
    #[inline]
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixels,
        }
    }
}

/// Viewport metrics used to evaluate viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

/// Environment needed to turn relative lengths into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitContext {
    /// Font size of the element the length is resolved for (inherited when resolving `font-size`).
    pub font_size_px: f32,
    /// Font size of the root element (`rem`).
    pub root_font_size_px: f32,
    /// Viewport for `vw`/`vh`/`vmin`/`vmax`; absent viewport makes those units unresolvable.
    pub viewport: Option<Viewport>,
}

/// Compute the pixel value for a given `Length` using the current environment.
///
/// - Pixels and absolute units: fixed ratios (96px per inch).
/// - Ems/RootEms: scales by the provided font sizes.
/// - Viewport-relative units: require a viewport; `None` otherwise.
pub fn compute_length_px(length: Length, context: &UnitContext) -> Option<f32> {
    let pixels = match length.unit {
        LengthUnit::Pixels => length.value,
        LengthUnit::Ems => length.value * context.font_size_px,
        LengthUnit::RootEms => length.value * context.root_font_size_px,
        LengthUnit::Points => length.value * 96.0 / 72.0,
        LengthUnit::Picas => length.value * 16.0,
        LengthUnit::Inches => length.value * 96.0,
        LengthUnit::Centimeters => length.value * 96.0 / 2.54,
        LengthUnit::Millimeters => length.value * 96.0 / 25.4,
        LengthUnit::ViewportWidth => context.viewport?.width_px * length.value / 100.0,
        LengthUnit::ViewportHeight => context.viewport?.height_px * length.value / 100.0,
        LengthUnit::ViewportMin => {
            let viewport = context.viewport?;
            viewport.width_px.min(viewport.height_px) * length.value / 100.0
        }
        LengthUnit::ViewportMax => {
            let viewport = context.viewport?;
            viewport.width_px.max(viewport.height_px) * length.value / 100.0
        }
    };
    pixels.is_finite().then_some(pixels)
}

/// Parse a CSS <length> (§6.2). Unitless zero is accepted per spec.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a supported `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let Ok(token) = input.next() else {
        return Err(ParseError::UnexpectedToken);
    };
    match token.clone() {
        Token::Dimension { value, unit, .. } => {
            if !value.is_finite() {
                return Err(ParseError::NonFinite);
            }
            LengthUnit::from_suffix(unit.as_ref())
                .map(|unit_kind| Length {
                    value,
                    unit: unit_kind,
                })
                .ok_or(ParseError::UnexpectedToken)
        }
        Token::Number { value: 0.0, .. } => Ok(Length::px(0.0)),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// A `<length-percentage>` or a bare `<number>` (treated as pixels by callers).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthOrPercentage {
    Length(Length),
    Percentage(Percentage),
    Number(f32),
}

/// Parse one `<length>`, `<percentage>` or `<number>` token.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for any other token.
pub fn parse_length_or_percentage(input: &mut Parser) -> Result<LengthOrPercentage, ParseError> {
    let Ok(token) = input.next() else {
        return Err(ParseError::UnexpectedToken);
    };
    match token.clone() {
        Token::Dimension { value, unit, .. } => {
            if !value.is_finite() {
                return Err(ParseError::NonFinite);
            }
            LengthUnit::from_suffix(unit.as_ref())
                .map(|unit_kind| {
                    LengthOrPercentage::Length(Length {
                        value,
                        unit: unit_kind,
                    })
                })
                .ok_or(ParseError::UnexpectedToken)
        }
        Token::Percentage { unit_value, .. } if unit_value.is_finite() => {
            Ok(LengthOrPercentage::Percentage(Percentage(unit_value)))
        }
        Token::Number { value, .. } if value.is_finite() => Ok(LengthOrPercentage::Number(value)),
        Token::Percentage { .. } | Token::Number { .. } => Err(ParseError::NonFinite),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a complete string as a single `<length-percentage>` or `<number>`.
///
/// # Errors
/// Returns a `ParseError` for unsupported tokens or trailing input.
pub fn parse_length_or_percentage_str(text: &str) -> Result<LengthOrPercentage, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let value = parse_length_or_percentage(&mut parser)?;
    if parser.is_exhausted() {
        Ok(value)
    } else {
        Err(ParseError::TrailingInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> UnitContext {
        UnitContext {
            font_size_px: 20.0,
            root_font_size_px: 16.0,
            viewport: Some(Viewport {
                width_px: 800.0,
                height_px: 600.0,
            }),
        }
    }

    #[test]
    fn relative_units_scale_by_environment() {
        let ctx = context();
        let em = Length {
            value: 1.5,
            unit: LengthUnit::Ems,
        };
        let rem = Length {
            value: 2.0,
            unit: LengthUnit::RootEms,
        };
        let vmin = Length {
            value: 10.0,
            unit: LengthUnit::ViewportMin,
        };
        assert_eq!(compute_length_px(em, &ctx), Some(30.0));
        assert_eq!(compute_length_px(rem, &ctx), Some(32.0));
        assert_eq!(compute_length_px(vmin, &ctx), Some(60.0));
    }

    #[test]
    fn viewport_units_need_a_viewport() {
        let ctx = UnitContext {
            viewport: None,
            ..context()
        };
        let vw = Length {
            value: 50.0,
            unit: LengthUnit::ViewportWidth,
        };
        assert_eq!(compute_length_px(vw, &ctx), None);
    }

    #[test]
    fn parses_length_percentage_and_number() {
        assert_eq!(
            parse_length_or_percentage_str("12px"),
            Ok(LengthOrPercentage::Length(Length::px(12.0)))
        );
        assert_eq!(
            parse_length_or_percentage_str("50%"),
            Ok(LengthOrPercentage::Percentage(Percentage(0.5)))
        );
        assert_eq!(
            parse_length_or_percentage_str("7"),
            Ok(LengthOrPercentage::Number(7.0))
        );
        assert_eq!(
            parse_length_or_percentage_str("1furlong"),
            Err(ParseError::UnexpectedToken)
        );
        assert_eq!(
            parse_length_or_percentage_str("1px 2px"),
            Err(ParseError::TrailingInput)
        );
    }

    #[test]
    fn percent_scale_round_trips() {
        let parsed = parse_length_or_percentage_str("33%");
        assert!(matches!(
            parsed,
            Ok(LengthOrPercentage::Percentage(percent)) if (percent.as_percent() - 33.0).abs() < 1e-6
        ));
    }
}
