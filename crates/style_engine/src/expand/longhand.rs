//! Parsing of single longhand values into resolved values.

use css_grid::{GridPlacement, parse_area, parse_auto_flow, parse_placement, parse_template_with};
use css_values_units::{
    LengthOrPercentage, UnitContext, compute_length_px, parse_length_or_percentage_str,
    parse_number_str,
};

use crate::property::{Property, ValueKind};
use crate::value::{DeclaredValue, Keyword, StyleValue};

/// Resolve one longhand; `None` when the value is invalid for the property.
pub(crate) fn parse_longhand(
    property: Property,
    raw: &DeclaredValue,
    units: &UnitContext,
) -> Option<StyleValue> {
    match property.kind() {
        ValueKind::LengthPercentageAuto => keyword_or(raw, &[("auto", Keyword::Auto)])
            .or_else(|| length_percentage(raw, units, true)),
        ValueKind::LengthPercentage => length_percentage(raw, units, false),
        ValueKind::MinSize => keyword_or(raw, &[("auto", Keyword::Auto)])
            .or_else(|| length_percentage(raw, units, false)),
        ValueKind::MaxSize => keyword_or(raw, &[("none", Keyword::None)])
            .or_else(|| length_percentage(raw, units, false)),
        ValueKind::BorderWidth => border_width(raw, units),
        ValueKind::Factor => number(raw)
            .filter(|factor| *factor >= 0.0)
            .map(StyleValue::Number),
        ValueKind::AspectRatio => {
            keyword_or(raw, &[("auto", Keyword::Auto)]).or_else(|| aspect_ratio(raw))
        }
        ValueKind::Keyword(table) => keyword_or(raw, table),
        ValueKind::TrackList => keyword_or(raw, &[("none", Keyword::None)]).or_else(|| {
            let text = text(raw)?;
            let normalized = collapse_whitespace(text);
            (!parse_template_with(&normalized, units).is_empty())
                .then_some(StyleValue::Text(normalized))
        }),
        ValueKind::Areas => keyword_or(raw, &[("none", Keyword::None)]).or_else(|| {
            let rows = parse_area(text(raw)?);
            let columns = rows.first()?.len();
            rows.iter()
                .all(|row| row.len() == columns)
                .then(|| {
                    let quoted: Vec<String> = rows
                        .iter()
                        .map(|row| format!("\"{}\"", row.join(" ")))
                        .collect();
                    StyleValue::Text(quoted.join(" "))
                })
        }),
        ValueKind::AutoFlow => {
            let text = text(raw)?;
            parse_auto_flow(text)?;
            Some(StyleValue::Text(collapse_whitespace(text).to_ascii_lowercase()))
        }
        ValueKind::GridLine => grid_line(raw),
        ValueKind::FontSize => font_size(raw, units),
        ValueKind::LineHeight => line_height(raw, units),
    }
}

fn text(raw: &DeclaredValue) -> Option<&str> {
    match raw {
        DeclaredValue::Text(text) => Some(text.trim()),
        DeclaredValue::Number(_) => None,
    }
}

fn number(raw: &DeclaredValue) -> Option<f32> {
    match raw {
        DeclaredValue::Number(number) => number.is_finite().then_some(*number),
        DeclaredValue::Text(text) => parse_number_str(text.trim()).ok().map(|number| number.0),
    }
}

fn keyword_or(raw: &DeclaredValue, table: &[(&str, Keyword)]) -> Option<StyleValue> {
    let word = text(raw)?;
    table
        .iter()
        .find(|(name, _)| word.eq_ignore_ascii_case(name))
        .map(|(_, keyword)| StyleValue::Keyword(*keyword))
}

/// `<length-percentage>` or a bare number (pixels) into pixels or a percentage.
fn length_percentage(
    raw: &DeclaredValue,
    units: &UnitContext,
    allow_negative: bool,
) -> Option<StyleValue> {
    let value = match raw {
        DeclaredValue::Number(number) => StyleValue::Number(*number),
        DeclaredValue::Text(text) => match parse_length_or_percentage_str(text.trim()).ok()? {
            LengthOrPercentage::Length(length) => {
                StyleValue::Number(compute_length_px(length, units)?)
            }
            LengthOrPercentage::Percentage(percentage) => {
                StyleValue::Percent(percentage.as_percent())
            }
            LengthOrPercentage::Number(number) => StyleValue::Number(number),
        },
    };
    let amount = match value {
        StyleValue::Number(amount) | StyleValue::Percent(amount) => amount,
        StyleValue::Keyword(_) | StyleValue::Text(_) => return None,
    };
    (amount.is_finite() && (allow_negative || amount >= 0.0)).then_some(value)
}

fn border_width(raw: &DeclaredValue, units: &UnitContext) -> Option<StyleValue> {
    let named = text(raw).and_then(|word| match word.to_ascii_lowercase().as_str() {
        "thin" => Some(1.0),
        "medium" => Some(3.0),
        "thick" => Some(5.0),
        _ => None,
    });
    if let Some(width) = named {
        return Some(StyleValue::Number(width));
    }
    match length_percentage(raw, units, false)? {
        StyleValue::Number(width) => Some(StyleValue::Number(width)),
        _ => None,
    }
}

/// `a / b` or a bare positive number.
fn aspect_ratio(raw: &DeclaredValue) -> Option<StyleValue> {
    let ratio = match raw {
        DeclaredValue::Number(number) => *number,
        DeclaredValue::Text(text) => match text.split_once('/') {
            Some((numerator, denominator)) => {
                let width = parse_number_str(numerator.trim()).ok()?.0;
                let height = parse_number_str(denominator.trim()).ok()?.0;
                if height <= 0.0 {
                    return None;
                }
                width / height
            }
            None => parse_number_str(text.trim()).ok()?.0,
        },
    };
    (ratio.is_finite() && ratio > 0.0).then_some(StyleValue::Number(ratio))
}

fn grid_line(raw: &DeclaredValue) -> Option<StyleValue> {
    let placement = match raw {
        DeclaredValue::Number(number) => {
            if number.fract() != 0.0 {
                return None;
            }
            parse_placement(&format!("{number}"))
        }
        DeclaredValue::Text(text) => {
            if text.trim().eq_ignore_ascii_case("auto") {
                return Some(StyleValue::Keyword(Keyword::Auto));
            }
            parse_placement(text)
        }
    };
    match placement {
        GridPlacement::Auto => None,
        GridPlacement::Line(line) => Some(StyleValue::Text(line.to_string())),
        GridPlacement::Span(span) => Some(StyleValue::Text(format!("span {span}"))),
        GridPlacement::Named(name) => Some(StyleValue::Text(name)),
    }
}

/// `units.font_size_px` is the parent's font size here.
fn font_size(raw: &DeclaredValue, units: &UnitContext) -> Option<StyleValue> {
    match length_percentage(raw, units, false)? {
        StyleValue::Percent(percent) => {
            Some(StyleValue::Number(units.font_size_px * percent / 100.0))
        }
        other => Some(other),
    }
}

/// Stored as a multiplier of the element's font size.
fn line_height(raw: &DeclaredValue, units: &UnitContext) -> Option<StyleValue> {
    if text(raw).is_some_and(|word| word.eq_ignore_ascii_case("normal")) {
        return Some(StyleValue::Number(1.2));
    }
    if let Some(factor) = number(raw) {
        return (factor >= 0.0).then_some(StyleValue::Number(factor));
    }
    match length_percentage(raw, units, false)? {
        StyleValue::Percent(percent) => Some(StyleValue::Number(percent / 100.0)),
        StyleValue::Number(pixels) if units.font_size_px > 0.0 => {
            Some(StyleValue::Number(pixels / units.font_size_px))
        }
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: UnitContext = UnitContext {
        font_size_px: 20.0,
        root_font_size_px: 16.0,
        viewport: None,
    };

    fn parse(property: Property, raw: &str) -> Option<StyleValue> {
        parse_longhand(property, &DeclaredValue::from(raw), &UNITS)
    }

    #[test]
    fn lengths_resolve_relative_units() {
        assert_eq!(parse(Property::Width, "2em"), Some(StyleValue::Number(40.0)));
        assert_eq!(parse(Property::Width, "1.5rem"), Some(StyleValue::Number(24.0)));
        assert_eq!(parse(Property::Width, "50%"), Some(StyleValue::Percent(50.0)));
        assert_eq!(parse(Property::Width, "auto"), Some(StyleValue::Keyword(Keyword::Auto)));
        assert_eq!(parse(Property::Width, "10vw"), None);
        assert_eq!(parse(Property::PaddingTop, "-4px"), None);
        assert_eq!(parse(Property::MarginTop, "-4px"), Some(StyleValue::Number(-4.0)));
    }

    #[test]
    fn keywords_fold_aliases() {
        assert_eq!(
            parse(Property::JustifyContent, "start"),
            Some(StyleValue::Keyword(Keyword::FlexStart))
        );
        assert_eq!(
            parse(Property::AlignItems, "normal"),
            Some(StyleValue::Keyword(Keyword::Stretch))
        );
        assert_eq!(
            parse(Property::OverflowX, "clip"),
            Some(StyleValue::Keyword(Keyword::Hidden))
        );
        assert_eq!(parse(Property::Display, "table"), None);
    }

    #[test]
    fn aspect_ratio_accepts_fractions() {
        assert_eq!(parse(Property::AspectRatio, "16 / 8"), Some(StyleValue::Number(2.0)));
        assert_eq!(parse(Property::AspectRatio, "1.5"), Some(StyleValue::Number(1.5)));
        assert_eq!(parse(Property::AspectRatio, "1 / 0"), None);
    }

    #[test]
    fn grid_values_are_validated_and_normalized() {
        assert_eq!(
            parse(Property::GridTemplateColumns, "  1fr   100px "),
            Some(StyleValue::Text("1fr 100px".to_owned()))
        );
        assert_eq!(parse(Property::GridTemplateColumns, "bogus"), None);
        assert_eq!(
            parse(Property::GridTemplateAreas, "'a b'\n'c d'"),
            Some(StyleValue::Text("\"a b\" \"c d\"".to_owned()))
        );
        assert_eq!(parse(Property::GridTemplateAreas, "\"a b\" \"c\""), None);
        assert_eq!(
            parse(Property::GridRowStart, "span 2"),
            Some(StyleValue::Text("span 2".to_owned()))
        );
        assert_eq!(
            parse(Property::GridAutoFlow, "Column  dense"),
            Some(StyleValue::Text("column dense".to_owned()))
        );
    }

    #[test]
    fn font_metrics_use_parent_size() {
        assert_eq!(parse(Property::FontSize, "150%"), Some(StyleValue::Number(30.0)));
        assert_eq!(parse(Property::LineHeight, "30px"), Some(StyleValue::Number(1.5)));
        assert_eq!(parse(Property::LineHeight, "normal"), Some(StyleValue::Number(1.2)));
    }
}
