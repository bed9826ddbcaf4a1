//! Shorthand fan-out into longhand declarations.
//!
//! Expansion works on raw text; each produced longhand is parsed afterwards like
//! any other declaration. An unparseable shorthand resets all its longhands.

use css_values_units::parse_number_str;
use log::debug;

use crate::property::{Property, Shorthand};
use crate::value::DeclaredValue;

/// Raw value that resets a longhand to its initial value.
pub(crate) const INITIAL: &str = "initial";

/// Fan `raw` out into `(longhand, raw value)` pairs.
pub(crate) fn expand_shorthand(
    shorthand: Shorthand,
    raw: &DeclaredValue,
) -> Vec<(Property, DeclaredValue)> {
    let text = raw.to_string();
    let trimmed = text.trim();
    let longhands = shorthand.longhands();
    if is_css_wide(trimmed) {
        return longhands
            .iter()
            .map(|property| (*property, DeclaredValue::from(trimmed)))
            .collect();
    }
    let values = match shorthand {
        Shorthand::Flex => flex(raw, trimmed),
        Shorthand::FlexFlow => flex_flow(trimmed),
        Shorthand::Margin
        | Shorthand::Padding
        | Shorthand::BorderWidth
        | Shorthand::Inset => box_sides(raw, trimmed),
        Shorthand::Border
        | Shorthand::BorderTop
        | Shorthand::BorderRight
        | Shorthand::BorderBottom
        | Shorthand::BorderLeft => border(raw, trimmed, longhands.len()),
        Shorthand::Gap | Shorthand::Overflow | Shorthand::PlaceContent => pair(raw, trimmed),
        Shorthand::GridRow | Shorthand::GridColumn => grid_line_pair(trimmed),
        Shorthand::GridArea => grid_area(trimmed),
        Shorthand::PlaceItems => first_word(trimmed),
    };
    let Some(values) = values.filter(|values| values.len() == longhands.len()) else {
        debug!(
            target: "style::expand",
            "invalid `{}: {trimmed}`, resetting its longhands",
            shorthand.name()
        );
        return longhands
            .iter()
            .map(|property| (*property, DeclaredValue::from(INITIAL)))
            .collect();
    };
    longhands.iter().copied().zip(values).collect()
}

pub(crate) fn is_css_wide(text: &str) -> bool {
    ["initial", "inherit", "unset"]
        .iter()
        .any(|keyword| text.eq_ignore_ascii_case(keyword))
}

fn is_number(word: &str) -> bool {
    parse_number_str(word).is_ok()
}

/// `none`, `auto`, `<grow>`, `<basis>`, `<grow> <shrink>`, `<grow> <basis>`, `<grow> <shrink> <basis>`.
fn flex(raw: &DeclaredValue, text: &str) -> Option<Vec<DeclaredValue>> {
    if let DeclaredValue::Number(grow) = raw {
        return Some(vec![
            DeclaredValue::Number(*grow),
            DeclaredValue::Number(1.0),
            DeclaredValue::from("0%"),
        ]);
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let values: [&str; 3] = match words.as_slice() {
        [keyword] if keyword.eq_ignore_ascii_case("none") => ["0", "0", "auto"],
        [keyword] if keyword.eq_ignore_ascii_case("auto") => ["1", "1", "auto"],
        [grow] if is_number(grow) => [*grow, "1", "0%"],
        [basis] => ["1", "1", *basis],
        [grow, shrink] if is_number(grow) && is_number(shrink) => [*grow, *shrink, "0%"],
        [grow, basis] if is_number(grow) => [*grow, "1", *basis],
        [basis, grow] if is_number(grow) => [*grow, "1", *basis],
        [grow, shrink, basis] if is_number(grow) && is_number(shrink) => {
            [*grow, *shrink, *basis]
        }
        _ => return None,
    };
    Some(values.iter().map(|value| DeclaredValue::from(*value)).collect())
}

/// Direction and wrap in either order.
fn flex_flow(text: &str) -> Option<Vec<DeclaredValue>> {
    let mut direction = "row";
    let mut wrap = "nowrap";
    for word in text.split_whitespace() {
        let lower = word.to_ascii_lowercase();
        if matches!(
            lower.as_str(),
            "row" | "row-reverse" | "column" | "column-reverse"
        ) {
            direction = word;
        } else if matches!(lower.as_str(), "nowrap" | "wrap" | "wrap-reverse") {
            wrap = word;
        } else {
            return None;
        }
    }
    Some(vec![direction.into(), wrap.into()])
}

/// One to four values: top, right, bottom, left with the usual copying rules.
fn box_sides(raw: &DeclaredValue, text: &str) -> Option<Vec<DeclaredValue>> {
    if let DeclaredValue::Number(all) = raw {
        return Some(vec![(*all).into(); 4]);
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let [top, right, bottom, left] = match words.as_slice() {
        [all] => [*all; 4],
        [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
        [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
        [top, right, bottom, left] => [*top, *right, *bottom, *left],
        _ => return None,
    };
    Some(vec![top.into(), right.into(), bottom.into(), left.into()])
}

/// Width out of `<width> || <style> || <color>`; style and color are ignored.
fn border(raw: &DeclaredValue, text: &str, sides: usize) -> Option<Vec<DeclaredValue>> {
    if let DeclaredValue::Number(width) = raw {
        return Some(vec![(*width).into(); sides]);
    }
    if text.eq_ignore_ascii_case("none") {
        return Some(vec![DeclaredValue::Number(0.0); sides]);
    }
    let width = text
        .split_whitespace()
        .find(|word| {
            let lower = word.to_ascii_lowercase();
            matches!(lower.as_str(), "thin" | "medium" | "thick")
                || lower.starts_with(|character: char| {
                    character.is_ascii_digit() || character == '.'
                })
        })
        .unwrap_or("medium");
    let has_style = text.split_whitespace().any(|word| {
        !matches!(word.to_ascii_lowercase().as_str(), "none" | "hidden")
            && BORDER_STYLES.contains(&word.to_ascii_lowercase().as_str())
    });
    let width = if has_style { width } else { "0" };
    Some(vec![width.into(); sides])
}

const BORDER_STYLES: &[&str] = &[
    "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset",
];

/// One or two values; the second copies the first when absent.
fn pair(raw: &DeclaredValue, text: &str) -> Option<Vec<DeclaredValue>> {
    if let DeclaredValue::Number(both) = raw {
        return Some(vec![(*both).into(); 2]);
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [both] => Some(vec![(*both).into(); 2]),
        [first, second] => Some(vec![(*first).into(), (*second).into()]),
        _ => None,
    }
}

fn first_word(text: &str) -> Option<Vec<DeclaredValue>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        [first] | [first, _] => Some(vec![(*first).into()]),
        _ => None,
    }
}

fn is_ident(text: &str) -> bool {
    !text.is_empty()
        && !text.eq_ignore_ascii_case("auto")
        && !text.to_ascii_lowercase().starts_with("span")
        && text.parse::<i16>().is_err()
}

/// `<start> [/ <end>]`; a lone area name is copied to the end line.
fn grid_line_pair(text: &str) -> Option<Vec<DeclaredValue>> {
    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    match parts.as_slice() {
        [start] => {
            let end = if is_ident(start) { *start } else { "auto" };
            Some(vec![(*start).into(), end.into()])
        }
        [start, end] => Some(vec![(*start).into(), (*end).into()]),
        _ => None,
    }
}

/// `<row-start> [/ <column-start> [/ <row-end> [/ <column-end>]]]`.
fn grid_area(text: &str) -> Option<Vec<DeclaredValue>> {
    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    if parts.is_empty() || parts.len() > 4 || parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    let row_start = parts[0];
    let column_start = parts
        .get(1)
        .copied()
        .unwrap_or(if is_ident(row_start) { row_start } else { "auto" });
    let row_end = parts
        .get(2)
        .copied()
        .unwrap_or(if is_ident(row_start) { row_start } else { "auto" });
    let column_end = parts
        .get(3)
        .copied()
        .unwrap_or(if is_ident(column_start) { column_start } else { "auto" });
    Some(vec![
        row_start.into(),
        column_start.into(),
        row_end.into(),
        column_end.into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(pairs: &[(Property, DeclaredValue)]) -> Vec<String> {
        pairs.iter().map(|(_, value)| value.to_string()).collect()
    }

    #[test]
    fn flex_forms() {
        let one = expand_shorthand(Shorthand::Flex, &DeclaredValue::from("2"));
        assert_eq!(texts(&one), ["2", "1", "0%"]);
        let none = expand_shorthand(Shorthand::Flex, &DeclaredValue::from("none"));
        assert_eq!(texts(&none), ["0", "0", "auto"]);
        let basis = expand_shorthand(Shorthand::Flex, &DeclaredValue::from("1 100px"));
        assert_eq!(texts(&basis), ["1", "1", "100px"]);
        let full = expand_shorthand(Shorthand::Flex, &DeclaredValue::from("0 2 30%"));
        assert_eq!(texts(&full), ["0", "2", "30%"]);
        let numeric = expand_shorthand(Shorthand::Flex, &DeclaredValue::Number(3.0));
        assert_eq!(texts(&numeric), ["3", "1", "0%"]);
    }

    #[test]
    fn box_sides_copy_values() {
        let two = expand_shorthand(Shorthand::Margin, &DeclaredValue::from("1px 2px"));
        assert_eq!(texts(&two), ["1px", "2px", "1px", "2px"]);
        let three = expand_shorthand(Shorthand::Padding, &DeclaredValue::from("1px 2px 3px"));
        assert_eq!(texts(&three), ["1px", "2px", "3px", "2px"]);
    }

    #[test]
    fn border_needs_a_style() {
        let solid = expand_shorthand(Shorthand::Border, &DeclaredValue::from("2px solid red"));
        assert_eq!(texts(&solid), ["2px"; 4]);
        let bare = expand_shorthand(Shorthand::BorderTop, &DeclaredValue::from("2px"));
        assert_eq!(texts(&bare), ["0"]);
        let medium = expand_shorthand(Shorthand::BorderLeft, &DeclaredValue::from("dashed"));
        assert_eq!(texts(&medium), ["medium"]);
    }

    #[test]
    fn grid_shorthands_split_on_slash() {
        let area = expand_shorthand(Shorthand::GridArea, &DeclaredValue::from("header"));
        assert_eq!(texts(&area), ["header"; 4]);
        let lines = expand_shorthand(Shorthand::GridColumn, &DeclaredValue::from("1 / span 2"));
        assert_eq!(texts(&lines), ["1", "span 2"]);
        let single = expand_shorthand(Shorthand::GridRow, &DeclaredValue::from("2"));
        assert_eq!(texts(&single), ["2", "auto"]);
    }

    #[test]
    fn invalid_shorthand_resets_longhands() {
        let broken = expand_shorthand(Shorthand::Margin, &DeclaredValue::from("1 2 3 4 5"));
        assert_eq!(texts(&broken), [INITIAL; 4]);
        let flow = expand_shorthand(Shorthand::FlexFlow, &DeclaredValue::from("column wrap"));
        assert_eq!(texts(&flow), ["column", "wrap"]);
    }
}
