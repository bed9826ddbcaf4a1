//! Grid item placement values.
//!
//! Spec: §8.3 Line-based Placement
//! <https://www.w3.org/TR/css-grid-2/#line-placement>

/// One side of an item's placement (`grid-row-start`, `grid-column-end`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridPlacement {
    /// Auto-placement
    #[default]
    Auto,
    /// An explicit line number (negative counts from the end)
    Line(i16),
    /// Span a number of tracks
    Span(u16),
    /// A named area; resolved against `grid-template-areas` by the caller
    Named(String),
}

/// Parse one placement value. Anything unrecognized is treated as `auto`.
pub fn parse_placement(raw: &str) -> GridPlacement {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return GridPlacement::Auto;
    }
    let words: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match words.as_slice() {
        [keyword, count] if keyword.eq_ignore_ascii_case("span") => count
            .parse::<u16>()
            .ok()
            .filter(|span| *span > 0)
            .map_or(GridPlacement::Auto, GridPlacement::Span),
        [single] => single.parse::<i16>().map_or_else(
            |_| {
                if is_identifier(single) {
                    GridPlacement::Named((*single).to_owned())
                } else {
                    GridPlacement::Auto
                }
            },
            |line| {
                if line == 0 {
                    GridPlacement::Auto
                } else {
                    GridPlacement::Line(line)
                }
            },
        ),
        _ => GridPlacement::Auto,
    }
}

/// A conservative CSS `<custom-ident>` check.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '-')
        && chars.all(|character| {
            character.is_ascii_alphanumeric() || character == '_' || character == '-'
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_spans_and_names() {
        assert_eq!(parse_placement("auto"), GridPlacement::Auto);
        assert_eq!(parse_placement("2"), GridPlacement::Line(2));
        assert_eq!(parse_placement("-1"), GridPlacement::Line(-1));
        assert_eq!(parse_placement("span 3"), GridPlacement::Span(3));
        assert_eq!(parse_placement("sidebar"), GridPlacement::Named("sidebar".to_owned()));
    }

    #[test]
    fn invalid_values_fall_back_to_auto() {
        assert_eq!(parse_placement("0"), GridPlacement::Auto);
        assert_eq!(parse_placement("span 0"), GridPlacement::Auto);
        assert_eq!(parse_placement("1 2 3"), GridPlacement::Auto);
        assert_eq!(parse_placement("9bad"), GridPlacement::Auto);
    }
}
