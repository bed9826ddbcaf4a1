//! Track list parsing for `grid-template-*` and `grid-auto-*`.
//!
//! Spec: §7.2 Explicit Track Sizing
//! <https://www.w3.org/TR/css-grid-2/#track-sizing>

use crate::types::{GridTrack, TrackBreadth};
use css_values_units::{
    LengthOrPercentage, UnitContext, compute_length_px, parse_length_or_percentage_str,
};
use log::warn;

/// Unit environment used when the caller has none: 16px fonts, no viewport.
const DEFAULT_UNITS: UnitContext = UnitContext {
    font_size_px: 16.0,
    root_font_size_px: 16.0,
    viewport: None,
};

/// Upper bound on `repeat()` counts; larger counts are clamped.
const MAX_REPEAT_COUNT: usize = 1000;

/// Parse a track list using default units (16px `em`, no viewport units).
pub fn parse_template(raw: &str) -> Vec<GridTrack> {
    parse_template_with(raw, &DEFAULT_UNITS)
}

/// Parse a track list into tracks, resolving relative lengths against `units`.
///
/// `repeat(N, pattern)` is expanded literally first. The result is then split on
/// whitespace with parenthesized calls kept whole. Line names (`[a b]`) are
/// skipped; any token that cannot be classified is dropped.
pub fn parse_template_with(raw: &str, units: &UnitContext) -> Vec<GridTrack> {
    let expanded = expand_repeats(raw);
    split_top_level(&expanded)
        .into_iter()
        .filter(|token| !token.starts_with('['))
        .filter_map(|token| {
            let track = classify_track(token, units);
            if track.is_none() {
                warn!(target: "css::grid::parse", "dropping unrecognized grid track `{token}`");
            }
            track
        })
        .collect()
}

/// Find an ASCII function name (case-insensitive) in `text`.
fn find_function(text: &str, name: &str) -> Option<usize> {
    text.to_ascii_lowercase().find(name)
}

/// Given text just after an opening parenthesis, return the byte index of its closing one.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (index, character) in text.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte index of the first comma outside any parentheses.
fn top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, character) in text.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}

/// Replace every `repeat(N, pattern)` with `pattern` written out N times.
fn expand_repeats(raw: &str) -> String {
    const REPEAT: &str = "repeat(";
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = find_function(rest, REPEAT) {
        out.push_str(&rest[..start]);
        let body_start = start + REPEAT.len();
        let Some(body_len) = matching_paren(&rest[body_start..]) else {
            warn!(target: "css::grid::parse", "unterminated repeat() in `{raw}`");
            return out;
        };
        let body = &rest[body_start..body_start + body_len];
        out.push(' ');
        out.push_str(&expand_one_repeat(body));
        out.push(' ');
        rest = &rest[body_start + body_len + 1..];
    }
    out.push_str(rest);
    out
}

/// Expand the arguments of one `repeat()` call.
fn expand_one_repeat(body: &str) -> String {
    let Some(comma) = top_level_comma(body) else {
        warn!(target: "css::grid::parse", "repeat() without a track list: `{body}`");
        return String::new();
    };
    let count_text = body[..comma].trim();
    let pattern = expand_repeats(body[comma + 1..].trim());
    let Ok(count) = count_text.parse::<usize>() else {
        warn!(
            target: "css::grid::parse",
            "unsupported repeat count `{count_text}`; dropping repeat()"
        );
        return String::new();
    };
    if count > MAX_REPEAT_COUNT {
        warn!(target: "css::grid::parse", "clamping repeat count {count} to {MAX_REPEAT_COUNT}");
    }
    vec![pattern.trim(); count.min(MAX_REPEAT_COUNT)].join(" ")
}

/// Split on whitespace, keeping `(...)` and `[...]` groups intact.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut token_start: Option<usize> = None;
    for (index, character) in text.char_indices() {
        match character {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if character.is_whitespace() && depth == 0 {
            if let Some(start) = token_start.take() {
                tokens.push(&text[start..index]);
            }
        } else if token_start.is_none() {
            token_start = Some(index);
        }
    }
    if let Some(start) = token_start {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Classify one track token.
fn classify_track(token: &str, units: &UnitContext) -> Option<GridTrack> {
    let lower = token.to_ascii_lowercase();
    if let Some(arguments) = lower
        .strip_prefix("minmax(")
        .and_then(|inner| inner.strip_suffix(')'))
    {
        let comma = top_level_comma(arguments)?;
        let min = classify_breadth(arguments[..comma].trim(), units)?;
        let max = classify_breadth(arguments[comma + 1..].trim(), units)?;
        // A flexible minimum is invalid.
        if min.is_flexible() {
            return None;
        }
        return Some(GridTrack::MinMax(min, max));
    }
    if let Some(argument) = lower
        .strip_prefix("fit-content(")
        .and_then(|inner| inner.strip_suffix(')'))
    {
        return match classify_breadth(argument.trim(), units)? {
            limit @ (TrackBreadth::Length(_) | TrackBreadth::Percentage(_)) => {
                Some(GridTrack::FitContent(limit))
            }
            TrackBreadth::Flex(_)
            | TrackBreadth::MinContent
            | TrackBreadth::MaxContent
            | TrackBreadth::Auto => None,
        };
    }
    classify_breadth(&lower, units).map(GridTrack::Breadth)
}

/// Classify a single breadth by its suffix or keyword.
fn classify_breadth(token: &str, units: &UnitContext) -> Option<TrackBreadth> {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "auto" => return Some(TrackBreadth::Auto),
        "min-content" => return Some(TrackBreadth::MinContent),
        "max-content" => return Some(TrackBreadth::MaxContent),
        _ => {}
    }
    if let Some(number) = lower.strip_suffix("fr") {
        let factor = number.trim().parse::<f32>().ok()?;
        return (factor.is_finite() && factor >= 0.0).then_some(TrackBreadth::Flex(factor));
    }
    let breadth = match parse_length_or_percentage_str(&lower).ok()? {
        LengthOrPercentage::Length(length) => TrackBreadth::Length(compute_length_px(length, units)?),
        LengthOrPercentage::Percentage(percent) => TrackBreadth::Percentage(percent.as_percent()),
        LengthOrPercentage::Number(pixels) => TrackBreadth::Length(pixels),
    };
    match breadth {
        TrackBreadth::Length(value) | TrackBreadth::Percentage(value) if value < 0.0 => None,
        TrackBreadth::Length(_)
        | TrackBreadth::Percentage(_)
        | TrackBreadth::Flex(_)
        | TrackBreadth::MinContent
        | TrackBreadth::MaxContent
        | TrackBreadth::Auto => Some(breadth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_expands_by_literal_repetition() {
        let tracks = parse_template("repeat(3, 1fr 10px)");
        assert_eq!(tracks.len(), 6);
        for pair in tracks.chunks(2) {
            assert_eq!(pair, [GridTrack::fr(1.0), GridTrack::px(10.0)]);
        }
    }

    #[test]
    fn minmax_is_one_atomic_track() {
        let tracks = parse_template("minmax(20px, 1fr)");
        assert_eq!(
            tracks,
            vec![GridTrack::MinMax(
                TrackBreadth::Length(20.0),
                TrackBreadth::Flex(1.0)
            )]
        );
    }

    #[test]
    fn keywords_percentages_and_relative_units() {
        let units = UnitContext {
            font_size_px: 10.0,
            ..DEFAULT_UNITS
        };
        let tracks = parse_template_with("auto min-content max-content 25% 2em", &units);
        assert_eq!(
            tracks,
            vec![
                GridTrack::Breadth(TrackBreadth::Auto),
                GridTrack::Breadth(TrackBreadth::MinContent),
                GridTrack::Breadth(TrackBreadth::MaxContent),
                GridTrack::Breadth(TrackBreadth::Percentage(25.0)),
                GridTrack::px(20.0),
            ]
        );
    }

    #[test]
    fn unknown_tokens_are_dropped_not_fatal() {
        let tracks = parse_template("100px bogus minmax(1fr, 2fr) -5px 2fr");
        assert_eq!(tracks, vec![GridTrack::px(100.0), GridTrack::fr(2.0)]);
    }

    #[test]
    fn fit_content_keeps_its_limit() {
        let tracks = parse_template("fit-content(120px) repeat(2, fit-content(40%)) fit-content(1fr)");
        assert_eq!(
            tracks,
            vec![
                GridTrack::FitContent(TrackBreadth::Length(120.0)),
                GridTrack::FitContent(TrackBreadth::Percentage(40.0)),
                GridTrack::FitContent(TrackBreadth::Percentage(40.0)),
            ]
        );
        assert_eq!(tracks[0].min_breadth(), TrackBreadth::Auto);
        assert_eq!(tracks[0].max_breadth(), TrackBreadth::MaxContent);
    }

    #[test]
    fn line_names_are_skipped() {
        let tracks = parse_template("[start] 50px [middle end] 1fr");
        assert_eq!(tracks, vec![GridTrack::px(50.0), GridTrack::fr(1.0)]);
    }

    #[test]
    fn auto_fill_repeat_is_dropped() {
        let tracks = parse_template("10px repeat(auto-fill, 20px) 30px");
        assert_eq!(tracks, vec![GridTrack::px(10.0), GridTrack::px(30.0)]);
    }

    #[test]
    fn nested_minmax_inside_repeat() {
        let tracks = parse_template("REPEAT(2, minmax(10px, auto))");
        let expected = GridTrack::MinMax(TrackBreadth::Length(10.0), TrackBreadth::Auto);
        assert_eq!(tracks, vec![expected, expected]);
    }

    #[test]
    fn empty_and_unterminated_input() {
        assert!(parse_template("").is_empty());
        assert_eq!(parse_template("5px repeat(2, 1fr"), vec![GridTrack::px(5.0)]);
    }
}
