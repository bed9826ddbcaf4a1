//! `grid-template-areas` parsing and area resolution.
//!
//! Spec: §7.3 Named Areas
//! <https://www.w3.org/TR/css-grid-2/#grid-template-areas-property>

use log::warn;
use std::collections::HashMap;

/// Area occupied by a named region (1-indexed lines, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    /// Row start line (1-indexed)
    pub row_start: u16,
    /// Row end line (1-indexed, exclusive)
    pub row_end: u16,
    /// Column start line (1-indexed)
    pub col_start: u16,
    /// Column end line (1-indexed, exclusive)
    pub col_end: u16,
}

impl GridArea {
    /// Get the row span (number of rows occupied).
    pub fn row_span(&self) -> u16 {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Get the column span (number of columns occupied).
    pub fn col_span(&self) -> u16 {
        self.col_end.saturating_sub(self.col_start)
    }
}

/// Parse quoted area rows: `"a a b" "c c b"` becomes `[[a, a, b], [c, c, b]]`.
///
/// Text outside quotes is ignored; an unterminated string is dropped.
pub fn parse_area(raw: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut chars = raw.char_indices();
    while let Some((open_index, character)) = chars.next() {
        if character != '"' && character != '\'' {
            continue;
        }
        let content_start = open_index + character.len_utf8();
        let Some((close_index, _)) = chars.find(|&(_, candidate)| candidate == character) else {
            warn!(target: "css::grid::parse", "unterminated area string in `{raw}`");
            break;
        };
        let row: Vec<String> = raw[content_start..close_index]
            .split_whitespace()
            .map(str::to_owned)
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    rows
}

/// Compute the rectangle covered by each named area.
///
/// Cells made only of `.` are unnamed. Areas that are not rectangles are dropped.
pub fn resolve_areas(rows: &[Vec<String>]) -> HashMap<String, GridArea> {
    // name -> (min_row, max_row, min_col, max_col, cell_count)
    let mut bounds: HashMap<&str, (usize, usize, usize, usize, usize)> = HashMap::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, name) in row.iter().enumerate() {
            if name.chars().all(|character| character == '.') {
                continue;
            }
            let entry = bounds
                .entry(name.as_str())
                .or_insert((row_index, row_index, col_index, col_index, 0));
            entry.0 = entry.0.min(row_index);
            entry.1 = entry.1.max(row_index);
            entry.2 = entry.2.min(col_index);
            entry.3 = entry.3.max(col_index);
            entry.4 += 1;
        }
    }
    let mut areas = HashMap::with_capacity(bounds.len());
    for (name, (min_row, max_row, min_col, max_col, count)) in bounds {
        let expected = (max_row - min_row + 1) * (max_col - min_col + 1);
        let rectangular = count == expected
            && (min_row..=max_row).all(|row_index| {
                (min_col..=max_col).all(|col_index| {
                    rows.get(row_index)
                        .and_then(|row| row.get(col_index))
                        .is_some_and(|cell| cell == name)
                })
            });
        if !rectangular {
            warn!(target: "css::grid::parse", "grid area `{name}` is not a rectangle; ignoring it");
            continue;
        }
        let to_line = |index: usize| u16::try_from(index + 1).unwrap_or(u16::MAX);
        areas.insert(
            name.to_owned(),
            GridArea {
                row_start: to_line(min_row),
                row_end: to_line(max_row + 1),
                col_start: to_line(min_col),
                col_end: to_line(max_col + 1),
            },
        );
    }
    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_rows() {
        let rows = parse_area(r#""header header" 'nav main'"#);
        assert_eq!(
            rows,
            vec![
                vec!["header".to_owned(), "header".to_owned()],
                vec!["nav".to_owned(), "main".to_owned()],
            ]
        );
    }

    #[test]
    fn unterminated_row_is_dropped() {
        assert_eq!(parse_area(r#""a b" "c"#), vec![vec!["a".to_owned(), "b".to_owned()]]);
    }

    #[test]
    fn resolves_rectangles_and_skips_dots() {
        let rows = parse_area(r#""head head" "side main" ". main""#);
        let areas = resolve_areas(&rows);
        assert_eq!(areas.len(), 3);
        assert_eq!(
            areas.get("head"),
            Some(&GridArea {
                row_start: 1,
                row_end: 2,
                col_start: 1,
                col_end: 3
            })
        );
        let main = areas.get("main").copied();
        assert_eq!(main.map(|area| (area.row_span(), area.col_span())), Some((2, 1)));
    }

    #[test]
    fn non_rectangular_area_is_ignored() {
        let rows = parse_area(r#""a a" "a b""#);
        let areas = resolve_areas(&rows);
        assert!(!areas.contains_key("a"));
        assert!(areas.contains_key("b"));
    }
}
