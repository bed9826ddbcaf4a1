//! Line breaking logic for multi-line flex layouts.

/// Line start/end indices for items included in the line: `[start, end)`.
pub type LineRange = (usize, usize);

/// Break items into lines by accumulating outer hypothetical sizes and `main_gap`
/// until exceeding `container_main_size`. A `None` size keeps a single line.
pub fn break_into_lines(
    container_main_size: Option<f32>,
    main_gap: f32,
    outer_sizes: &[f32],
) -> Vec<LineRange> {
    let Some(limit) = container_main_size else {
        return if outer_sizes.is_empty() {
            Vec::new()
        } else {
            vec![(0, outer_sizes.len())]
        };
    };
    let mut line_ranges: Vec<LineRange> = Vec::new();
    let mut start = 0usize;
    let mut cursor = 0.0f32;
    for (idx, size) in outer_sizes.iter().copied().enumerate() {
        let is_first_in_line = idx == start;
        let gap = if is_first_in_line { 0.0 } else { main_gap };
        let next = cursor + gap + size;
        if is_first_in_line || next <= limit + f32::EPSILON {
            cursor = next;
        } else {
            line_ranges.push((start, idx));
            start = idx;
            cursor = size;
        }
    }
    if start < outer_sizes.len() {
        line_ranges.push((start, outer_sizes.len()));
    }
    line_ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Ensures items wrap once the next one no longer fits, gaps included.
    ///
    /// # Panics
    /// Panics if the ranges differ.
    fn wraps_with_gaps() {
        let lines = break_into_lines(Some(100.0), 10.0, &[40.0, 40.0, 40.0, 100.0]);
        assert_eq!(lines, vec![(0, 2), (2, 3), (3, 4)]);
    }

    #[test]
    /// Ensures an oversized first item still gets its own line.
    ///
    /// # Panics
    /// Panics if the oversized item is dropped.
    fn oversized_item_stays() {
        assert_eq!(break_into_lines(Some(10.0), 0.0, &[50.0]), vec![(0, 1)]);
        assert_eq!(break_into_lines(None, 0.0, &[50.0, 60.0]), vec![(0, 2)]);
    }
}
