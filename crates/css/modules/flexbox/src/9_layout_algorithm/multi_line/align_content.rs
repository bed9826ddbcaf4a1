//! Align-content packing logic for multi-line flex containers.

use log::debug;

use crate::chapter5::Align;

/// Compute align-content start offset and between-spacing (excluding CSS gap) for lines.
///
/// `Stretch` packs like `flex-start`; the extra space goes into the lines instead.
pub fn align_content_params(align: Align, free_space: f32, line_count: usize) -> (f32, f32) {
    let count = line_count as f32;
    match (align, line_count) {
        (Align::FlexEnd, _) => (free_space, 0.0),
        (Align::Center, _) => (free_space * 0.5, 0.0),
        (Align::SpaceBetween, lines) if lines > 1 && free_space > 0.0 => {
            (0.0, free_space / (count - 1.0))
        }
        (Align::SpaceAround, lines) if lines > 0 => {
            if free_space > 0.0 {
                (free_space / (count * 2.0), free_space / count)
            } else {
                (free_space * 0.5, 0.0)
            }
        }
        (Align::SpaceEvenly, lines) if lines > 0 => {
            if free_space > 0.0 {
                let slots = count + 1.0;
                (free_space / slots, free_space / slots)
            } else {
                (free_space * 0.5, 0.0)
            }
        }
        _ => (0.0, 0.0),
    }
}

/// Stretch line boxes to fill the container cross size under `align-content: stretch`.
pub fn stretch_line_crosses(align: Align, free_space: f32, line_crosses: &mut [f32]) {
    if align != Align::Stretch || line_crosses.is_empty() || free_space <= 0.0 {
        return;
    }
    let add_each = free_space / line_crosses.len() as f32;
    debug!(
        target: "css::flexbox::multi_line",
        "[ALIGN-CONTENT] stretch: remaining={free_space:.3} add_each={add_each:.3}"
    );
    for value in line_crosses {
        *value += add_each;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Ensures stretch grows every line equally.
    ///
    /// # Panics
    /// Panics if a line is not grown.
    fn stretch_adds_equal_share() {
        let mut lines = [10.0, 20.0];
        stretch_line_crosses(Align::Stretch, 30.0, &mut lines);
        assert!((lines[0] - 25.0).abs() < f32::EPSILON);
        assert!((lines[1] - 35.0).abs() < f32::EPSILON);
    }

    #[test]
    /// Ensures center splits the free space.
    ///
    /// # Panics
    /// Panics if the offset is not half the free space.
    fn center_offsets_half() {
        let (start, between) = align_content_params(Align::Center, 40.0, 2);
        assert!((start - 20.0).abs() < f32::EPSILON);
        assert!(between.abs() < f32::EPSILON);
    }
}
