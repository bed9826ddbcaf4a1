//! Main-axis justification and auto margins.

use crate::chapter5::Justify;

/// Compute justify-content start offset and between-spacing (excluding CSS gap).
///
/// Negative free space falls back to `flex-start` for `space-between` and to
/// `center` for `space-around`/`space-evenly`.
pub fn justify_params(justify: Justify, free_space: f32, item_count: usize) -> (f32, f32) {
    let count = item_count as f32;
    match (justify, item_count) {
        (Justify::FlexEnd, _) => (free_space, 0.0),
        (Justify::Center, _) => (free_space * 0.5, 0.0),
        (Justify::SpaceBetween, count_usize) if count_usize > 1 && free_space > 0.0 => {
            (0.0, free_space / (count - 1.0))
        }
        (Justify::SpaceAround, count_usize) if count_usize > 0 => {
            if free_space > 0.0 {
                (free_space / (count * 2.0), free_space / count)
            } else {
                (free_space * 0.5, 0.0)
            }
        }
        (Justify::SpaceEvenly, count_usize) if count_usize > 0 => {
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

/// Share positive free space equally among auto main-axis margins.
///
/// `auto_margins` holds `(start_is_auto, end_is_auto)` per item; returns the extra
/// `(start, end)` margin for each item, or `None` when no margin absorbs space.
pub fn distribute_auto_margins(
    free_space: f32,
    auto_margins: &[(bool, bool)],
) -> Option<Vec<(f32, f32)>> {
    let auto_count = auto_margins
        .iter()
        .map(|(start, end)| usize::from(*start) + usize::from(*end))
        .sum::<usize>();
    if auto_count == 0 || free_space <= 0.0 {
        return None;
    }
    let share = free_space / auto_count as f32;
    Some(
        auto_margins
            .iter()
            .map(|(start, end)| {
                (
                    if *start { share } else { 0.0 },
                    if *end { share } else { 0.0 },
                )
            })
            .collect(),
    )
}
