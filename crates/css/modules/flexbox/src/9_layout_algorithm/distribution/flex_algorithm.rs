//! Flex grow and shrink distribution algorithms.
//!
//! Implements the flexible sizing loop: inflexible items freeze at their
//! hypothetical size, the rest share free space until min/max violations settle.

use log::debug;

use crate::geometry::clamp;

/// Per-item inputs to the flexible lengths loop, all in border-box main size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlexFactors {
    pub grow: f32,
    pub shrink: f32,
    /// Flex base size.
    pub base: f32,
    /// Hypothetical main size (base clamped by min/max).
    pub hypothetical: f32,
    pub min_main: f32,
    pub max_main: f32,
    /// Sum of main-axis margins.
    pub margins: f32,
}

/// Resolve target main sizes for one line given the space available to its items
/// (inner main size minus gaps).
pub fn resolve_flexible_lengths(items: &[FlexFactors], available_main: f32) -> Vec<f32> {
    let used: f32 = items
        .iter()
        .map(|item| item.hypothetical + item.margins)
        .sum();
    let growing = used < available_main;

    let mut targets: Vec<f32> = items.iter().map(|item| item.hypothetical).collect();
    let mut frozen: Vec<bool> = items
        .iter()
        .map(|item| {
            let factor = if growing { item.grow } else { item.shrink };
            factor <= 0.0
                || (growing && item.base > item.hypothetical)
                || (!growing && item.base < item.hypothetical)
        })
        .collect();

    let free_space = |sizes: &[f32], flags: &[bool]| -> f32 {
        let occupied: f32 = items
            .iter()
            .zip(sizes.iter().zip(flags))
            .map(|(item, (target, is_frozen))| {
                item.margins + if *is_frozen { *target } else { item.base }
            })
            .sum();
        available_main - occupied
    };
    let initial_free = free_space(&targets, &frozen);

    for _ in 0..=items.len() {
        if frozen.iter().all(|is_frozen| *is_frozen) {
            break;
        }
        let mut remaining = free_space(&targets, &frozen);
        let factor_sum: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .map(|(item, _)| if growing { item.grow } else { item.shrink })
            .sum();
        if factor_sum < 1.0 {
            let scaled = initial_free * factor_sum;
            if scaled.abs() < remaining.abs() {
                remaining = scaled;
            }
        }

        let scaled_shrink_sum: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .map(|(item, _)| item.shrink * item.base)
            .sum();

        let mut total_violation = 0.0f32;
        let mut violations = vec![0.0f32; items.len()];
        for ((item, target), (is_frozen, violation)) in items
            .iter()
            .zip(targets.iter_mut())
            .zip(frozen.iter().zip(violations.iter_mut()))
        {
            if *is_frozen {
                continue;
            }
            let unclamped = if growing {
                if factor_sum > 0.0 {
                    item.base + remaining * item.grow / factor_sum
                } else {
                    item.base
                }
            } else if scaled_shrink_sum > 0.0 {
                item.base + remaining * (item.shrink * item.base) / scaled_shrink_sum
            } else {
                item.base
            };
            let clamped = clamp(unclamped, item.min_main, item.max_main).max(0.0);
            *violation = clamped - unclamped;
            total_violation += *violation;
            *target = clamped;
        }

        for (is_frozen, violation) in frozen.iter_mut().zip(&violations) {
            if *is_frozen {
                continue;
            }
            let freeze = if total_violation.abs() < f32::EPSILON {
                true
            } else if total_violation > 0.0 {
                *violation > 0.0
            } else {
                *violation < 0.0
            };
            if freeze {
                *is_frozen = true;
            }
        }
        debug!(
            target: "css::flexbox::distribution",
            "[FLEX-RESOLVE] growing={growing} remaining={remaining:.3} violation={total_violation:.3}"
        );
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(base: f32, grow: f32, shrink: f32) -> FlexFactors {
        FlexFactors {
            grow,
            shrink,
            base,
            hypothetical: base,
            min_main: 0.0,
            max_main: f32::INFINITY,
            margins: 0.0,
        }
    }

    #[test]
    /// Ensures flex-grow respects the max size and redistributes the remainder.
    ///
    /// # Panics
    /// Panics if the clamped item or the total is wrong.
    fn grow_respects_max_and_redistributes() {
        let mut first = factors(50.0, 1.0, 1.0);
        first.max_main = 80.0;
        let items = [first, factors(50.0, 1.0, 1.0), factors(50.0, 1.0, 1.0)];
        let sizes = resolve_flexible_lengths(&items, 300.0);
        assert!((sizes[0] - 80.0).abs() < 0.01);
        assert!((sizes[1] - 110.0).abs() < 0.01);
        assert!((sizes.iter().sum::<f32>() - 300.0).abs() < 0.01);
    }

    #[test]
    /// Ensures shrinking is weighted by base size and freezes at the min size.
    ///
    /// # Panics
    /// Panics if the min constraint is violated.
    fn shrink_is_weighted_and_respects_min() {
        let mut first = factors(100.0, 0.0, 1.0);
        first.min_main = 90.0;
        let items = [first, factors(100.0, 0.0, 1.0)];
        let sizes = resolve_flexible_lengths(&items, 150.0);
        assert!((sizes[0] - 90.0).abs() < 0.01);
        assert!((sizes[1] - 60.0).abs() < 0.01);
    }

    #[test]
    /// Ensures fractional grow factors only take their share of the free space.
    ///
    /// # Panics
    /// Panics if the item grows past its fraction.
    fn fractional_grow_leaves_space() {
        let items = [factors(0.0, 0.5, 1.0)];
        let sizes = resolve_flexible_lengths(&items, 100.0);
        assert!((sizes[0] - 50.0).abs() < 0.01);
    }

    #[test]
    /// Ensures inflexible items keep their hypothetical size.
    ///
    /// # Panics
    /// Panics if a zero-grow item changes size.
    fn inflexible_items_freeze() {
        let items = [factors(30.0, 0.0, 0.0), factors(30.0, 2.0, 1.0)];
        let sizes = resolve_flexible_lengths(&items, 100.0);
        assert!((sizes[0] - 30.0).abs() < 0.01);
        assert!((sizes[1] - 70.0).abs() < 0.01);
    }
}
