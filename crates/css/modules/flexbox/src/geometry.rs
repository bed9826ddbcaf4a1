//! Small geometry containers shared by the solver and the node API.

use std::ops::Add;

/// Width/height pair.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl Size<f32> {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

impl Size<Option<f32>> {
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };
}

/// Four physical edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl Rect<f32> {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Sum of left and right.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Add for Rect<f32> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

/// Clamp `value` to `[min, max]`; when the bounds conflict the minimum wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Clamp with optional bounds.
#[inline]
pub fn clamp_opt(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    clamp(
        value,
        min.unwrap_or(f32::NEG_INFINITY),
        max.unwrap_or(f32::INFINITY),
    )
}
