//! Axis resolution utilities
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#box-model>

use crate::chapter5::FlexDirection;
use crate::geometry::{Rect, Size};

/// Resolved axes information for a flex container.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Axes {
    /// True when the main axis is horizontal.
    pub main_is_row: bool,
    /// True when main axis is reversed (row-reverse or column-reverse)
    pub main_reverse: bool,
}

/// Resolve main/cross axes from flex-direction (horizontal writing mode only).
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
pub const fn resolve_axes(direction: FlexDirection) -> Axes {
    match direction {
        FlexDirection::Row => Axes {
            main_is_row: true,
            main_reverse: false,
        },
        FlexDirection::RowReverse => Axes {
            main_is_row: true,
            main_reverse: true,
        },
        FlexDirection::Column => Axes {
            main_is_row: false,
            main_reverse: false,
        },
        FlexDirection::ColumnReverse => Axes {
            main_is_row: false,
            main_reverse: true,
        },
    }
}

impl Axes {
    #[inline]
    pub fn main<T>(self, size: Size<T>) -> T {
        if self.main_is_row { size.width } else { size.height }
    }

    #[inline]
    pub fn cross<T>(self, size: Size<T>) -> T {
        if self.main_is_row { size.height } else { size.width }
    }

    /// Build a physical size from main/cross components.
    #[inline]
    pub fn size<T>(self, main: T, cross: T) -> Size<T> {
        if self.main_is_row {
            Size {
                width: main,
                height: cross,
            }
        } else {
            Size {
                width: cross,
                height: main,
            }
        }
    }

    #[inline]
    pub fn main_start<T>(self, rect: Rect<T>) -> T {
        if self.main_is_row { rect.left } else { rect.top }
    }

    #[inline]
    pub fn main_end<T>(self, rect: Rect<T>) -> T {
        if self.main_is_row { rect.right } else { rect.bottom }
    }

    #[inline]
    pub fn cross_start<T>(self, rect: Rect<T>) -> T {
        if self.main_is_row { rect.top } else { rect.left }
    }

    #[inline]
    pub fn cross_end<T>(self, rect: Rect<T>) -> T {
        if self.main_is_row { rect.bottom } else { rect.right }
    }
}
