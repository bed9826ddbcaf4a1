//! Intrinsic-measurement bridge between backends and content providers.
//!
//! Each backend describes the width it offers a leaf in its own terms. Adapters
//! normalise that to a [`WidthConstraint`] before calling the node's
//! [`MeasureBridge`], which guards against runaway re-entry.

use core::cell::Cell;
use core::fmt;

use log::{trace, warn};

use crate::element::ElementProps;

/// Nesting depth after which the bridge stops calling through and answers with
/// the last good measurement.
pub const MAX_MEASURE_DEPTH: u32 = 10;

/// Width offered to a measured leaf.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WidthConstraint {
    /// Lay out within exactly this many pixels.
    Definite(f32),
    /// No limit: measure at the natural, unwrapped width.
    GrowToFill,
    /// Measure the narrowest the content can be.
    ShrinkToMin,
}

impl WidthConstraint {
    /// The constraint as a number: unbounded for grow-to-fill, zero for shrink-to-min.
    pub const fn available(self) -> f32 {
        match self {
            Self::Definite(width) => width,
            Self::GrowToFill => f32::INFINITY,
            Self::ShrinkToMin => 0.0,
        }
    }
}

/// Content-box size returned by a measurement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentSize {
    pub width: f32,
    pub height: f32,
}

impl ContentSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// What a provider gets to measure: the element and the font it is set in.
#[derive(Copy, Clone, Debug)]
pub struct ContentRef<'content> {
    pub element_type: &'content str,
    pub props: &'content ElementProps,
    /// Computed font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

/// Supplies sizes for leaf content the solver cannot size from style alone:
/// text runs and replaced elements.
pub trait MeasureContent {
    /// Measure one element's content. `None` means there is nothing to measure.
    fn measure(
        &self,
        content: &ContentRef<'_>,
        width: WidthConstraint,
        height: Option<f32>,
    ) -> Option<ContentSize>;
}

/// Measures nothing. Suits trees whose leaves all carry explicit sizes.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoContent;

impl MeasureContent for NoContent {
    fn measure(
        &self,
        _content: &ContentRef<'_>,
        _width: WidthConstraint,
        _height: Option<f32>,
    ) -> Option<ContentSize> {
        None
    }
}

type MeasureCallback = Box<dyn Fn(WidthConstraint, Option<f32>) -> ContentSize>;

/// Per-leaf measurement callback with a re-entry guard.
///
/// Backends may call back repeatedly, and a provider may itself trigger nested
/// layout that lands here again. Past [`MAX_MEASURE_DEPTH`] nested calls the
/// bridge returns the last good measurement instead of recursing.
pub struct MeasureBridge {
    label: String,
    callback: MeasureCallback,
    depth: Cell<u32>,
    last_good: Cell<Option<ContentSize>>,
    calls: Cell<u32>,
}

impl MeasureBridge {
    pub fn new(
        label: impl Into<String>,
        callback: impl Fn(WidthConstraint, Option<f32>) -> ContentSize + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            callback: Box::new(callback),
            depth: Cell::new(0),
            last_good: Cell::new(None),
            calls: Cell::new(0),
        }
    }

    /// Measure under a normalised constraint.
    pub fn measure(&self, width: WidthConstraint, height: Option<f32>) -> ContentSize {
        let depth = self.depth.get();
        if depth >= MAX_MEASURE_DEPTH {
            warn!(
                target: "layouter::measure",
                "[MEASURE] {} re-entered {depth} levels deep; reusing last measurement",
                self.label
            );
            return self.last_good.get().unwrap_or(ContentSize::ZERO);
        }
        self.depth.set(depth + 1);
        self.calls.set(self.calls.get().saturating_add(1));
        let measured = (self.callback)(width, height);
        self.depth.set(depth);

        if !measured.is_finite() {
            trace!(
                target: "layouter::measure",
                "[MEASURE] {} returned a non-finite size {measured:?}",
                self.label
            );
            return self.last_good.get().unwrap_or(ContentSize::ZERO);
        }
        let clamped = ContentSize::new(measured.width.max(0.0), measured.height.max(0.0));
        trace!(
            target: "layouter::measure",
            "[MEASURE] {} {width:?} x {height:?} -> {clamped:?}",
            self.label
        );
        self.last_good.set(Some(clamped));
        clamped
    }

    /// How many times the callback actually ran.
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn last_good(&self) -> Option<ContentSize> {
        self.last_good.get()
    }
}

impl fmt::Debug for MeasureBridge {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MeasureBridge")
            .field("label", &self.label)
            .field("depth", &self.depth.get())
            .field("last_good", &self.last_good.get())
            .finish_non_exhaustive()
    }
}
