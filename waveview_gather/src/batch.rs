// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};
use peniko::Color;
use smallvec::SmallVec;

/// A don't-care interval, drawn as a filled quadrilateral with no outline.
///
/// Corners run low-left, high-left, high-right, low-right.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DontCareQuad(pub [Point; 4]);

impl DontCareQuad {
    /// Builds the quad spanning `x0..x1` between the two rails.
    #[must_use]
    pub fn new(x0: f64, x1: f64, y_low: f64, y_high: f64) -> Self {
        Self([
            Point::new(x0, y_low),
            Point::new(x0, y_high),
            Point::new(x1, y_high),
            Point::new(x1, y_low),
        ])
    }

    /// Left and right X coordinates.
    #[must_use]
    pub fn x_span(&self) -> (f64, f64) {
        (self.0[0].x, self.0[2].x)
    }
}

/// A positioned piece of text.
#[derive(Clone, Debug)]
pub struct TextRun {
    /// Text to draw.
    pub text: String,
    /// Top-left corner of the text box in window coordinates.
    pub origin: Point,
    /// Foreground.
    pub color: Color,
    /// Bold weight.
    pub bold: bool,
}

impl TextRun {
    /// Creates a regular-weight run.
    pub fn new(text: impl Into<String>, origin: Point, color: Color) -> Self {
        Self {
            text: text.into(),
            origin,
            color,
            bold: false,
        }
    }
}

/// Request to snap the pointer to a nearby edge on a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SnapProbe {
    /// Pointer tick.
    pub tick: u64,
    /// Edges closer than this many ticks qualify.
    pub tolerance: u64,
}

impl SnapProbe {
    /// Returns `true` if an edge at `tick` is close enough to snap to.
    #[must_use]
    pub fn accepts(&self, tick: u64) -> bool {
        self.tick.abs_diff(tick) < self.tolerance
    }
}

/// An edge the pointer snapped to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapHit {
    /// Tick of the edge.
    pub tick: u64,
    /// Centre of the edge between the rails, in window coordinates.
    pub point: Point,
}

/// Everything gathered for one signal row, grouped by kind.
///
/// Lines are drawn in one batch with the waveform color, fills in one batch
/// with the don't-care color, then the texts.
#[derive(Clone, Debug, Default)]
pub struct SignalBatch {
    /// Waveform steps and bus outlines.
    pub lines: Vec<Line>,
    /// Don't-care intervals.
    pub fills: Vec<DontCareQuad>,
    /// Inline names, bus values, and annotations.
    pub texts: SmallVec<[TextRun; 4]>,
    /// Edge nearest to the snap probe, if one was given and matched.
    pub snap: Option<SnapHit>,
}

impl SignalBatch {
    /// Returns `true` if nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.fills.is_empty() && self.texts.is_empty()
    }

    /// Lines that move between rails: level edges and bus outline sides.
    pub fn edges(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|line| line.p0.y != line.p1.y)
    }

    /// Lines that hold a level.
    pub fn holds(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|line| line.p0.y == line.p1.y)
    }
}
