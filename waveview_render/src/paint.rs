// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Rect};
use peniko::Color;
use waveview_gather::{DontCareQuad, TextRun};

/// Drawing surface the diagram paints into.
///
/// Every entry point takes a whole batch of one primitive kind, so a backend
/// can issue one draw call per group.
pub trait PaintSink {
    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    /// Strokes one-pixel lines.
    fn stroke_lines(&mut self, lines: &[Line], color: Color);

    /// Fills don't-care quadrilaterals.
    fn fill_quads(&mut self, quads: &[DontCareQuad], color: Color);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draws text runs; each run carries its own color and weight.
    fn draw_text(&mut self, runs: &[TextRun]);
}

/// One recorded paint operation.
#[derive(Clone, Debug)]
pub enum PaintOp {
    /// See [`PaintSink::clear`].
    Clear(Color),
    /// See [`PaintSink::stroke_lines`].
    Lines {
        /// Line batch.
        lines: Vec<Line>,
        /// Stroke color.
        color: Color,
    },
    /// See [`PaintSink::fill_quads`].
    Quads {
        /// Quad batch.
        quads: Vec<DontCareQuad>,
        /// Fill color.
        color: Color,
    },
    /// See [`PaintSink::fill_rect`].
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// See [`PaintSink::stroke_rect`].
    StrokeRect {
        /// Rectangle.
        rect: Rect,
        /// Stroke color.
        color: Color,
    },
    /// See [`PaintSink::draw_text`].
    Text(Vec<TextRun>),
}

/// A [`PaintSink`] that records operations for later replay.
///
/// Empty batches are not recorded.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    ops: Vec<PaintOp>,
}

impl DisplayList {
    /// Creates an empty display list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations, in paint order.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Removes all recorded operations.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Replays the recorded operations into `sink`.
    pub fn replay(&self, sink: &mut dyn PaintSink) {
        for op in &self.ops {
            match op {
                PaintOp::Clear(color) => sink.clear(*color),
                PaintOp::Lines { lines, color } => sink.stroke_lines(lines, *color),
                PaintOp::Quads { quads, color } => sink.fill_quads(quads, *color),
                PaintOp::FillRect { rect, color } => sink.fill_rect(*rect, *color),
                PaintOp::StrokeRect { rect, color } => sink.stroke_rect(*rect, *color),
                PaintOp::Text(runs) => sink.draw_text(runs),
            }
        }
    }

    /// Iterates over all recorded text runs.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.ops.iter().flat_map(|op| match op {
            PaintOp::Text(runs) => runs.as_slice(),
            _ => &[],
        })
    }
}

impl PaintSink for DisplayList {
    fn clear(&mut self, color: Color) {
        self.ops.push(PaintOp::Clear(color));
    }

    fn stroke_lines(&mut self, lines: &[Line], color: Color) {
        if !lines.is_empty() {
            self.ops.push(PaintOp::Lines {
                lines: lines.to_vec(),
                color,
            });
        }
    }

    fn fill_quads(&mut self, quads: &[DontCareQuad], color: Color) {
        if !quads.is_empty() {
            self.ops.push(PaintOp::Quads {
                quads: quads.to_vec(),
                color,
            });
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::StrokeRect { rect, color });
    }

    fn draw_text(&mut self, runs: &[TextRun]) {
        if !runs.is_empty() {
            self.ops.push(PaintOp::Text(runs.to_vec()));
        }
    }
}
