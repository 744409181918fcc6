// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};
use waveview_signal::{Annotation, BitRange, Level, Placement, Signal, SignalValue};
use waveview_viewport::{RowMetrics, TickMap, Viewport};

use crate::annotation::AnnotationStyle;
use crate::batch::{DontCareQuad, SignalBatch, SnapHit, SnapProbe, TextRun};
use crate::measure::TextMeasure;
use crate::palette::Palette;

/// Geometry shared by every row of one frame.
#[derive(Copy, Clone, Debug)]
pub struct GatherFrame {
    /// Tick to window X mapping.
    pub tick_map: TickMap,
    /// Row metrics.
    pub metrics: RowMetrics,
    /// Draw labels at all.
    pub show_text: bool,
}

impl GatherFrame {
    /// Captures the frame geometry of `viewport`.
    #[must_use]
    pub fn from_viewport(viewport: &Viewport, show_text: bool) -> Self {
        Self {
            tick_map: viewport.tick_map(),
            metrics: *viewport.metrics(),
            show_text,
        }
    }

    /// Left edge of the wave area.
    #[must_use]
    pub fn wave_begin(&self) -> f64 {
        self.tick_map.name_width
    }

    /// Right edge of the visible wave area.
    #[must_use]
    pub fn wave_end(&self) -> f64 {
        self.tick_map.wave_end
    }
}

/// Turns signal event lists into drawable primitives for the visible window.
///
/// Work is bounded by what is visible: events left of the window are skipped
/// with a binary search and iteration stops at the first level change past the
/// right edge. Everything is in window coordinates.
#[derive(Clone, Copy)]
pub struct SegmentGatherer<'a> {
    frame: GatherFrame,
    measure: &'a dyn TextMeasure,
    palette: &'a Palette,
}

impl core::fmt::Debug for SegmentGatherer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentGatherer")
            .field("frame", &self.frame)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

impl<'a> SegmentGatherer<'a> {
    /// Creates a gatherer for one frame.
    #[must_use]
    pub fn new(frame: GatherFrame, measure: &'a dyn TextMeasure, palette: &'a Palette) -> Self {
        Self {
            frame,
            measure,
            palette,
        }
    }

    /// Frame geometry.
    #[must_use]
    pub fn frame(&self) -> &GatherFrame {
        &self.frame
    }

    /// Palette used for text colors.
    #[must_use]
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Text measurement in use.
    #[must_use]
    pub fn measure(&self) -> &'a dyn TextMeasure {
        self.measure
    }

    /// The signal's name, right-aligned in the name column of the row whose
    /// low rail is at `y_low`.
    #[must_use]
    pub fn name_label(&self, signal: &Signal, y_low: f64) -> Option<TextRun> {
        if !self.frame.show_text {
            return None;
        }
        let m = &self.frame.metrics;
        let width = self.measure.text_width(signal.name(), false);
        let origin = Point::new(
            self.frame.wave_begin() - width - 3.0,
            y_low - m.text_height + 1.0 - m.text_baseline,
        );
        Some(TextRun::new(signal.name(), origin, self.palette.signal_name))
    }

    /// Gathers the waveform, inline labels, and annotations of one signal row.
    ///
    /// `y_low` is the window Y coordinate of the row's low rail. With a `snap`
    /// probe, the batch reports the last drawn edge within its tolerance.
    #[must_use]
    pub fn gather(&self, signal: &Signal, y_low: f64, snap: Option<SnapProbe>) -> SignalBatch {
        let mut row = RowGather {
            gatherer: self,
            signal,
            y_low,
            name_width: self.measure.text_width(signal.name(), false),
            x_text: 0.0,
            snap,
            batch: SignalBatch::default(),
        };
        row.run();
        log::trace!(
            "gathered {}: {} lines, {} fills, {} texts",
            signal.name(),
            row.batch.lines.len(),
            row.batch.fills.len(),
            row.batch.texts.len()
        );
        row.batch
    }
}

/// Scratch state while gathering one row.
struct RowGather<'g, 'a> {
    gatherer: &'g SegmentGatherer<'a>,
    signal: &'g Signal,
    y_low: f64,
    /// Width of the signal's name, for inline labels.
    name_width: f64,
    /// Next X at which text may start without overlapping earlier text.
    x_text: f64,
    snap: Option<SnapProbe>,
    batch: SignalBatch,
}

impl RowGather<'_, '_> {
    fn run(&mut self) {
        let frame = self.gatherer.frame;
        let x_begin = frame.wave_begin();
        let x_end = frame.wave_end();
        if x_end <= x_begin {
            return;
        }
        let map = frame.tick_map;
        let signal = self.signal;
        let events = signal.events();
        let is_bus = signal.is_bus();

        // Events this far left can only update the held value.
        let start = events.partition_point(|event| map.tick_to_x(event.tick) < x_begin - 2.0);
        let held = events[..start]
            .iter()
            .rev()
            .map(|event| &event.value)
            .find(|value| !value.is_annotation())
            .or_else(|| signal.initial_value());
        let Some(mut v_prev) = held else {
            // Annotation-only signal.
            for event in &events[start..] {
                if let SignalValue::Annotation(note) = &event.value {
                    let x = map.tick_to_x(event.tick).min(x_end + 2.0);
                    self.attached_text(note, x);
                }
            }
            return;
        };

        // x_prev: last emitted edge; x_drawn: end of the last drawn segment.
        let mut x_prev = x_begin;
        let mut x_drawn = x_begin;
        for event in &events[start..] {
            let x = map.tick_to_x(event.tick).min(x_end + 2.0);
            let value = &event.value;
            if let SignalValue::Annotation(note) = value {
                self.attached_text(note, x);
                continue;
            }
            if x >= x_begin {
                if x > x_prev + 1.0 {
                    if value != v_prev {
                        self.probe_snap(event.tick, x);
                        if is_bus || v_prev.is_dont_care() {
                            self.bus_segment(x_prev, v_prev, x);
                        } else {
                            self.line_segment(x_prev, v_prev, x, value, x < x_end);
                        }
                        if x_prev != x_drawn {
                            self.dont_care(x_drawn, x_prev);
                        }
                        x_drawn = x;
                        x_prev = x;
                    }
                } else {
                    x_prev = x;
                }
            }
            if x > x_end {
                break;
            }
            v_prev = value;
        }

        // Hold the last value up to the right edge.
        if x_end > x_prev + 1.0 {
            if is_bus || v_prev.is_dont_care() {
                self.bus_segment(x_prev, v_prev, x_end);
            } else {
                let y = self.level_y(v_prev);
                self.batch.lines.push(Line::new((x_prev, y), (x_end, y)));
            }
        }
        if x_prev != x_drawn {
            self.dont_care(x_drawn, x_prev);
        }
    }

    fn metrics(&self) -> &RowMetrics {
        &self.gatherer.frame.metrics
    }

    fn level_y(&self, value: &SignalValue) -> f64 {
        let height = value.level().map_or(0.0, Level::height);
        self.y_low - (height * self.metrics().rail_height).floor()
    }

    fn probe_snap(&mut self, tick: u64, x: f64) {
        let Some(probe) = self.snap else {
            return;
        };
        // Ties go to the later edge.
        let closer = self
            .batch
            .snap
            .is_none_or(|hit| probe.tick.abs_diff(tick) <= probe.tick.abs_diff(hit.tick));
        if probe.accepts(tick) && closer {
            let y = self.y_low - (self.metrics().rail_height / 2.0).floor();
            self.batch.snap = Some(SnapHit {
                tick,
                point: Point::new(x, y),
            });
        }
    }

    /// Step from `v_prev` held since `x_prev` to `value` at `x`.
    fn line_segment(
        &mut self,
        x_prev: f64,
        v_prev: &SignalValue,
        x: f64,
        value: &SignalValue,
        show_name: bool,
    ) {
        let y_prev = self.level_y(v_prev);
        let y = self.level_y(value);
        self.batch.lines.push(Line::new((x_prev, y_prev), (x - 1.0, y_prev)));
        self.batch.lines.push(Line::new((x - 1.0, y_prev), (x, y)));

        let m = *self.metrics();
        let w = self.name_width;
        if self.gatherer.frame.show_text
            && show_name
            && x - w - m.label_spacing > self.x_text
            && x - x_prev > w + 4.0
        {
            let dropped = f64::from(u8::from(v_prev.level() == Some(Level::H)));
            let origin = Point::new(
                x - w - 2.0,
                self.y_low - m.text_height + 1.0 + dropped - m.text_baseline,
            );
            let color = self.gatherer.palette.signal_name;
            self.batch
                .texts
                .push(TextRun::new(self.signal.name(), origin, color));
            self.x_text = x;
        }
    }

    /// Interval `x_prev..x` of a bus (or of a single bit in `X`).
    fn bus_segment(&mut self, x_prev: f64, v_prev: &SignalValue, x: f64) {
        if v_prev.is_dont_care() {
            self.dont_care(x_prev, x);
            return;
        }
        let m = *self.metrics();
        let y_low = self.y_low;
        let y_high = y_low - m.rail_height;
        self.batch.lines.extend([
            Line::new((x_prev, y_low), (x, y_low)),
            Line::new((x, y_low), (x, y_high)),
            Line::new((x, y_high), (x_prev, y_high)),
            Line::new((x_prev, y_high), (x_prev, y_low)),
        ]);

        let Some(value) = v_prev.bus_value() else {
            return;
        };
        if !self.gatherer.frame.show_text {
            return;
        }
        let digits = self.signal.bit_range().map_or(1, BitRange::hex_digits);
        let label = format!("{value:0digits$X}");
        let w = self.gatherer.measure.text_width(&label, false);
        if x - w - 2.0 > x_prev {
            let dx = ((x - x_prev) / 2.0).floor().min(100.0);
            let origin = Point::new(
                x_prev + dx - (w / 2.0).floor(),
                y_low - m.text_height + 2.0 - m.text_baseline,
            );
            let color = self.gatherer.palette.bus_value;
            self.batch.texts.push(TextRun::new(label, origin, color));
        }
    }

    fn dont_care(&mut self, x0: f64, x1: f64) {
        let y_high = self.y_low - self.metrics().rail_height;
        self.batch
            .fills
            .push(DontCareQuad::new(x0, x1, self.y_low, y_high));
    }

    fn attached_text(&mut self, note: &Annotation, x: f64) {
        let frame = self.gatherer.frame;
        if !frame.show_text {
            return;
        }
        let style = AnnotationStyle::parse(&note.text);
        let w = self.gatherer.measure.text_width(style.text, style.bold);
        let x = match note.placement {
            Placement::Before => {
                let x = x - w - 2.0;
                self.x_text = x;
                x
            }
            Placement::After => x + 2.0,
        };
        if x > frame.wave_begin() && x + w < frame.wave_end() {
            let m = self.metrics();
            let origin = Point::new(x, self.y_low - m.text_height + 1.0 - m.text_baseline);
            self.batch.texts.push(TextRun {
                text: style.text.to_owned(),
                origin,
                color: self.gatherer.palette.annotation(style.color),
                bold: style.bold,
            });
        }
    }
}
