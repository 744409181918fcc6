// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};
use waveview_signal::{Level, Signal};

use crate::batch::TextRun;
use crate::gatherer::SegmentGatherer;
use crate::time::format_ns_short;

/// Time-grid parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridSettings {
    /// Ticks per nanosecond, for labels.
    pub ticks_per_ns: u64,
    /// Maximum decimals of a label.
    pub time_places: usize,
    /// Marker spacing used when no bar signal label could be drawn.
    pub step_ticks: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            ticks_per_ns: 1000,
            time_places: 3,
            step_ticks: 10_000,
        }
    }
}

/// Vertical grid lines and header labels for one frame.
#[derive(Clone, Debug, Default)]
pub struct GridBatch {
    /// Grid lines from below the header to the content bottom.
    pub lines: Vec<Line>,
    /// Header labels, in nanoseconds.
    pub labels: Vec<TextRun>,
    /// `true` if the labels come from fixed-step markers instead of the bar signal.
    pub fallback: bool,
}

impl SegmentGatherer<'_> {
    /// Gathers the time grid.
    ///
    /// Rising edges of `bar` (events with level `H` more than 4 px after the
    /// previous event) get a grid line and, where it clears the previous label,
    /// a label. If no bar label could be drawn, markers every
    /// [`GridSettings::step_ticks`] are labelled instead, each labelled marker
    /// with its own grid line. `bottom` is the window Y coordinate where grid
    /// lines end.
    #[must_use]
    pub fn time_grid(
        &self,
        bar: Option<&Signal>,
        total_ticks: u64,
        settings: &GridSettings,
        bottom: f64,
    ) -> GridBatch {
        let mut grid = GridBatch::default();
        let frame = self.frame();
        let x_begin = frame.wave_begin();
        let x_end = frame.wave_end();
        if x_end <= x_begin {
            return grid;
        }
        let map = frame.tick_map;
        let m = frame.metrics;
        let top = m.row_height;
        let label_y = 2.0 - m.text_baseline;
        let mut labelled = false;

        if let Some(bar) = bar {
            let events = bar.events();
            let start = events.partition_point(|event| map.tick_to_x(event.tick) <= x_begin);
            let mut x_prev = match start.checked_sub(1) {
                Some(i) => map.tick_to_x(events[i].tick),
                None => -map.origin_x,
            };
            let mut x_text = x_begin;
            for event in &events[start..] {
                let x = map.tick_to_x(event.tick);
                if x > x_end {
                    break;
                }
                if x > x_begin && x > x_prev + 4.0 && event.value.level() == Some(Level::H) {
                    if frame.show_text {
                        let label =
                            format_ns_short(event.tick, settings.ticks_per_ns, settings.time_places);
                        let half = (self.measure().text_width(&label, false) / 2.0).floor();
                        if x - half - 5.0 > x_text {
                            let color = self.palette().time_label;
                            grid.labels
                                .push(TextRun::new(label, Point::new(x - half, label_y), color));
                            x_text = x + half;
                            labelled = true;
                        }
                    }
                    grid.lines.push(Line::new((x, top), (x, bottom)));
                }
                x_prev = x;
            }
        }

        if frame.show_text && !labelled {
            grid.fallback = true;
            let step = settings.step_ticks.max(1);
            let left = (map.origin_x / map.tick_width).floor();
            let mut tick = if left > 0.0 {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "float to int casts saturate; the loop is bounded by total_ticks"
                )]
                let left = left as u64;
                left / step * step
            } else {
                0
            };
            let mut x_text = x_begin;
            while tick < total_ticks {
                let x = map.tick_to_x(tick);
                if x > x_end {
                    break;
                }
                if x > x_begin {
                    let label = format_ns_short(tick, settings.ticks_per_ns, settings.time_places);
                    let w = self.measure().text_width(&label, false);
                    if x - w - 5.0 > x_text {
                        let origin = Point::new(x - (w / 2.0).floor(), label_y);
                        let color = self.palette().time_label;
                        grid.labels.push(TextRun::new(label, origin, color));
                        grid.lines.push(Line::new((x, top), (x, bottom)));
                        x_text = x;
                    }
                }
                let Some(next) = tick.checked_add(step) else {
                    break;
                };
                tick = next;
            }
        }
        grid
    }
}
