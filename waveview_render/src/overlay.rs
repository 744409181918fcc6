// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Rect};
use waveview_gather::time::format_ns;
use waveview_gather::{GridSettings, Palette, TextRun};
use waveview_viewport::Viewport;

use crate::paint::PaintSink;

/// Pointer feedback painted over the cached raster on every paint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    /// Tick shown in the top-left time label.
    pub pointer_tick: Option<u64>,
    /// Display rows of a name selection.
    pub name_rows: Option<Range<usize>>,
    /// Ticks of a time selection, `start..end` in either order.
    pub time_range: Option<(u64, u64)>,
    /// Window position of a snapped edge.
    pub snap: Option<Point>,
}

impl Overlay {
    /// Paints the overlay.
    pub fn paint(
        &self,
        viewport: &Viewport,
        palette: &Palette,
        time: &GridSettings,
        sink: &mut dyn PaintSink,
    ) {
        if viewport.is_degenerate() {
            return;
        }
        let m = viewport.metrics();
        let label_y = 2.0 - m.text_baseline;
        let span = viewport.wave_span();
        let bottom = viewport.content_bottom();
        let ns = |ticks| format_ns(ticks, time.ticks_per_ns, time.time_places);

        let mut texts = Vec::new();
        if let Some(tick) = self.pointer_tick {
            // During a time selection the delta label follows at x 65.
            let run = if self.time_range.is_some() {
                TextRun::new(ns(tick), Point::new(1.0, label_y), palette.time_label)
            } else {
                TextRun::new(
                    format!("{} ns", ns(tick)),
                    Point::new(10.0, label_y),
                    palette.time_label,
                )
            };
            texts.push(run);
        }

        if let Some(rows) = &self.name_rows {
            let top_row = viewport.row_low_rail_y(rows.start) - m.row_height;
            let bottom_row = viewport.row_low_rail_y(rows.end) - m.row_height;
            let y0 = top_row.max(m.row_height);
            let y1 = bottom_row.max(m.row_height);
            if y1 > y0 {
                sink.fill_rect(Rect::new(0.0, y0, span.end, y1), palette.highlight);
            }
        } else if let Some((start, end)) = self.time_range {
            let map = viewport.tick_map();
            let clamp = |t| map.tick_to_x(t).clamp(span.start, span.end);
            let (x0, x1) = (clamp(start.min(end)), clamp(start.max(end)));
            if x1 > x0 {
                sink.fill_rect(Rect::new(x0, 0.0, x1, bottom), palette.highlight);
            }
            texts.push(TextRun::new(
                format!("\u{394}{} ns", ns(start.abs_diff(end))),
                Point::new(65.0, label_y),
                palette.time_label,
            ));
        }

        sink.draw_text(&texts);

        if let Some(Point { x, y }) = self.snap {
            sink.stroke_rect(Rect::new(x - 3.0, y - 3.0, x + 3.0, y + 3.0), palette.snap_marker);
        }
    }
}
