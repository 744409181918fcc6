// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Line, Size};
use waveview_gather::{
    DontCareQuad, GatherFrame, GridSettings, Palette, SegmentGatherer, SnapHit, SnapProbe,
    TextMeasure, TextRun,
};
use waveview_signal::{Signal, SignalOrder};
use waveview_viewport::Viewport;

use crate::paint::{DisplayList, PaintSink};

/// The static part of one frame, recorded for replay.
///
/// Holds everything that only depends on the view parameters: the name column
/// and its separator, row baselines, the time grid, and the waveforms of the
/// visible rows. Pointer feedback is not part of it.
#[derive(Clone, Debug, Default)]
pub struct Raster {
    size: Size,
    list: DisplayList,
    rows: Range<usize>,
    ticks: Range<u64>,
    snap: Option<SnapHit>,
}

impl Raster {
    /// An empty raster of the given window size.
    #[must_use]
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Window size the raster was built for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Display rows that were gathered.
    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Ticks covered by the gathered wave area.
    #[must_use]
    pub fn ticks(&self) -> Range<u64> {
        self.ticks.clone()
    }

    /// Edge found by the snap probe while building, if any.
    #[must_use]
    pub fn snap(&self) -> Option<SnapHit> {
        self.snap
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Recorded operations.
    #[must_use]
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Paints the raster into `sink`.
    pub fn replay(&self, sink: &mut dyn PaintSink) {
        self.list.replay(sink);
    }
}

/// Per-frame options of a [`RasterBuilder`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterSettings {
    /// Draw labels at all.
    pub show_text: bool,
    /// Time grid parameters.
    pub grid: GridSettings,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            show_text: true,
            grid: GridSettings::default(),
        }
    }
}

/// Builds a [`Raster`] for the visible part of a diagram.
///
/// Only the rows in [`Viewport::visible_rows`] are gathered, and each only
/// over the visible wave area, so the cost tracks the window rather than the
/// virtual extent.
#[derive(Clone, Copy)]
pub struct RasterBuilder<'a> {
    viewport: &'a Viewport,
    order: &'a SignalOrder,
    measure: &'a dyn TextMeasure,
    palette: &'a Palette,
    bar: Option<&'a Signal>,
    settings: RasterSettings,
    snap: Option<(usize, SnapProbe)>,
}

impl core::fmt::Debug for RasterBuilder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RasterBuilder")
            .field("viewport", &self.viewport)
            .field("rows", &self.order.displayed_len())
            .field("bar", &self.bar.map(Signal::id))
            .field("settings", &self.settings)
            .field("snap", &self.snap)
            .finish_non_exhaustive()
    }
}

impl<'a> RasterBuilder<'a> {
    /// Creates a builder for the displayed rows of `order` seen through `viewport`.
    #[must_use]
    pub fn new(
        viewport: &'a Viewport,
        order: &'a SignalOrder,
        measure: &'a dyn TextMeasure,
        palette: &'a Palette,
    ) -> Self {
        Self {
            viewport,
            order,
            measure,
            palette,
            bar: None,
            settings: RasterSettings::default(),
            snap: None,
        }
    }

    /// Uses `bar`'s rising edges for the time grid.
    #[must_use]
    pub fn with_bar_signal(mut self, bar: Option<&'a Signal>) -> Self {
        self.bar = bar;
        self
    }

    /// Sets the frame options.
    #[must_use]
    pub fn with_settings(mut self, settings: RasterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Probes display row `row` for an edge near the pointer.
    #[must_use]
    pub fn with_snap(mut self, row: usize, probe: SnapProbe) -> Self {
        self.snap = Some((row, probe));
        self
    }

    /// Gathers and records the frame.
    ///
    /// A window without area yields an empty raster.
    #[must_use]
    pub fn build(&self) -> Raster {
        let vp = self.viewport;
        let size = vp.window_size();
        let mut raster = Raster::empty(size);
        if vp.is_degenerate() {
            log::debug!("degenerate window {size:?}, empty raster");
            return raster;
        }
        let palette = self.palette;
        let frame = GatherFrame::from_viewport(vp, self.settings.show_text);
        let gatherer = SegmentGatherer::new(frame, self.measure, palette);
        let x_begin = frame.wave_begin();
        let x_end = frame.wave_end();
        let bottom = vp.content_bottom();
        let rows = vp.visible_rows();

        let list = &mut raster.list;
        list.clear(palette.background);
        let separator = x_begin - 1.0;
        list.stroke_lines(
            &[Line::new((separator, 0.0), (separator, size.height))],
            palette.waveform,
        );

        let grid = gatherer.time_grid(self.bar, vp.total_ticks(), &self.settings.grid, bottom);

        let mut baselines = Vec::with_capacity(rows.len());
        let mut names: Vec<TextRun> = Vec::with_capacity(rows.len());
        let mut lines = Vec::new();
        let mut fills: Vec<DontCareQuad> = Vec::new();
        let mut texts: Vec<TextRun> = Vec::new();
        for row in rows.clone() {
            let Some(signal) = self.order.displayed_signal(row) else {
                break;
            };
            let y_low = vp.row_low_rail_y(row);
            names.extend(gatherer.name_label(signal, y_low));
            if x_end > x_begin {
                baselines.push(Line::new((x_begin, y_low), (x_end, y_low)));
            }
            let probe = self
                .snap
                .and_then(|(snap_row, probe)| (snap_row == row).then_some(probe));
            let batch = gatherer.gather(signal, y_low, probe);
            lines.extend(batch.lines);
            fills.extend(batch.fills);
            texts.extend(batch.texts);
            if batch.snap.is_some() {
                raster.snap = batch.snap;
            }
        }

        list.stroke_lines(&grid.lines, palette.grid);
        list.stroke_lines(&baselines, palette.grid);
        list.draw_text(&grid.labels);
        list.fill_quads(&fills, palette.dont_care);
        list.stroke_lines(&lines, palette.waveform);
        list.draw_text(&texts);
        list.draw_text(&names);

        raster.ticks = vp.visible_ticks();
        log::debug!(
            "built raster for rows {rows:?}, ticks {:?}: {} lines, {} fills, {} texts",
            raster.ticks,
            lines.len(),
            fills.len(),
            texts.len() + names.len() + grid.labels.len(),
        );
        raster.rows = rows;
        raster
    }
}
