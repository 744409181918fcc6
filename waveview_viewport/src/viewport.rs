// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Size};

use crate::metrics::RowMetrics;

/// Mapping between ticks and window X coordinates for one frame.
///
/// `x = name_width - origin_x + floor(tick * tick_width)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickMap {
    /// Left edge of the wave area.
    pub name_width: f64,
    /// Horizontal scroll offset in pixels.
    pub origin_x: f64,
    /// Pixels per tick.
    pub tick_width: f64,
    /// Right edge of the visible wave area.
    pub wave_end: f64,
}

impl TickMap {
    /// Window X coordinate of `tick`.
    #[must_use]
    pub fn tick_to_x(&self, tick: u64) -> f64 {
        self.name_width - self.origin_x + (tick as f64 * self.tick_width).floor()
    }

    /// Tick under window X coordinate `x`, or `None` outside the wave area.
    #[must_use]
    pub fn x_to_tick(&self, x: f64) -> Option<u64> {
        if x < self.name_width || x > self.wave_end {
            return None;
        }
        Some(to_units(
            ((x + self.origin_x - self.name_width) / self.tick_width).floor(),
        ))
    }
}

/// Scroll position and scale of a timing diagram.
///
/// The diagram is a virtual surface: a fixed name column on the left, one
/// header row on top, then one row per displayed signal. Its width depends on
/// the run's total tick count and the current tick width; only the part under
/// the window is ever drawn.
///
/// Scroll positions are in scroll units: [`Viewport::scroll_unit`] pixels
/// horizontally and one row vertically.
#[derive(Clone, Debug)]
pub struct Viewport {
    window: Size,
    tick_width: f64,
    scale_factor: f64,
    metrics: RowMetrics,
    scroll_x: u64,
    scroll_y: u64,
    scroll_unit: f64,
    total_ticks: u64,
    rows: usize,
}

impl Viewport {
    /// Initial pixels per tick.
    pub const DEFAULT_TICK_WIDTH: f64 = 0.5;
    /// Initial timing scale factor.
    pub const DEFAULT_SCALE_FACTOR: f64 = 1.4;
    /// Pixels per horizontal scroll unit.
    pub const DEFAULT_SCROLL_UNIT: f64 = 20.0;
    /// Factor applied by [`Viewport::scale_smaller`] and [`Viewport::scale_larger`].
    pub const SCALE_STEP: f64 = 1.05;

    /// Creates a viewport for a window of `window` pixels with no content.
    #[must_use]
    pub fn new(window: Size) -> Self {
        Self {
            window,
            tick_width: Self::DEFAULT_TICK_WIDTH,
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
            metrics: RowMetrics::from_scale(Self::DEFAULT_SCALE_FACTOR),
            scroll_x: 0,
            scroll_y: 0,
            scroll_unit: Self::DEFAULT_SCROLL_UNIT,
            total_ticks: 0,
            rows: 0,
        }
    }

    /// Window size in pixels.
    #[must_use]
    pub fn window_size(&self) -> Size {
        self.window
    }

    /// Sets the window size. Returns `true` if it changed.
    pub fn set_window_size(&mut self, window: Size) -> bool {
        if self.window == window {
            return false;
        }
        self.window = window;
        true
    }

    /// Sets the content extents: the run's tick count and the displayed row count.
    ///
    /// The scroll position is clamped to the new extents.
    pub fn set_content(&mut self, total_ticks: u64, rows: usize) {
        self.total_ticks = total_ticks;
        self.rows = rows;
        self.clamp_scroll();
    }

    /// Total ticks of the current run.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Number of displayed rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pixels per tick.
    #[must_use]
    pub fn tick_width(&self) -> f64 {
        self.tick_width
    }

    /// Sets the tick width without moving the scroll position.
    ///
    /// Returns `false` and leaves the viewport unchanged unless `tick_width` is
    /// a positive normal number.
    pub fn set_tick_width(&mut self, tick_width: f64) -> bool {
        if !is_valid_tick_width(tick_width) {
            return false;
        }
        self.tick_width = tick_width;
        self.clamp_scroll();
        true
    }

    /// Timing scale factor.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Sets the timing scale factor and re-derives the row metrics.
    ///
    /// Non-positive or non-finite scales are ignored.
    pub fn set_scale_factor(&mut self, scale: f64) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }
        let baseline = self.metrics.text_baseline;
        self.scale_factor = scale;
        self.metrics = RowMetrics::from_scale(scale).with_baseline(baseline);
        self.clamp_scroll();
        true
    }

    /// Makes text and rows smaller by one step.
    pub fn scale_smaller(&mut self) -> bool {
        self.set_scale_factor(self.scale_factor / Self::SCALE_STEP)
    }

    /// Makes text and rows larger by one step.
    pub fn scale_larger(&mut self) -> bool {
        self.set_scale_factor(self.scale_factor * Self::SCALE_STEP)
    }

    /// Row metrics for the current scale.
    #[must_use]
    pub fn metrics(&self) -> &RowMetrics {
        &self.metrics
    }

    /// Sets how far text is raised, in pixels.
    pub fn set_text_baseline(&mut self, baseline: f64) {
        self.metrics.text_baseline = baseline;
    }

    /// Pixels per horizontal scroll unit.
    #[must_use]
    pub fn scroll_unit(&self) -> f64 {
        self.scroll_unit
    }

    /// Sets the pixels per horizontal scroll unit; non-positive values are ignored.
    pub fn set_scroll_unit(&mut self, unit: f64) {
        if unit.is_finite() && unit > 0.0 {
            self.scroll_unit = unit;
            self.clamp_scroll();
        }
    }

    /// Scroll position as `(x, y)` scroll units.
    #[must_use]
    pub fn scroll(&self) -> (u64, u64) {
        (self.scroll_x, self.scroll_y)
    }

    /// Sets the scroll position, clamped to [`Viewport::scroll_max`].
    pub fn set_scroll(&mut self, x: u64, y: u64) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll();
    }

    /// Largest scroll position for the current content.
    #[must_use]
    pub fn scroll_max(&self) -> (u64, u64) {
        let content = self.content_size();
        (
            to_units((content.width / self.scroll_unit + 0.5).floor()),
            to_units((content.height / self.metrics.row_height + 0.5).floor()),
        )
    }

    /// Scroll offset in pixels: the content point shown at the window's top-left.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(
            self.scroll_x as f64 * self.scroll_unit,
            self.scroll_y as f64 * self.metrics.row_height,
        )
    }

    /// Size of the virtual content surface in pixels.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let waves = self.tick_width * self.total_ticks as f64;
        Size::new(
            (waves + self.metrics.name_width + 0.5).floor(),
            (self.rows as f64 + 1.0) * self.metrics.row_height,
        )
    }

    /// Width of the window part right of the name column; zero if there is none.
    #[must_use]
    pub fn wave_width(&self) -> f64 {
        (self.window.width - self.metrics.name_width).max(0.0)
    }

    /// Horizontal window span of visible waveforms.
    ///
    /// Empty when the window is no wider than the name column or there are no
    /// ticks to show.
    #[must_use]
    pub fn wave_span(&self) -> Range<f64> {
        let begin = self.metrics.name_width;
        let end = self.window.width.min(self.content_size().width);
        begin..end.max(begin)
    }

    /// Returns `true` if the window has no area at all.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.window.width > 0.0 && self.window.height > 0.0)
    }

    /// Returns `true` if some part of the wave area is visible.
    #[must_use]
    pub fn has_wave_area(&self) -> bool {
        let span = self.wave_span();
        !self.is_degenerate() && self.total_ticks > 0 && span.end > span.start
    }

    /// Bottom edge of visible content in window coordinates.
    #[must_use]
    pub fn content_bottom(&self) -> f64 {
        self.window.height.min(self.content_size().height)
    }

    /// Display rows intersecting the window.
    ///
    /// The range always lies within `0..rows`.
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        let row_h = self.metrics.row_height;
        let y0 = self.origin().y;
        let start = to_index((y0 / row_h).ceil()).min(self.rows);
        if self.is_degenerate() {
            return start..start;
        }
        let last = to_index(((self.content_bottom() + y0) / row_h).floor() - 1.0);
        start..last.max(start + 1).min(self.rows)
    }

    /// Ticks covered by the visible wave area.
    #[must_use]
    pub fn visible_ticks(&self) -> Range<u64> {
        if !self.has_wave_area() {
            return 0..0;
        }
        let span = self.wave_span();
        let x0 = self.origin().x;
        let start = to_units((x0 / self.tick_width).floor());
        let end = to_units(((span.end - span.start + x0) / self.tick_width).ceil());
        start.min(self.total_ticks)..end.min(self.total_ticks)
    }

    /// Tick mapping for the current frame.
    #[must_use]
    pub fn tick_map(&self) -> TickMap {
        TickMap {
            name_width: self.metrics.name_width,
            origin_x: self.origin().x,
            tick_width: self.tick_width,
            wave_end: self.wave_span().end,
        }
    }

    /// Tick under window X coordinate `x`, or `None` outside the wave area.
    #[must_use]
    pub fn x_to_tick(&self, x: f64) -> Option<u64> {
        if !self.has_wave_area() {
            return None;
        }
        self.tick_map().x_to_tick(x)
    }

    /// Display row under window Y coordinate `y`, if any.
    #[must_use]
    pub fn y_to_row(&self, y: f64) -> Option<usize> {
        let row = self.raw_row(y);
        (row >= 0.0 && row < self.rows as f64).then(|| to_index(row))
    }

    /// Row boundary nearest to window Y coordinate `y`, within `0..=rows`.
    ///
    /// Used for name-range drags, where the pointer may leave the rows.
    #[must_use]
    pub fn y_to_row_boundary(&self, y: f64) -> usize {
        to_index(self.raw_row(y)).min(self.rows)
    }

    /// Window Y coordinate of the low rail of display row `row`.
    #[must_use]
    pub fn row_low_rail_y(&self, row: usize) -> f64 {
        self.metrics.row_low_rail(row) - self.origin().y
    }

    /// Doubles the tick width, keeping the centre tick centred.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(2.0)
    }

    /// Halves the tick width, keeping the centre tick centred.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(0.5)
    }

    /// Multiplies the tick width by `factor`, keeping the tick at the centre
    /// of the wave area in place.
    ///
    /// Returns `false` without changes if the new tick width would not be a
    /// positive normal number.
    pub fn zoom_by(&mut self, factor: f64) -> bool {
        let new_width = self.tick_width * factor;
        if !is_valid_tick_width(new_width) {
            return false;
        }
        let unit = self.scroll_unit;
        let half = self.wave_width() / 2.0;
        let old_width = self.tick_width;
        let center = self.scroll_x as f64 * unit / old_width + half / old_width;
        let left = center - half / new_width;
        self.tick_width = new_width;
        self.scroll_x = to_units((left * new_width / unit + 0.5).floor());
        self.clamp_scroll();
        true
    }

    /// Sets the tick width so that `t0..t1` fills 90% of the wave area, with a
    /// 5% margin on each side, and scrolls to the start of the range.
    ///
    /// The bounds may be given in either order. Returns `false` without changes
    /// for an empty range or when there is no wave area.
    pub fn zoom_to_range(&mut self, t0: u64, t1: u64) -> bool {
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let dt = (t1 - t0) as f64;
        let wave = self.wave_width();
        if dt == 0.0 || wave <= 0.0 {
            return false;
        }
        let tick_width = 0.9 * wave / dt;
        if !is_valid_tick_width(tick_width) {
            return false;
        }
        self.tick_width = tick_width;
        self.scroll_x = to_units(((t0 as f64 - 0.05 * dt) * tick_width / self.scroll_unit).floor());
        self.clamp_scroll();
        true
    }

    /// Scrolls vertically so display row `row` is near the middle of the window.
    pub fn center_row(&mut self, row: usize) {
        let row_h = self.metrics.row_height;
        let top = row as f64 * row_h - (self.window.height / 2.0).floor();
        self.scroll_y = to_units((top / row_h).floor());
        self.clamp_scroll();
    }

    /// Scrolls to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    /// Scrolls to the last scroll position vertically.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.scroll_max().1;
    }

    /// Scrolls to tick zero.
    pub fn scroll_to_start(&mut self) {
        self.scroll_x = 0;
    }

    /// Scrolls to the last scroll position horizontally.
    pub fn scroll_to_end(&mut self) {
        self.scroll_x = self.scroll_max().0;
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            window: self.window,
            tick_width: self.tick_width,
            scale_factor: self.scale_factor,
            scroll: self.scroll(),
            scroll_max: self.scroll_max(),
            content_size: self.content_size(),
            wave_span: self.wave_span(),
            visible_rows: self.visible_rows(),
            visible_ticks: self.visible_ticks(),
            metrics: self.metrics,
        }
    }

    fn raw_row(&self, y: f64) -> f64 {
        ((y + self.origin().y) / self.metrics.row_height).floor() - 1.0
    }

    fn clamp_scroll(&mut self) {
        let (x_max, y_max) = self.scroll_max();
        self.scroll_x = self.scroll_x.min(x_max);
        self.scroll_y = self.scroll_y.min(y_max);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Debug)]
pub struct ViewportDebugInfo {
    /// Window size in pixels.
    pub window: Size,
    /// Pixels per tick.
    pub tick_width: f64,
    /// Timing scale factor.
    pub scale_factor: f64,
    /// Scroll position in scroll units.
    pub scroll: (u64, u64),
    /// Largest scroll position.
    pub scroll_max: (u64, u64),
    /// Virtual content size in pixels.
    pub content_size: Size,
    /// Visible wave area, window X coordinates.
    pub wave_span: Range<f64>,
    /// Visible display rows.
    pub visible_rows: Range<usize>,
    /// Visible ticks.
    pub visible_ticks: Range<u64>,
    /// Row metrics.
    pub metrics: RowMetrics,
}

fn is_valid_tick_width(width: f64) -> bool {
    width.is_normal() && width > 0.0
}

/// Converts a non-negative whole number of units, saturating at the bounds.
fn to_units(value: f64) -> u64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is floored or rounded by callers; float to int casts saturate"
    )]
    {
        value.max(0.0) as u64
    }
}

fn to_index(value: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is floored or rounded by callers; float to int casts saturate"
    )]
    {
        value.max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::Viewport;

    fn viewport(total_ticks: u64, rows: usize) -> Viewport {
        let mut vp = Viewport::new(Size::new(840.0, 300.0));
        vp.set_content(total_ticks, rows);
        vp
    }

    #[test]
    fn content_extents_follow_scale_and_ticks() {
        let vp = viewport(10_000, 20);
        // 0.5 * 10000 + 140 name column.
        assert_eq!(vp.content_size(), Size::new(5140.0, 21.0 * 14.0));
        assert_eq!(vp.scroll_max(), (257, 21));
        assert_eq!(vp.wave_width(), 700.0);
        assert_eq!(vp.wave_span(), 140.0..840.0);
    }

    #[test]
    fn tick_and_pixel_conversion() {
        let mut vp = viewport(10_000, 5);
        assert_eq!(vp.tick_map().tick_to_x(100), 190.0);
        assert_eq!(vp.x_to_tick(190.0), Some(100));
        assert_eq!(vp.x_to_tick(139.0), None);
        assert_eq!(vp.x_to_tick(841.0), None);

        vp.set_scroll(5, 0);
        assert_eq!(vp.origin().x, 100.0);
        assert_eq!(vp.tick_map().tick_to_x(200), 140.0);
        assert_eq!(vp.x_to_tick(140.0), Some(200));
    }

    #[test]
    fn rows_map_below_the_header() {
        let mut vp = viewport(100, 5);
        assert_eq!(vp.y_to_row(5.0), None);
        assert_eq!(vp.y_to_row(14.0), Some(0));
        assert_eq!(vp.y_to_row(70.0), Some(4));
        assert_eq!(vp.y_to_row(84.0), None);
        assert_eq!(vp.y_to_row_boundary(500.0), 5);
        assert_eq!(vp.y_to_row_boundary(0.0), 0);

        vp.set_scroll(0, 2);
        assert_eq!(vp.y_to_row(14.0), Some(2));
        assert_eq!(vp.row_low_rail_y(2), 28.0);
    }

    #[test]
    fn visible_rows_stop_at_window_bottom() {
        let vp = viewport(100, 40);
        // y_end = 300; rows whose low rail fits: (i + 2) * 14 <= 300.
        assert_eq!(vp.visible_rows(), 0..20);

        let mut few = viewport(100, 3);
        assert_eq!(few.visible_rows(), 0..3);
        few.set_scroll(0, 4);
        assert_eq!(few.visible_rows(), 3..3);
    }

    #[test]
    fn zoom_keeps_center_tick() {
        let mut vp = viewport(100_000, 1);
        vp.set_scroll(100, 0);
        let center = |vp: &Viewport| vp.x_to_tick(140.0 + 350.0).unwrap();
        let before = center(&vp);
        assert!(vp.zoom_in());
        assert_eq!(vp.tick_width(), 1.0);
        let after = center(&vp);
        assert!(before.abs_diff(after) <= 20, "{before} vs {after}");
        assert!(vp.zoom_out());
        assert_eq!(vp.tick_width(), 0.5);
    }

    #[test]
    fn zoom_out_near_start_clamps_to_zero() {
        let mut vp = viewport(100_000, 1);
        vp.set_scroll(1, 0);
        vp.zoom_out();
        assert_eq!(vp.scroll().0, 0);
    }

    #[test]
    fn zoom_to_range_fills_ninety_percent() {
        let mut vp = viewport(100_000, 1);
        assert!(vp.zoom_to_range(20_000, 10_000));
        assert_eq!(vp.tick_width(), 0.9 * 700.0 / 10_000.0);
        // Start lands 5% of the range right of the wave area's left edge.
        let x = vp.tick_map().tick_to_x(10_000);
        assert!((x - (140.0 + 35.0)).abs() <= 20.0, "x = {x}");
        assert!(!vp.zoom_to_range(500, 500));
    }

    #[test]
    fn degenerate_window_has_no_wave_area() {
        let mut vp = viewport(100, 3);
        vp.set_window_size(Size::new(100.0, 300.0));
        assert!(!vp.has_wave_area());
        assert_eq!(vp.x_to_tick(120.0), None);
        assert!(!vp.zoom_to_range(0, 50));

        vp.set_window_size(Size::ZERO);
        assert!(vp.is_degenerate());
        assert!(vp.visible_rows().is_empty());

        let empty = viewport(0, 3);
        assert!(!empty.has_wave_area());
        assert_eq!(empty.content_size().width, 140.0);
    }

    #[test]
    fn center_row_and_scroll_to_ends() {
        let mut vp = viewport(10_000, 100);
        vp.center_row(50);
        // (50 * 14 - 150) / 14 = 39.28..
        assert_eq!(vp.scroll().1, 39);
        vp.center_row(2);
        assert_eq!(vp.scroll().1, 0);

        vp.scroll_to_end();
        vp.scroll_to_bottom();
        assert_eq!(vp.scroll(), vp.scroll_max());
        vp.scroll_to_start();
        vp.scroll_to_top();
        assert_eq!(vp.scroll(), (0, 0));
    }

    #[test]
    fn scale_steps_rederive_metrics() {
        let mut vp = viewport(10, 1);
        vp.set_text_baseline(2.0);
        assert!(vp.scale_larger());
        assert_eq!(vp.metrics().name_width, 147.0);
        assert_eq!(vp.metrics().text_baseline, 2.0);
        assert!(vp.scale_smaller());
        assert_eq!(vp.metrics().name_width, 140.0);
        assert!(!vp.set_scale_factor(0.0));
    }
}
