// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Size};
use waveview_cursor::{
    CursorContext, CursorMachine, CursorState, Effect, InputEvent, PointerSample, ScrollTarget,
    Selection,
};
use waveview_gather::{MonospaceMeasure, Palette, SnapProbe, TextMeasure};
use waveview_render::{CacheKey, CacheStats, Overlay, PaintSink, RasterBuilder, RenderCache};
use waveview_signal::{
    FindFlags, OrderFileError, RestoreReport, SignalId, SignalOrder, Snapshot, order_file,
};
use waveview_viewport::Viewport;

use crate::config::DiagramConfig;

/// Result of [`Diagram::find`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FindOutcome {
    /// The display row that matched; it is selected and centered.
    Found(usize),
    /// Nothing matched; the name cursor moved to row 0.
    NotFound,
}

/// A user command, as bound to menu items or shortcuts by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Hide the selected rows into the clip buffer.
    Cut,
    /// Copy the selected rows into the clip buffer.
    Copy,
    /// Move the clip buffer in front of the selection.
    Paste,
    /// Double the tick width.
    ZoomIn,
    /// Halve the tick width.
    ZoomOut,
    /// Fit the time selection into the window.
    ZoomToSelection,
    /// Shrink the timing scale one step.
    ScaleSmaller,
    /// Grow the timing scale one step.
    ScaleLarger,
    /// Search display names.
    Find {
        /// Text to look for.
        text: String,
        /// Match options.
        flags: FindFlags,
        /// Start at row 0 instead of after the name cursor.
        from_top: bool,
    },
    /// Scroll to one end of the diagram.
    ScrollTo(ScrollTarget),
    /// Write the display order to the configured order file.
    SaveOrder,
}

/// What a [`Command`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The diagram changed and should be repainted.
    Redraw,
    /// Nothing visible changed.
    Unchanged,
    /// Result of a search.
    Find(FindOutcome),
}

/// One timing diagram: view, display order, cache, and cursor.
///
/// `Diagram` owns every piece of mutable state and is driven by the host:
/// [`Diagram::handle_input`] for pointer and key input, [`Diagram::execute`]
/// for commands, [`Diagram::paint`] whenever the window needs drawing.
pub struct Diagram {
    config: DiagramConfig,
    viewport: Viewport,
    order: SignalOrder,
    bar_signal: Option<SignalId>,
    cache: RenderCache,
    cursor: CursorMachine,
    palette: Palette,
    measure: Box<dyn TextMeasure>,
    pending_scroll: Option<(u64, u64)>,
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("signals", &self.order.len())
            .field("rows", &self.order.displayed_len())
            .field("bar_signal", &self.bar_signal)
            .field("cursor", &self.cursor)
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

impl Diagram {
    /// Creates an empty diagram for a window of `window` pixels.
    ///
    /// The configured scroll position is applied once the first snapshot
    /// is loaded.
    #[must_use]
    pub fn new(config: DiagramConfig, window: Size) -> Self {
        let mut viewport = Viewport::new(window);
        viewport.set_tick_width(config.tick_width);
        viewport.set_scale_factor(config.scale_factor);
        viewport.set_text_baseline(config.text_baseline);
        viewport.set_scroll_unit(config.scroll_unit_width);
        Self {
            cache: RenderCache::new(config.snap_policy),
            pending_scroll: Some((config.scroll_x, config.scroll_y)),
            config,
            viewport,
            order: SignalOrder::new(),
            bar_signal: None,
            cursor: CursorMachine::new(),
            palette: Palette::default(),
            measure: Box::new(MonospaceMeasure::default()),
        }
    }

    /// Uses `measure` to place labels.
    #[must_use]
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.cache.invalidate();
        self
    }

    /// Uses `palette` for drawing.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.cache.invalidate();
        self
    }

    /// Replaces the displayed run with `snapshot`.
    ///
    /// Cursor state and the cache are reset; zoom and scroll are kept. If an
    /// order file is configured it is applied to the new signals.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFileError::Read`] if the order file exists but cannot be
    /// read. The snapshot is loaded regardless.
    pub fn load_snapshot(
        &mut self,
        snapshot: Snapshot,
    ) -> Result<Option<RestoreReport>, OrderFileError> {
        let (signals, total_ticks, bar_signal) = snapshot.into_parts();
        self.order = SignalOrder::from_signals(signals);
        self.bar_signal = bar_signal;
        self.cursor.reset();
        self.cache.clear();

        let restored = match &self.config.order_file {
            Some(path) => order_file::restore(&mut self.order, path),
            None => Ok(None),
        };

        self.viewport
            .set_content(total_ticks, self.order.displayed_len());
        if let Some((x, y)) = self.pending_scroll.take() {
            self.viewport.set_scroll(x, y);
        }
        log::info!(
            "loaded snapshot: {} signals, {} displayed, {total_ticks} ticks",
            self.order.len(),
            self.order.displayed_len()
        );
        restored
    }

    /// Live configuration, including the current zoom, scale, and scroll.
    #[must_use]
    pub fn config(&self) -> DiagramConfig {
        let (scroll_x, scroll_y) = self.viewport.scroll();
        DiagramConfig {
            tick_width: self.viewport.tick_width(),
            scale_factor: self.viewport.scale_factor(),
            scroll_x,
            scroll_y,
            ..self.config.clone()
        }
    }

    /// Turns snapping to edges on or off.
    pub fn set_snap_to_edge(&mut self, snap: bool) {
        self.config.snap_to_edge = snap;
    }

    /// Current view.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Resizes the window. Returns `true` if the size changed.
    pub fn set_window_size(&mut self, window: Size) -> bool {
        self.viewport.set_window_size(window)
    }

    /// Signals and their display order.
    #[must_use]
    pub fn order(&self) -> &SignalOrder {
        &self.order
    }

    /// Cursor and selection state.
    #[must_use]
    pub fn cursor(&self) -> &CursorMachine {
        &self.cursor
    }

    /// Render cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Paints the diagram into `sink`: the cached raster, then the overlay.
    pub fn paint(&mut self, sink: &mut dyn PaintSink) {
        let time_drag = matches!(self.cursor.state(), CursorState::TimeDragging { .. });
        let tolerance = self.config.snap_tolerance().filter(|_| time_drag);
        let rebuild_probe = self.cache.rebuilds_while_snapping();

        let mut builder = RasterBuilder::new(
            &self.viewport,
            &self.order,
            self.measure.as_ref(),
            &self.palette,
        )
        .with_bar_signal(self.bar_signal.and_then(|id| self.order.get(id)))
        .with_settings(self.config.raster_settings());
        if let (
            true,
            Some(tolerance),
            Some(&PointerSample {
                row: Some(row),
                tick: Some(tick),
                ..
            }),
        ) = (rebuild_probe, tolerance, self.cursor.pointer())
        {
            builder = builder.with_snap(row, SnapProbe { tick, tolerance });
        }

        let key = CacheKey::from_viewport(&self.viewport);
        let raster = self
            .cache
            .get_or_rebuild(key, tolerance.is_some(), || builder.build());
        raster.replay(sink);

        let snap = if rebuild_probe {
            raster.snap().map(|hit| hit.point)
        } else {
            self.cursor.snapped_edge().map(|edge| {
                let m = self.viewport.metrics();
                Point::new(
                    self.viewport.tick_map().tick_to_x(edge.tick),
                    self.viewport.row_low_rail_y(edge.row) - (m.rail_height / 2.0).floor(),
                )
            })
        };
        let overlay = Overlay {
            pointer_tick: self.cursor.pointer_tick(),
            name_rows: self.cursor.name_selection(),
            time_range: match self.cursor.selection() {
                Some(Selection::Time(ticks)) => Some((ticks.start, ticks.end)),
                _ => None,
            },
            snap,
        };
        overlay.paint(
            &self.viewport,
            &self.palette,
            &self.config.grid_settings(),
            sink,
        );
    }

    /// Feeds one input event to the cursor and applies its effect.
    ///
    /// Bus expansion and scrolling are applied here; the effect is returned so
    /// the host can repaint or open a source location.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Effect> {
        let ctx = CursorContext {
            viewport: &self.viewport,
            order: &self.order,
            snap_tolerance: self.config.snap_tolerance(),
        };
        let effect = self.cursor.handle(event, &ctx)?;
        match effect {
            Effect::ExpandBus { row } => {
                if let Some(bits) = self.order.expand_bus(row) {
                    self.cursor.select_rows(bits);
                    self.relayout();
                }
            }
            Effect::ScrollTo(target) => self.scroll_to(target),
            Effect::Redraw | Effect::GoToSource { .. } => {}
        }
        Some(effect)
    }

    /// Runs `command`.
    ///
    /// # Errors
    ///
    /// Only [`Command::SaveOrder`] can fail, with [`OrderFileError::Write`].
    pub fn execute(&mut self, command: &Command) -> Result<CommandOutcome, OrderFileError> {
        let changed = match command {
            Command::Cut => self.cut(),
            Command::Copy => {
                self.copy();
                false
            }
            Command::Paste => self.paste(),
            Command::ZoomIn => self.viewport.zoom_in(),
            Command::ZoomOut => self.viewport.zoom_out(),
            Command::ZoomToSelection => self.zoom_to_selection(),
            Command::ScaleSmaller => self.viewport.scale_smaller(),
            Command::ScaleLarger => self.viewport.scale_larger(),
            Command::Find {
                text,
                flags,
                from_top,
            } => return Ok(CommandOutcome::Find(self.find(text, *flags, *from_top))),
            Command::ScrollTo(target) => {
                self.scroll_to(*target);
                true
            }
            Command::SaveOrder => {
                self.save_order()?;
                false
            }
        };
        Ok(if changed {
            CommandOutcome::Redraw
        } else {
            CommandOutcome::Unchanged
        })
    }

    /// Hides the selected rows. Returns `true` if any were cut.
    pub fn cut(&mut self) -> bool {
        let Some(rows) = self.cursor.name_selection() else {
            return false;
        };
        let start = rows.start;
        if self.order.cut(rows) == 0 {
            return false;
        }
        self.cursor.select_rows(start..start);
        self.relayout();
        true
    }

    /// Copies the selected rows. Returns the number copied.
    pub fn copy(&mut self) -> usize {
        self.cursor
            .name_selection()
            .map_or(0, |rows| self.order.copy(rows))
    }

    /// Moves the clip buffer in front of the selection, or to the end without
    /// a name selection, and selects the pasted rows.
    pub fn paste(&mut self) -> bool {
        let row = self
            .cursor
            .name_selection()
            .map_or(self.order.displayed_len(), |rows| rows.start);
        let Some(pasted) = self.order.paste(row) else {
            return false;
        };
        self.cursor.select_rows(pasted);
        self.relayout();
        true
    }

    /// Doubles the tick width.
    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    /// Halves the tick width.
    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out()
    }

    /// Fits the time selection into the window.
    pub fn zoom_to_selection(&mut self) -> bool {
        self.cursor
            .time_selection()
            .is_some_and(|ticks| self.viewport.zoom_to_range(ticks.start, ticks.end))
    }

    /// Shrinks the timing scale one step.
    pub fn scale_smaller(&mut self) -> bool {
        self.viewport.scale_smaller()
    }

    /// Grows the timing scale one step.
    pub fn scale_larger(&mut self) -> bool {
        self.viewport.scale_larger()
    }

    /// Searches display names for `text`.
    ///
    /// Starts at row 0 when `from_top`, otherwise after the name cursor. A
    /// match is selected and scrolled to the middle of the window.
    pub fn find(&mut self, text: &str, flags: FindFlags, from_top: bool) -> FindOutcome {
        let from = if from_top {
            0
        } else {
            self.cursor.name_cursor().map_or(0, |row| row + 1)
        };
        match self.order.find(text, flags, from) {
            Some(row) => {
                log::debug!("find {text:?} from row {from}: row {row}");
                self.cursor.select_rows(row..row + 1);
                self.viewport.center_row(row);
                FindOutcome::Found(row)
            }
            None => {
                log::debug!("find {text:?} from row {from}: not found");
                self.cursor.select_rows(0..0);
                FindOutcome::NotFound
            }
        }
    }

    /// Writes the display order to the configured order file.
    ///
    /// Returns `Ok(false)` if no order file is configured.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFileError::Write`] if the file cannot be written.
    pub fn save_order(&self) -> Result<bool, OrderFileError> {
        let Some(path) = &self.config.order_file else {
            return Ok(false);
        };
        order_file::save(&self.order, path)?;
        Ok(true)
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        match target {
            ScrollTarget::Top => self.viewport.scroll_to_top(),
            ScrollTarget::Bottom => self.viewport.scroll_to_bottom(),
            ScrollTarget::Start => self.viewport.scroll_to_start(),
            ScrollTarget::End => self.viewport.scroll_to_end(),
        }
    }

    /// Re-derives extents after the displayed rows changed.
    fn relayout(&mut self) {
        self.viewport
            .set_content(self.viewport.total_ticks(), self.order.displayed_len());
        self.cache.invalidate();
    }
}
