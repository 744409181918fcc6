// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::Point;
use waveview_signal::{SignalId, SignalOrder};
use waveview_viewport::Viewport;

use crate::input::{InputEvent, Key, Modifiers, PointerButton};
use crate::sample::{Area, PointerSample};
use crate::snap::nearest_edge;

/// Cursor and selection state.
///
/// Name drags track row boundaries; time drags track ticks, `None` while the
/// drag started outside the visible wave area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CursorState {
    /// No drag and no selection.
    #[default]
    Idle,
    /// Dragging over the name column.
    NameDragging {
        /// Row boundary where the drag started.
        anchor: usize,
        /// Row boundary under the pointer.
        current: usize,
    },
    /// A finished name drag.
    NameSelected {
        /// Row boundary where the drag started.
        anchor: usize,
        /// Row boundary where it ended.
        current: usize,
    },
    /// Dragging over the wave area.
    TimeDragging {
        /// Tick where the drag started.
        anchor: Option<u64>,
        /// Last tick under the pointer.
        current: Option<u64>,
    },
    /// A finished time drag.
    TimeSelected {
        /// Tick where the drag started.
        anchor: Option<u64>,
        /// Tick where it ended.
        current: Option<u64>,
    },
}

impl CursorState {
    /// Returns `true` while a button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::NameDragging { .. } | Self::TimeDragging { .. })
    }

    /// The selection, ordered and half-open.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        match *self {
            Self::Idle => None,
            Self::NameDragging { anchor, current } | Self::NameSelected { anchor, current } => {
                Some(Selection::Names(anchor.min(current)..anchor.max(current)))
            }
            Self::TimeDragging { anchor, current } | Self::TimeSelected { anchor, current } => {
                let (a, c) = (anchor?, current?);
                Some(Selection::Time(a.min(c)..a.max(c)))
            }
        }
    }
}

/// A name or time selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Display rows.
    Names(Range<usize>),
    /// Ticks.
    Time(Range<u64>),
}

/// Scroll request of a key shortcut.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// First row.
    Top,
    /// Last row.
    Bottom,
    /// Tick zero.
    Start,
    /// Last tick.
    End,
}

/// What the host should do after an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Repaint; the overlay changed.
    Redraw,
    /// Open the source of a signal in an editor.
    GoToSource {
        /// Display row that was double-clicked.
        row: usize,
        /// Signal on that row.
        signal: SignalId,
    },
    /// Show the bit signals of the bus on `row` below it.
    ExpandBus {
        /// Display row of the bus.
        row: usize,
    },
    /// Scroll to one end of the diagram.
    ScrollTo(ScrollTarget),
}

/// What the machine needs to know about the diagram to interpret input.
#[derive(Copy, Clone, Debug)]
pub struct CursorContext<'a> {
    /// Current view.
    pub viewport: &'a Viewport,
    /// Displayed signals.
    pub order: &'a SignalOrder,
    /// Snap tolerance in ticks, when snapping to edges is on.
    pub snap_tolerance: Option<u64>,
}

/// An edge the pointer is snapped to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnappedEdge {
    /// Display row of the edge.
    pub row: usize,
    /// Tick of the edge.
    pub tick: u64,
}

/// Interprets [`InputEvent`]s as cursor placement and selection.
///
/// A press in the name column starts a name drag, a press right of it a time
/// drag; releasing keeps the selection until the next press. While a time
/// drag is in progress and snapping is on, the pointer tick moves to the
/// nearest edge of the signal under the pointer.
#[derive(Clone, Debug, Default)]
pub struct CursorMachine {
    state: CursorState,
    pointer: Option<PointerSample>,
    tick: Option<u64>,
    snapped: Option<SnappedEdge>,
}

impl CursorMachine {
    /// Creates an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Last pointer sample, `None` once the pointer left the window.
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerSample> {
        self.pointer.as_ref()
    }

    /// Returns `true` while a button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The selection, ordered and half-open.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.state.selection()
    }

    /// Selected display rows, if the selection is a name selection.
    #[must_use]
    pub fn name_selection(&self) -> Option<Range<usize>> {
        match self.selection()? {
            Selection::Names(rows) => Some(rows),
            Selection::Time(_) => None,
        }
    }

    /// Selected ticks, if the selection is a time selection.
    #[must_use]
    pub fn time_selection(&self) -> Option<Range<u64>> {
        match self.selection()? {
            Selection::Time(ticks) => Some(ticks),
            Selection::Names(_) => None,
        }
    }

    /// Row boundary of the name cursor.
    #[must_use]
    pub fn name_cursor(&self) -> Option<usize> {
        match self.state {
            CursorState::NameDragging { current, .. } | CursorState::NameSelected { current, .. } => {
                Some(current)
            }
            _ => None,
        }
    }

    /// Tick for the time label.
    ///
    /// The tick under the pointer, snapped while dragging; otherwise the tick
    /// where the current time drag started.
    #[must_use]
    pub fn pointer_tick(&self) -> Option<u64> {
        self.tick.or(match self.state {
            CursorState::TimeDragging { anchor, .. } | CursorState::TimeSelected { anchor, .. } => {
                anchor
            }
            _ => None,
        })
    }

    /// Edge the pointer is snapped to.
    #[must_use]
    pub fn snapped_edge(&self) -> Option<SnappedEdge> {
        self.snapped
    }

    /// Selects display rows `rows`, placing the name cursor at its start.
    pub fn select_rows(&mut self, rows: Range<usize>) {
        self.state = CursorState::NameSelected {
            anchor: rows.end,
            current: rows.start,
        };
    }

    /// Drops any selection.
    pub fn clear_selection(&mut self) {
        self.state = CursorState::Idle;
        self.snapped = None;
    }

    /// Returns to the initial state, forgetting the pointer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handles one input event.
    pub fn handle(&mut self, event: InputEvent, ctx: &CursorContext<'_>) -> Option<Effect> {
        match event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } => {
                let sample = self.track(ctx, pos, true);
                self.state = match sample.area {
                    Area::Names => CursorState::NameDragging {
                        anchor: sample.boundary,
                        current: sample.boundary,
                    },
                    Area::Wave => CursorState::TimeDragging {
                        anchor: self.tick,
                        current: self.tick,
                    },
                    Area::Outside => CursorState::Idle,
                };
                log::trace!("pointer down: {:?}", self.state);
                Some(Effect::Redraw)
            }
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Secondary,
            } => {
                let sample = PointerSample::new(ctx.viewport, pos);
                if sample.area != Area::Names {
                    return None;
                }
                let row = sample.row?;
                let signal = ctx.order.displayed_signal(row)?;
                (signal.is_bus() && !signal.bit_signals().is_empty())
                    .then_some(Effect::ExpandBus { row })
            }
            InputEvent::PointerDown { .. } => None,
            InputEvent::PointerMove { pos } => {
                self.drag_to(ctx, pos);
                Some(Effect::Redraw)
            }
            InputEvent::PointerUp { pos } => {
                self.drag_to(ctx, pos);
                self.state = match self.state {
                    CursorState::NameDragging { anchor, current } => {
                        CursorState::NameSelected { anchor, current }
                    }
                    CursorState::TimeDragging { anchor, current } => {
                        CursorState::TimeSelected { anchor, current }
                    }
                    other => other,
                };
                self.snapped = None;
                log::trace!("pointer up: {:?}", self.state);
                Some(Effect::Redraw)
            }
            InputEvent::DoubleClick { pos } => {
                if self.is_dragging() {
                    return None;
                }
                let sample = PointerSample::new(ctx.viewport, pos);
                if sample.area != Area::Names {
                    return None;
                }
                let row = sample.row?;
                let signal = ctx.order.displayed_signal(row)?;
                if signal.source().is_none() {
                    return None;
                }
                Some(Effect::GoToSource {
                    row,
                    signal: signal.id(),
                })
            }
            InputEvent::PointerLeave => {
                self.pointer = None;
                self.tick = None;
                self.snapped = None;
                Some(Effect::Redraw)
            }
            InputEvent::Key { key, modifiers } => {
                if modifiers != Modifiers::CONTROL {
                    return None;
                }
                let target = match key {
                    Key::ArrowUp => ScrollTarget::Top,
                    Key::ArrowDown => ScrollTarget::Bottom,
                    Key::ArrowLeft => ScrollTarget::Start,
                    Key::ArrowRight => ScrollTarget::End,
                    Key::Other => return None,
                };
                Some(Effect::ScrollTo(target))
            }
        }
    }

    fn drag_to(&mut self, ctx: &CursorContext<'_>, pos: Point) {
        let time_drag = matches!(self.state, CursorState::TimeDragging { .. });
        let sample = self.track(ctx, pos, time_drag);
        match &mut self.state {
            CursorState::NameDragging { current, .. } => *current = sample.boundary,
            CursorState::TimeDragging { current, .. } => {
                if self.tick.is_some() {
                    *current = self.tick;
                }
            }
            _ => {}
        }
    }

    /// Records the pointer at `pos` and resolves its tick, snapping if asked.
    fn track(&mut self, ctx: &CursorContext<'_>, pos: Point, snap: bool) -> PointerSample {
        let sample = PointerSample::new(ctx.viewport, pos);
        self.pointer = Some(sample);
        self.snapped = None;
        self.tick = sample.tick;
        if let (true, Some(tolerance), Some(row), Some(tick)) =
            (snap, ctx.snap_tolerance, sample.row, sample.tick)
        {
            let edge = ctx
                .order
                .displayed_signal(row)
                .and_then(|signal| nearest_edge(signal, tick, tolerance));
            if let Some(edge) = edge {
                self.tick = Some(edge);
                self.snapped = Some(SnappedEdge { row, tick: edge });
            }
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_drag_selection_is_ordered() {
        let state = CursorState::NameSelected {
            anchor: 5,
            current: 2,
        };
        assert_eq!(state.selection(), Some(Selection::Names(2..5)));
    }

    #[test]
    fn time_selection_needs_both_ends() {
        let open = CursorState::TimeSelected {
            anchor: None,
            current: Some(10),
        };
        assert_eq!(open.selection(), None);
        let closed = CursorState::TimeSelected {
            anchor: Some(40),
            current: Some(10),
        };
        assert_eq!(closed.selection(), Some(Selection::Time(10..40)));
    }

    #[test]
    fn select_rows_places_cursor_at_start() {
        let mut machine = CursorMachine::new();
        machine.select_rows(3..4);
        assert_eq!(machine.name_cursor(), Some(3));
        assert_eq!(machine.name_selection(), Some(3..4));
        machine.clear_selection();
        assert_eq!(machine.selection(), None);
    }
}
