// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview Cursor: pointer and key input to cursor and selection state.
//!
//! Hosts translate their toolkit's events into [`InputEvent`]s and feed them
//! to a [`CursorMachine`] together with a [`CursorContext`] describing the
//! current view. The machine runs a small state machine:
//!
//! ```text
//! Idle --press in names--> NameDragging --release--> NameSelected
//! Idle --press in waves--> TimeDragging --release--> TimeSelected
//! ```
//!
//! A new press from a selected state starts over from `Idle`. Selections are
//! half-open and ordered, whichever way the drag went.
//!
//! Some input asks the host to act, reported as an [`Effect`]: a double-click
//! on a name opens the signal's source, a secondary press on a bus name expands
//! its bits, and Ctrl+arrow keys scroll to the ends of the diagram.
//!
//! With a snap tolerance set, time drags snap to the nearest edge of the
//! signal under the pointer ([`nearest_edge`]).
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use waveview_cursor::{CursorContext, CursorMachine, InputEvent, PointerButton, Selection};
//! use waveview_signal::{Event, Level, Signal, SignalId, SignalOrder};
//! use waveview_viewport::Viewport;
//!
//! let order = SignalOrder::from_signals([Signal::new(SignalId(0), "clk", vec![Event::new(0, Level::L)])]);
//! let mut view = Viewport::new(Size::new(640.0, 200.0));
//! view.set_content(1_000, order.displayed_len());
//! let ctx = CursorContext { viewport: &view, order: &order, snap_tolerance: None };
//!
//! let mut cursor = CursorMachine::new();
//! cursor.handle(InputEvent::PointerDown { pos: Point::new(150.0, 20.0), button: PointerButton::Primary }, &ctx);
//! cursor.handle(InputEvent::PointerMove { pos: Point::new(190.0, 20.0) }, &ctx);
//! cursor.handle(InputEvent::PointerUp { pos: Point::new(190.0, 20.0) }, &ctx);
//! assert_eq!(cursor.selection(), Some(Selection::Time(20..100)));
//! ```

mod input;
mod machine;
mod sample;
mod snap;

pub use input::{InputEvent, Key, Modifiers, PointerButton};
pub use machine::{
    CursorContext, CursorMachine, CursorState, Effect, ScrollTarget, Selection, SnappedEdge,
};
pub use sample::{Area, PointerSample};
pub use snap::nearest_edge;
