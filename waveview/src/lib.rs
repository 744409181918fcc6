// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview: an interactive timing-diagram engine.
//!
//! [`Diagram`] is the context object a host window drives. It owns the
//! [`Viewport`](viewport::Viewport), the [`SignalOrder`](signal::SignalOrder)
//! of the loaded run, the [`RenderCache`](render::RenderCache), and the
//! [`CursorMachine`](cursor::CursorMachine):
//!
//! - [`Diagram::load_snapshot`] hands over the result of a simulation run;
//! - [`Diagram::handle_input`] interprets pointer and key input;
//! - [`Diagram::execute`] runs a [`Command`] (cut, paste, zoom, find, …);
//! - [`Diagram::paint`] draws the cached raster and the pointer overlay into
//!   a host [`PaintSink`](render::PaintSink).
//!
//! Preferences live in a typed [`DiagramConfig`], persisted as TOML.
//!
//! ```rust
//! use kurbo::Size;
//! use waveview::render::DisplayList;
//! use waveview::signal::{Event, Level, Signal, SignalId, Snapshot};
//! use waveview::{Command, CommandOutcome, Diagram, DiagramConfig, FindOutcome};
//!
//! let snapshot = Snapshot::new(
//!     vec![
//!         Signal::new(SignalId(0), "clk", vec![Event::new(0, Level::L), Event::new(500, Level::H)]),
//!         Signal::new(SignalId(1), "rst", vec![Event::new(0, Level::H)]),
//!     ],
//!     1_000,
//!     None,
//! )
//! .unwrap();
//!
//! let mut diagram = Diagram::new(DiagramConfig::default(), Size::new(800.0, 300.0));
//! diagram.load_snapshot(snapshot).unwrap();
//!
//! let find = Command::Find { text: "RST".into(), flags: Default::default(), from_top: true };
//! assert_eq!(diagram.execute(&find).unwrap(), CommandOutcome::Find(FindOutcome::Found(1)));
//!
//! let mut frame = DisplayList::new();
//! diagram.paint(&mut frame);
//! assert!(!frame.is_empty());
//! ```

mod config;
mod diagram;

pub use config::{ConfigError, DiagramConfig};
pub use diagram::{Command, CommandOutcome, Diagram, FindOutcome};

pub use waveview_cursor as cursor;
pub use waveview_gather as gather;
pub use waveview_render as render;
pub use waveview_signal as signal;
pub use waveview_viewport as viewport;
