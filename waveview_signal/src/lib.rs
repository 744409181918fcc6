// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview Signal: the data model behind a timing diagram.
//!
//! A [`Snapshot`] is the immutable result of one simulation run: a list of
//! [`Signal`]s, each with a stable [`SignalId`], a name, and an event list of
//! `(tick, value)` pairs in non-decreasing tick order. Values are tagged
//! ([`SignalValue`]): single-bit [`Level`]s, bus integers (or unresolved), or
//! [`Annotation`]s that carry text instead of a waveform level.
//!
//! [`SignalOrder`] layers a user-controlled display order on top of the
//! signals. Every signal has a display flag; the displayed subset is addressed
//! by row. Rows can be cut (hidden), copied, and pasted (moved) through a
//! [`ClipBuffer`], buses can be expanded into their bit children, and the
//! order can be persisted as a plain text [`order_file`].
//!
//! ## Minimal example
//!
//! ```rust
//! use waveview_signal::{Event, Level, Signal, SignalId, SignalOrder};
//!
//! let mut order = SignalOrder::from_signals([
//!     Signal::new(SignalId(0), "clk", vec![Event::new(0, Level::L), Event::new(5, Level::H)]),
//!     Signal::new(SignalId(1), "rst", vec![Event::new(0, Level::H)]),
//!     Signal::new(SignalId(2), "data", vec![Event::new(0, 3_u64)]),
//! ]);
//!
//! // Move `clk` below `data`.
//! order.cut(0..1);
//! order.paste(2);
//! assert_eq!(order.displayed_names().collect::<Vec<_>>(), ["rst", "data", "clk"]);
//! ```
//!
//! Snapshots are validated when they are built; see [`SnapshotError`].

mod order;
pub mod order_file;
mod signal;
mod snapshot;
mod value;

pub use order::{ClipBuffer, FindFlags, RestoreReport, SignalOrder, strip_bit_select};
pub use order_file::OrderFileError;
pub use signal::{BitRange, Signal, SignalId, SourceRef};
pub use snapshot::{Snapshot, SnapshotError};
pub use value::{Annotation, Event, Level, Placement, SignalValue};
