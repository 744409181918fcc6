// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview Viewport: scroll and scale state of a timing diagram.
//!
//! A timing diagram is laid out on a virtual surface that is usually far
//! larger than its window:
//! - a name column of fixed width on the left,
//! - a header row on top, holding time labels,
//! - one row per displayed signal below it.
//!
//! The surface is `tick_width * total_ticks + name_width` pixels wide and
//! `(rows + 1) * row_height` pixels tall. [`Viewport`] owns the scroll
//! position over that surface and the horizontal scale (pixels per tick), and
//! answers the questions the renderer and input handling ask: which rows and
//! ticks are visible, what tick or row lies under a window coordinate, and
//! where a tick lands on screen ([`TickMap`]).
//!
//! Zooming keeps the tick at the centre of the wave area centred; zooming to
//! a range makes that range fill 90% of the wave area with a 5% margin on
//! both sides.
//!
//! ```rust
//! use kurbo::Size;
//! use waveview_viewport::Viewport;
//!
//! let mut view = Viewport::new(Size::new(840.0, 300.0));
//! view.set_content(100_000, 12);
//!
//! view.zoom_in();
//! assert_eq!(view.tick_width(), 1.0);
//!
//! view.zoom_to_range(10_000, 20_000);
//! let visible = view.visible_ticks();
//! assert!(visible.start <= 10_000 && visible.end >= 20_000);
//! ```
//!
//! Row sizes derive from a timing scale factor; see [`RowMetrics`].

mod metrics;
mod viewport;

pub use metrics::RowMetrics;
pub use viewport::{TickMap, Viewport, ViewportDebugInfo};
