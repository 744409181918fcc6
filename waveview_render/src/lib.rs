// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview Render: the cached static raster and the per-paint overlay.
//!
//! A paint has two layers:
//! - the **raster**, everything that only depends on the view parameters.
//!   [`RasterBuilder`] gathers it for the visible rows and ticks, and
//!   [`RenderCache`] keeps it until the [`CacheKey`] changes or the cache is
//!   invalidated;
//! - the **overlay**, pointer feedback (time label, selection bands, snap
//!   marker) that changes on every pointer move. [`Overlay`] is painted on
//!   top of the raster every time and is never cached.
//!
//! Rasters are recorded as a [`DisplayList`] and replayed into a host
//! [`PaintSink`], one call per batch of same-kind primitives.
//!
//! While the pointer snaps to edges, [`SnapPolicy`] selects between
//! rebuilding the raster on every paint with an edge probe, and reusing it.
//!
//! ```rust
//! use kurbo::Size;
//! use waveview_gather::{MonospaceMeasure, Palette};
//! use waveview_render::{CacheKey, RasterBuilder, RenderCache, SnapPolicy};
//! use waveview_signal::{Event, Level, Signal, SignalId, SignalOrder};
//! use waveview_viewport::Viewport;
//!
//! let order = SignalOrder::from_signals([Signal::new(
//!     SignalId(0),
//!     "clk",
//!     vec![Event::new(0, Level::L), Event::new(50, Level::H)],
//! )]);
//! let mut view = Viewport::new(Size::new(640.0, 200.0));
//! view.set_content(100, order.displayed_len());
//!
//! let (measure, palette) = (MonospaceMeasure::default(), Palette::default());
//! let mut cache = RenderCache::new(SnapPolicy::default());
//! let key = CacheKey::from_viewport(&view);
//! let raster = cache.get_or_rebuild(key, false, || {
//!     RasterBuilder::new(&view, &order, &measure, &palette).build()
//! });
//! assert_eq!(raster.rows(), 0..1);
//!
//! // Same view: served from the cache.
//! cache.get_or_rebuild(key, false, || unreachable!());
//! assert_eq!(cache.stats().hits, 1);
//! ```

mod cache;
mod overlay;
mod paint;
mod raster;

pub use cache::{CacheKey, CacheStats, RebuildReason, RenderCache, SnapPolicy};
pub use overlay::Overlay;
pub use paint::{DisplayList, PaintOp, PaintSink};
pub use raster::{Raster, RasterBuilder, RasterSettings};
