// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waveview Gather: signal events to batched drawing primitives.
//!
//! For one frame and one signal row, [`SegmentGatherer::gather`] walks the
//! signal's events left to right and produces a [`SignalBatch`]:
//! - **lines** for single-bit levels: each change is a horizontal hold
//!   followed by an edge, and for bus intervals a closed outline between
//!   the rails;
//! - **don't-care fills** ([`DontCareQuad`]) for unresolved bus values, for
//!   `X`, and for intervals too narrow to draw;
//! - **text** ([`TextRun`]) for inline signal names, hex bus values, and
//!   attached annotations.
//!
//! Primitives are grouped by kind so each group can be issued as one batched
//! draw call. A new segment is only emitted once the screen-space advance
//! since the previous edge exceeds one pixel; whatever was skipped is covered
//! by a don't-care fill, so there are no gaps.
//!
//! Annotation text may start with escapes, consumed left to right: `#r`,
//! `#g`, `#b`, and `#y` pick the color, `#p` selects regular instead of bold
//! weight. Annotations that would not fit inside the wave area are dropped.
//!
//! [`SegmentGatherer::time_grid`] gathers the header labels and vertical grid
//! lines from the rising edges of a bar signal, falling back to fixed-step
//! markers when the bar signal is absent or too dense to label.
//!
//! Text placement needs widths; hosts supply them via [`TextMeasure`].
//!
//! ```rust
//! use kurbo::Size;
//! use waveview_gather::{GatherFrame, MonospaceMeasure, Palette, SegmentGatherer};
//! use waveview_signal::{Event, Level, Signal, SignalId};
//! use waveview_viewport::Viewport;
//!
//! let mut view = Viewport::new(Size::new(640.0, 200.0));
//! view.set_content(1_000, 1);
//!
//! let palette = Palette::default();
//! let measure = MonospaceMeasure::default();
//! let gatherer = SegmentGatherer::new(GatherFrame::from_viewport(&view, true), &measure, &palette);
//!
//! let clk = Signal::new(
//!     SignalId(0),
//!     "clk",
//!     vec![Event::new(0, Level::L), Event::new(100, Level::H), Event::new(200, Level::L)],
//! );
//! let batch = gatherer.gather(&clk, view.row_low_rail_y(0), None);
//! assert_eq!(batch.edges().count(), 2);
//! ```

mod annotation;
mod batch;
mod gatherer;
mod grid;
mod measure;
mod palette;
pub mod time;

pub use annotation::AnnotationStyle;
pub use batch::{DontCareQuad, SignalBatch, SnapHit, SnapProbe, TextRun};
pub use gatherer::{GatherFrame, SegmentGatherer};
pub use grid::{GridBatch, GridSettings};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use palette::{AnnotationColor, Palette};
