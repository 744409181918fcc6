// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use waveview_viewport::Viewport;

/// Part of the window a pointer is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    /// The signal name column.
    Names,
    /// Right of the name column.
    Wave,
    /// Not over the window.
    Outside,
}

/// A pointer position resolved against the current view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Window position.
    pub pos: Point,
    /// Area under the pointer.
    pub area: Area,
    /// Display row under the pointer, if it is over one.
    pub row: Option<usize>,
    /// Row boundary nearest to the pointer, within `0..=rows`.
    pub boundary: usize,
    /// Tick under the pointer, `None` outside the visible wave area.
    pub tick: Option<u64>,
}

impl PointerSample {
    /// Resolves `pos` against `viewport`.
    #[must_use]
    pub fn new(viewport: &Viewport, pos: Point) -> Self {
        let window = viewport.window_size();
        let inside = pos.x >= 0.0 && pos.y >= 0.0 && pos.x < window.width && pos.y < window.height;
        let area = if !inside {
            Area::Outside
        } else if pos.x < viewport.metrics().name_width {
            Area::Names
        } else {
            Area::Wave
        };
        Self {
            pos,
            area,
            row: viewport.y_to_row(pos.y),
            boundary: viewport.y_to_row_boundary(pos.y),
            tick: viewport.x_to_tick(pos.x),
        }
    }
}
