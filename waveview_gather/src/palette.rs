// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Colors used when drawing a diagram.
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    /// Background of the whole diagram.
    pub background: Color,
    /// Waveform lines, bus outlines, and the name-column separator.
    pub waveform: Color,
    /// Signal names, in the name column and inline.
    pub signal_name: Color,
    /// Hex values inside bus intervals.
    pub bus_value: Color,
    /// Don't-care fills.
    pub dont_care: Color,
    /// Row baselines and time-grid lines.
    pub grid: Color,
    /// Time labels in the header and the pointer overlay.
    pub time_label: Color,
    /// Translucent selection highlight.
    pub highlight: Color,
    /// Outline of the snapped-edge marker.
    pub snap_marker: Color,
    /// Annotation text without a color escape, and `#b`.
    pub blue: Color,
    /// Annotation `#r`.
    pub red: Color,
    /// Annotation `#g`.
    pub green: Color,
    /// Annotation `#y`.
    pub yellow: Color,
}

impl Palette {
    /// Returns the color for an annotation color.
    #[must_use]
    pub fn annotation(&self, color: AnnotationColor) -> Color {
        match color {
            AnnotationColor::Red => self.red,
            AnnotationColor::Green => self.green,
            AnnotationColor::Blue => self.blue,
            AnnotationColor::Yellow => self.yellow,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let green = Color::from_rgb8(0, 150, 0);
        let blue = Color::from_rgb8(0, 0, 255);
        Self {
            background: Color::from_rgb8(255, 255, 255),
            waveform: Color::from_rgb8(0, 0, 0),
            signal_name: green,
            bus_value: Color::from_rgb8(0, 0, 0),
            dont_care: Color::from_rgb8(128, 128, 128),
            grid: Color::from_rgb8(47, 254, 255),
            time_label: Color::from_rgb8(10, 0, 200),
            highlight: Color::from_rgba8(255, 255, 0, 64),
            snap_marker: blue,
            blue,
            red: Color::from_rgb8(255, 0, 0),
            green,
            yellow: Color::from_rgb8(255, 255, 0),
        }
    }
}

/// Foreground selected by an annotation color escape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnnotationColor {
    /// `#r`.
    Red,
    /// `#g`.
    Green,
    /// `#b`, and the default.
    #[default]
    Blue,
    /// `#y`.
    Yellow,
}
