// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Text measurement used to place labels.
///
/// Hosts implement this on top of their font stack; widths are in pixels.
pub trait TextMeasure {
    /// Width of `text` when drawn in the label font.
    fn text_width(&self, text: &str, bold: bool) -> f64;
}

/// Fixed-pitch measurement: every character is `char_width` pixels wide.
///
/// Bold text is measured like regular text.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance of one character in pixels.
    pub char_width: f64,
}

impl MonospaceMeasure {
    /// Creates a measure with the given character advance.
    #[must_use]
    pub const fn new(char_width: f64) -> Self {
        Self { char_width }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, _bold: bool) -> f64 {
        (text.chars().count() as f64 * self.char_width).ceil()
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, bold: bool) -> f64 {
        (**self).text_width(text, bold)
    }
}
