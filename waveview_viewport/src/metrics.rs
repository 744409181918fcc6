// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Pixel metrics of diagram rows, derived from a timing scale factor.
///
/// All values are whole pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowMetrics {
    /// Width of the signal-name column.
    pub name_width: f64,
    /// Row-to-row spacing.
    pub row_height: f64,
    /// Distance between the low and the high rail of a waveform.
    pub rail_height: f64,
    /// Height of label text.
    pub text_height: f64,
    /// Minimum distance between repeated inline signal-name labels.
    pub label_spacing: f64,
    /// Amount text is raised above its nominal position.
    pub text_baseline: f64,
}

impl RowMetrics {
    /// Default text baseline in pixels.
    pub const DEFAULT_BASELINE: f64 = 3.0;

    /// Derives metrics from `scale`.
    ///
    /// Each metric is floored to whole pixels and kept at least one pixel, so
    /// extreme scales never yield a zero row height.
    #[must_use]
    pub fn from_scale(scale: f64) -> Self {
        let px = |base: f64| (base * scale).floor().max(1.0);
        Self {
            name_width: px(100.0),
            row_height: px(10.0),
            rail_height: px(8.0),
            text_height: px(8.0),
            label_spacing: px(200.0),
            text_baseline: Self::DEFAULT_BASELINE,
        }
    }

    /// Returns a copy with a different text baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.text_baseline = baseline;
        self
    }

    /// Y coordinate of the low rail of display row `row`, in content space.
    ///
    /// Row 0 of the content surface is the header; display row `i` occupies
    /// content row `i + 1`, and its low rail sits on that row's bottom edge.
    #[must_use]
    pub fn row_low_rail(&self, row: usize) -> f64 {
        (row as f64 + 2.0) * self.row_height
    }
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self::from_scale(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RowMetrics;

    #[test]
    fn default_scale_metrics() {
        let m = RowMetrics::from_scale(1.4);
        assert_eq!(m.name_width, 140.0);
        assert_eq!(m.row_height, 14.0);
        assert_eq!(m.rail_height, 11.0);
        assert_eq!(m.text_height, 11.0);
        assert_eq!(m.label_spacing, 280.0);
        assert_eq!(m.text_baseline, 3.0);
    }

    #[test]
    fn tiny_scale_keeps_one_pixel_rows() {
        let m = RowMetrics::from_scale(0.01);
        assert_eq!(m.row_height, 1.0);
        assert_eq!(m.name_width, 1.0);
    }

    #[test]
    fn low_rail_is_below_the_header() {
        let m = RowMetrics::from_scale(1.0);
        assert_eq!(m.row_low_rail(0), 20.0);
        assert_eq!(m.row_low_rail(3), 50.0);
    }
}
