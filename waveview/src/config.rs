// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use waveview_gather::GridSettings;
use waveview_render::{RasterSettings, SnapPolicy};

/// Errors loading or saving a [`DiagramConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse config {path}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: toml::de::Error,
    },
    /// The configuration could not be encoded.
    #[error("failed to encode config")]
    Encode(#[from] toml::ser::Error),
    /// The file could not be written.
    #[error("failed to write config {path}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Persisted diagram preferences.
///
/// Missing fields take their defaults, so old files keep loading as fields are
/// added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Pixels per tick at startup.
    pub tick_width: f64,
    /// Timing scale; row and text sizes derive from it.
    pub scale_factor: f64,
    /// Horizontal scroll position, in scroll units.
    pub scroll_x: u64,
    /// Vertical scroll position, in rows.
    pub scroll_y: u64,
    /// Pixels per horizontal scroll unit.
    pub scroll_unit_width: f64,
    /// Draw labels at all.
    pub show_text: bool,
    /// Pixels text is raised.
    pub text_baseline: f64,
    /// Snap time drags to signal edges.
    pub snap_to_edge: bool,
    /// Snap tolerance in ticks.
    pub snap_tolerance_ticks: u64,
    /// Cache behavior while snapping.
    pub snap_policy: SnapPolicy,
    /// Ticks per nanosecond, for time labels.
    pub ticks_per_ns: u64,
    /// Decimals of time labels.
    pub time_places: usize,
    /// Spacing of fallback grid markers, in ticks.
    pub grid_step_ticks: u64,
    /// Where the display order is saved.
    pub order_file: Option<PathBuf>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            tick_width: 0.5,
            scale_factor: 1.4,
            scroll_x: 0,
            scroll_y: 0,
            scroll_unit_width: 20.0,
            show_text: true,
            text_baseline: 3.0,
            snap_to_edge: false,
            snap_tolerance_ticks: 500,
            snap_policy: SnapPolicy::RebuildEveryFrame,
            ticks_per_ns: 1000,
            time_places: 3,
            grid_step_ticks: 10_000,
            order_file: None,
        }
    }
}

impl DiagramConfig {
    /// Loads the configuration at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// exists but cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Like [`DiagramConfig::load`], but falls back to the defaults on error.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{err}, using defaults");
            Self::default()
        })
    }

    /// Writes the configuration to `path` as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] or [`ConfigError::Write`].
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })?;
        log::info!("wrote config {}", path.display());
        Ok(())
    }

    /// Time grid and label parameters.
    #[must_use]
    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            ticks_per_ns: self.ticks_per_ns,
            time_places: self.time_places,
            step_ticks: self.grid_step_ticks,
        }
    }

    /// Raster options.
    #[must_use]
    pub fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            show_text: self.show_text,
            grid: self.grid_settings(),
        }
    }

    /// Snap tolerance when snapping is on.
    #[must_use]
    pub fn snap_tolerance(&self) -> Option<u64> {
        self.snap_to_edge.then_some(self.snap_tolerance_ticks)
    }
}
