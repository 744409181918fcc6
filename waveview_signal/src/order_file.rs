// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted display order: one signal name per line.
//!
//! Lines are trimmed; blank lines and lines starting with `{` are ignored.
//! Names may carry a `[...]` bit-select suffix, which is matched against the
//! bare signal name when the order is restored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::order::{RestoreReport, SignalOrder};

/// Errors reading or writing an order file.
#[derive(Debug, thiserror::Error)]
pub enum OrderFileError {
    /// The file exists but could not be read.
    #[error("failed to read order file {path}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file could not be written.
    #[error("failed to write order file {path}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Parses order-file text into names.
pub fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('{'))
        .map(str::to_owned)
        .collect()
}

/// Renders names as order-file text, one per line.
pub fn render<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('\n');
    }
    text
}

/// Reads the names of an order file.
///
/// A missing file is the normal first-run case and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`OrderFileError::Read`] for any other I/O failure.
pub fn read(path: &Path) -> Result<Option<Vec<String>>, OrderFileError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let names = parse(&text);
            log::info!("read {} names from {}", names.len(), path.display());
            Ok(Some(names))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("no existing order file {}", path.display());
            Ok(None)
        }
        Err(source) => Err(OrderFileError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Writes names to an order file, replacing its contents.
///
/// # Errors
///
/// Returns [`OrderFileError::Write`] if the file cannot be written.
pub fn write<'a>(
    path: &Path,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), OrderFileError> {
    fs::write(path, render(names)).map_err(|source| OrderFileError::Write {
        path: path.to_owned(),
        source,
    })?;
    log::info!("wrote order file {}", path.display());
    Ok(())
}

/// Restores `order` from the file at `path`.
///
/// Returns `Ok(None)` if there is no file, leaving `order` untouched.
///
/// # Errors
///
/// Returns [`OrderFileError::Read`] if the file exists but cannot be read.
pub fn restore(order: &mut SignalOrder, path: &Path) -> Result<Option<RestoreReport>, OrderFileError> {
    let Some(names) = read(path)? else {
        return Ok(None);
    };
    Ok(Some(order.restore_order(names)))
}

/// Saves the displayed names of `order` to `path`.
///
/// # Errors
///
/// Returns [`OrderFileError::Write`] if the file cannot be written.
pub fn save(order: &SignalOrder, path: &Path) -> Result<(), OrderFileError> {
    write(path, order.displayed_names())
}
