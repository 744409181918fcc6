// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick to nanosecond text.

/// Formats `ticks` as nanoseconds with exactly `places` decimals and `,`
/// thousands separators, e.g. `1,234.500`.
#[must_use]
pub fn format_ns(ticks: u64, ticks_per_ns: u64, places: usize) -> String {
    let fixed = fixed_ns(ticks, ticks_per_ns, places);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::with_capacity(fixed.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats `ticks` as nanoseconds with at most `places` decimals and no
/// trailing zeros, e.g. `1.5` or `20`.
#[must_use]
pub fn format_ns_short(ticks: u64, ticks_per_ns: u64, places: usize) -> String {
    let mut text = fixed_ns(ticks, ticks_per_ns, places);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

fn fixed_ns(ticks: u64, ticks_per_ns: u64, places: usize) -> String {
    let ns = ticks as f64 / ticks_per_ns.max(1) as f64;
    format!("{ns:.places$}")
}
