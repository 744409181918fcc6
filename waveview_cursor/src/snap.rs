// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use waveview_signal::{Event, Signal};

/// Tick of the edge of `signal` nearest to `tick`, if one is closer than
/// `tolerance` ticks.
///
/// An edge is an event whose value differs from the previous waveform value;
/// annotations are not edges. Ties go to the later edge.
#[must_use]
pub fn nearest_edge(signal: &Signal, tick: u64, tolerance: u64) -> Option<u64> {
    let events = signal.events();
    let split = events.partition_point(|e| e.tick < tick);
    let (before, after) = events.split_at(split);
    let is_level = |e: &&Event| !e.value.is_annotation();

    let mut left = None;
    let mut newer: Option<&Event> = None;
    for event in before.iter().rev().filter(is_level) {
        if newer.is_some_and(|n| n.value != event.value) {
            left = newer.map(|n| n.tick);
            break;
        }
        if tick - event.tick >= tolerance {
            break;
        }
        newer = Some(event);
    }

    let mut right = None;
    let mut previous = before.iter().rev().find(is_level).map(|e| &e.value);
    for event in after.iter().filter(is_level) {
        if event.tick - tick >= tolerance {
            break;
        }
        if previous.is_some_and(|p| *p != event.value) {
            right = Some(event.tick);
            break;
        }
        previous = Some(&event.value);
    }

    match (left, right) {
        (Some(l), Some(r)) => Some(if tick - l < r - tick { l } else { r }),
        (l, r) => l.or(r),
    }
}
