// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::sync::Arc;

use crate::value::{Event, SignalValue};

/// Stable key of a signal within one snapshot.
///
/// Keys are assigned by the producer and never change while a snapshot is
/// displayed, no matter how the display order is rearranged.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(pub u32);

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared bit range of a bus, `[high:low]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitRange {
    /// Left (most significant) bit subscript.
    pub high: u32,
    /// Right (least significant) bit subscript.
    pub low: u32,
}

impl BitRange {
    /// Creates a bit range.
    #[must_use]
    pub const fn new(high: u32, low: u32) -> Self {
        Self { high, low }
    }

    /// Number of bits spanned, regardless of subscript direction.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.high.abs_diff(self.low) + 1
    }

    /// Number of hex digits used when labeling a value of this bus.
    ///
    /// This is `ceil((width + 2) / 4)`.
    #[must_use]
    pub const fn hex_digits(self) -> usize {
        (self.width() as usize + 2).div_ceil(4)
    }
}

/// Opaque location of a signal's declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceRef {
    /// Source file, relative to the project.
    pub file: String,
    /// Byte offset of the declaration.
    pub offset: usize,
}

impl SourceRef {
    /// Creates a source reference.
    pub fn new(file: impl Into<String>, offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}

/// A named signal with its immutable event list.
///
/// The events are shared (`Arc`) and never mutated once the signal has been
/// built; only the display flag is layered on top by [`crate::SignalOrder`].
#[derive(Clone, Debug)]
pub struct Signal {
    id: SignalId,
    name: String,
    events: Arc<[Event]>,
    bit_range: Option<BitRange>,
    displayed: bool,
    source: Option<SourceRef>,
    bit_signals: Vec<SignalId>,
}

impl Signal {
    /// Creates a displayed single-bit signal.
    pub fn new(id: SignalId, name: impl Into<String>, events: impl Into<Arc<[Event]>>) -> Self {
        Self {
            id,
            name: name.into(),
            events: events.into(),
            bit_range: None,
            displayed: true,
            source: None,
            bit_signals: Vec::new(),
        }
    }

    /// Creates a displayed bus signal spanning `bits`.
    pub fn bus(
        id: SignalId,
        name: impl Into<String>,
        events: impl Into<Arc<[Event]>>,
        bits: BitRange,
    ) -> Self {
        Self {
            bit_range: Some(bits),
            ..Self::new(id, name, events)
        }
    }

    /// Attaches a declaration location.
    #[must_use]
    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }

    /// Links the per-bit child signals of a bus.
    ///
    /// The children live in the same key space and are owned by the snapshot,
    /// not by this signal.
    #[must_use]
    pub fn with_bit_signals(mut self, bits: impl IntoIterator<Item = SignalId>) -> Self {
        self.bit_signals = bits.into_iter().collect();
        self
    }

    /// Marks the signal as initially hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Stable key.
    #[must_use]
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Events in non-decreasing tick order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns `true` for multi-bit signals.
    #[must_use]
    pub fn is_bus(&self) -> bool {
        self.bit_range.is_some()
    }

    /// Bit range of a bus.
    #[must_use]
    pub fn bit_range(&self) -> Option<BitRange> {
        self.bit_range
    }

    /// Returns `true` if the signal is part of the displayed subset.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub(crate) fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    /// Declaration location, if the producer supplied one.
    #[must_use]
    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    /// Per-bit children of a bus, most significant first.
    #[must_use]
    pub fn bit_signals(&self) -> &[SignalId] {
        &self.bit_signals
    }

    /// First value that is a waveform level (skips annotations).
    #[must_use]
    pub fn initial_value(&self) -> Option<&SignalValue> {
        self.events
            .iter()
            .map(|event| &event.value)
            .find(|value| !value.is_annotation())
    }

    /// Ticks at which the drawn waveform changes value.
    pub fn edges(&self) -> impl Iterator<Item = u64> + '_ {
        let mut previous: Option<&SignalValue> = None;
        self.events.iter().filter_map(move |event| {
            if event.value.is_annotation() {
                return None;
            }
            let changed = previous.is_some_and(|prev| *prev != event.value);
            previous = Some(&event.value);
            changed.then_some(event.tick)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Annotation, Level, Placement};

    #[test]
    fn bit_range_width_is_direction_agnostic() {
        assert_eq!(BitRange::new(7, 0).width(), 8);
        assert_eq!(BitRange::new(0, 7).width(), 8);
        assert_eq!(BitRange::new(3, 3).width(), 1);
    }

    #[test]
    fn hex_digits_rounds_up() {
        assert_eq!(BitRange::new(0, 0).hex_digits(), 1);
        assert_eq!(BitRange::new(1, 0).hex_digits(), 1);
        assert_eq!(BitRange::new(3, 0).hex_digits(), 2);
        assert_eq!(BitRange::new(7, 0).hex_digits(), 3);
    }

    #[test]
    fn edges_skip_repeats_and_annotations() {
        let sig = Signal::new(
            SignalId(0),
            "clk",
            vec![
                Event::new(0, Level::L),
                Event::new(5, Annotation::new(Placement::After, "start")),
                Event::new(10, Level::H),
                Event::new(12, Level::H),
                Event::new(20, Level::L),
            ],
        );
        assert_eq!(sig.edges().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(sig.initial_value(), Some(&SignalValue::Level(Level::L)));
    }
}
