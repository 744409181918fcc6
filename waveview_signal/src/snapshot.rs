// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated handoff of one completed simulation run.

use hashbrown::HashSet;

use crate::signal::{Signal, SignalId};

/// Errors detected when a snapshot is ingested.
///
/// These are guarded at the boundary; the renderer assumes a valid snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// An event's tick is smaller than the one before it.
    #[error("signal {signal}: event {index} at tick {tick} precedes tick {previous}")]
    DecreasingTick {
        /// Offending signal.
        signal: SignalId,
        /// Position of the offending event.
        index: usize,
        /// Tick of the preceding event.
        previous: u64,
        /// Tick of the offending event.
        tick: u64,
    },
    /// Two signals share a key.
    #[error("duplicate signal key {0}")]
    DuplicateId(SignalId),
    /// The bar signal key does not name a signal of the snapshot.
    #[error("bar signal {0} is not part of the snapshot")]
    UnknownBarSignal(SignalId),
    /// A bus links a bit child that is not part of the snapshot.
    #[error("bus {bus} links unknown bit signal {bit}")]
    UnknownBitSignal {
        /// The bus.
        bus: SignalId,
        /// The missing child.
        bit: SignalId,
    },
}

/// The complete, immutable result of one run: signals in producer order, the
/// total tick count, and the optional bar signal used for the time grid.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    signals: Vec<Signal>,
    total_ticks: u64,
    bar_signal: Option<SignalId>,
}

impl Snapshot {
    /// Builds and validates a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError`] found.
    pub fn new(
        signals: Vec<Signal>,
        total_ticks: u64,
        bar_signal: Option<SignalId>,
    ) -> Result<Self, SnapshotError> {
        let snapshot = Self {
            signals,
            total_ticks,
            bar_signal,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks key uniqueness, tick ordering, and cross references.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError`] found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut ids = HashSet::with_capacity(self.signals.len());
        for signal in &self.signals {
            if !ids.insert(signal.id()) {
                return Err(SnapshotError::DuplicateId(signal.id()));
            }
            let mut previous = 0;
            for (index, event) in signal.events().iter().enumerate() {
                if event.tick < previous {
                    return Err(SnapshotError::DecreasingTick {
                        signal: signal.id(),
                        index,
                        previous,
                        tick: event.tick,
                    });
                }
                previous = event.tick;
            }
        }
        for signal in &self.signals {
            if let Some(&bit) = signal.bit_signals().iter().find(|bit| !ids.contains(*bit)) {
                return Err(SnapshotError::UnknownBitSignal {
                    bus: signal.id(),
                    bit,
                });
            }
        }
        match self.bar_signal {
            Some(bar) if !ids.contains(&bar) => Err(SnapshotError::UnknownBarSignal(bar)),
            _ => Ok(()),
        }
    }

    /// Signals in producer (insertion) order.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Total number of ticks covered by the run.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Reference signal for the time grid.
    #[must_use]
    pub fn bar_signal(&self) -> Option<SignalId> {
        self.bar_signal
    }

    /// Splits the snapshot into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Signal>, u64, Option<SignalId>) {
        (self.signals, self.total_ticks, self.bar_signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Event, Level};

    fn sig(id: u32, ticks: &[u64]) -> Signal {
        let events: Vec<Event> = ticks.iter().map(|&t| Event::new(t, Level::L)).collect();
        Signal::new(SignalId(id), "s", events)
    }

    #[test]
    fn accepts_equal_ticks() {
        let snapshot = Snapshot::new(vec![sig(0, &[0, 5, 5, 9])], 10, None);
        assert!(snapshot.is_ok());
    }

    #[test]
    fn rejects_decreasing_ticks() {
        let err = Snapshot::new(vec![sig(3, &[0, 8, 4])], 10, None).unwrap_err();
        assert_eq!(
            err,
            SnapshotError::DecreasingTick {
                signal: SignalId(3),
                index: 2,
                previous: 8,
                tick: 4,
            }
        );
    }

    #[test]
    fn rejects_duplicate_keys_and_dangling_references() {
        let dup = Snapshot::new(vec![sig(1, &[0]), sig(1, &[0])], 1, None).unwrap_err();
        assert_eq!(dup, SnapshotError::DuplicateId(SignalId(1)));

        let bar = Snapshot::new(vec![sig(1, &[0])], 1, Some(SignalId(9))).unwrap_err();
        assert_eq!(bar, SnapshotError::UnknownBarSignal(SignalId(9)));

        let bus = sig(1, &[0]).with_bit_signals([SignalId(2)]);
        let bits = Snapshot::new(vec![bus], 1, None).unwrap_err();
        assert_eq!(
            bits,
            SnapshotError::UnknownBitSignal {
                bus: SignalId(1),
                bit: SignalId(2),
            }
        );
    }
}
