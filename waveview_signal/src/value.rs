// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event values: single-bit levels, bus values, and attached annotations.

use core::fmt;

/// Logic level of a single-bit signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Driven low.
    L,
    /// Driven high.
    H,
    /// Unknown or conflicting.
    X,
    /// High impedance.
    Z,
    /// Strobe / weak low.
    S,
}

impl Level {
    /// Parses a level from its one-character name.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::L),
            'H' => Some(Self::H),
            'X' => Some(Self::X),
            'Z' => Some(Self::Z),
            'S' => Some(Self::S),
            _ => None,
        }
    }

    /// Returns the one-character name of this level.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::L => 'L',
            Self::H => 'H',
            Self::X => 'X',
            Self::Z => 'Z',
            Self::S => 'S',
        }
    }

    /// Height of the level between the low rail (`0.0`) and the high rail (`1.0`).
    ///
    /// `X` intervals are drawn as don't-care fills; an edge *into* `X` ends at
    /// mid-rail like `Z`.
    #[must_use]
    pub const fn height(self) -> f64 {
        match self {
            Self::L | Self::S => 0.0,
            Self::Z | Self::X => 0.5,
            Self::H => 1.0,
        }
    }

    /// Returns `true` for levels that sit off the low rail.
    #[must_use]
    pub const fn is_raised(self) -> bool {
        matches!(self, Self::H | Self::Z | Self::X)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Where an annotation is placed relative to its tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Text ends just before the tick.
    Before,
    /// Text starts just after the tick.
    After,
}

impl Placement {
    /// Decodes the sentinel level that producers attach to annotations.
    ///
    /// Raised levels (`H`, `Z`, `X`) place the text in front of the tick; the
    /// low levels place it after.
    #[must_use]
    pub const fn from_level(level: Level) -> Self {
        if level.is_raised() {
            Self::Before
        } else {
            Self::After
        }
    }
}

/// Free text attached to a signal at a tick.
///
/// The text may start with color escapes (`#r`, `#g`, `#b`, `#y`) and a
/// weight escape (`#p`); they are interpreted when the annotation is drawn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// Placement relative to the tick.
    pub placement: Placement,
    /// Raw text, escapes included.
    pub text: String,
}

impl Annotation {
    /// Creates an annotation.
    pub fn new(placement: Placement, text: impl Into<String>) -> Self {
        Self {
            placement,
            text: text.into(),
        }
    }
}

/// The value a signal takes on at an event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalValue {
    /// Single-bit level.
    Level(Level),
    /// Bus value; `None` when unresolved.
    Bus(Option<u64>),
    /// Attached text; not a waveform level.
    Annotation(Annotation),
}

impl SignalValue {
    /// Returns `true` for values drawn as a don't-care fill.
    #[must_use]
    pub fn is_dont_care(&self) -> bool {
        matches!(self, Self::Level(Level::X) | Self::Bus(None))
    }

    /// Returns `true` for annotations.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        matches!(self, Self::Annotation(_))
    }

    /// Returns the level of a single-bit value.
    #[must_use]
    pub fn level(&self) -> Option<Level> {
        match self {
            Self::Level(level) => Some(*level),
            _ => None,
        }
    }

    /// Returns the resolved integer of a bus value.
    #[must_use]
    pub fn bus_value(&self) -> Option<u64> {
        match self {
            Self::Bus(value) => *value,
            _ => None,
        }
    }
}

impl From<Level> for SignalValue {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

impl From<Option<u64>> for SignalValue {
    fn from(value: Option<u64>) -> Self {
        Self::Bus(value)
    }
}

impl From<u64> for SignalValue {
    fn from(value: u64) -> Self {
        Self::Bus(Some(value))
    }
}

impl From<Annotation> for SignalValue {
    fn from(annotation: Annotation) -> Self {
        Self::Annotation(annotation)
    }
}

/// One `(tick, value)` pair of a signal's event list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Event {
    /// Tick at which the value takes effect.
    pub tick: u64,
    /// New value.
    pub value: SignalValue,
}

impl Event {
    /// Creates an event.
    pub fn new(tick: u64, value: impl Into<SignalValue>) -> Self {
        Self {
            tick,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_chars_roundtrip() {
        for level in [Level::L, Level::H, Level::X, Level::Z, Level::S] {
            assert_eq!(Level::from_char(level.as_char()), Some(level));
        }
        assert_eq!(Level::from_char('q'), None);
    }

    #[test]
    fn placement_follows_sentinel_level() {
        assert_eq!(Placement::from_level(Level::H), Placement::Before);
        assert_eq!(Placement::from_level(Level::Z), Placement::Before);
        assert_eq!(Placement::from_level(Level::L), Placement::After);
        assert_eq!(Placement::from_level(Level::S), Placement::After);
    }

    #[test]
    fn dont_care_covers_x_and_unresolved_bus() {
        assert!(SignalValue::Level(Level::X).is_dont_care());
        assert!(SignalValue::Bus(None).is_dont_care());
        assert!(!SignalValue::Bus(Some(0)).is_dont_care());
        assert!(!SignalValue::Level(Level::Z).is_dont_care());
        let note = SignalValue::from(Annotation::new(Placement::After, "go"));
        assert!(note.is_annotation());
        assert!(!note.is_dont_care());
    }
}
