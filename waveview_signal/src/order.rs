// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display order of a snapshot's signals.
//!
//! [`SignalOrder`] keeps every signal of a run in a total order (a `Vec` of
//! stable keys) next to a hash index from key to [`Signal`]. Hidden signals stay
//! in the order so they can be restored. The displayed subset is derived from
//! the order after every mutation and addressed by *row*.

use core::ops::Range;

use hashbrown::{HashMap, HashSet};

use crate::signal::{Signal, SignalId};

bitflags::bitflags! {
    /// Options for [`SignalOrder::find`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FindFlags: u8 {
        /// Compare with case; otherwise the search is case-insensitive.
        const MATCH_CASE = 0b0000_0001;
        /// Match the whole name instead of a substring.
        const WHOLE_WORD = 0b0000_0010;
    }
}

/// Snapshot of signal keys cut or copied out of the order.
///
/// The buffer is not a live view: later reordering does not change it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipBuffer {
    ids: Vec<SignalId>,
}

impl ClipBuffer {
    /// Returns `true` if nothing has been cut or copied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of signals held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Keys held, in their order at the time of the cut or copy.
    #[must_use]
    pub fn ids(&self) -> &[SignalId] {
        &self.ids
    }
}

/// Outcome of [`SignalOrder::restore_order`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Number of requested names that matched a signal.
    pub matched: usize,
    /// Requested names that matched no signal, in request order.
    pub not_found: Vec<String>,
}

/// Ordered, keyed collection of the signals of one snapshot.
#[derive(Clone, Debug, Default)]
pub struct SignalOrder {
    order: Vec<SignalId>,
    signals: HashMap<SignalId, Signal>,
    displayed: Vec<SignalId>,
    clip: ClipBuffer,
}

impl SignalOrder {
    /// Creates an empty order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an order from signals in insertion order.
    ///
    /// A key that appears more than once keeps its first position and its last
    /// signal, the way repeated inserts into a keyed map behave.
    pub fn from_signals(signals: impl IntoIterator<Item = Signal>) -> Self {
        let mut order = Self::new();
        for signal in signals {
            let id = signal.id();
            if order.signals.insert(id, signal).is_none() {
                order.order.push(id);
            }
        }
        order.rebuild_displayed();
        order
    }

    /// Number of signals, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no signals at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks a signal up by key.
    #[must_use]
    pub fn get(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(&id)
    }

    /// Full order of keys, hidden signals included.
    #[must_use]
    pub fn order(&self) -> &[SignalId] {
        &self.order
    }

    /// All signals in display order, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.order.iter().filter_map(|id| self.signals.get(id))
    }

    /// Keys of the displayed subset, indexed by row.
    #[must_use]
    pub fn displayed(&self) -> &[SignalId] {
        &self.displayed
    }

    /// Number of displayed rows.
    #[must_use]
    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// Signal shown on `row`.
    #[must_use]
    pub fn displayed_signal(&self, row: usize) -> Option<&Signal> {
        self.displayed.get(row).and_then(|id| self.signals.get(id))
    }

    /// Displayed signals in row order.
    pub fn displayed_signals(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.displayed.iter().filter_map(|id| self.signals.get(id))
    }

    /// Names of the displayed signals in row order.
    pub fn displayed_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.displayed_signals().map(Signal::name)
    }

    /// Row of a displayed signal.
    #[must_use]
    pub fn row_of(&self, id: SignalId) -> Option<usize> {
        self.displayed.iter().position(|&shown| shown == id)
    }

    /// Current clip buffer.
    #[must_use]
    pub fn clip(&self) -> &ClipBuffer {
        &self.clip
    }

    /// Hides the displayed rows in `rows` and stores them in the clip buffer.
    ///
    /// The signals keep their place in the order. Returns the number of signals
    /// cut; an empty or out-of-range selection changes nothing.
    pub fn cut(&mut self, rows: Range<usize>) -> usize {
        let ids = self.rows_to_ids(rows);
        if ids.is_empty() {
            return 0;
        }
        for id in &ids {
            if let Some(signal) = self.signals.get_mut(id) {
                signal.set_displayed(false);
            }
        }
        let count = ids.len();
        self.clip = ClipBuffer { ids };
        self.rebuild_displayed();
        count
    }

    /// Stores the displayed rows in `rows` in the clip buffer without hiding them.
    ///
    /// Returns the number of signals copied.
    pub fn copy(&mut self, rows: Range<usize>) -> usize {
        let ids = self.rows_to_ids(rows);
        if ids.is_empty() {
            return 0;
        }
        let count = ids.len();
        self.clip = ClipBuffer { ids };
        count
    }

    /// Moves the clip buffer's signals in front of displayed row `row` and shows them.
    ///
    /// A `row` at or past the end appends after the last signal. The clip buffer
    /// is kept, so the same contents can be pasted again. Returns the rows now
    /// occupied by the pasted signals, or `None` with an empty clip buffer.
    pub fn paste(&mut self, row: usize) -> Option<Range<usize>> {
        if self.clip.is_empty() {
            return None;
        }
        let ids = self.clip.ids.clone();
        self.insert_before_row(row, &ids)
    }

    /// Shows the per-bit children of the bus on `row` directly below it.
    ///
    /// Returns the rows of the inserted bits, or `None` if `row` is not a bus
    /// with bit children.
    pub fn expand_bus(&mut self, row: usize) -> Option<Range<usize>> {
        let bus = self.displayed_signal(row)?;
        if !bus.is_bus() || bus.bit_signals().is_empty() {
            return None;
        }
        let bits = bus.bit_signals().to_vec();
        log::debug!("expanding bus {} into {} bits", bus.name(), bits.len());
        self.insert_before_row(row + 1, &bits)
    }

    /// Reorders signals to follow `names`, as read from an order file.
    ///
    /// Each requested name is matched to the first not-yet-matched signal whose
    /// name equals it, or equals it with a trailing `[...]` bit-select removed.
    /// Matched signals move to the front in request order and are shown; all
    /// other signals follow in their prior relative order with their display
    /// flags unchanged. Names matching nothing are reported, not fatal.
    pub fn restore_order<I, S>(&mut self, names: I) -> RestoreReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = RestoreReport::default();
        let mut matched: HashSet<SignalId> = HashSet::new();
        let mut next = Vec::with_capacity(self.order.len());

        for name in names {
            let name = name.as_ref();
            let base = strip_bit_select(name);
            let found = self.order.iter().copied().find(|id| {
                !matched.contains(id)
                    && self
                        .signals
                        .get(id)
                        .is_some_and(|signal| signal.name() == name || signal.name() == base)
            });
            match found {
                Some(id) => {
                    matched.insert(id);
                    next.push(id);
                    if let Some(signal) = self.signals.get_mut(&id) {
                        signal.set_displayed(true);
                    }
                    report.matched += 1;
                }
                None => {
                    log::warn!("order file: {name} not found");
                    report.not_found.push(name.to_owned());
                }
            }
        }

        next.extend(self.order.iter().copied().filter(|id| !matched.contains(id)));
        self.order = next;
        self.rebuild_displayed();
        report
    }

    /// Finds the first displayed row at or after `from` whose name matches `query`.
    #[must_use]
    pub fn find(&self, query: &str, flags: FindFlags, from: usize) -> Option<usize> {
        let match_case = flags.contains(FindFlags::MATCH_CASE);
        let whole = flags.contains(FindFlags::WHOLE_WORD);
        let query = if match_case {
            query.to_owned()
        } else {
            query.to_uppercase()
        };
        self.displayed_signals()
            .enumerate()
            .skip(from)
            .find(|(_, signal)| {
                let name = if match_case {
                    signal.name().to_owned()
                } else {
                    signal.name().to_uppercase()
                };
                if whole {
                    name == query
                } else {
                    name.contains(query.as_str())
                }
            })
            .map(|(row, _)| row)
    }

    fn rows_to_ids(&self, rows: Range<usize>) -> Vec<SignalId> {
        let end = rows.end.min(self.displayed.len());
        if rows.start >= end {
            return Vec::new();
        }
        self.displayed[rows.start..end].to_vec()
    }

    /// Rebuilds the order with `ids` placed in front of the signal on `row`.
    ///
    /// Keys are placed once; a key already elsewhere in the order moves.
    fn insert_before_row(&mut self, row: usize, ids: &[SignalId]) -> Option<Range<usize>> {
        let mut moving: HashSet<SignalId> = HashSet::with_capacity(ids.len());
        let block: Vec<SignalId> = ids
            .iter()
            .copied()
            .filter(|id| self.signals.contains_key(id) && moving.insert(*id))
            .collect();
        let first = *block.first()?;

        let anchor = self.displayed.get(row).copied();
        let mut next = Vec::with_capacity(self.order.len());
        let mut placed = false;
        for &id in &self.order {
            if !placed && Some(id) == anchor {
                next.extend_from_slice(&block);
                placed = true;
            }
            if !moving.contains(&id) {
                next.push(id);
            }
        }
        if !placed {
            next.extend_from_slice(&block);
        }

        for id in &block {
            if let Some(signal) = self.signals.get_mut(id) {
                signal.set_displayed(true);
            }
        }
        self.order = next;
        self.rebuild_displayed();

        let start = self.row_of(first)?;
        Some(start..start + block.len())
    }

    fn rebuild_displayed(&mut self) {
        let signals = &self.signals;
        self.displayed.clear();
        self.displayed.extend(
            self.order
                .iter()
                .copied()
                .filter(|id| signals.get(id).is_some_and(Signal::is_displayed)),
        );
    }
}

/// Removes a trailing `[...]` bit-select from a signal name.
///
/// A name that starts with `[` is returned unchanged.
#[must_use]
pub fn strip_bit_select(name: &str) -> &str {
    match name.find('[') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Event, Level};

    fn order_of(names: &[&str]) -> SignalOrder {
        SignalOrder::from_signals(names.iter().enumerate().map(|(i, name)| {
            Signal::new(
                SignalId(u32::try_from(i).unwrap()),
                *name,
                vec![Event::new(0, Level::L)],
            )
        }))
    }

    fn shown(order: &SignalOrder) -> Vec<&str> {
        order.displayed_names().collect()
    }

    #[test]
    fn strip_bit_select_keeps_leading_bracket() {
        assert_eq!(strip_bit_select("data[7:0]"), "data");
        assert_eq!(strip_bit_select("data"), "data");
        assert_eq!(strip_bit_select("[odd]"), "[odd]");
    }

    #[test]
    fn cut_hides_but_keeps_signals() {
        let mut order = order_of(&["a", "b", "c", "d"]);
        assert_eq!(order.cut(1..3), 2);
        assert_eq!(shown(&order), ["a", "d"]);
        assert_eq!(order.len(), 4);
        assert_eq!(order.clip().ids(), &[SignalId(1), SignalId(2)]);
        assert!(!order.get(SignalId(1)).unwrap().is_displayed());
    }

    #[test]
    fn empty_ranges_leave_clip_alone() {
        let mut order = order_of(&["a", "b"]);
        order.copy(0..1);
        assert_eq!(order.cut(1..1), 0);
        assert_eq!(order.copy(5..9), 0);
        assert_eq!(order.clip().ids(), &[SignalId(0)]);
    }

    #[test]
    fn paste_moves_cut_rows() {
        let mut order = order_of(&["a", "b", "c", "d", "e"]);
        order.cut(0..2);
        // Displayed rows are now c, d, e; paste in front of e.
        assert_eq!(order.paste(2), Some(2..4));
        assert_eq!(shown(&order), ["c", "d", "a", "b", "e"]);
    }

    #[test]
    fn paste_past_end_appends() {
        let mut order = order_of(&["a", "b", "c"]);
        order.cut(0..1);
        assert_eq!(order.paste(99), Some(2..3));
        assert_eq!(shown(&order), ["b", "c", "a"]);
    }

    #[test]
    fn paste_with_empty_clip_is_noop() {
        let mut order = order_of(&["a", "b"]);
        assert_eq!(order.paste(0), None);
        assert_eq!(shown(&order), ["a", "b"]);
    }

    #[test]
    fn copy_then_paste_moves_rows_without_duplicates() {
        let mut order = order_of(&["a", "b", "c", "d"]);
        order.copy(0..1);
        assert_eq!(order.paste(3), Some(2..3));
        assert_eq!(shown(&order), ["b", "c", "a", "d"]);
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn find_respects_flags_and_start() {
        let order = order_of(&["clk", "data_in", "DATA_OUT", "data"]);
        assert_eq!(order.find("data", FindFlags::empty(), 0), Some(1));
        assert_eq!(order.find("data", FindFlags::empty(), 2), Some(2));
        assert_eq!(order.find("data", FindFlags::MATCH_CASE, 2), Some(3));
        assert_eq!(order.find("DATA", FindFlags::WHOLE_WORD, 0), Some(3));
        assert_eq!(order.find("nope", FindFlags::empty(), 0), None);
    }
}
