//! Time-bounded sliding window with incremental totals
//!
//! Entries carry the frame time elapsed since the entry before them. The
//! window keeps at most `max_time` seconds of history: every push is
//! followed by evicting the oldest entries until the summed `delta_time`
//! fits again. Totals are maintained incrementally through a
//! [`WindowAccumulator`] and always describe exactly the live entries.
//!
//! Every entry gets a monotonically increasing sequence number. Looking an
//! entry up by sequence is O(1), and sequences of evicted entries simply stop
//! resolving, so links between entries never dangle.

use std::collections::VecDeque;

/// Incrementally maintained totals over the live entries of a window
pub trait WindowAccumulator<S>: Default {
    /// Account for an entry entering the window
    fn include(&mut self, state: &S);

    /// Remove an entry leaving the window
    fn exclude(&mut self, state: &S);
}

/// Windows that need no totals besides time
impl<S> WindowAccumulator<S> for () {
    #[inline(always)]
    fn include(&mut self, _state: &S) {}

    #[inline(always)]
    fn exclude(&mut self, _state: &S) {}
}

/// One recorded frame
#[derive(Debug, Clone)]
pub struct TimedEntry<S> {
    pub state: S,
    /// Time between the previous entry and this one, in seconds
    pub delta_time: f64,
    sequence: u64,
}

impl<S> TimedEntry<S> {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Sliding window bounded by accumulated frame time
#[derive(Debug, Clone)]
pub struct TimeWindow<S, A = ()> {
    // Oldest entry at the front, newest at the back
    entries: VecDeque<TimedEntry<S>>,
    next_sequence: u64,
    total_time: f64,
    totals: A,
    min_time: f64,
    max_time: f64,
}

impl<S, A: WindowAccumulator<S>> TimeWindow<S, A> {
    /// Create an empty window spanning at most `max_time` seconds, trusted
    /// once it spans more than `min_time` seconds
    pub fn new(min_time: f64, max_time: f64) -> Self {
        Self {
            entries: VecDeque::new(),
            next_sequence: 0,
            total_time: 0.0,
            totals: A::default(),
            min_time,
            max_time,
        }
    }

    /// Append a new entry and evict expired ones
    ///
    /// Returns the number of evicted entries. A single entry longer than
    /// `max_time` evicts everything, itself included.
    pub fn push(&mut self, state: S, delta_time: f64) -> usize {
        self.totals.include(&state);
        self.total_time += delta_time;
        self.entries.push_back(TimedEntry {
            state,
            delta_time,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;

        let mut evicted = 0;
        while self.total_time > self.max_time {
            let Some(oldest) = self.entries.pop_front() else {
                break;
            };
            self.total_time -= oldest.delta_time;
            self.totals.exclude(&oldest.state);
            evicted += 1;
        }

        if self.entries.is_empty() {
            self.total_time = 0.0;
            self.totals = A::default();
        }

        evicted
    }

    /// Sequence number the next pushed entry will receive
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    fn index_of(&self, sequence: u64) -> Option<usize> {
        let oldest = self.next_sequence - self.entries.len() as u64;
        if sequence < oldest || sequence >= self.next_sequence {
            return None;
        }
        Some((sequence - oldest) as usize)
    }

    /// Look up a live entry by sequence number
    pub fn get(&self, sequence: u64) -> Option<&TimedEntry<S>> {
        let index = self.index_of(sequence)?;
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, sequence: u64) -> Option<&mut TimedEntry<S>> {
        let index = self.index_of(sequence)?;
        self.entries.get_mut(index)
    }

    pub fn newest(&self) -> Option<&TimedEntry<S>> {
        self.entries.back()
    }

    pub fn newest_mut(&mut self) -> Option<&mut TimedEntry<S>> {
        self.entries.back_mut()
    }

    /// Entries from newest to oldest
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &TimedEntry<S>> + '_ {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulated `delta_time` of the live entries
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn totals(&self) -> &A {
        &self.totals
    }

    /// Whether enough history has been recorded to trust the totals
    pub fn warmed_up(&self) -> bool {
        self.total_time > self.min_time
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_time = 0.0;
        self.totals = A::default();
    }
}
