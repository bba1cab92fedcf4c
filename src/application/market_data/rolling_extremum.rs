//! Sliding-window extremum tracking with a monotonic deque.
//!
//! Each index enters and leaves the deque at most once, so a full pass over
//! a series is O(n) regardless of window size.

use std::collections::VecDeque;

/// Which extreme a window tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    /// Whether `candidate` makes `incumbent` irrelevant for every future window.
    ///
    /// Equal values supersede too, so the most recently pushed index wins ties.
    fn supersedes(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Extremum::Max => candidate >= incumbent,
            Extremum::Min => candidate <= incumbent,
        }
    }
}

/// Monotonic deque of `(index, value)` pairs. The front is the current extreme.
#[derive(Debug, Clone)]
pub struct MonotonicWindow {
    kind: Extremum,
    entries: VecDeque<(usize, f64)>,
}

impl MonotonicWindow {
    pub fn new(kind: Extremum, capacity: usize) -> Self {
        Self {
            kind,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, index: usize, value: f64) {
        while let Some(&(_, back)) = self.entries.back() {
            if self.kind.supersedes(value, back) {
                self.entries.pop_back();
            } else {
                break;
            }
        }
        self.entries.push_back((index, value));
    }

    /// Drops entries from the front while `stale(index)` holds.
    pub fn expire_while(&mut self, mut stale: impl FnMut(usize) -> bool) {
        while let Some(&(index, _)) = self.entries.front() {
            if stale(index) {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn peek(&self) -> Option<(usize, f64)> {
        self.entries.front().copied()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extreme over `[i + 1 - window, i]` (clipped at 0) for every `i`, as `(index, value)`.
///
/// Ties resolve to the most recent index attaining the extreme.
pub fn trailing_extremes(values: &[f64], window: usize, kind: Extremum) -> Vec<(usize, f64)> {
    let mut deque = MonotonicWindow::new(kind, window.min(values.len()));
    let mut out = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        deque.push(i, value);
        let oldest = (i + 1).saturating_sub(window);
        deque.expire_while(|index| index < oldest);
        out.extend(deque.peek());
    }

    out
}

/// Extreme over `[i + 1, i + window]` (clipped at the end) for every `i`.
///
/// `None` where no later element exists.
pub fn forward_extremes(values: &[f64], window: usize, kind: Extremum) -> Vec<Option<f64>> {
    let n = values.len();
    let mut deque = MonotonicWindow::new(kind, window.min(n));
    let mut out = vec![None; n];

    // Walk backwards so the window [i + 1, i + window] only ever gains i + 1.
    for i in (0..n).rev() {
        if i + 1 < n {
            deque.push(i + 1, values[i + 1]);
        }
        let newest = i.saturating_add(window);
        deque.expire_while(|index| index > newest);
        out[i] = deque.peek().map(|(_, value)| value);
    }

    out
}
