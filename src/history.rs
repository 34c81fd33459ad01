use std::collections::VecDeque;

/// Maximum number of entries kept in the undo chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryLimit {
    /// Keep every recorded state for the lifetime of the history.
    #[default]
    Unbounded,
    /// Keep at most this many undo steps; the oldest ones are dropped first.
    MaxPast(usize),
}

/// Linear undo/redo history over immutable values.
///
/// The history always has a `present` value. `past` is ordered oldest first and
/// `future` nearest first, so `future[0]` is what `redo` would restore. Recording
/// a new value with [`History::set`] discards the whole future: there is no
/// branching.
///
/// A `History` is meant to be owned by a single editor session. It has no interior
/// mutability, and every operation takes `&mut self`, so a `set` can never
/// interleave with an `undo`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    future: VecDeque<T>,
    limit: HistoryLimit,
}

impl<T> History<T> {
    /// Creates a history whose present is `initial`, with no undo bound.
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HistoryLimit::Unbounded)
    }

    pub fn with_limit(initial: T, limit: HistoryLimit) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
            limit,
        }
    }

    /// Records `next` as the new present.
    ///
    /// The previous present moves to the end of `past` and `future` is cleared.
    /// No deduplication happens: setting a value equal to the present still adds
    /// an undo step.
    pub fn set(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        self.enforce_limit();
    }

    /// Steps back one entry. Returns `false` without touching anything when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Steps forward one entry. Returns `false` without touching anything when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Undo chain, oldest first.
    pub fn past(&self) -> &[T] {
        &self.past
    }

    /// Redo chain, nearest first.
    pub fn future(&self) -> impl ExactSizeIterator<Item = &T> {
        self.future.iter()
    }

    /// Total number of states held, present included.
    pub fn len(&self) -> usize {
        self.past.len() + 1 + self.future.len()
    }

    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Drops every past and future entry, keeping the present.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn enforce_limit(&mut self) {
        if let HistoryLimit::MaxPast(max) = self.limit {
            if self.past.len() > max {
                let excess = self.past.len() - max;
                self.past.drain(..excess);
                log::debug!("History limit {} reached, dropped {} oldest entries", max, excess);
            }
        }
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
