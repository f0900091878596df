/// Range of positions on the hash circle.
///
/// Ranges are open below and closed above, i.e. `(start..=end]`, since a
/// point owns its own position and everything after its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRange {
    /// `(start..=end]`, with `start < end`.
    Bounded(u32, u32),

    /// Range crossing the top of the circle: `(start..=u32::MAX]` followed by
    /// `[0..=end]`. When `start == end` the range covers the whole circle.
    Wrapping(u32, u32),
}

impl KeyRange {
    /// Exclusive lower bound.
    pub fn start(&self) -> u32 {
        match self {
            KeyRange::Bounded(start, _) | KeyRange::Wrapping(start, _) => *start,
        }
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> u32 {
        match self {
            KeyRange::Bounded(_, end) | KeyRange::Wrapping(_, end) => *end,
        }
    }

    /// Check if the given position is in the range.
    ///
    /// Note not the key itself, but the hash of the key provides the position
    /// on the circle.
    pub fn contains(&self, position: u32) -> bool {
        match self {
            KeyRange::Bounded(start, end) => position > *start && position <= *end,
            KeyRange::Wrapping(start, end) => position > *start || position <= *end,
        }
    }

    /// Number of positions covered by the range.
    pub fn span(&self) -> u64 {
        match self {
            KeyRange::Bounded(start, end) => u64::from(end - start),
            KeyRange::Wrapping(start, end) => {
                u64::from(u32::MAX - start) + u64::from(*end) + 1
            }
        }
    }

    /// Same range, extended up to the given position.
    pub(crate) fn extend_to(self, end: u32) -> Self {
        match self {
            KeyRange::Bounded(start, _) => KeyRange::Bounded(start, end),
            KeyRange::Wrapping(start, _) => KeyRange::Wrapping(start, end),
        }
    }
}

/// Arc of the hash circle with the server responsible for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<'a> {
    key_range: KeyRange,
    owner: &'a str,
}

impl<'a> Interval<'a> {
    /// Creates a new interval with the given key range and owner.
    pub(crate) fn new(key_range: KeyRange, owner: &'a str) -> Self {
        Self { key_range, owner }
    }

    /// Returns the key range of the interval.
    pub fn key_range(&self) -> &KeyRange {
        &self.key_range
    }

    /// Returns identifier of the server responsible for the interval.
    pub fn owner(&self) -> &'a str {
        self.owner
    }
}
