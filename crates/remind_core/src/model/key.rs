use serde::Serialize;
use std::fmt;

/// Session-issued handle for one record of one snapshot. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordKey(u64);

impl RecordKey {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// The contiguous block of keys handed to one snapshot, one per position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyRange {
    base: u64,
    len: usize,
}

impl KeyRange {
    pub fn new(base: u64, len: usize) -> Self {
        Self { base, len }
    }

    /// First key after this range.
    pub(crate) fn end(&self) -> u64 {
        self.base + self.len as u64
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn key(&self, index: usize) -> Option<RecordKey> {
        (index < self.len).then(|| RecordKey(self.base + index as u64))
    }

    /// Key for `index` without the bounds check; callers pair the range with
    /// the record slice it was issued for.
    pub(crate) fn key_at(&self, index: usize) -> RecordKey {
        RecordKey(self.base + index as u64)
    }

    pub fn index_of(&self, key: RecordKey) -> Option<usize> {
        let offset = key.0.checked_sub(self.base)?;
        usize::try_from(offset).ok().filter(|index| *index < self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyRange, RecordKey};

    #[test]
    fn keys_map_back_to_positions() {
        let range = KeyRange::new(10, 3);

        assert_eq!(range.key(0), Some(RecordKey(10)));
        assert_eq!(range.key(2), Some(RecordKey(12)));
        assert_eq!(range.key(3), None);
        assert_eq!(range.index_of(RecordKey(11)), Some(1));
    }

    #[test]
    fn keys_outside_range_resolve_to_nothing() {
        let range = KeyRange::new(10, 3);

        assert_eq!(range.index_of(RecordKey(9)), None);
        assert_eq!(range.index_of(RecordKey(13)), None);
        assert_eq!(range.end(), 13);
        assert!(KeyRange::default().is_empty());
    }
}
