/// A contiguous range of ids. Stored as plain indices so it stays `Copy`
/// whatever the id type is.
pub struct IdRange<Id> {
    pub start: Id,
    pub end: Id,
}

impl<Id: Copy + From<usize> + Into<usize>> IdRange<Id> {
    pub fn empty() -> Self {
        IdRange {
            start: Id::from(0),
            end: Id::from(0),
        }
    }

    pub fn from_start_and_length(start: Id, len: usize) -> Self {
        let start_idx: usize = start.into();
        IdRange {
            start,
            end: Id::from(start_idx + len),
        }
    }

    pub fn len(&self) -> usize {
        self.end.into() - self.start.into()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<Id> {
        let idx = self.start.into() + i;
        (idx < self.end.into()).then(|| Id::from(idx))
    }
}

impl<Id: Copy + From<usize> + Into<usize>> Iterator for IdRange<Id> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        if self.start.into() < self.end.into() {
            let id = self.start;
            self.start = Id::from(self.start.into() + 1);
            Some(id)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<Id: Copy + From<usize> + Into<usize>> ExactSizeIterator for IdRange<Id> {}

impl<Id: Copy> Copy for IdRange<Id> {}

impl<Id: Copy> Clone for IdRange<Id> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id: Copy + From<usize> + Into<usize>> Default for IdRange<Id> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Id: PartialEq> PartialEq for IdRange<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Id: Eq> Eq for IdRange<Id> {}

impl<Id: std::fmt::Debug> std::fmt::Debug for IdRange<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<Id> IdRange<Id> {
    /// Converts to a range over a different id type with the same indices.
    /// Deliberately not named `map` so `Iterator::map` keeps working on
    /// ranges.
    pub fn cast<Other: From<usize>>(self) -> IdRange<Other>
    where
        Id: Into<usize>,
    {
        IdRange {
            start: Other::from(self.start.into()),
            end: Other::from(self.end.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_order() {
        let range: IdRange<usize> = IdRange::from_start_and_length(2, 3);
        assert_eq!(range.collect::<Vec<_>>(), [2, 3, 4]);
    }

    #[test]
    fn iterator_adapters_resolve_on_ranges() {
        let range: IdRange<usize> = IdRange::from_start_and_length(1, 3);
        let doubled: Vec<usize> = range.map(|id| id * 2).collect();
        assert_eq!(doubled, [2, 4, 6]);
    }

    #[test]
    fn cast_keeps_the_indices() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct OtherId(usize);
        impl From<usize> for OtherId {
            fn from(index: usize) -> Self {
                OtherId(index)
            }
        }
        impl From<OtherId> for usize {
            fn from(id: OtherId) -> Self {
                id.0
            }
        }

        let range: IdRange<usize> = IdRange::from_start_and_length(2, 2);
        let cast: IdRange<OtherId> = range.cast();
        assert_eq!(cast.collect::<Vec<_>>(), [OtherId(2), OtherId(3)]);
    }

    #[test]
    fn empty_range() {
        let range: IdRange<usize> = IdRange::empty();
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.get(0), None);
    }
}
