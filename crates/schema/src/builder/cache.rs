use fxhash::FxHashMap;

use crate::dsl::SourceId;

/// State of one source definition inside a [`TransformCache`].
///
/// A definition is reserved with `InProgress` before its dependencies are
/// transformed, so a cycle that re-enters the same definition finds the
/// already allocated id instead of recursing forever.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CacheSlot<Id> {
    InProgress(Id),
    Done(Id),
}

impl<Id: Copy> CacheSlot<Id> {
    pub(crate) fn id(&self) -> Id {
        match self {
            CacheSlot::InProgress(id) | CacheSlot::Done(id) => *id,
        }
    }
}

pub(crate) struct TransformCache<Id> {
    slots: FxHashMap<SourceId, CacheSlot<Id>>,
}

impl<Id> Default for TransformCache<Id> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }
}

impl<Id: Copy> TransformCache<Id> {
    pub(crate) fn get(&self, key: SourceId) -> Option<CacheSlot<Id>> {
        self.slots.get(&key).copied()
    }

    pub(crate) fn start(&mut self, key: SourceId, id: Id) {
        let previous = self.slots.insert(key, CacheSlot::InProgress(id));
        debug_assert!(previous.is_none(), "definition transformed twice");
    }

    pub(crate) fn finish(&mut self, key: SourceId, id: Id) {
        let previous = self.slots.insert(key, CacheSlot::Done(id));
        debug_assert!(
            matches!(previous, Some(CacheSlot::InProgress(_))),
            "finished a definition that was never started"
        );
    }

    pub(crate) fn all_done(&self) -> bool {
        self.slots
            .values()
            .all(|slot| matches!(slot, CacheSlot::Done(_)))
    }
}
