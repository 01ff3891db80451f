use std::borrow::Borrow;
use std::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct Interner<T, Id>(
    indexmap::IndexSet<T, fxhash::FxBuildHasher>,
    PhantomData<Id>,
);

impl<T, Id> Default for Interner<T, Id> {
    fn default() -> Self {
        Self(Default::default(), PhantomData)
    }
}

impl<T: core::hash::Hash + PartialEq + Eq, Id: Copy + From<usize> + Into<usize>> Interner<T, Id> {
    pub(crate) fn get_by_id(&self, id: Id) -> Option<&T> {
        self.0.get_index(id.into())
    }

    pub(crate) fn insert(&mut self, value: T) -> Id {
        self.0.insert_full(value).0.into()
    }

    pub(crate) fn get_or_new<Q>(&mut self, value: &Q) -> Id
    where
        T: Borrow<Q> + for<'a> From<&'a Q>,
        Q: ?Sized + Eq + std::hash::Hash,
    {
        self.0
            .get_full(value.borrow())
            .map(|(id, _)| id.into())
            .unwrap_or_else(|| self.insert(value.into()))
    }
}

impl<T, Id: Into<usize>> std::ops::Index<Id> for Interner<T, Id> {
    type Output = T;

    fn index(&self, index: Id) -> &T {
        &self.0[index.into()]
    }
}

impl<T, Id> From<Interner<T, Id>> for Vec<T> {
    fn from(interner: Interner<T, Id>) -> Self {
        interner.0.into_iter().collect()
    }
}
