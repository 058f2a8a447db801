//! Entry Lists
//!
//! Ordered, bounded lists backing the sequence-shaped steps
//! (beneficiaries, executors, guardians, distributions).
//! Add and remove are no-ops outside the list's bounds.

use serde::{Deserialize, Serialize};

use super::records::EntryId;

/// An element of a bounded entry list
pub trait ListEntry: Clone {
    /// The list never shrinks below this through `remove`
    const MIN_LEN: usize = 1;

    /// The list never grows beyond this through `push`
    const MAX_LEN: Option<usize> = None;

    /// Entry 0 is a fixed default: it cannot be removed or edited
    const PIN_FIRST: bool = false;

    fn id(&self) -> &EntryId;

    /// Blank entry with a freshly generated id
    fn blank() -> Self;
}

/// Ordered list of step entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T: ListEntry> EntryList<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self(entries)
    }

    /// A list holding a single blank entry
    pub fn with_blank() -> Self {
        Self(vec![T::blank()])
    }

    pub fn entries(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &EntryId) -> Option<&T> {
        self.0.iter().find(|entry| entry.id() == id)
    }

    pub fn can_add(&self) -> bool {
        T::MAX_LEN.map_or(true, |max| self.0.len() < max)
    }

    pub fn can_remove(&self, id: &EntryId) -> bool {
        if self.0.len() <= T::MIN_LEN {
            return false;
        }
        match self.position(id) {
            Some(0) => !T::PIN_FIRST,
            Some(_) => true,
            None => false,
        }
    }

    /// Append an entry. Returns `false` (list untouched) when full.
    pub fn push(&mut self, entry: T) -> bool {
        if !self.can_add() {
            return false;
        }
        self.0.push(entry);
        true
    }

    /// Append a blank entry, returning its id when there was room.
    pub fn push_blank(&mut self) -> Option<EntryId> {
        let entry = T::blank();
        let id = entry.id().clone();
        self.push(entry).then_some(id)
    }

    /// Remove the entry with `id`. Returns `false` (list untouched) at the
    /// minimum length, for the pinned entry, or for an unknown id.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        if !self.can_remove(id) {
            return false;
        }
        self.0.retain(|entry| entry.id() != id);
        true
    }

    /// Edit the entry with `id` in place. The pinned entry is read-only.
    pub fn update(&mut self, id: &EntryId, edit: impl FnOnce(&mut T)) -> bool {
        match self.position(id) {
            Some(0) if T::PIN_FIRST => false,
            Some(index) => {
                edit(&mut self.0[index]);
                true
            }
            None => false,
        }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.0.iter().position(|entry| entry.id() == id)
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
