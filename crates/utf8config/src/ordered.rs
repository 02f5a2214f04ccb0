//! Insertion-ordered, name-unique storage shared by `Section` and `Config`.
//!
//! Entries live in a `Vec` (iteration and dump order) with a name → index
//! map beside it. Callers check for existence before inserting; this type
//! only reports whether an operation applied.

use std::collections::{HashMap, HashSet};

/// Something stored under its own name.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub(crate) struct OrderedMap<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> OrderedMap<T> {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let i = *self.index.get(name)?;
        Some(&mut self.entries[i])
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// First name in `names` that is already stored or repeats earlier in
    /// `names` itself.
    pub(crate) fn first_conflict<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Option<&'a str> {
        let mut batch = HashSet::new();
        names
            .into_iter()
            .find(|name| self.contains(name) || !batch.insert(*name))
    }

    /// Append `item`; returns it back if its name is taken.
    pub(crate) fn push(&mut self, item: T) -> std::result::Result<(), T> {
        if self.contains(item.name()) {
            return Err(item);
        }
        self.index.insert(item.name().to_string(), self.entries.len());
        self.entries.push(item);
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<T> {
        let i = self.index.remove(name)?;
        let item = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(item)
    }
}

impl<T: PartialEq> PartialEq for OrderedMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
