use indexmap::map::Entry;
use indexmap::IndexMap;

/// Name-keyed collection that keeps insertion order and never overwrites.
///
/// Insertion order is the variable order of the linear program, so entries are
/// never removed or reordered.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `key` unless it is taken.
    ///
    /// Returns the position of the new entry, or gives `value` back when the
    /// key already exists.
    pub fn try_insert(&mut self, key: impl Into<String>, value: T) -> Result<usize, T> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => Err(value),
            Entry::Vacant(slot) => {
                let position = slot.index();
                slot.insert(value);
                Ok(position)
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
