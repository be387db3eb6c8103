use tj_utils::hash::HashSet;

use super::Value;

/// An unordered set of values.
///
/// Backed by a fixed-seed hasher, so iteration order depends only on the
/// members and the order they were inserted in. Encoding the same set twice
/// gives the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    members: HashSet<Value>,
}

impl ValueSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, value: Value) -> bool {
        self.members.insert(value)
    }

    #[inline]
    pub fn remove(&mut self, value: &Value) -> bool {
        self.members.remove(value)
    }

    #[inline]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.members.iter()
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for ValueSet {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = tj_utils::hash::hashbrown::hash_set::Iter<'a, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
