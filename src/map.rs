//! Ordered field map for canonical mappings.
//!
//! [`Mapping`] wraps an [`IndexMap`] so that fields iterate in the order the
//! source document declared them. It is filled exclusively through
//! [`Mapping::merge_insert`], which applies the collision-merge rule: a key
//! seen a second time is promoted to a [`Node::Sequence`] holding every
//! occurrence, so a mapping never holds two entries under one name.
//!
//! ## Examples
//!
//! ```rust
//! use slurpers::{Mapping, Node};
//!
//! let mut map = Mapping::new();
//! map.merge_insert("surname".to_string(), Node::from("Lennon"));
//! map.merge_insert("surname".to_string(), Node::from("Smith"));
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(
//!     map.get("surname"),
//!     Some(&Node::Sequence(vec![Node::from("Lennon"), Node::from("Smith")]))
//! );
//! ```

use crate::Node;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// An insertion-ordered map of field names to canonical nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(IndexMap<String, Node>);

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts `value` under `key`, merging with an existing entry.
    ///
    /// - new key: the value is stored as it is
    /// - existing non-sequence value: replaced by `[old, value]`
    /// - existing sequence: `value` is appended
    ///
    /// A key that occurs once therefore stays a bare value; callers that
    /// expect a list must check for [`Node::Sequence`] first.
    pub fn merge_insert(&mut self, key: String, value: Node) {
        match self.0.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                if let Node::Sequence(items) = slot {
                    items.push(value);
                } else {
                    let previous = std::mem::replace(slot, Node::Sequence(Vec::new()));
                    *slot = Node::Sequence(vec![previous, value]);
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collects pairs through [`Mapping::merge_insert`], so repeated keys merge.
impl FromIterator<(String, Node)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.merge_insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_key_is_stored_bare() {
        let mut map = Mapping::new();
        map.merge_insert("m".to_string(), Node::text("a"));
        assert_eq!(map.get("m"), Some(&Node::text("a")));
    }

    #[test]
    fn test_second_occurrence_promotes_to_sequence() {
        let mut map = Mapping::new();
        map.merge_insert("m".to_string(), Node::text("a"));
        map.merge_insert("m".to_string(), Node::text("b"));
        assert_eq!(
            map.get("m"),
            Some(&Node::Sequence(vec![Node::text("a"), Node::text("b")]))
        );
    }

    #[test]
    fn test_further_occurrences_append() {
        let map: Mapping = ["a", "b", "c"]
            .into_iter()
            .map(|v| ("m".to_string(), Node::text(v)))
            .collect();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("m"),
            Some(&Node::Sequence(vec![
                Node::text("a"),
                Node::text("b"),
                Node::text("c")
            ]))
        );
    }

    #[test]
    fn test_existing_sequence_value_is_appended_to() {
        let mut map = Mapping::new();
        map.merge_insert(
            "tags".to_string(),
            Node::Sequence(vec![Node::text("x"), Node::text("y")]),
        );
        map.merge_insert("tags".to_string(), Node::text("z"));
        assert_eq!(map.get("tags").and_then(Node::as_sequence).map(Vec::len), Some(3));
    }

    #[test]
    fn test_insertion_order_survives_merges() {
        let mut map = Mapping::new();
        map.merge_insert("first".to_string(), Node::text("1"));
        map.merge_insert("second".to_string(), Node::text("2"));
        map.merge_insert("first".to_string(), Node::text("3"));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second"]);
    }
}
