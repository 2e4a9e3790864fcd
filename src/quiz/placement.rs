//! Ordered placement sequence and its immutable-update operations.
//!
//! Every operation borrows the current [`Placement`] and returns a fresh one,
//! so a renderer holding the previous snapshot never observes a half-applied
//! change.

use std::fmt;

/// Opaque identifier of a draggable picture (its image URL in practice).
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemRef(String);

impl ItemRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user's current answer. Order is significant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    items: Vec<ItemRef>,
}

impl Placement {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ItemRef> {
        self.items.get(index)
    }

    /// Exact ordered equality against a target sequence.
    pub fn matches(&self, target: &[ItemRef]) -> bool {
        self.items.as_slice() == target
    }

    /// Copy with `item` inserted at `index` (clamped to `0..=len`).
    /// At or above `max_items` the copy is returned unchanged.
    pub fn inserted_at(&self, index: usize, item: ItemRef, max_items: usize) -> Placement {
        if self.items.len() >= max_items {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.insert(index.min(items.len()), item);
        Placement { items }
    }

    /// Copy with the element at `from` removed and re-inserted at `to`
    /// (indexing the shortened sequence). Out-of-range `from` is a no-op;
    /// `to` is clamped.
    pub fn moved_within(&self, from: usize, to: usize) -> Placement {
        if from >= self.items.len() {
            return self.clone();
        }
        let mut items = self.items.clone();
        let moved = items.remove(from);
        items.insert(to.min(items.len()), moved);
        Placement { items }
    }
}

impl FromIterator<ItemRef> for Placement {
    fn from_iter<T: IntoIterator<Item = ItemRef>>(iter: T) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Placement {
        items.iter().map(|s| ItemRef::from(*s)).collect()
    }

    #[test]
    fn insert_below_max_grows_by_one() {
        let p = seq(&["a", "c"]);
        let q = p.inserted_at(1, "b".into(), 3);
        assert_eq!(q.len(), p.len() + 1);
        assert_eq!(q, seq(&["a", "b", "c"]));
        // caller's copy untouched
        assert_eq!(p, seq(&["a", "c"]));
    }

    #[test]
    fn insert_at_max_is_noop() {
        let p = seq(&["a", "b"]);
        assert_eq!(p.inserted_at(0, "z".into(), 2), p);
        assert_eq!(p.inserted_at(0, "z".into(), 1), p);
    }

    #[test]
    fn insert_index_is_clamped() {
        let p = seq(&["a"]);
        assert_eq!(p.inserted_at(42, "b".into(), 5), seq(&["a", "b"]));
    }

    #[test]
    fn move_within_reorders() {
        let p = seq(&["a", "b", "c", "d"]);
        assert_eq!(p.moved_within(0, 2), seq(&["b", "c", "a", "d"]));
        assert_eq!(p.moved_within(3, 0), seq(&["d", "a", "b", "c"]));
        assert_eq!(p.moved_within(1, 1), p);
    }

    #[test]
    fn move_within_round_trip_restores_original() {
        let p = seq(&["a", "b", "c", "d", "e"]);
        for i in 0..p.len() {
            for j in 0..p.len() {
                if i == j {
                    continue;
                }
                let back = p.moved_within(i, j).moved_within(j, i);
                assert_eq!(back, p, "round trip {i} -> {j}");
            }
        }
    }

    #[test]
    fn move_out_of_range_is_noop_and_target_clamped() {
        let p = seq(&["a", "b"]);
        assert_eq!(p.moved_within(5, 0), p);
        assert_eq!(p.moved_within(0, 9), seq(&["b", "a"]));
    }

    #[test]
    fn matches_is_order_sensitive() {
        let target = [ItemRef::from("a"), ItemRef::from("b"), ItemRef::from("c")];
        assert!(seq(&["a", "b", "c"]).matches(&target));
        assert!(!seq(&["b", "a", "c"]).matches(&target));
        assert!(!seq(&["a", "b"]).matches(&target));
    }
}
