//! In-place collection mutators.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Bulk append and wholesale replacement for mutable containers.
///
/// The source is consumed once, in iteration order. Nothing is deduplicated
/// beyond what the container itself does (sets keep one copy of each value).
pub trait CollectionExt<T> {
    fn add_item(&mut self, item: T);
    fn clear_items(&mut self);

    /// Appends every item of `items` after the current contents.
    fn add_from<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.add_item(item);
        }
    }

    /// Clears the container, then appends every item of `items`.
    fn replace_with<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear_items();
        self.add_from(items);
    }
}

impl<T> CollectionExt<T> for Vec<T> {
    fn add_item(&mut self, item: T) {
        self.push(item);
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T> CollectionExt<T> for VecDeque<T> {
    fn add_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T> CollectionExt<T> for LinkedList<T> {
    fn add_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T, S> CollectionExt<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn add_item(&mut self, item: T) {
        self.insert(item);
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T: Ord> CollectionExt<T> for BTreeSet<T> {
    fn add_item(&mut self, item: T) {
        self.insert(item);
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::CollectionExt;
    use std::collections::{BTreeSet, VecDeque};

    #[test]
    fn add_from_appends_in_order_without_dedup() {
        let mut target = vec![1, 2];
        target.add_from(vec![2, 3]);
        assert_eq!(target, vec![1, 2, 2, 3]);
    }

    #[test]
    fn add_from_consumes_lazy_source_once() {
        let mut target = VecDeque::from(vec!["a"]);
        let mut pulls = 0;
        target.add_from(["b", "c"].into_iter().inspect(|_| pulls += 1));
        assert_eq!(pulls, 2);
        assert_eq!(target, VecDeque::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn replace_with_discards_previous_contents() {
        let mut target = vec![9, 9, 9];
        target.replace_with(vec![1, 2]);
        assert_eq!(target, vec![1, 2]);

        target.replace_with(Vec::new());
        assert!(target.is_empty());
    }

    #[test]
    fn set_targets_keep_set_semantics() {
        let mut target = BTreeSet::from([1]);
        target.add_from([1, 2]);
        assert_eq!(target.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
