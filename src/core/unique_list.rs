//! Ordered collection that refuses duplicate elements.
//!
//! [`UniqueList`] is the storage primitive behind groups, students, lessons,
//! student infos and questions. What counts as a duplicate is decided by the
//! element's [`UniqueItem::is_same`], not by `PartialEq`: two students are the
//! same when their student numbers match, two questions when group, lesson
//! and text all match, and so on.
//!
//! Every successful mutation is announced through the list's [`Notifier`].
//! Failed mutations leave the list untouched and notify nobody.

use crate::core::error::CommandError;
use crate::core::observable::{ListChange, Listener, Notifier, SubscriptionId};
use std::cmp::Ordering;
use std::fmt;

/// Identity used by [`UniqueList`] to detect duplicates
pub trait UniqueItem {
    fn is_same(&self, other: &Self) -> bool;
}

pub struct UniqueList<T> {
    items: Vec<T>,
    notifier: Notifier,
}

type ListResult<T> = std::result::Result<T, CommandError>;

impl<T: UniqueItem> UniqueList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    /// Build a list from `items`, failing if two of them are the same
    pub fn from_vec(items: Vec<T>) -> ListResult<Self> {
        let mut list = Self::new();
        list.set_from_list(items)?;
        Ok(list)
    }

    pub fn contains(&self, candidate: &T) -> bool {
        self.items.iter().any(|item| item.is_same(candidate))
    }

    pub fn position(&self, candidate: &T) -> Option<usize> {
        self.items.iter().position(|item| item.is_same(candidate))
    }

    pub fn add(&mut self, item: T) -> ListResult<()> {
        if self.contains(&item) {
            return Err(CommandError::DuplicateElement);
        }
        self.items.push(item);
        self.notifier.notify(ListChange::Added(self.items.len() - 1));
        Ok(())
    }

    pub fn remove(&mut self, target: &T) -> ListResult<T> {
        let index = self.position(target).ok_or(CommandError::ElementNotFound)?;
        Ok(self.remove_at(index).unwrap_or_else(|| unreachable!("position is in bounds")))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.notifier.notify(ListChange::Removed(index));
        Some(removed)
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// Fails with `ElementNotFound` when `index` is out of bounds and with
    /// `DuplicateElement` when `item` is the same as some other element.
    pub fn replace_at(&mut self, index: usize, item: T) -> ListResult<T> {
        if index >= self.items.len() {
            return Err(CommandError::ElementNotFound);
        }
        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.is_same(&item));
        if collides {
            return Err(CommandError::DuplicateElement);
        }
        let previous = std::mem::replace(&mut self.items[index], item);
        self.notifier.notify(ListChange::Replaced(index));
        Ok(previous)
    }

    /// Replace `target` with `edited`
    pub fn replace(&mut self, target: &T, edited: T) -> ListResult<T> {
        let index = self.position(target).ok_or(CommandError::ElementNotFound)?;
        self.replace_at(index, edited)
    }

    pub fn set_from_list(&mut self, items: Vec<T>) -> ListResult<()> {
        if !elements_are_unique(&items) {
            return Err(CommandError::DuplicateElement);
        }
        self.items = items;
        self.notifier.notify(ListChange::Reset);
        Ok(())
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self.notifier.notify(ListChange::Reset);
    }
}

impl<T> UniqueList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Read-only view of the elements in order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

fn elements_are_unique<T: UniqueItem>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, item)| items[i + 1..].iter().all(|other| !item.is_same(other)))
}

impl<T: UniqueItem> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Listeners belong to the original list; a clone starts unobserved.
impl<T: Clone> Clone for UniqueList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            notifier: Notifier::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for UniqueList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Debug> fmt::Debug for UniqueList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        key: &'static str,
        label: &'static str,
    }

    impl UniqueItem for Tag {
        fn is_same(&self, other: &Self) -> bool {
            self.key.eq_ignore_ascii_case(other.key)
        }
    }

    fn tag(key: &'static str, label: &'static str) -> Tag {
        Tag { key, label }
    }

    #[test]
    fn test_add_rejects_duplicates_by_identity() {
        let mut list = UniqueList::new();
        list.add(tag("a", "first")).unwrap();
        assert_eq!(list.add(tag("A", "second")), Err(CommandError::DuplicateElement));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_missing_element() {
        let mut list: UniqueList<Tag> = UniqueList::new();
        assert_eq!(list.remove(&tag("a", "")), Err(CommandError::ElementNotFound));
    }

    #[test]
    fn test_replace_at_allows_same_identity() {
        let mut list = UniqueList::from_vec(vec![tag("a", "one"), tag("b", "two")]).unwrap();
        let previous = list.replace_at(0, tag("a", "renamed")).unwrap();
        assert_eq!(previous.label, "one");
        assert_eq!(list.get(0).unwrap().label, "renamed");
    }

    #[test]
    fn test_replace_at_rejects_collision() {
        let mut list = UniqueList::from_vec(vec![tag("a", "one"), tag("b", "two")]).unwrap();
        assert_eq!(
            list.replace_at(0, tag("b", "clash")),
            Err(CommandError::DuplicateElement)
        );
        assert_eq!(list.replace_at(5, tag("c", "")), Err(CommandError::ElementNotFound));
        assert_eq!(list.get(0).unwrap().label, "one");
    }

    #[test]
    fn test_set_from_list_rejects_duplicate_input() {
        let mut list = UniqueList::from_vec(vec![tag("x", "")]).unwrap();
        let result = list.set_from_list(vec![tag("a", ""), tag("A", "")]);
        assert_eq!(result, Err(CommandError::DuplicateElement));
        assert_eq!(list.as_slice(), &[tag("x", "")]);
    }

    #[test]
    fn test_sort_by() {
        let mut list = UniqueList::from_vec(vec![tag("b", ""), tag("a", "")]).unwrap();
        list.sort_by(|l, r| l.key.cmp(r.key));
        let keys: Vec<_> = list.iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_mutations_notify_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut list = UniqueList::new();
        list.subscribe(Box::new(move |change| sink.lock().unwrap().push(*change)));

        list.add(tag("a", "")).unwrap();
        list.add(tag("b", "")).unwrap();
        let _ = list.add(tag("a", ""));
        list.replace_at(1, tag("b", "x")).unwrap();
        list.remove(&tag("a", "")).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ListChange::Added(0),
                ListChange::Added(1),
                ListChange::Replaced(1),
                ListChange::Removed(0),
            ]
        );
    }

    #[test]
    fn test_clone_drops_listeners_but_keeps_items() {
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let mut list = UniqueList::new();
        list.subscribe(Box::new(move |_| *sink.lock().unwrap() += 1));
        list.add(tag("a", "")).unwrap();

        let mut copy = list.clone();
        copy.add(tag("b", "")).unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(copy.len(), 2);
        assert_ne!(copy, list);
    }
}
