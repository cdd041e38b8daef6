use crate::notify::ChangeNotifier;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<NodeKey>,
}

/// Singly linked list with O(1) prepend and append
///
/// Nodes live in a slot map and link forward by key. `head` starts the
/// walk and `tail` is kept for appends; both are `None` exactly when the
/// list is empty.
#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    listeners: ChangeNotifier,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            listeners: ChangeNotifier::new(),
        }
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            next: self.head,
        });
        self.head = Some(key);
        if self.tail.is_none() {
            self.tail = Some(key);
        }
        self.listeners.notify();
    }

    pub fn append(&mut self, value: T) {
        let key = self.nodes.insert(Node { value, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.listeners.notify();
    }

    /// Insert before the element currently at `index`
    ///
    /// `index == len()` appends. Returns `false` and leaves the list
    /// untouched when `index` is past the end.
    pub fn insert(&mut self, value: T, index: usize) -> bool {
        if index > self.len() {
            return false;
        }
        if index == 0 {
            self.prepend(value);
            return true;
        }
        if index == self.len() {
            self.append(value);
            return true;
        }

        let Some(prev) = self.key_at(index - 1) else {
            return false;
        };
        let next = self.nodes[prev].next;
        let key = self.nodes.insert(Node { value, next });
        self.nodes[prev].next = Some(key);
        self.listeners.notify();
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.listeners.notify();
    }

    /// Iterate head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
        }
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.subscribe(listener);
    }

    fn key_at(&self, index: usize) -> Option<NodeKey> {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = self.nodes.get(cursor?)?.next;
        }
        cursor
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Unlink the first node equal to `value`; `false` if none matched
    pub fn remove(&mut self, value: &T) -> bool {
        let mut prev: Option<NodeKey> = None;
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let next = self.nodes[key].next;
            if self.nodes[key].value == *value {
                match prev {
                    Some(prev) => self.nodes[prev].next = next,
                    None => self.head = next,
                }
                if self.tail == Some(key) {
                    self.tail = prev;
                }
                self.nodes.remove(key);
                self.listeners.notify();
                return true;
            }
            prev = Some(key);
            cursor = next;
        }
        false
    }

    /// Index of the first node equal to `value`
    pub fn find(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| item == value)
    }
}

impl<T: Clone> LinkedList<T> {
    /// Snapshot of the contents, head to tail
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.append(value);
        }
        list
    }
}

pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    next: Option<NodeKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Persisted as the plain head-to-tail sequence; keys are not stable.
impl<T: Serialize> Serialize for LinkedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LinkedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|values| values.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> LinkedList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_append_and_prepend() {
        let mut list = LinkedList::new();
        list.append(2);
        list.append(3);
        list.prepend(1);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_prepend_into_empty_sets_tail() {
        let mut list = LinkedList::new();
        list.prepend(5);
        list.append(6);
        assert_eq!(list.to_vec(), vec![5, 6]);
    }

    #[test]
    fn test_insert_positions() {
        let mut list = list_of(&[10, 30]);
        assert!(list.insert(20, 1));
        assert!(list.insert(0, 0));
        assert!(list.insert(40, 4));
        assert_eq!(list.to_vec(), vec![0, 10, 20, 30, 40]);
        assert_eq!(list.get(2), Some(&20));
    }

    #[test]
    fn test_insert_out_of_range_is_noop() {
        let mut list = list_of(&[1, 2]);
        assert!(!list.insert(9, 3));
        assert_eq!(list.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_remove_updates_tail() {
        let mut list = list_of(&[1, 2, 3]);
        assert!(list.remove(&3));
        list.append(4);
        assert_eq!(list.to_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn test_remove_head_and_last() {
        let mut list = list_of(&[1]);
        assert!(list.remove(&1));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        list.append(8);
        assert_eq!(list.to_vec(), vec![8]);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut list = list_of(&[4, 5, 4]);
        assert!(list.remove(&4));
        assert_eq!(list.to_vec(), vec![5, 4]);
        assert!(!list.remove(&9));
        assert_eq!(list.to_vec(), vec![5, 4]);
    }

    #[test]
    fn test_find() {
        let list = list_of(&[7, 8, 9, 8]);
        assert_eq!(list.find(&8), Some(1));
        assert_eq!(list.find(&1), None);
    }

    #[test]
    fn test_reset() {
        let mut list = list_of(&[1, 2, 3]);
        list.reset();
        assert!(list.is_empty());
        list.append(1);
        assert_eq!(list.to_vec(), vec![1]);
    }

    #[test]
    fn test_serde_as_sequence() {
        let list: LinkedList<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let restored: LinkedList<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.to_vec(), list.to_vec());
    }
}
