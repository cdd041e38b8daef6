use crate::error::{DsvizError, Result};
use crate::notify::ChangeNotifier;
use serde::{Deserialize, Serialize};

/// Default slot count for a fresh stack
pub const DEFAULT_CAPACITY: usize = 10;

/// Growable array-backed LIFO stack
///
/// Elements occupy `slots[0..len]` with no gaps; the slot at `len - 1` is
/// the top. When every slot is taken the backing array doubles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StackRepr<T>")]
pub struct Stack<T> {
    slots: Vec<Option<T>>,
    len: usize,
    initial_capacity: usize,
    #[serde(skip)]
    listeners: ChangeNotifier,
}

/// Wire shape of a stack, validated before it becomes a [`Stack`]
#[derive(Deserialize)]
struct StackRepr<T> {
    slots: Vec<Option<T>>,
    len: usize,
    initial_capacity: usize,
}

impl<T> TryFrom<StackRepr<T>> for Stack<T> {
    type Error = String;

    fn try_from(repr: StackRepr<T>) -> std::result::Result<Self, Self::Error> {
        if repr.slots.is_empty() || repr.initial_capacity == 0 {
            return Err("stack capacity must be at least 1".into());
        }
        if repr.len > repr.slots.len() {
            return Err(format!(
                "stack length {} exceeds capacity {}",
                repr.len,
                repr.slots.len()
            ));
        }
        let (live, spare) = repr.slots.split_at(repr.len);
        if live.iter().any(Option::is_none) || spare.iter().any(Option::is_some) {
            return Err("stack slots are not contiguous from the bottom".into());
        }
        Ok(Self {
            slots: repr.slots,
            len: repr.len,
            initial_capacity: repr.initial_capacity,
            listeners: ChangeNotifier::new(),
        })
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stack; a zero capacity is bumped to 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: empty_slots(capacity),
            len: 0,
            initial_capacity: capacity,
            listeners: ChangeNotifier::new(),
        }
    }

    /// Push onto the top, doubling the backing array first if it is full
    pub fn push(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
        self.listeners.notify();
    }

    /// Remove and return the top element
    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DsvizError::EmptyContainer("stack"));
        }
        self.len -= 1;
        let value = self.slots[self.len]
            .take()
            .ok_or(DsvizError::EmptyContainer("stack"))?;
        self.listeners.notify();
        Ok(value)
    }

    pub fn peek(&self) -> Result<&T> {
        self.len
            .checked_sub(1)
            .and_then(|top| self.slots[top].as_ref())
            .ok_or(DsvizError::EmptyContainer("stack"))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop every element and shrink back to the initial capacity
    pub fn reset(&mut self) {
        self.slots = empty_slots(self.initial_capacity);
        self.len = 0;
        self.listeners.notify();
    }

    /// Iterate bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().flatten()
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.subscribe(listener);
    }

    fn grow(&mut self) {
        let doubled = self.slots.len() * 2;
        self.slots.resize_with(doubled, || None);
    }
}

impl<T: Clone> Stack<T> {
    /// Snapshot of the elements, bottom to top
    pub fn elements(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

pub(crate) fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
