use crate::error::{DsvizError, Result};
use crate::notify::ChangeNotifier;
use crate::structures::stack::empty_slots;
use serde::{Deserialize, Serialize};

/// Default slot count for a fresh queue
pub const DEFAULT_CAPACITY: usize = 10;

/// Growable circular-buffer FIFO queue
///
/// The `len` live slots start at `front` and wrap modulo the capacity;
/// `rear` is the slot the next enqueue writes. Growing copies the wrapped
/// window into a fresh buffer starting at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QueueRepr<T>")]
pub struct Queue<T> {
    slots: Vec<Option<T>>,
    front: usize,
    rear: usize,
    len: usize,
    initial_capacity: usize,
    #[serde(skip)]
    listeners: ChangeNotifier,
}

#[derive(Deserialize)]
struct QueueRepr<T> {
    slots: Vec<Option<T>>,
    front: usize,
    rear: usize,
    len: usize,
    initial_capacity: usize,
}

impl<T> TryFrom<QueueRepr<T>> for Queue<T> {
    type Error = String;

    fn try_from(repr: QueueRepr<T>) -> std::result::Result<Self, Self::Error> {
        let capacity = repr.slots.len();
        if capacity == 0 || repr.initial_capacity == 0 {
            return Err("queue capacity must be at least 1".into());
        }
        if repr.len > capacity || repr.front >= capacity || repr.rear >= capacity {
            return Err(format!(
                "queue window front={} rear={} len={} does not fit capacity {}",
                repr.front, repr.rear, repr.len, capacity
            ));
        }
        if (repr.front + repr.len) % capacity != repr.rear {
            return Err("queue rear does not follow the live window".into());
        }
        let live = |index: usize| (index + capacity - repr.front) % capacity < repr.len;
        let consistent = repr
            .slots
            .iter()
            .enumerate()
            .all(|(index, slot)| slot.is_some() == live(index));
        if !consistent {
            return Err("queue slots do not match the live window".into());
        }
        Ok(Self {
            slots: repr.slots,
            front: repr.front,
            rear: repr.rear,
            len: repr.len,
            initial_capacity: repr.initial_capacity,
            listeners: ChangeNotifier::new(),
        })
    }
}

/// Read-only picture of the circular buffer for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueView<T> {
    pub slots: Vec<Option<T>>,
    pub front: usize,
    pub rear: usize,
    pub capacity: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue; a zero capacity is bumped to 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: empty_slots(capacity),
            front: 0,
            rear: 0,
            len: 0,
            initial_capacity: capacity,
            listeners: ChangeNotifier::new(),
        }
    }

    /// Insert at the rear, re-linearizing into a doubled buffer when full
    pub fn enqueue(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.rear] = Some(value);
        self.rear = (self.rear + 1) % self.slots.len();
        self.len += 1;
        self.listeners.notify();
    }

    /// Remove and return the front element
    pub fn dequeue(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(DsvizError::EmptyContainer("queue"));
        }
        let value = self.slots[self.front]
            .take()
            .ok_or(DsvizError::EmptyContainer("queue"))?;
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        self.listeners.notify();
        Ok(value)
    }

    pub fn peek(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(DsvizError::EmptyContainer("queue"));
        }
        self.slots[self.front]
            .as_ref()
            .ok_or(DsvizError::EmptyContainer("queue"))
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

    pub fn front_index(&self) -> usize {
        self.front
    }

    pub fn rear_index(&self) -> usize {
        self.rear
    }

    /// Empty the queue and return to the initial capacity
    pub fn reset(&mut self) {
        self.slots = empty_slots(self.initial_capacity);
        self.front = 0;
        self.rear = 0;
        self.len = 0;
        self.listeners.notify();
    }

    /// Iterate front to rear
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.slots.len();
        (0..self.len).filter_map(move |offset| self.slots[(self.front + offset) % capacity].as_ref())
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.subscribe(listener);
    }

    fn grow(&mut self) {
        let capacity = self.slots.len();
        let mut fresh = empty_slots(capacity * 2);
        for (offset, slot) in fresh.iter_mut().take(self.len).enumerate() {
            *slot = self.slots[(self.front + offset) % capacity].take();
        }
        self.slots = fresh;
        self.front = 0;
        self.rear = self.len;
    }
}

impl<T: Clone> Queue<T> {
    /// Snapshot of the elements, front to rear
    pub fn elements(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Snapshot of the raw buffer and its indices
    pub fn view(&self) -> QueueView<T> {
        QueueView {
            slots: self.slots.clone(),
            front: self.front,
            rear: self.rear,
            capacity: self.slots.len(),
        }
    }
}
