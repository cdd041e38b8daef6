//! The aggregating model.
//!
//! A [`Model`] owns at most one instance of each [`Kind`]. Instances are
//! created the first time their kind is activated and are replaced only by
//! [`Model::load`]. Routed operations touch a kind only when it is both
//! active and instantiated.

use crate::config::ModelConfig;
use crate::error::{DsvizError, Result};
use crate::kind::Kind;
use crate::notify::ChangeNotifier;
use crate::snapshot::{read_snapshot, write_snapshot, Record, RecordRef};
use crate::sort::{BubbleSort, InsertionSort, SortAlgorithm, SortState, StepOutcome, StepSorter};
use crate::structures::{LinkedList, Queue, QueueView, Stack};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// A value the model's containers can hold
///
/// Sorters only hold integers; `sort_key` is how a container value
/// reaches them.
pub trait Element: Clone + PartialEq + Debug + Serialize + DeserializeOwned {
    fn sort_key(&self) -> Option<i32>;
}

impl Element for i32 {
    fn sort_key(&self) -> Option<i32> {
        Some(*self)
    }
}

impl Element for i64 {
    fn sort_key(&self) -> Option<i32> {
        i32::try_from(*self).ok()
    }
}

impl Element for u32 {
    fn sort_key(&self) -> Option<i32> {
        i32::try_from(*self).ok()
    }
}

impl Element for String {
    fn sort_key(&self) -> Option<i32> {
        self.trim().parse().ok()
    }
}

/// Answer to [`Model::find`], from the highest-priority active kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found<T> {
    ListIndex(Option<usize>),
    StackTop(T),
    QueueFront(T),
    SortIndex(Option<usize>),
    NothingActive,
}

impl<T> Found<T> {
    /// Index for list and sorter answers
    pub fn position(&self) -> Option<usize> {
        match self {
            Found::ListIndex(index) | Found::SortIndex(index) => *index,
            _ => None,
        }
    }
}

/// Snapshot of one sorter for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorterView {
    pub kind: Kind,
    pub values: Vec<i32>,
    pub state: SortState,
    pub cursor: Vec<usize>,
}

impl SorterView {
    fn of<A: SortAlgorithm>(kind: Kind, sorter: &StepSorter<A>) -> Self {
        Self {
            kind,
            values: sorter.working_sequence(),
            state: sorter.state(),
            cursor: sorter.cursor(),
        }
    }
}

#[derive(Debug)]
pub struct Model<T> {
    config: ModelConfig,
    list: Option<LinkedList<T>>,
    stack: Option<Stack<T>>,
    queue: Option<Queue<T>>,
    insertion: Option<InsertionSort>,
    bubble: Option<BubbleSort>,
    active: [bool; Kind::ALL.len()],
    rng: StdRng,
    listeners: ChangeNotifier,
}

fn gate<X>(slot: &mut Option<X>, active: bool) -> Option<&mut X> {
    slot.as_mut().filter(|_| active)
}

impl<T: Element> Model<T> {
    /// Empty model with nothing active and no load attempted
    pub fn new(config: ModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            list: None,
            stack: None,
            queue: None,
            insertion: None,
            bubble: None,
            active: [false; Kind::ALL.len()],
            rng,
            listeners: ChangeNotifier::new(),
        }
    }

    /// Load whatever the save file holds, then activate `kinds`
    ///
    /// Kinds recovered from the file keep their saved contents; requested
    /// kinds missing from it are created fresh.
    pub fn open(config: ModelConfig, kinds: &[Kind]) -> Self {
        let mut model = Self::new(config);
        model.load();
        for &kind in kinds {
            model.activate(kind);
        }
        model
    }

    /// Mark `kind` active, creating its instance on first activation
    pub fn activate(&mut self, kind: Kind) {
        self.active[kind.index()] = true;
        let capacity = self.config.initial_capacity;
        let (len, bound) = (self.config.sort_len, self.config.value_bound);
        match kind {
            Kind::List => {
                self.list.get_or_insert_with(LinkedList::new);
            }
            Kind::Stack => {
                self.stack.get_or_insert_with(|| Stack::with_capacity(capacity));
            }
            Kind::Queue => {
                self.queue.get_or_insert_with(|| Queue::with_capacity(capacity));
            }
            Kind::Insertion => {
                let rng = &mut self.rng;
                self.insertion
                    .get_or_insert_with(|| InsertionSort::random(rng, len, bound));
            }
            Kind::Bubble => {
                let rng = &mut self.rng;
                self.bubble
                    .get_or_insert_with(|| BubbleSort::random(rng, len, bound));
            }
        }
        debug!(%kind, "activated");
    }

    pub fn is_active(&self, kind: Kind) -> bool {
        self.active[kind.index()]
    }

    /// Whether an instance of `kind` exists, active or not
    pub fn has(&self, kind: Kind) -> bool {
        match kind {
            Kind::List => self.list.is_some(),
            Kind::Stack => self.stack.is_some(),
            Kind::Queue => self.queue.is_some(),
            Kind::Insertion => self.insertion.is_some(),
            Kind::Bubble => self.bubble.is_some(),
        }
    }

    pub fn active_kinds(&self) -> Vec<Kind> {
        Kind::ALL
            .into_iter()
            .filter(|&kind| self.is_active(kind))
            .collect()
    }

    /// Add `value` to every active structure
    ///
    /// The list appends, or prepends when `prepend` is set. Sorters get the
    /// value's sort key appended and are left paused at their start; a value
    /// with no sort key fails with `TypeMismatch` before anything changes.
    pub fn add(&mut self, value: T, prepend: bool) -> Result<()> {
        let sorting = self.routes(Kind::Insertion) || self.routes(Kind::Bubble);
        let key = match value.sort_key() {
            Some(key) => Some(key),
            None if sorting => return Err(DsvizError::TypeMismatch(format!("{:?}", value))),
            None => None,
        };
        debug!(?value, prepend, "add");

        let active = self.active;
        if let Some(list) = gate(&mut self.list, active[Kind::List.index()]) {
            if prepend {
                list.prepend(value.clone());
            } else {
                list.append(value.clone());
            }
        }
        if let Some(stack) = gate(&mut self.stack, active[Kind::Stack.index()]) {
            stack.push(value.clone());
        }
        if let Some(queue) = gate(&mut self.queue, active[Kind::Queue.index()]) {
            queue.enqueue(value);
        }
        if let Some(key) = key {
            if let Some(sorter) = gate(&mut self.insertion, active[Kind::Insertion.index()]) {
                sorter.append(key);
            }
            if let Some(sorter) = gate(&mut self.bubble, active[Kind::Bubble.index()]) {
                sorter.append(key);
            }
        }

        self.listeners.notify();
        Ok(())
    }

    /// Insert into the list at `index`; `false` if the list is inactive or
    /// the index is past the end
    pub fn insert(&mut self, value: T, index: usize) -> bool {
        let active = self.is_active(Kind::List);
        let Some(list) = gate(&mut self.list, active) else {
            return false;
        };
        debug!(?value, index, "insert");
        let inserted = list.insert(value, index);
        if inserted {
            self.listeners.notify();
        }
        inserted
    }

    /// Remove from every active structure
    ///
    /// With no value, pops the stack if it is active, otherwise dequeues
    /// the queue; an empty one surfaces `EmptyContainer`. With a value, the
    /// list and sorters drop its first occurrence. As with [`Model::add`], a
    /// value with no sort key fails with `TypeMismatch` while a sorter is
    /// active, and nothing is removed.
    pub fn remove(&mut self, value: Option<&T>) -> Result<()> {
        if let Some(value) = value {
            let sorting = self.routes(Kind::Insertion) || self.routes(Kind::Bubble);
            if sorting && value.sort_key().is_none() {
                return Err(DsvizError::TypeMismatch(format!("{:?}", value)));
            }
        }
        let active = self.active;
        match value {
            None => {
                if let Some(stack) = gate(&mut self.stack, active[Kind::Stack.index()]) {
                    let popped = stack.pop()?;
                    debug!(?popped, "popped");
                } else if let Some(queue) = gate(&mut self.queue, active[Kind::Queue.index()]) {
                    let dequeued = queue.dequeue()?;
                    debug!(?dequeued, "dequeued");
                } else {
                    return Ok(());
                }
            }
            Some(value) => {
                debug!(?value, "remove");
                if let Some(list) = gate(&mut self.list, active[Kind::List.index()]) {
                    list.remove(value);
                }
                if let Some(key) = value.sort_key() {
                    if let Some(sorter) = gate(&mut self.insertion, active[Kind::Insertion.index()]) {
                        sorter.remove(key);
                    }
                    if let Some(sorter) = gate(&mut self.bubble, active[Kind::Bubble.index()]) {
                        sorter.remove(key);
                    }
                }
            }
        }
        self.listeners.notify();
        Ok(())
    }

    /// Look `value` up in the first active kind, in the order list, stack
    /// top, queue front, insertion, bubble
    pub fn find(&self, value: &T) -> Result<Found<T>> {
        if let Some(list) = self.routed(&self.list, Kind::List) {
            return Ok(Found::ListIndex(list.find(value)));
        }
        if let Some(stack) = self.routed(&self.stack, Kind::Stack) {
            return Ok(Found::StackTop(stack.peek()?.clone()));
        }
        if let Some(queue) = self.routed(&self.queue, Kind::Queue) {
            return Ok(Found::QueueFront(queue.peek()?.clone()));
        }
        let key = value.sort_key();
        if let Some(sorter) = self.routed(&self.insertion, Kind::Insertion) {
            return Ok(Found::SortIndex(key.and_then(|key| sorter.find(key))));
        }
        if let Some(sorter) = self.routed(&self.bubble, Kind::Bubble) {
            return Ok(Found::SortIndex(key.and_then(|key| sorter.find(key))));
        }
        Ok(Found::NothingActive)
    }

    /// Return every active structure to its fresh state; sorters are
    /// reseeded and restarted
    pub fn reset(&mut self) {
        let active = self.active;
        let (len, bound) = (self.config.sort_len, self.config.value_bound);
        if let Some(list) = gate(&mut self.list, active[Kind::List.index()]) {
            list.reset();
        }
        if let Some(stack) = gate(&mut self.stack, active[Kind::Stack.index()]) {
            stack.reset();
        }
        if let Some(queue) = gate(&mut self.queue, active[Kind::Queue.index()]) {
            queue.reset();
        }
        if let Some(sorter) = gate(&mut self.insertion, active[Kind::Insertion.index()]) {
            sorter.reset_with(&mut self.rng, len, bound);
        }
        if let Some(sorter) = gate(&mut self.bubble, active[Kind::Bubble.index()]) {
            sorter.reset_with(&mut self.rng, len, bound);
        }
        debug!("reset");
        self.listeners.notify();
    }

    /// Restart every active sorter and perform its first unit
    pub fn start_sort(&mut self) -> StepOutcome {
        self.drive(|sorter| sorter.start_sort(), |sorter| sorter.start_sort())
    }

    /// Perform one unit on every active sorter
    pub fn step(&mut self) -> StepOutcome {
        self.drive(|sorter| sorter.step(), |sorter| sorter.step())
    }

    /// Write every instantiated kind, active or not, to the save path
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.config.save_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut records = Vec::new();
        if let Some(list) = &self.list {
            records.push(RecordRef::List(list));
        }
        if let Some(stack) = &self.stack {
            records.push(RecordRef::Stack(stack));
        }
        if let Some(queue) = &self.queue {
            records.push(RecordRef::Queue(queue));
        }
        if let Some(sorter) = &self.insertion {
            records.push(RecordRef::Insertion(sorter));
        }
        if let Some(sorter) = &self.bubble {
            records.push(RecordRef::Bubble(sorter));
        }
        write_snapshot(path, &records)?;
        info!(path = %path.display(), records = records.len(), "saved model");
        Ok(())
    }

    /// Best-effort load from the save path
    ///
    /// Returns `false` and leaves the model untouched when the file is
    /// missing, unreadable or invalid.
    pub fn load(&mut self) -> bool {
        let path = self.config.save_path.clone();
        match self.load_from(&path) {
            Ok(_) => true,
            Err(DsvizError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no save file");
                false
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unusable save file");
                false
            }
        }
    }

    /// Replace instances with the ones stored at `path`
    ///
    /// The file is fully validated first; on error nothing changes.
    /// Returns the number of records restored.
    pub fn load_from(&mut self, path: &Path) -> Result<usize> {
        let records = read_snapshot::<T>(path)?;
        let count = records.len();
        for record in records {
            match record {
                Record::List(list) => self.list = Some(list),
                Record::Stack(stack) => self.stack = Some(stack),
                Record::Queue(queue) => self.queue = Some(queue),
                Record::Insertion(sorter) => self.insertion = Some(sorter),
                Record::Bubble(sorter) => self.bubble = Some(sorter),
            }
        }
        info!(path = %path.display(), records = count, "loaded model");
        self.listeners.notify();
        Ok(count)
    }

    /// Stack contents bottom to top; empty when there is no stack
    pub fn stack_elements(&self) -> Vec<T> {
        self.stack.as_ref().map(Stack::elements).unwrap_or_default()
    }

    /// Queue contents front to rear; empty when there is no queue
    pub fn queue_elements(&self) -> Vec<T> {
        self.queue.as_ref().map(Queue::elements).unwrap_or_default()
    }

    pub fn queue_view(&self) -> Option<QueueView<T>> {
        self.queue.as_ref().map(Queue::view)
    }

    /// List contents head to tail; empty when there is no list
    pub fn list_elements(&self) -> Vec<T> {
        self.list.as_ref().map(LinkedList::to_vec).unwrap_or_default()
    }

    pub fn sorter_view(&self, kind: Kind) -> Option<SorterView> {
        match kind {
            Kind::Insertion => self.insertion.as_ref().map(|s| SorterView::of(kind, s)),
            Kind::Bubble => self.bubble.as_ref().map(|s| SorterView::of(kind, s)),
            _ => None,
        }
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.subscribe(listener);
    }

    fn routes(&self, kind: Kind) -> bool {
        self.is_active(kind) && self.has(kind)
    }

    fn routed<'a, X>(&self, slot: &'a Option<X>, kind: Kind) -> Option<&'a X> {
        slot.as_ref().filter(|_| self.is_active(kind))
    }

    fn drive<F, G>(&mut self, mut insertion: F, mut bubble: G) -> StepOutcome
    where
        F: FnMut(&mut InsertionSort) -> StepOutcome,
        G: FnMut(&mut BubbleSort) -> StepOutcome,
    {
        let active = self.active;
        let mut outcome = StepOutcome::NoMoreSteps;
        if let Some(sorter) = gate(&mut self.insertion, active[Kind::Insertion.index()]) {
            outcome = outcome.merge(insertion(sorter));
        }
        if let Some(sorter) = gate(&mut self.bubble, active[Kind::Bubble.index()]) {
            outcome = outcome.merge(bubble(sorter));
        }
        if outcome != StepOutcome::NoMoreSteps {
            self.listeners.notify();
        }
        outcome
    }
}
