//! Externally paced sorting.
//!
//! A [`StepSorter`] owns a sequence of integers and the paused state of one
//! algorithm. Each [`StepSorter::step`] performs a single primitive unit of
//! work (one comparison, plus the swap or placement it implies) and then
//! hands control back, so a driver can observe the sequence between any
//! two units. The sequence is a permutation of its starting contents at
//! every pause.

pub mod bubble;
pub mod insertion;

pub use bubble::Bubble;
pub use insertion::Insertion;

use crate::notify::ChangeNotifier;
use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Number of values a sorter is seeded with on reset
pub const DEFAULT_SORT_LEN: usize = 10;

/// Exclusive upper bound of seeded values
pub const DEFAULT_VALUE_BOUND: i32 = 100;

pub type InsertionSort = StepSorter<Insertion>;
pub type BubbleSort = StepSorter<Bubble>;

/// Paused progress of one sorting algorithm
pub trait SortAlgorithm: Default + Clone + Debug {
    /// Human-readable algorithm name
    const NAME: &'static str;

    /// Perform one primitive unit on `values`
    ///
    /// Only called with at least two values. Returns `true` while more
    /// units remain.
    fn advance(&mut self, values: &mut [i32]) -> bool;

    /// Check that this paused state can resume on `values`
    fn validate(&self, values: &[i32]) -> Result<(), String>;

    /// Indices the next unit will touch
    fn cursor(&self, len: usize) -> Vec<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortState {
    /// Never started
    #[default]
    Idle,
    Sorting,
    Done,
}

/// What a call to [`StepSorter::step`] accomplished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One unit done, more remain
    Progressed,
    /// The final unit was just performed
    Finished,
    /// Nothing to do
    NoMoreSteps,
}

impl StepOutcome {
    pub fn has_more(self) -> bool {
        self == StepOutcome::Progressed
    }

    /// Combine the outcomes of sorters stepped side by side
    pub fn merge(self, other: StepOutcome) -> StepOutcome {
        use StepOutcome::{Finished, NoMoreSteps, Progressed};
        match (self, other) {
            (Progressed, _) | (_, Progressed) => Progressed,
            (Finished, _) | (_, Finished) => Finished,
            (NoMoreSteps, NoMoreSteps) => NoMoreSteps,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepSorter<A> {
    values: Vec<i32>,
    state: SortState,
    progress: A,
    #[serde(skip)]
    listeners: ChangeNotifier,
}

#[derive(Deserialize)]
struct SorterRepr<A> {
    values: Vec<i32>,
    state: SortState,
    progress: A,
}

impl<A: SortAlgorithm> Default for StepSorter<A> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            state: SortState::Idle,
            progress: A::default(),
            listeners: ChangeNotifier::new(),
        }
    }
}

impl<A: SortAlgorithm> StepSorter<A> {
    /// Seed with random values and begin sorting
    pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize, bound: i32) -> Self {
        let mut sorter = Self::default();
        sorter.reset_with(rng, len, bound);
        sorter
    }

    /// Take `values` as-is, paused at the algorithm's starting point
    pub fn with_values(values: Vec<i32>) -> Self {
        let mut sorter = Self {
            values,
            ..Self::default()
        };
        sorter.rewind();
        sorter
    }

    /// Restart from the beginning and perform the first unit
    pub fn start_sort(&mut self) -> StepOutcome {
        self.rewind();
        self.step()
    }

    /// Perform one primitive unit of sorting
    pub fn step(&mut self) -> StepOutcome {
        if self.state != SortState::Sorting {
            return StepOutcome::NoMoreSteps;
        }
        if self.values.len() < 2 {
            self.state = SortState::Done;
            return StepOutcome::NoMoreSteps;
        }

        let more = self.progress.advance(&mut self.values);
        if !more {
            self.state = SortState::Done;
        }
        self.listeners.notify();
        if more {
            StepOutcome::Progressed
        } else {
            StepOutcome::Finished
        }
    }

    /// Step until nothing remains; returns the number of units performed
    pub fn run_to_completion(&mut self) -> usize {
        let mut units = 0;
        loop {
            match self.step() {
                StepOutcome::Progressed => units += 1,
                StepOutcome::Finished => return units + 1,
                StepOutcome::NoMoreSteps => return units,
            }
        }
    }

    /// Append a value and rewind, leaving the sort paused at its start
    pub fn append(&mut self, value: i32) {
        self.values.push(value);
        self.rewind();
        self.listeners.notify();
    }

    /// Remove the first occurrence of `value`, rewinding if found
    pub fn remove(&mut self, value: i32) -> bool {
        let Some(index) = self.find(value) else {
            return false;
        };
        self.values.remove(index);
        self.rewind();
        self.listeners.notify();
        true
    }

    pub fn find(&self, value: i32) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Replace the sequence with fresh random values and start sorting
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset_with(rng, DEFAULT_SORT_LEN, DEFAULT_VALUE_BOUND);
    }

    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R, len: usize, bound: i32) {
        let bound = bound.max(1);
        self.values = (0..len).map(|_| rng.gen_range(0..bound)).collect();
        self.start_sort();
    }

    /// Snapshot of the sequence being sorted
    pub fn working_sequence(&self) -> Vec<i32> {
        self.values.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    /// Paused indices, for highlighting
    pub fn progress(&self) -> &A {
        &self.progress
    }

    /// Indices the next step will compare; empty unless sorting
    pub fn cursor(&self) -> Vec<usize> {
        if self.state == SortState::Sorting {
            self.progress.cursor(self.values.len())
        } else {
            Vec::new()
        }
    }

    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.subscribe(listener);
    }

    fn rewind(&mut self) {
        self.progress = A::default();
        self.state = SortState::Sorting;
    }
}

impl<A: SortAlgorithm> TryFrom<SorterRepr<A>> for StepSorter<A> {
    type Error = String;

    fn try_from(repr: SorterRepr<A>) -> Result<Self, Self::Error> {
        if repr.state == SortState::Sorting {
            repr.progress
                .validate(&repr.values)
                .map_err(|reason| format!("{}: {}", A::NAME, reason))?;
        }
        Ok(Self {
            values: repr.values,
            state: repr.state,
            progress: repr.progress,
            listeners: ChangeNotifier::new(),
        })
    }
}

impl<'de, A> Deserialize<'de> for StepSorter<A>
where
    A: SortAlgorithm + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SorterRepr::<A>::deserialize(deserializer)?;
        Self::try_from(repr).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_outcome_merge() {
        use StepOutcome::*;
        assert_eq!(Progressed.merge(NoMoreSteps), Progressed);
        assert_eq!(NoMoreSteps.merge(Finished), Finished);
        assert_eq!(NoMoreSteps.merge(NoMoreSteps), NoMoreSteps);
    }

    #[test]
    fn test_default_sorter_is_idle() {
        let mut sorter = InsertionSort::default();
        assert_eq!(sorter.state(), SortState::Idle);
        assert_eq!(sorter.step(), StepOutcome::NoMoreSteps);
        assert_eq!(sorter.state(), SortState::Idle);
    }

    #[test]
    fn test_random_seeding_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let sorter = BubbleSort::random(&mut rng, DEFAULT_SORT_LEN, DEFAULT_VALUE_BOUND);
        assert_eq!(sorter.len(), 10);
        assert!(sorter.working_sequence().iter().all(|v| (0..100).contains(v)));
        assert_eq!(sorter.state(), SortState::Sorting);
    }

    #[test]
    fn test_short_sequence_finishes_without_work() {
        let mut sorter = BubbleSort::with_values(vec![4]);
        assert_eq!(sorter.step(), StepOutcome::NoMoreSteps);
        assert_eq!(sorter.state(), SortState::Done);
    }

    #[test]
    fn test_append_rewinds_finished_sort() {
        let mut sorter = InsertionSort::with_values(vec![2, 1]);
        sorter.run_to_completion();
        assert_eq!(sorter.state(), SortState::Done);

        sorter.append(0);
        assert_eq!(sorter.state(), SortState::Sorting);
        assert_eq!(sorter.working_sequence(), vec![1, 2, 0]);
        sorter.run_to_completion();
        assert_eq!(sorter.working_sequence(), vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_missing_value_keeps_state() {
        let mut sorter = BubbleSort::with_values(vec![3, 1]);
        sorter.run_to_completion();
        assert!(!sorter.remove(9));
        assert_eq!(sorter.state(), SortState::Done);
        assert!(sorter.remove(3));
        assert_eq!(sorter.working_sequence(), vec![1]);
    }

    #[test]
    fn test_step_notifies_listeners() {
        let hits = Rc::new(Cell::new(0));
        let mut sorter = BubbleSort::with_values(vec![2, 1]);
        let counter = Rc::clone(&hits);
        sorter.on_change(move || counter.set(counter.get() + 1));

        let units = sorter.run_to_completion();
        assert_eq!(hits.get(), units);
        assert_eq!(sorter.step(), StepOutcome::NoMoreSteps);
        assert_eq!(hits.get(), units);
    }

    #[test]
    fn test_reset_reseeds_and_starts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sorter = InsertionSort::with_values(vec![1, 2, 3]);
        sorter.reset(&mut rng);
        assert_eq!(sorter.len(), DEFAULT_SORT_LEN);
        assert_eq!(sorter.state(), SortState::Sorting);
    }

    #[test]
    fn test_serde_resumes_paused_sort() {
        let mut sorter = InsertionSort::with_values(vec![9, 4, 7, 1]);
        sorter.step();
        sorter.step();
        sorter.step();
        let json = serde_json::to_string(&sorter).unwrap();

        let mut restored: InsertionSort = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.working_sequence(), sorter.working_sequence());
        assert_eq!(restored.progress(), sorter.progress());

        sorter.run_to_completion();
        restored.run_to_completion();
        assert_eq!(restored.working_sequence(), vec![1, 4, 7, 9]);
        assert_eq!(restored.working_sequence(), sorter.working_sequence());
    }

    #[test]
    fn test_serde_rejects_illegal_progress() {
        let json = r#"{"values":[3,1],"state":"sorting","progress":{"pass":0,"j":5}}"#;
        assert!(serde_json::from_str::<BubbleSort>(json).is_err());

        let json = r#"{"values":[3,1],"state":"done","progress":{"pass":0,"j":5}}"#;
        assert!(serde_json::from_str::<BubbleSort>(json).is_ok());
    }
}
