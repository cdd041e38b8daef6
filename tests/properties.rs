use dsviz::{BubbleSort, InsertionSort, LinkedList, Queue, Stack, StepOutcome};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(i32),
    Take,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![any::<i32>().prop_map(Op::Put), Just(Op::Take)],
        0..80,
    )
}

fn sorted_copy(values: &[i32]) -> Vec<i32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

proptest! {
    #[test]
    fn stack_tracks_pushes_minus_pops(ops in ops(), capacity in 1usize..6) {
        let mut stack = Stack::with_capacity(capacity);
        let mut model: Vec<i32> = Vec::new();
        for op in ops {
            match op {
                Op::Put(v) => {
                    stack.push(v);
                    model.push(v);
                }
                Op::Take => {
                    prop_assert_eq!(stack.pop().ok(), model.pop());
                }
            }
            prop_assert_eq!(stack.len(), model.len());
            prop_assert_eq!(stack.peek().ok(), model.last());
        }
    }

    #[test]
    fn queue_is_fifo_across_growth(ops in ops(), capacity in 1usize..6) {
        let mut queue = Queue::with_capacity(capacity);
        let mut model = std::collections::VecDeque::new();
        for op in ops {
            match op {
                Op::Put(v) => {
                    queue.enqueue(v);
                    model.push_back(v);
                }
                Op::Take => {
                    prop_assert_eq!(queue.dequeue().ok(), model.pop_front());
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.peek().ok(), model.front());
        }
        prop_assert_eq!(queue.elements(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn list_insert_then_read_back(
        values in prop::collection::vec(any::<i32>(), 0..20),
        value in any::<i32>(),
        seed in any::<usize>(),
    ) {
        let mut list: LinkedList<i32> = values.iter().copied().collect();
        let index = seed % (values.len() + 1);
        prop_assert!(list.insert(value, index));
        prop_assert_eq!(list.get(index), Some(&value));
        prop_assert_eq!(list.len(), values.len() + 1);
    }

    #[test]
    fn list_remove_is_idempotent_once_gone(values in prop::collection::vec(0i32..5, 0..20)) {
        let mut list: LinkedList<i32> = values.iter().copied().collect();
        while list.remove(&3) {}
        let before = list.to_vec();
        prop_assert!(!list.remove(&3));
        prop_assert_eq!(list.to_vec(), before);
    }

    #[test]
    fn insertion_sort_yields_sorted_permutation(values in prop::collection::vec(-50i32..50, 0..30)) {
        let mut sorter = InsertionSort::with_values(values.clone());
        sorter.start_sort();
        while sorter.step() != StepOutcome::NoMoreSteps {}
        prop_assert_eq!(sorter.working_sequence(), sorted_copy(&values));
    }

    #[test]
    fn bubble_sort_yields_sorted_permutation(values in prop::collection::vec(-50i32..50, 0..30)) {
        let mut sorter = BubbleSort::with_values(values.clone());
        sorter.start_sort();
        while sorter.step() != StepOutcome::NoMoreSteps {}
        prop_assert_eq!(sorter.working_sequence(), sorted_copy(&values));
    }

    #[test]
    fn every_pause_is_a_permutation(values in prop::collection::vec(0i32..20, 2..15)) {
        let expected = sorted_copy(&values);
        let mut insertion = InsertionSort::with_values(values.clone());
        let mut bubble = BubbleSort::with_values(values);
        loop {
            let outcome = insertion.step().merge(bubble.step());
            prop_assert_eq!(sorted_copy(&insertion.working_sequence()), expected.clone());
            prop_assert_eq!(sorted_copy(&bubble.working_sequence()), expected.clone());
            if outcome == StepOutcome::NoMoreSteps {
                break;
            }
        }
    }

    #[test]
    fn sorted_input_is_left_alone(mut values in prop::collection::vec(any::<i32>(), 0..25)) {
        values.sort_unstable();
        let mut insertion = InsertionSort::with_values(values.clone());
        let mut bubble = BubbleSort::with_values(values.clone());
        insertion.start_sort();
        bubble.start_sort();
        insertion.run_to_completion();
        bubble.run_to_completion();
        prop_assert_eq!(insertion.working_sequence(), values.clone());
        prop_assert_eq!(bubble.working_sequence(), values);
    }
}
