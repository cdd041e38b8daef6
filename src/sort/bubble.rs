use super::SortAlgorithm;
use serde::{Deserialize, Serialize};

/// Paused bubble sort
///
/// After `pass` completed passes the last `pass` slots hold the largest
/// values in order; `j` is the next adjacent pair to compare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    pub pass: usize,
    pub j: usize,
}

impl SortAlgorithm for Bubble {
    const NAME: &'static str = "bubble";

    fn advance(&mut self, values: &mut [i32]) -> bool {
        let n = values.len();
        if n < 2 || self.pass >= n - 1 {
            return false;
        }

        if self.j < n - self.pass - 1 {
            if values[self.j] > values[self.j + 1] {
                values.swap(self.j, self.j + 1);
            }
            self.j += 1;
        } else {
            self.j = 0;
            self.pass += 1;
        }

        self.pass < n - 1
    }

    fn validate(&self, values: &[i32]) -> Result<(), String> {
        let n = values.len();
        if n < 2 {
            return Ok(());
        }
        if self.pass >= n - 1 || self.j > n - 1 - self.pass {
            return Err(format!(
                "pass {} / pair {} out of range for {} values",
                self.pass, self.j, n
            ));
        }
        Ok(())
    }

    fn cursor(&self, len: usize) -> Vec<usize> {
        if self.j + 1 < len.saturating_sub(self.pass) {
            vec![self.j, self.j + 1]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sort::{BubbleSort, SortState, StepOutcome};

    #[test]
    fn test_sorts_small_sequence() {
        let mut sorter = BubbleSort::with_values(vec![5, 1, 3]);
        while sorter.step().has_more() {}
        assert_eq!(sorter.working_sequence(), vec![1, 3, 5]);
        assert_eq!(sorter.state(), SortState::Done);
    }

    #[test]
    fn test_each_step_is_one_pair() {
        let mut sorter = BubbleSort::with_values(vec![3, 2, 1]);

        assert_eq!(sorter.step(), StepOutcome::Progressed);
        assert_eq!(sorter.working_sequence(), vec![2, 3, 1]);
        assert_eq!(sorter.step(), StepOutcome::Progressed);
        assert_eq!(sorter.working_sequence(), vec![2, 1, 3]);

        // end of the first pass
        assert_eq!(sorter.step(), StepOutcome::Progressed);
        assert_eq!(sorter.progress().pass, 1);
        assert_eq!(sorter.progress().j, 0);

        assert_eq!(sorter.step(), StepOutcome::Progressed);
        assert_eq!(sorter.working_sequence(), vec![1, 2, 3]);
        assert_eq!(sorter.step(), StepOutcome::Finished);
        assert_eq!(sorter.step(), StepOutcome::NoMoreSteps);
    }

    #[test]
    fn test_sorted_input_is_untouched() {
        let mut sorter = BubbleSort::with_values(vec![0, 4, 4, 10]);
        sorter.run_to_completion();
        assert_eq!(sorter.working_sequence(), vec![0, 4, 4, 10]);
    }

    #[test]
    fn test_remove_mid_sort_still_sorts() {
        let mut sorter = BubbleSort::with_values(vec![8, 6, 4, 2]);
        sorter.step();
        sorter.step();
        assert!(sorter.remove(8));
        sorter.run_to_completion();
        assert_eq!(sorter.working_sequence(), vec![2, 4, 6]);
    }
}
