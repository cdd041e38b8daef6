use crate::cli::render::render_sorter;
use crate::kind::Kind;
use crate::model::SorterView;
use crate::sort::{BubbleSort, InsertionSort, StepOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of racing both sorters on one sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareReport {
    pub values: Vec<i32>,
    pub sorted: Vec<i32>,
    pub insertion_steps: usize,
    pub bubble_steps: usize,
    /// One line per lockstep round
    pub frames: Vec<String>,
}

/// Sort the same random sequence with both algorithms in lockstep
pub fn compare_sorts(seed: Option<u64>, len: usize, bound: i32) -> CompareReport {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let bound = bound.max(1);
    let values: Vec<i32> = (0..len).map(|_| rng.gen_range(0..bound)).collect();
    compare_values(values)
}

pub fn compare_values(values: Vec<i32>) -> CompareReport {
    let mut insertion = InsertionSort::with_values(values.clone());
    let mut bubble = BubbleSort::with_values(values.clone());
    let mut insertion_steps = 0;
    let mut bubble_steps = 0;
    let mut frames = Vec::new();

    loop {
        let a = insertion.step();
        let b = bubble.step();
        if a != StepOutcome::NoMoreSteps {
            insertion_steps += 1;
        }
        if b != StepOutcome::NoMoreSteps {
            bubble_steps += 1;
        }
        if a.merge(b) == StepOutcome::NoMoreSteps {
            break;
        }
        frames.push(format!(
            "{:>4}  {:<40} {}",
            frames.len() + 1,
            render_sorter(&SorterView {
                kind: Kind::Insertion,
                values: insertion.working_sequence(),
                state: insertion.state(),
                cursor: insertion.cursor(),
            }),
            render_sorter(&SorterView {
                kind: Kind::Bubble,
                values: bubble.working_sequence(),
                state: bubble.state(),
                cursor: bubble.cursor(),
            }),
        ));
    }

    CompareReport {
        values,
        sorted: insertion.working_sequence(),
        insertion_steps,
        bubble_steps,
        frames,
    }
}

pub fn render_report(report: &CompareReport, trace: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("Input:  {:?}\n", report.values));
    output.push_str(&format!("Sorted: {:?}\n", report.sorted));
    if trace {
        output.push('\n');
        for frame in &report.frames {
            output.push_str(frame);
            output.push('\n');
        }
        output.push('\n');
    }
    output.push_str(&format!("Insertion sort: {} steps\n", report.insertion_steps));
    output.push_str(&format!("Bubble sort:    {} steps\n", report.bubble_steps));
    output
}
