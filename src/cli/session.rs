use crate::cli::render::{render_model, render_sorter};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::kind::Kind;
use crate::model::{Found, Model};
use crate::sort::{SortState, StepOutcome};
use std::cell::Cell;
use std::rc::Rc;

/// Everything a command needs to open the model
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub config: ModelConfig,
    pub kinds: Vec<Kind>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            config: ModelConfig::default(),
            kinds: Kind::ALL.to_vec(),
        }
    }
}

/// Load the save file, then activate the requested kinds
pub fn open_model(options: &SessionOptions) -> Model<String> {
    Model::open(options.config.clone(), &options.kinds)
}

pub fn add(options: &SessionOptions, value: String, prepend: bool) -> Result<String> {
    let mut model = open_model(options);
    model.add(value, prepend)?;
    model.save()?;
    Ok(render_model(&model))
}

pub fn insert(options: &SessionOptions, value: String, index: usize) -> Result<String> {
    let mut model = open_model(options);
    let mut output = String::new();
    if !model.insert(value, index) {
        output.push_str(&format!("Nothing inserted at index {}\n", index));
    }
    model.save()?;
    output.push_str(&render_model(&model));
    Ok(output)
}

/// Remove `value`, or pop/dequeue when none is given
pub fn remove(options: &SessionOptions, value: Option<String>) -> Result<String> {
    let mut model = open_model(options);
    model.remove(value.as_ref())?;
    model.save()?;
    Ok(render_model(&model))
}

/// Position (or top/front value) answered by the highest-priority kind;
/// `-1` when nothing matched
pub fn find(options: &SessionOptions, value: String) -> Result<String> {
    let model = open_model(options);
    let answer = match model.find(&value)? {
        Found::StackTop(top) => top,
        Found::QueueFront(front) => front,
        found => match found.position() {
            Some(index) => index.to_string(),
            None => "-1".to_string(),
        },
    };
    Ok(format!("{}\n", answer))
}

pub fn reset(options: &SessionOptions) -> Result<String> {
    let mut model = open_model(options);
    model.reset();
    model.save()?;
    Ok(render_model(&model))
}

pub fn show(options: &SessionOptions) -> Result<String> {
    let model = open_model(options);
    Ok(render_model(&model))
}

/// Step the active sorters, at most `max_steps` times
///
/// A sort left paused by an earlier run carries on from where it stopped;
/// idle or finished sorters, or any sorter when `restart` is set, start
/// over. With `trace`, each intermediate sequence is listed before the
/// final picture.
pub fn sort(
    options: &SessionOptions,
    trace: bool,
    max_steps: Option<usize>,
    restart: bool,
) -> Result<String> {
    let mut model = open_model(options);
    let changes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&changes);
    model.on_change(move || counter.set(counter.get() + 1));

    let limit = max_steps.unwrap_or(usize::MAX);
    let mut fresh = restart || !is_paused(&model);
    let mut output = String::new();
    let mut steps = 0;
    while steps < limit {
        let outcome = if fresh {
            fresh = false;
            model.start_sort()
        } else {
            model.step()
        };
        if outcome == StepOutcome::NoMoreSteps {
            break;
        }
        steps += 1;
        if trace {
            for kind in sorter_kinds(&model) {
                if let Some(view) = model.sorter_view(kind) {
                    output.push_str(&format!("{:>4} {:<9} {}\n", steps, kind, render_sorter(&view)));
                }
            }
        }
        if !outcome.has_more() {
            break;
        }
    }

    model.save()?;
    let status = if is_paused(&model) { "paused" } else { "finished" };
    output.push_str(&format!("Sort {} after {} steps\n", status, changes.get()));
    output.push_str(&render_model(&model));
    Ok(output)
}

fn sorter_kinds(model: &Model<String>) -> Vec<Kind> {
    model
        .active_kinds()
        .into_iter()
        .filter(|kind| kind.is_sorter())
        .collect()
}

/// Whether any active sorter is mid-sort
fn is_paused(model: &Model<String>) -> bool {
    sorter_kinds(model).into_iter().any(|kind| {
        model
            .sorter_view(kind)
            .is_some_and(|view| view.state == SortState::Sorting)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options_in(dir: &std::path::Path, kinds: &[Kind]) -> SessionOptions {
        SessionOptions {
            config: ModelConfig::default()
                .with_save_path(dir.join("save.dat"))
                .with_seed(9),
            kinds: kinds.to_vec(),
        }
    }

    #[test]
    fn test_add_persists_between_sessions() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Stack]);
        add(&options, "1".into(), false).unwrap();
        let output = add(&options, "2".into(), false).unwrap();
        assert!(output.contains("| 1 | 2 <- top"));
    }

    #[test]
    fn test_find_prints_minus_one() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::List]);
        add(&options, "x".into(), false).unwrap();
        assert_eq!(find(&options, "x".into()).unwrap(), "0\n");
        assert_eq!(find(&options, "y".into()).unwrap(), "-1\n");
    }

    #[test]
    fn test_find_on_stack_reports_top() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Stack]);
        add(&options, "a".into(), false).unwrap();
        add(&options, "b".into(), false).unwrap();
        assert_eq!(find(&options, "a".into()).unwrap(), "b\n");
    }

    #[test]
    fn test_insert_out_of_range_reports() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::List]);
        let output = insert(&options, "z".into(), 3).unwrap();
        assert!(output.starts_with("Nothing inserted at index 3"));
    }

    #[test]
    fn test_sort_respects_max_steps() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Bubble]);
        let output = sort(&options, true, Some(2), false).unwrap();
        assert!(output.contains("Sort paused after 2 steps"));
        assert_eq!(output.lines().filter(|l| l.contains("bubble ")).count(), 2);

        let output = sort(&options, false, None, false).unwrap();
        assert!(output.contains("Sort finished"));
        assert!(output.contains("(done)"));
    }

    #[test]
    fn test_sort_with_no_sorter_does_nothing() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::List]);
        let output = sort(&options, false, None, false).unwrap();
        assert!(output.contains("Sort finished after 0 steps"));
    }

    fn bubble_cursor(options: &SessionOptions) -> Vec<usize> {
        open_model(options)
            .sorter_view(Kind::Bubble)
            .map(|view| view.cursor)
            .unwrap_or_default()
    }

    #[test]
    fn test_sort_resumes_paused_run() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Bubble]);
        sort(&options, false, Some(4), false).unwrap();
        let before = bubble_cursor(&options);
        assert_eq!(before.len(), 2);

        sort(&options, false, Some(1), false).unwrap();
        let after = bubble_cursor(&options);
        assert_eq!(after, vec![before[0] + 1, before[1] + 1]);
    }

    #[test]
    fn test_sort_restart_rewinds() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Bubble]);
        sort(&options, false, Some(4), false).unwrap();
        sort(&options, false, Some(1), true).unwrap();
        assert_eq!(bubble_cursor(&options), vec![1, 2]);
    }

    #[test]
    fn test_sort_zero_steps_reports_real_state() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), &[Kind::Bubble]);
        sort(&options, false, None, false).unwrap();
        let output = sort(&options, false, Some(0), false).unwrap();
        assert!(output.contains("Sort finished after 0 steps"), "{}", output);

        let options = options_in(dir.path(), &[Kind::List]);
        let output = sort(&options, false, Some(0), false).unwrap();
        assert!(output.contains("Sort finished after 0 steps"), "{}", output);
    }
}
