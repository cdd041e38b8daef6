use crate::kind::Kind;
use crate::model::{Element, Model, SorterView};
use crate::sort::SortState;
use crate::structures::QueueView;
use std::fmt::Display;

/// Text picture of every active structure, one block per kind
pub fn render_model<T: Element + Display>(model: &Model<T>) -> String {
    let kinds = model.active_kinds();
    if kinds.is_empty() {
        return "(nothing active)\n".to_string();
    }

    let mut output = String::new();
    for kind in kinds {
        let line = match kind {
            Kind::List => render_list(&model.list_elements()),
            Kind::Stack => render_stack(&model.stack_elements()),
            Kind::Queue => match model.queue_view() {
                Some(view) => render_queue(&view),
                None => continue,
            },
            Kind::Insertion | Kind::Bubble => match model.sorter_view(kind) {
                Some(view) => render_sorter(&view),
                None => continue,
            },
        };
        output.push_str(&format!("{:<9} {}\n", format!("{}:", kind), line));
    }
    output
}

pub fn render_list<T: Display>(values: &[T]) -> String {
    if values.is_empty() {
        return "(empty)".to_string();
    }
    let nodes: Vec<String> = values.iter().map(|v| format!("[{}]", v)).collect();
    format!("{} -> null", nodes.join(" -> "))
}

pub fn render_stack<T: Display>(values: &[T]) -> String {
    if values.is_empty() {
        return "(empty)".to_string();
    }
    let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("| {} <- top", cells.join(" | "))
}

/// Raw ring layout; `.` marks a free slot
pub fn render_queue<T: Display>(view: &QueueView<T>) -> String {
    let cells: Vec<String> = view
        .slots
        .iter()
        .map(|slot| match slot {
            Some(value) => value.to_string(),
            None => ".".to_string(),
        })
        .collect();
    format!(
        "[{}] front={} rear={} capacity={}",
        cells.join(" "),
        view.front,
        view.rear,
        view.capacity
    )
}

/// Working sequence with the next compared indices bracketed
pub fn render_sorter(view: &SorterView) -> String {
    let cells: Vec<String> = view
        .values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if view.cursor.contains(&index) {
                format!("[{}]", value)
            } else {
                value.to_string()
            }
        })
        .collect();
    format!("{} ({})", cells.join(" "), state_label(view.state))
}

pub fn state_label(state: SortState) -> &'static str {
    match state {
        SortState::Idle => "idle",
        SortState::Sorting => "sorting",
        SortState::Done => "done",
    }
}
