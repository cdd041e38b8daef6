pub mod linked_list;
pub mod queue;
pub mod stack;

pub use linked_list::LinkedList;
pub use queue::{Queue, QueueView};
pub use stack::Stack;
