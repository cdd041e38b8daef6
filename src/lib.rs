//! dsviz - step-driven data structures and sorting
//!
//! The engine behind a teaching visualizer. A [`Model`] holds up to one
//! each of a linked list, a growable stack, a circular queue and two
//! externally paced sorters, routes edits to whichever of them are active,
//! and persists all of them to a single save file.
//!
//! ## Sorting one unit at a time
//!
//! ```text
//! start_sort → step → step → ... → Finished → NoMoreSteps
//! ```
//!
//! Every `step` performs one comparison (plus the swap or shift it
//! implies) and returns, so a renderer can draw each intermediate
//! sequence.
//!
//! ## Example
//!
//! ```no_run
//! use dsviz::{Kind, Model, ModelConfig};
//!
//! let config = ModelConfig::default().with_seed(7);
//! let mut model: Model<i32> = Model::open(config, &[Kind::Stack, Kind::Bubble]);
//! model.add(42, false).unwrap();
//! model.start_sort();
//! while model.step().has_more() {}
//! model.save().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod kind;
pub mod logging;
pub mod model;
pub mod notify;
pub mod snapshot;
pub mod sort;
pub mod structures;

pub use config::ModelConfig;
pub use error::{DsvizError, Result};
pub use kind::Kind;
pub use model::{Element, Found, Model, SorterView};
pub use sort::{BubbleSort, InsertionSort, SortState, StepOutcome, StepSorter};
pub use structures::{LinkedList, Queue, QueueView, Stack};
