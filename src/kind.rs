use crate::error::{DsvizError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The structures a model can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    List,
    Stack,
    Queue,
    Insertion,
    Bubble,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::List,
        Kind::Stack,
        Kind::Queue,
        Kind::Insertion,
        Kind::Bubble,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::List => "list",
            Kind::Stack => "stack",
            Kind::Queue => "queue",
            Kind::Insertion => "insertion",
            Kind::Bubble => "bubble",
        }
    }

    pub fn is_sorter(self) -> bool {
        matches!(self, Kind::Insertion | Kind::Bubble)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = DsvizError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "list" | "ll" | "linkedlist" | "linked-list" => Ok(Self::List),
            "stack" => Ok(Self::Stack),
            "queue" => Ok(Self::Queue),
            "insertion" | "insertion-sort" => Ok(Self::Insertion),
            "bubble" | "bubble-sort" => Ok(Self::Bubble),
            _ => Err(DsvizError::UnknownKind(s.to_string())),
        }
    }
}
