use super::SortAlgorithm;
use serde::{Deserialize, Serialize};

/// Paused insertion sort
///
/// `values[..current_index]` is sorted. While `key` is cached, the pivot
/// sits at `hole` and is being walked left one comparison per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    pub current_index: usize,
    pub hole: usize,
    pub key: Option<i32>,
}

impl Default for Insertion {
    fn default() -> Self {
        Self {
            current_index: 1,
            hole: 1,
            key: None,
        }
    }
}

impl SortAlgorithm for Insertion {
    const NAME: &'static str = "insertion";

    fn advance(&mut self, values: &mut [i32]) -> bool {
        if self.current_index >= values.len() {
            return false;
        }

        let key = match self.key {
            Some(key) => key,
            None => {
                let key = values[self.current_index];
                self.key = Some(key);
                self.hole = self.current_index;
                key
            }
        };

        if self.hole > 0 && values[self.hole - 1] > key {
            // shift the larger neighbour right; the pivot moves into its slot
            values[self.hole] = values[self.hole - 1];
            values[self.hole - 1] = key;
            self.hole -= 1;
        } else {
            self.key = None;
            self.current_index += 1;
            self.hole = self.current_index;
        }

        self.current_index < values.len()
    }

    fn validate(&self, values: &[i32]) -> Result<(), String> {
        if self.current_index == 0 || self.current_index > values.len().max(1) {
            return Err(format!(
                "current index {} out of range for {} values",
                self.current_index,
                values.len()
            ));
        }
        match self.key {
            None if self.hole != self.current_index => {
                Err(format!("hole {} without a cached key", self.hole))
            }
            Some(key) if self.hole > self.current_index || values.get(self.hole) != Some(&key) => {
                Err(format!("cached key {} is not at hole {}", key, self.hole))
            }
            _ => Ok(()),
        }
    }

    fn cursor(&self, len: usize) -> Vec<usize> {
        if self.current_index >= len {
            return Vec::new();
        }
        match self.key {
            Some(_) if self.hole > 0 => vec![self.hole - 1, self.hole],
            Some(_) => vec![self.hole],
            None if self.current_index > 0 => vec![self.current_index - 1, self.current_index],
            None => vec![self.current_index],
        }
    }
}
