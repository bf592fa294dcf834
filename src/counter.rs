//! Per-priority totals

use std::fmt::{Display, Formatter};

use crate::task::{Priority, Task};

/// How many tasks there are for each priority, regardless of their completion, of the search or of the filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    /// Count the tasks of the whole list
    pub fn count(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.priority() {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

impl Display for PriorityCounts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "High: {}  Medium: {}  Low: {}", self.high, self.medium, self.low)
    }
}
