//! Computes which tasks are visible, given a search query and a priority filter

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::TaskError;
use crate::task::{Priority, Task};


/// Which priorities should be displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityFilter {
    /// Display every task
    All,
    /// Display only tasks that have exactly this priority
    Only(Priority),
}

impl PriorityFilter {
    pub fn accepts(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => *p == priority,
        }
    }
}

impl Default for PriorityFilter {
    fn default() -> Self {
        PriorityFilter::All
    }
}

impl FromStr for PriorityFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "All" | "" => Ok(PriorityFilter::All),
            other => Ok(PriorityFilter::Only(other.parse()?)),
        }
    }
}

impl Display for PriorityFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "All"),
            PriorityFilter::Only(p) => write!(f, "{}", p),
        }
    }
}


/// What a UI needs to display a task.
///
/// `index` is the position of the task in the whole store, which is what toggle and delete expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskView<'a> {
    pub index: usize,
    pub text: &'a str,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl<'a> TaskView<'a> {
    fn new(index: usize, task: &'a Task) -> Self {
        Self {
            index,
            text: task.text(),
            priority: task.priority(),
            due_date: task.due_date(),
            completed: task.completed(),
        }
    }
}

/// Returns the tasks that match both the search query (case-insensitive substring of the text) and the priority filter.
///
/// The store order is preserved, and each result remembers its original index.
pub fn visible_tasks<'a>(tasks: &'a [Task], search_query: &str, priority_filter: PriorityFilter) -> Vec<TaskView<'a>> {
    let query = search_query.to_lowercase();

    tasks.iter()
        .enumerate()
        .filter(|(_, task)| priority_filter.accepts(task.priority()))
        .filter(|(_, task)| query.is_empty() || task.text().to_lowercase().contains(&query))
        .map(|(index, task)| TaskView::new(index, task))
        .collect()
}
