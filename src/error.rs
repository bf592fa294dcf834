//! Errors reported to the callers of this crate

use thiserror::Error;

/// Why an operation on the task list was abandoned.
///
/// None of these are fatal: the task list is left untouched when they are returned.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The user-supplied values cannot make a valid task
    #[error("Please fill all required fields: {0}")]
    Validation(String),

    /// The task index does not exist (anymore)
    #[error("no task at index {index} (the list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Calendar invites can only be built for tasks that have a due date
    #[error("task at index {0} has no due date")]
    MissingDueDate(usize),

    #[error("unable to deliver the file: {0}")]
    Delivery(String),
}
