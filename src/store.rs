//! This module provides the task list, and keeps it persisted in a [`Storage`]

use std::error::Error;

use chrono::NaiveDate;

use crate::error::TaskError;
use crate::storage::{Storage, TASKS_KEY};
use crate::task::{Priority, Task};


/// The ordered list of tasks, backed by a [`Storage`].
///
/// Every successful mutation rewrites the whole list into the storage.
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    /// Initialize a store from the content of its storage.
    ///
    /// A missing or malformed content is not an error: the store then starts empty.
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Err(err) => {
                log::warn!("Unable to read the stored tasks: {}. Starting with an empty list", err);
                Vec::new()
            },
            Ok(None) => {
                log::debug!("No stored tasks yet");
                Vec::new()
            },
            Ok(Some(content)) => match deserialize(&content) {
                Ok(tasks) => tasks,
                Err(err) => {
                    log::warn!("Invalid stored tasks: {}. Starting with an empty list", err);
                    Vec::new()
                },
            },
        };
        log::info!("Loaded {} tasks", tasks.len());

        Self { storage, tasks }
    }

    /// Create an empty store. Nothing is written to the storage until the first mutation
    pub fn new(storage: S) -> Self {
        Self { storage, tasks: Vec::new() }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a new task at the end of the list, and return it.
    ///
    /// Nothing is changed in case the text is empty.
    pub fn add(&mut self, text: &str, priority: Priority, due_date: Option<NaiveDate>) -> Result<&Task, TaskError> {
        let task = Task::new(text, priority, due_date)?;
        log::debug!("Adding task {:?}", task);
        self.tasks.push(task);
        self.save();

        let last = self.tasks.len() - 1;
        Ok(&self.tasks[last])
    }

    /// Same as [`Self::add`], but with raw user inputs (e.g. from form fields).
    ///
    /// `priority` must not be empty; `due_date` may be empty.
    pub fn add_from_input(&mut self, text: &str, priority: &str, due_date: &str) -> Result<&Task, TaskError> {
        if text.trim().is_empty() || priority.trim().is_empty() {
            return Err(TaskError::Validation("text and priority are required".to_string()));
        }
        let priority: Priority = priority.parse()?;
        let due_date = crate::task::parse_due_date(due_date)?;
        self.add(text, priority, due_date)
    }

    /// Flip the completion flag of a task, and return its new value
    pub fn toggle_complete(&mut self, index: usize) -> Result<bool, TaskError> {
        let len = self.tasks.len();
        let task = self.tasks.get_mut(index)
            .ok_or(TaskError::IndexOutOfRange { index, len })?;
        let completed = task.toggle_completed();
        log::debug!("Task #{} is now {}", index, if completed { "completed" } else { "uncompleted" });
        self.save();
        Ok(completed)
    }

    /// Remove a task. Every subsequent task is shifted down by one index.
    pub fn delete(&mut self, index: usize) -> Result<Task, TaskError> {
        let len = self.tasks.len();
        if index >= len {
            return Err(TaskError::IndexOutOfRange { index, len });
        }
        let removed = self.tasks.remove(index);
        log::debug!("Deleted task #{} {:?}", index, removed.text());
        self.save();
        Ok(removed)
    }

    /// Encode the whole task list
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serialize(&self.tasks)
    }

    /// Store the current list to the storage.
    ///
    /// A failure is logged, and does not roll back the in-memory list.
    fn save(&mut self) {
        let content = match self.serialize() {
            Err(err) => {
                log::warn!("Unable to serialize: {}", err);
                return;
            },
            Ok(content) => content,
        };

        if let Err(err) = self.storage.set(TASKS_KEY, &content) {
            log::warn!("Unable to save tasks: {}", err);
        }
    }
}


/// Encode a task list into its persisted form (a JSON array)
pub fn serialize(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Decode a task list from its persisted form
pub fn deserialize(content: &str) -> Result<Vec<Task>, Box<dyn Error>> {
    let tasks: Vec<Task> = serde_json::from_str(content)?;
    Ok(tasks)
}
