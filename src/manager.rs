//! The entry point of user interfaces
//!
//! A [`TaskManager`] owns the task list and its collaborators (reminders, calendar export). \
//! A UI only has to forward user commands to it, and to render the [`Board`] it computes.

use std::path::PathBuf;

use crate::counter::PriorityCounts;
use crate::error::TaskError;
use crate::export::{export_invite, FileDelivery};
use crate::filter::{visible_tasks, PriorityFilter, TaskView};
use crate::reminder::{Clock, Permission, ReminderScheduler, Timer};
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::task::Task;


/// Everything a UI needs to render the task list
#[derive(Clone, Debug, PartialEq)]
pub struct Board<'a> {
    /// The tasks that match the current search and filter, in list order
    pub tasks: Vec<TaskView<'a>>,
    /// The totals of the whole list
    pub counts: PriorityCounts,
}

/// The outcome of a successful [`TaskManager::add_task`]
#[derive(Clone, Debug, PartialEq)]
pub struct AddedTask {
    pub task: Task,
    pub reminder_armed: bool,
    /// Where the calendar invite has been delivered, if the task has a due date
    pub invite: Option<PathBuf>,
}


pub struct TaskManager<S, T, D, C>
where
    S: Storage,
    T: Timer,
    D: FileDelivery,
    C: Clock,
{
    store: TaskStore<S>,
    reminders: ReminderScheduler<T>,
    delivery: D,
    clock: C,
}

impl<S, T, D, C> TaskManager<S, T, D, C>
where
    S: Storage,
    T: Timer,
    D: FileDelivery,
    C: Clock,
{
    /// Load the stored tasks, and arm the reminders of those that are due in the future
    pub fn open(storage: S, timer: T, delivery: D, clock: C, permission: Permission) -> Self {
        let store = TaskStore::load(storage);
        let mut reminders = ReminderScheduler::new(timer, permission);
        let n_armed = reminders.rearm_all(store.tasks(), clock.now());
        log::info!("{} reminders armed at startup", n_armed);

        Self { store, reminders, delivery, clock }
    }

    pub fn store(&self) -> &TaskStore<S>                  { &self.store }
    pub fn store_mut(&mut self) -> &mut TaskStore<S>      { &mut self.store }
    pub fn reminders(&self) -> &ReminderScheduler<T>      { &self.reminders }
    pub fn reminders_mut(&mut self) -> &mut ReminderScheduler<T> { &mut self.reminders }
    pub fn delivery(&self) -> &D                          { &self.delivery }

    /// Add a task from raw user inputs.
    ///
    /// On success, a reminder is armed and an invite is exported if the task has a due date.
    /// A failed export is logged, but the task is kept.
    pub fn add_task(&mut self, text: &str, priority: &str, due_date: &str) -> Result<AddedTask, TaskError> {
        let task = self.store.add_from_input(text, priority, due_date)?.clone();

        let reminder_armed = self.reminders.schedule_reminder(&task, self.clock.now());

        let invite = match task.due_date() {
            None => None,
            Some(date) => match export_invite(&mut self.delivery, task.text(), date) {
                Ok(path) => Some(path),
                Err(err) => {
                    log::warn!("Unable to export an invite for {:?}: {}", task.text(), err);
                    None
                },
            },
        };

        Ok(AddedTask { task, reminder_armed, invite })
    }

    /// Flip the completion of the task at this (store) index, and return its new value
    pub fn toggle_complete(&mut self, index: usize) -> Result<bool, TaskError> {
        self.store.toggle_complete(index)
    }

    pub fn delete_task(&mut self, index: usize) -> Result<Task, TaskError> {
        self.store.delete(index)
    }

    /// Export the invite of the task at this (store) index
    pub fn export_task(&mut self, index: usize) -> Result<PathBuf, TaskError> {
        let len = self.store.len();
        let task = self.store.get(index)
            .ok_or(TaskError::IndexOutOfRange { index, len })?;
        let date = task.due_date()
            .ok_or(TaskError::MissingDueDate(index))?;
        export_invite(&mut self.delivery, task.text(), date)
    }

    /// Compute what should be displayed
    pub fn view(&self, search_query: &str, priority_filter: PriorityFilter) -> Board<'_> {
        Board {
            tasks: visible_tasks(self.store.tasks(), search_query, priority_filter),
            counts: self.counts(),
        }
    }

    pub fn counts(&self) -> PriorityCounts {
        PriorityCounts::count(self.store.tasks())
    }
}
