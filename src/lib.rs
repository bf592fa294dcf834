//! This crate provides a task list manager.
//!
//! Tasks have a text, a [`Priority`](task::Priority), an optional due date and a completion flag.
//! They are kept in a [`TaskStore`](store::TaskStore), that rewrites itself into a key/value [`Storage`](storage::Storage) after every change.
//!
//! On top of that:
//! * the [`filter`] and [`counter`] modules compute what a UI should display,
//! * the [`reminder`] module arms a notification for the due date of tasks,
//! * the [`ical`] and [`export`] modules turn a task into a downloadable calendar invite.
//!
//! A [`TaskManager`] ties all of these together, so that a UI only has to forward user commands to it.

pub mod error;
pub use error::TaskError;
pub mod task;
pub use task::{Priority, Task};
pub mod storage;
pub mod store;
pub use store::TaskStore;

pub mod filter;
pub mod counter;
pub mod reminder;
pub mod ical;
pub mod export;
pub mod theme;

pub mod manager;
pub use manager::TaskManager;

pub mod settings;
pub mod utils;
