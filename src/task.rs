//! To-do tasks, as they are stored and displayed

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::NaiveDate;

use crate::error::TaskError;

/// The format of due dates, as a browser `<input type="date">` gives them
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// How urgent a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            "" => Err(TaskError::Validation("a priority is required".to_string())),
            other => Err(TaskError::Validation(format!("unknown priority {:?}", other))),
        }
    }
}

/// Parse a `YYYY-MM-DD` due date.
/// An empty string means "no due date".
pub fn parse_due_date(s: &str) -> Result<Option<NaiveDate>, TaskError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|err| TaskError::Validation(format!("invalid due date {:?}: {}", s, err)))
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The label of the task, never empty
    text: String,
    priority: Priority,
    /// Stored as `""` when there is none
    #[serde(default, serialize_with = "serialize_due_date", deserialize_with = "deserialize_due_date")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
}

impl Task {
    /// Create a brand new, uncompleted task.
    ///
    /// Fails if `text` is empty (after trimming)
    pub fn new(text: &str, priority: Priority, due_date: Option<NaiveDate>) -> Result<Self, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::Validation("the task text must not be empty".to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            priority,
            due_date,
            completed: false,
        })
    }

    pub fn text(&self) -> &str                  { &self.text }
    pub fn priority(&self) -> Priority          { self.priority }
    pub fn due_date(&self) -> Option<NaiveDate> { self.due_date }
    pub fn completed(&self) -> bool             { self.completed }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Flips the completion flag, and returns the new value
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}


fn serialize_due_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format(DUE_DATE_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_due_date(&s).map_err(serde::de::Error::custom),
    }
}
