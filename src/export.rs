//! Hands calendar invites over to the user, as downloadable files

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::TaskError;
use crate::ical::{build_invite, ICAL_EXTENSION, ICAL_MIME_TYPE};

/// Something that can hand a file over to the user (a browser download, a folder on disk...)
pub trait FileDelivery {
    /// Deliver `content` under the given file name, and return where it has been put
    fn deliver(&mut self, filename: &str, mime_type: &str, content: &str) -> Result<PathBuf, Box<dyn Error>>;
}

/// Delivers files into a "downloads" folder
#[derive(Clone, Debug, PartialEq)]
pub struct FolderDelivery {
    folder: PathBuf,
}

impl FolderDelivery {
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }
}

impl FileDelivery for FolderDelivery {
    fn deliver(&mut self, filename: &str, mime_type: &str, content: &str) -> Result<PathBuf, Box<dyn Error>> {
        std::fs::create_dir_all(&self.folder)?;
        let path = self.folder.join(filename);
        if let Err(err) = std::fs::write(&path, content) {
            return Err(format!("Unable to write {:?}: {}", path, err).into());
        }
        log::debug!("Delivered {:?} ({})", path, mime_type);
        Ok(path)
    }
}


/// The file name an invite for this task is delivered as.
///
/// Runs of non-alphanumeric characters are replaced by a single `_`.
pub fn invite_filename(task_text: &str) -> String {
    let mut stem = String::with_capacity(task_text.len());
    let mut in_separator_run = false;
    for c in task_text.chars() {
        if c.is_alphanumeric() {
            stem.push(c);
            in_separator_run = false;
        } else if !in_separator_run {
            stem.push('_');
            in_separator_run = true;
        }
    }

    let stem = sanitize_filename::sanitize(stem.trim_matches('_'));
    let stem = if stem.is_empty() { "task".to_string() } else { stem };
    format!("{}.{}", stem, ICAL_EXTENSION)
}

/// Build a one-hour invite for a task and deliver it.
///
/// Returns where the file has been delivered.
pub fn export_invite(delivery: &mut dyn FileDelivery, task_text: &str, due_date: NaiveDate) -> Result<PathBuf, TaskError> {
    let content = build_invite(task_text, due_date)
        .map_err(|err| TaskError::Delivery(err.to_string()))?;
    let filename = invite_filename(task_text);

    let path = delivery.deliver(&filename, ICAL_MIME_TYPE, &content)
        .map_err(|err| TaskError::Delivery(err.to_string()))?;
    log::info!("Exported {:?} to {:?}", task_text, path);
    Ok(path)
}
