//! Key/value storages that persist the state of the app
//!
//! This plays the role a browser `localStorage` would play: every value is a string, stored under a well-known key.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

/// The key under which the task list is stored
pub const TASKS_KEY: &str = "tasks";
/// The key under which the theme flag is stored
pub const DARK_MODE_KEY: &str = "darkMode";
/// The key under which the answer to the notification permission request is stored
pub const PERMISSION_KEY: &str = "notificationPermission";

/// A flat key/value string storage
pub trait Storage {
    /// Returns the value stored for this key, if any
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Replaces (or creates) the value stored for this key
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}


/// A storage that keeps its values in memory only
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}


/// A storage that stores each key into its own file, in a given folder
#[derive(Clone, Debug, PartialEq)]
pub struct FolderStorage {
    backing_folder: PathBuf,
}

impl FolderStorage {
    /// Use the given folder. It will be created on the first write, if needed
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    /// Get the path to the file that holds a given key
    pub fn file_for_key(&self, key: &str) -> PathBuf {
        self.backing_folder.join(format!("{}.json", key))
    }
}

impl Storage for FolderStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.file_for_key(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.file_for_key(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get(TASKS_KEY).unwrap(), None);
        storage.set(TASKS_KEY, "[]").unwrap();
        storage.set(TASKS_KEY, "[ ]").unwrap();
        assert_eq!(storage.get(TASKS_KEY).unwrap(), Some("[ ]".to_string()));
        assert_eq!(storage.get(DARK_MODE_KEY).unwrap(), None);
    }

    #[test]
    fn test_folder_storage() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("not").join("created").join("yet");

        let mut storage = FolderStorage::new(&folder);
        assert_eq!(storage.get(DARK_MODE_KEY).unwrap(), None);

        storage.set(DARK_MODE_KEY, "enabled").unwrap();
        assert_eq!(storage.file_for_key(DARK_MODE_KEY), folder.join("darkMode.json"));

        let reopened = FolderStorage::new(&folder);
        assert_eq!(reopened.get(DARK_MODE_KEY).unwrap(), Some("enabled".to_string()));
    }
}
