//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static ORG_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Student Task Manager".to_string())));

/// Part of the ProdID string that describes the product name (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Taskboard".to_string())));

/// The right-hand part of the UIDs of exported events (e.g. `<random>@student-task-manager`)
pub static UID_DOMAIN: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("student-task-manager".to_string())));

/// Returns the current value of a setting
pub fn get(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Overrides a setting
pub fn set(setting: &Lazy<Arc<Mutex<String>>>, new_value: &str) {
    let mut value = match setting.lock() {
        Ok(value) => value,
        Err(poisoned) => poisoned.into_inner(),
    };
    *value = new_value.to_string();
}
