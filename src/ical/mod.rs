//! This module handles the conversion of tasks into iCal files

mod builder;
pub use builder::{build_invite, build_invite_with, escape_text, format_date_time, Invite};

use crate::settings::{ORG_NAME, PRODUCT_NAME, UID_DOMAIN};

/// The MIME type of iCal files
pub const ICAL_MIME_TYPE: &str = "text/calendar; charset=utf-8";
/// The extension of iCal files
pub const ICAL_EXTENSION: &str = "ics";

pub fn default_prod_id() -> String {
    format!("-//{}//{}//EN", crate::settings::get(&ORG_NAME), crate::settings::get(&PRODUCT_NAME))
}

/// Generate a new UID, that is unique for every call
pub fn random_uid() -> String {
    let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
    format!("{}@{}", random, crate::settings::get(&UID_DOMAIN))
}
