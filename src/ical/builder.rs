//! A module to build iCal invites

use std::error::Error;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use ics::properties::{CalScale, DtEnd, DtStart, Method, Summary};
use ics::{Event, ICalendar};

/// Exported events start at this hour of their day, local time
pub const EVENT_START_HOUR: u32 = 9;
/// How long exported events last
pub const EVENT_DURATION_HOURS: i64 = 1;

/// A one-hour calendar event, built from a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invite {
    uid: String,
    summary: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Invite {
    /// Create an invite that starts at 09:00 (local time) on the given day, with a brand new UID
    pub fn new(summary: &str, date: NaiveDate) -> Result<Self, Box<dyn Error>> {
        Self::new_with_uid(summary, date, super::random_uid())
    }

    pub fn new_with_uid(summary: &str, date: NaiveDate, uid: String) -> Result<Self, Box<dyn Error>> {
        let start = match date.and_hms_opt(EVENT_START_HOUR, 0, 0) {
            None => return Err(format!("Unable to start an event on {}", date).into()),
            Some(start) => start,
        };
        let end = start + Duration::hours(EVENT_DURATION_HOURS);

        Ok(Self {
            uid,
            summary: summary.to_string(),
            start,
            end,
        })
    }

    pub fn uid(&self) -> &str                { &self.uid }
    pub fn summary(&self) -> &str            { &self.summary }
    pub fn start(&self) -> &NaiveDateTime    { &self.start }
    pub fn end(&self) -> &NaiveDateTime      { &self.end }

    /// Render this invite as an iCal document
    pub fn to_ical(&self, dtstamp: &DateTime<Utc>) -> String {
        let mut event = Event::new(
            self.uid.clone(),
            format!("{}Z", format_date_time(&dtstamp.naive_utc())),
        );
        event.push(Summary::new(escape_text(&self.summary)));
        event.push(DtStart::new(format_date_time(&self.start)));
        event.push(DtEnd::new(format_date_time(&self.end)));

        let mut calendar = ICalendar::new("2.0", super::default_prod_id());
        calendar.push(CalScale::new("GREGORIAN"));
        calendar.push(Method::new("PUBLISH"));
        calendar.add_event(event);

        calendar.to_string()
    }
}

/// Build the iCal document of a one-hour event on the given day, with a brand new UID
pub fn build_invite(summary: &str, date: NaiveDate) -> Result<String, Box<dyn Error>> {
    let invite = Invite::new(summary, date)?;
    Ok(invite.to_ical(&Utc::now()))
}

/// Same as [`build_invite`], with a chosen UID and timestamp
pub fn build_invite_with(summary: &str, date: NaiveDate, uid: &str, dtstamp: &DateTime<Utc>) -> Result<String, Box<dyn Error>> {
    let invite = Invite::new_with_uid(summary, date, uid.to_string())?;
    Ok(invite.to_ical(dtstamp))
}

/// Escape the characters that have a meaning in iCal TEXT values.
/// Line breaks (including a lone `\r`) become a literal `\n`
pub fn escape_text(text: &str) -> String {
    ics::escape_text(text).into_owned()
}

/// Local date-times are written without any `Z` suffix
pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}
