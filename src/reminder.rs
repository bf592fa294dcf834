//! Deferred local notifications, that remind the user of a task on its due date

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use tokio::task::JoinHandle;

use crate::storage::{Storage, PERMISSION_KEY};
use crate::task::Task;

/// The title of every reminder notification
pub const REMINDER_TITLE: &str = "📌 Task Reminder";


/// Whether the user allowed us to display notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Undetermined => "default",
        }
    }

    /// Returns the remembered permission, or asks the notifier in case it has never been asked yet.
    ///
    /// The answer is remembered, so that the user is asked only once.
    pub fn resolve<S: Storage>(storage: &mut S, notifier: &dyn Notifier) -> Self {
        let stored = match storage.get(PERMISSION_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or(Permission::Undetermined),
            Ok(None) => Permission::Undetermined,
            Err(err) => {
                log::warn!("Unable to read the notification permission: {}", err);
                Permission::Undetermined
            },
        };
        if stored != Permission::Undetermined {
            return stored;
        }

        let answer = notifier.request_permission();
        log::info!("Notification permission is now {}", answer);
        if let Err(err) = storage.set(PERMISSION_KEY, answer.as_str()) {
            log::warn!("Unable to remember the notification permission: {}", err);
        }
        answer
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            "default" => Ok(Permission::Undetermined),
            other => Err(format!("unknown permission {:?}", other)),
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// The content of a notification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: task.text().to_string(),
        }
    }
}


/// Something that tells the current time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that always tells the same time
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}


/// Something that can display notifications
pub trait Notifier: Send + Sync {
    /// Ask the user whether notifications are allowed
    fn request_permission(&self) -> Permission;
    /// Display a notification now
    fn notify(&self, reminder: &Reminder);
}

/// A notifier that prints notifications on the standard output
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn request_permission(&self) -> Permission {
        // A terminal needs no authorization
        Permission::Granted
    }

    fn notify(&self, reminder: &Reminder) {
        log::info!("Firing reminder {:?}", reminder.body);
        println!("{}: {}", reminder.title, reminder.body);
    }
}


/// Something that runs a one-shot notification at a given time
pub trait Timer {
    fn schedule_at(&mut self, at: DateTime<Local>, reminder: Reminder);
}

/// A timer that spawns one tokio task per reminder.
///
/// This must be used from within a tokio runtime.
pub struct TokioTimer {
    notifier: Arc<dyn Notifier>,
    handles: Vec<JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier, handles: Vec::new() }
    }

    /// How many reminders have not fired yet
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait until every scheduled reminder has fired
    pub async fn wait_all(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(err) = handle.await {
                log::warn!("A reminder did not complete: {}", err);
            }
        }
    }
}

impl Timer for TokioTimer {
    fn schedule_at(&mut self, at: DateTime<Local>, reminder: Reminder) {
        let delay = (at - Local::now()).to_std().unwrap_or_else(|_| Duration::from_secs(0));
        let notifier = Arc::clone(&self.notifier);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(&reminder);
        });
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }
}

/// A timer that only records what it has been asked to schedule.
/// Reminders fire when [`ManualTimer::fire_due`] is called.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    scheduled: Vec<(DateTime<Local>, Reminder)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reminders that have not fired yet, and when they will
    pub fn scheduled(&self) -> &[(DateTime<Local>, Reminder)] {
        &self.scheduled
    }

    /// Remove and return every reminder whose time has come
    pub fn fire_due(&mut self, now: DateTime<Local>) -> Vec<Reminder> {
        let (due, later): (Vec<_>, Vec<_>) = self.scheduled.drain(..).partition(|(at, _)| *at <= now);
        self.scheduled = later;
        due.into_iter().map(|(_, reminder)| reminder).collect()
    }
}

impl Timer for ManualTimer {
    fn schedule_at(&mut self, at: DateTime<Local>, reminder: Reminder) {
        self.scheduled.push((at, reminder));
    }
}


/// When the reminder for a given due date should fire: at the very start of that day, local time.
///
/// When midnight is skipped by a DST change, this is the first hour of that day that exists.
pub fn reminder_time(due_date: NaiveDate) -> Option<DateTime<Local>> {
    first_valid_time(due_date, |start| Local.from_local_datetime(start).earliest())
}

fn first_valid_time<T, F>(date: NaiveDate, resolve: F) -> Option<T>
where
    F: Fn(&NaiveDateTime) -> Option<T>,
{
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|start| resolve(&start))
}


/// Arms reminders for tasks that have a due date in the future
pub struct ReminderScheduler<T: Timer> {
    timer: T,
    permission: Permission,
    /// Whether the startup pass of [`Self::rearm_all`] has run
    rearmed: bool,
}

impl<T: Timer> ReminderScheduler<T> {
    pub fn new(timer: T, permission: Permission) -> Self {
        Self { timer, permission, rearmed: false }
    }

    pub fn timer(&self) -> &T { &self.timer }
    pub fn timer_mut(&mut self) -> &mut T { &mut self.timer }
    pub fn permission(&self) -> Permission { self.permission }

    /// Arm a reminder for this task, if it has a due date that is still in the future.
    ///
    /// Every call arms its own timer, even for a task that looks like one armed before.
    /// Returns whether a reminder has been armed.
    pub fn schedule_reminder(&mut self, task: &Task, now: DateTime<Local>) -> bool {
        let due_date = match task.due_date() {
            None => return false,
            Some(d) => d,
        };
        if self.permission != Permission::Granted {
            log::debug!("Notifications are not allowed, not reminding {:?}", task.text());
            return false;
        }

        let at = match reminder_time(due_date) {
            None => {
                log::warn!("{} does not exist in the local time zone", due_date);
                return false;
            },
            Some(at) => at,
        };
        if at <= now {
            log::debug!("Reminder time for {:?} is already past", task.text());
            return false;
        }

        log::info!("Arming a reminder for {:?} at {}", task.text(), at);
        self.timer.schedule_at(at, Reminder::for_task(task));
        true
    }

    /// Arm the reminders of the persisted task list, when the app starts.
    ///
    /// Only the first call arms anything, later calls return 0.
    /// Returns how many reminders have been armed.
    pub fn rearm_all(&mut self, tasks: &[Task], now: DateTime<Local>) -> usize {
        if self.rearmed {
            log::debug!("Reminders have already been re-armed");
            return 0;
        }
        self.rearmed = true;

        tasks.iter()
            .filter(|task| self.schedule_reminder(task, now))
            .count()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::task::Priority;
    use chrono::Timelike;

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.from_local_datetime(&NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()).earliest().unwrap()
    }

    fn task(text: &str, due: Option<(i32, u32, u32)>) -> Task {
        let due = due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        Task::new(text, Priority::Medium, due).unwrap()
    }

    #[test]
    fn test_future_reminder() {
        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        let now = local(2025, 3, 1, 12);

        assert!(scheduler.schedule_reminder(&task("Buy milk", Some((2025, 3, 10))), now));
        let scheduled = scheduler.timer().scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].0, local(2025, 3, 10, 0));
        assert_eq!(scheduled[0].1, Reminder { title: REMINDER_TITLE.to_string(), body: "Buy milk".to_string() });
    }

    #[test]
    fn test_past_reminder() {
        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        let now = local(2025, 3, 10, 8);

        assert_eq!(scheduler.schedule_reminder(&task("Yesterday", Some((2025, 3, 9))), now), false);
        // The start of today is already past as well
        assert_eq!(scheduler.schedule_reminder(&task("Today", Some((2025, 3, 10))), now), false);
        assert!(scheduler.timer().scheduled().is_empty());
    }

    #[test]
    fn test_no_reminder() {
        let now = local(2025, 3, 1, 12);

        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        assert_eq!(scheduler.schedule_reminder(&task("Undated", None), now), false);

        for permission in &[Permission::Denied, Permission::Undetermined] {
            let mut scheduler = ReminderScheduler::new(ManualTimer::new(), *permission);
            assert_eq!(scheduler.schedule_reminder(&task("Buy milk", Some((2025, 3, 10))), now), false);
            assert!(scheduler.timer().scheduled().is_empty());
        }
    }

    #[test]
    fn test_rearm_only_once() {
        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        let now = local(2025, 3, 5, 12);
        let tasks = vec![
            task("Past", Some((2025, 3, 1))),
            task("Future", Some((2025, 3, 10))),
            task("Undated", None),
            task("Far future", Some((2026, 1, 1))),
        ];

        assert_eq!(scheduler.rearm_all(&tasks, now), 2);
        assert_eq!(scheduler.rearm_all(&tasks, now), 0);
        assert_eq!(scheduler.timer().scheduled().len(), 2);
    }

    #[test]
    fn test_identical_tasks_each_get_a_reminder() {
        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        let now = local(2025, 3, 1, 12);
        let dentist = Task::new("Dentist", Priority::High, NaiveDate::from_ymd_opt(2025, 3, 10)).unwrap();

        assert_eq!(scheduler.rearm_all(&[dentist.clone(), dentist.clone()], now), 2);
        assert!(scheduler.schedule_reminder(&dentist, now));
        assert!(scheduler.schedule_reminder(&dentist, now));

        let scheduled = scheduler.timer().scheduled();
        assert_eq!(scheduled.len(), 4);
        assert!(scheduled.iter().all(|(at, reminder)| *at == local(2025, 3, 10, 0) && reminder.body == "Dentist"));
    }

    #[test]
    fn test_reminder_time_skips_missing_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let no_midnight = |start: &NaiveDateTime| {
            if start.time().hour() == 0 { None } else { Some(*start) }
        };
        assert_eq!(first_valid_time(date, no_midnight), date.and_hms_opt(1, 0, 0));
        assert_eq!(first_valid_time(date, |_: &NaiveDateTime| None::<NaiveDateTime>), None);
        assert_eq!(reminder_time(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()), Some(local(2025, 3, 10, 0)));
    }

    #[test]
    fn test_manual_timer_fires() {
        let mut scheduler = ReminderScheduler::new(ManualTimer::new(), Permission::Granted);
        let now = local(2025, 3, 5, 12);
        scheduler.schedule_reminder(&task("Soon", Some((2025, 3, 6))), now);
        scheduler.schedule_reminder(&task("Later", Some((2025, 4, 1))), now);

        assert!(scheduler.timer_mut().fire_due(local(2025, 3, 5, 23)).is_empty());
        let fired = scheduler.timer_mut().fire_due(local(2025, 3, 6, 0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].body, "Soon");
        assert_eq!(scheduler.timer().scheduled().len(), 1);
    }

    struct AskOnce(std::sync::Mutex<u32>);
    impl Notifier for AskOnce {
        fn request_permission(&self) -> Permission {
            *self.0.lock().unwrap() += 1;
            Permission::Granted
        }
        fn notify(&self, _reminder: &Reminder) {}
    }

    #[test]
    fn test_permission_is_asked_once() {
        let mut storage = MemoryStorage::new();
        let notifier = AskOnce(std::sync::Mutex::new(0));

        assert_eq!(Permission::resolve(&mut storage, &notifier), Permission::Granted);
        assert_eq!(Permission::resolve(&mut storage, &notifier), Permission::Granted);
        assert_eq!(*notifier.0.lock().unwrap(), 1);

        let mut storage = MemoryStorage::new();
        storage.set(PERMISSION_KEY, "denied").unwrap();
        assert_eq!(Permission::resolve(&mut storage, &notifier), Permission::Denied);
        assert_eq!(*notifier.0.lock().unwrap(), 1);
    }

    struct Collect(std::sync::Mutex<Vec<String>>);
    impl Notifier for Collect {
        fn request_permission(&self) -> Permission { Permission::Granted }
        fn notify(&self, reminder: &Reminder) {
            self.0.lock().unwrap().push(reminder.body.clone());
        }
    }

    #[tokio::test]
    async fn test_tokio_timer() {
        let notifier = Arc::new(Collect(std::sync::Mutex::new(Vec::new())));
        let mut timer = TokioTimer::new(notifier.clone());

        let now = Local::now();
        timer.schedule_at(now + chrono::Duration::milliseconds(20), Reminder { title: REMINDER_TITLE.to_string(), body: "second".to_string() });
        timer.schedule_at(now - chrono::Duration::seconds(1), Reminder { title: REMINDER_TITLE.to_string(), body: "first".to_string() });
        timer.wait_all().await;

        assert_eq!(timer.pending(), 0);
        let mut fired = notifier.0.lock().unwrap().clone();
        fired.sort();
        assert_eq!(fired, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_tokio_timer_forgets_fired_reminders() {
        let notifier = Arc::new(Collect(std::sync::Mutex::new(Vec::new())));
        let mut timer = TokioTimer::new(notifier.clone());

        let now = Local::now();
        for body in &["a", "b", "c"] {
            timer.schedule_at(now - chrono::Duration::seconds(1), Reminder { title: REMINDER_TITLE.to_string(), body: body.to_string() });
        }
        while notifier.0.lock().unwrap().len() < 3 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        while timer.pending() > 0 {
            tokio::task::yield_now().await;
        }

        timer.schedule_at(now + chrono::Duration::hours(1), Reminder { title: REMINDER_TITLE.to_string(), body: "later".to_string() });
        assert_eq!(timer.handles.len(), 1);
        assert_eq!(timer.pending(), 1);
    }
}
