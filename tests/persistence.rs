//! Checks the task list survives a restart, when it is stored on disk

use chrono::NaiveDate;

use taskboard::export::FolderDelivery;
use taskboard::filter::PriorityFilter;
use taskboard::reminder::{ManualTimer, Permission, SystemClock};
use taskboard::storage::{FolderStorage, Storage, DARK_MODE_KEY};
use taskboard::theme::Theme;
use taskboard::{Priority, TaskManager};


#[test]
fn test_folder_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let download_dir = dir.path().join("downloads");

    {
        let mut manager = TaskManager::open(
            FolderStorage::new(&data_dir), ManualTimer::new(), FolderDelivery::new(&download_dir), SystemClock, Permission::Denied);
        manager.add_task("Buy milk", "High", "2025-03-10").unwrap();
        manager.add_task("Walk dog", "Low", "").unwrap();
        manager.add_task("Read a book", "Medium", "").unwrap();
        manager.toggle_complete(1).unwrap();
        manager.delete_task(2).unwrap();

        Theme::toggle(manager.store_mut().storage_mut()).unwrap();
    }

    assert!(download_dir.join("Buy_milk.ics").exists());
    assert!(data_dir.join("tasks.json").exists());

    let storage = FolderStorage::new(&data_dir);
    assert_eq!(storage.get(DARK_MODE_KEY).unwrap(), Some("enabled".to_string()));
    assert_eq!(Theme::load(&storage), Theme::Dark);

    let manager = TaskManager::open(
        storage, ManualTimer::new(), FolderDelivery::new(&download_dir), SystemClock, Permission::Denied);
    let board = manager.view("", PriorityFilter::All);
    assert_eq!(board.tasks.len(), 2);

    assert_eq!(board.tasks[0].text, "Buy milk");
    assert_eq!(board.tasks[0].priority, Priority::High);
    assert_eq!(board.tasks[0].due_date, NaiveDate::from_ymd_opt(2025, 3, 10));
    assert_eq!(board.tasks[0].completed, false);

    assert_eq!(board.tasks[1].text, "Walk dog");
    assert_eq!(board.tasks[1].due_date, None);
    assert_eq!(board.tasks[1].completed, true);
}

#[test]
fn test_unreadable_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "this is not json").unwrap();

    let manager = TaskManager::open(
        FolderStorage::new(dir.path()), ManualTimer::new(), FolderDelivery::new(dir.path()), SystemClock, Permission::Granted);
    assert!(manager.store().is_empty());
}
