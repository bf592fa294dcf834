use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use taskboard::export::FolderDelivery;
use taskboard::filter::PriorityFilter;
use taskboard::settings;
use taskboard::reminder::{ConsoleNotifier, Permission, SystemClock, TokioTimer};
use taskboard::storage::FolderStorage;
use taskboard::theme::Theme;
use taskboard::TaskManager;


/// A task list, with priorities, due date reminders and calendar invites
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about)]
struct Cli {
    /// Where the task list and the preferences are stored
    #[arg(long, env = "TASKBOARD_DATA_DIR", default_value = "taskboard-data", global = true)]
    data_dir: PathBuf,

    /// Where calendar invites are written
    #[arg(long, env = "TASKBOARD_DOWNLOAD_DIR", default_value = ".", global = true)]
    download_dir: PathBuf,

    /// The product name written into the PRODID of calendar invites
    #[arg(long, env = "TASKBOARD_PRODUCT_NAME", global = true)]
    product_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task. An invite is exported if it has a due date
    Add {
        text: String,
        /// High, Medium or Low
        #[arg(short, long, default_value = "")]
        priority: String,
        /// YYYY-MM-DD
        #[arg(short, long, default_value = "")]
        due: String,
    },
    /// Display the tasks
    List {
        /// Only display tasks whose text contains this (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
        /// All, High, Medium or Low
        #[arg(short, long, default_value = "All")]
        priority: String,
    },
    /// Mark a task as completed (or uncompleted)
    Toggle { index: usize },
    /// Delete a task
    Delete { index: usize },
    /// Export the calendar invite of a task
    Export { index: usize },
    /// Display (or switch) the theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Wait until every pending reminder has fired
    Watch,
}


#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(name) = &cli.product_name {
        settings::set(&settings::PRODUCT_NAME, name);
    }

    let mut storage = FolderStorage::new(&cli.data_dir);
    let notifier = Arc::new(ConsoleNotifier);
    let permission = Permission::resolve(&mut storage, &*notifier);

    let timer = TokioTimer::new(notifier);
    let delivery = FolderDelivery::new(&cli.download_dir);
    let mut manager = TaskManager::open(storage, timer, delivery, SystemClock, permission);

    match cli.command {
        Command::Add { text, priority, due } => {
            let added = manager.add_task(&text, &priority, &due)?;
            println!("Added {:?}", added.task.text());
            if added.reminder_armed {
                println!("A reminder will be displayed on its due date, as long as `taskboard watch` is running.");
            }
            if let Some(path) = added.invite {
                println!("Calendar invite written to {}", path.display());
            }
        },
        Command::List { search, priority } => {
            let filter: PriorityFilter = priority.parse()?;
            let board = manager.view(&search, filter);
            taskboard::utils::print_board(&board);
        },
        Command::Toggle { index } => {
            let completed = manager.toggle_complete(index)?;
            println!("Task #{} is now {}", index, if completed { "completed" } else { "not completed" });
        },
        Command::Delete { index } => {
            let removed = manager.delete_task(index)?;
            println!("Deleted {:?}", removed.text());
        },
        Command::Export { index } => {
            let path = manager.export_task(index)?;
            println!("Calendar invite written to {}", path.display());
        },
        Command::Theme { toggle } => {
            let storage = manager.store_mut().storage_mut();
            let theme = if toggle { Theme::toggle(storage)? } else { Theme::load(&*storage) };
            println!("Current theme: {:?} (switch with \"{}\")", theme, theme.toggle_label());
        },
        Command::Watch => {
            let timer = manager.reminders_mut().timer_mut();
            println!("Waiting for {} reminders...", timer.pending());
            timer.wait_all().await;
        },
    }

    Ok(())
}
