//! Some utility functions

use crate::filter::TaskView;
use crate::manager::Board;
use crate::task::DUE_DATE_FORMAT;

/// Render a task as a single line of text
pub fn format_task(view: &TaskView) -> String {
    let completion = if view.completed { "✓" } else { " " };
    let due = match view.due_date {
        Some(date) => format!("  ⏰ {}", date.format(DUE_DATE_FORMAT)),
        None => String::new(),
    };
    format!("{:>3}. {} [{}] {}{}", view.index, completion, view.priority, view.text, due)
}

/// A debug utility that pretty-prints a board
pub fn print_board(board: &Board) {
    for view in &board.tasks {
        println!("{}", format_task(view));
    }
    if board.tasks.is_empty() {
        println!("    (no task to display)");
    }
    println!("{}", board.counts);
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::task::Priority;

    #[test]
    fn test_format_task() {
        let view = TaskView {
            index: 4,
            text: "Buy milk",
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            completed: true,
        };
        assert_eq!(format_task(&view), "  4. ✓ [High] Buy milk  ⏰ 2025-03-10");

        let view = TaskView { due_date: None, completed: false, ..view };
        assert_eq!(format_task(&view), "  4.   [High] Buy milk");
    }
}
