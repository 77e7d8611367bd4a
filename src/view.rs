//! Rendering tasks for the terminal.

use crate::types::{Status, Task};
use colored::{ColoredString, Colorize};
use comfy_table::presets::UTF8_HORIZONTAL_ONLY;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use eyre::{Context, Result};

/// Width used when the terminal size is unknown.
const FALLBACK_WIDTH: u16 = 80;

/// Minimum-width classes for table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSize {
    Xs,
    Sm,
    Md,
    Lg,
}

impl ColumnSize {
    fn min(self) -> u16 {
        match self {
            ColumnSize::Xs => 1,
            ColumnSize::Sm => 3,
            ColumnSize::Md => 5,
            ColumnSize::Lg => 10,
        }
    }

    /// Column width for a terminal `term_width` columns wide.
    ///
    /// A tenth of the terminal, halved for small columns and doubled for
    /// wide ones, never below the class minimum.
    pub fn width(self, term_width: u16) -> u16 {
        let tenth = term_width / 10;
        if tenth < self.min() {
            return self.min();
        }
        match self {
            ColumnSize::Xs | ColumnSize::Sm => tenth / 2,
            ColumnSize::Md | ColumnSize::Lg => tenth * 2,
        }
    }
}

const COLUMNS: [(&str, ColumnSize); 5] = [
    ("ID", ColumnSize::Xs),
    ("Name", ColumnSize::Lg),
    ("Project", ColumnSize::Md),
    ("Status", ColumnSize::Sm),
    ("Created At", ColumnSize::Md),
];

fn status_color(status: &Status) -> Color {
    match status {
        Status::Todo => Color::Yellow,
        Status::InProgress => Color::Blue,
        Status::Done => Color::Green,
    }
}

pub fn format_status(status: &Status) -> ColoredString {
    match status {
        Status::Todo => status.as_str().yellow(),
        Status::InProgress => status.as_str().blue(),
        Status::Done => status.as_str().green(),
    }
}

/// Build the task table. `term_width` of `None` uses the detected terminal.
pub fn task_table(tasks: &[Task], date_format: &str, term_width: Option<u16>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(COLUMNS.iter().map(|(title, _)| Cell::new(title)));

    if let Some(width) = term_width {
        table.set_width(width);
    }
    let width = table.width().unwrap_or(FALLBACK_WIDTH);

    table.set_constraints(
        COLUMNS
            .iter()
            .map(|(_, size)| ColumnConstraint::LowerBoundary(Width::Fixed(size.width(width)))),
    );

    for task in tasks {
        table.add_row(vec![
            Cell::new(task.id),
            Cell::new(&task.name),
            Cell::new(&task.project),
            Cell::new(task.status).fg(status_color(&task.status)),
            Cell::new(task.created.format(date_format)),
        ]);
    }

    table
}

/// Render tasks as a table, or "No tasks found" when empty.
pub fn render_tasks(tasks: &[Task], date_format: &str) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }
    task_table(tasks, date_format, None).to_string()
}

/// Render tasks as pretty JSON.
pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize tasks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                name: "get milk".to_string(),
                project: "groceries".to_string(),
                status: Status::Todo,
                created: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            },
            Task {
                id: 2,
                name: "fix tests".to_string(),
                project: "coding".to_string(),
                status: Status::InProgress,
                created: Utc.with_ymd_and_hms(2024, 3, 2, 18, 0, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_column_widths_narrow_terminal() {
        // tenth = 2
        assert_eq!(ColumnSize::Xs.width(20), 1);
        assert_eq!(ColumnSize::Sm.width(20), 3);
        assert_eq!(ColumnSize::Md.width(20), 5);
        assert_eq!(ColumnSize::Lg.width(20), 10);
    }

    #[test]
    fn test_column_widths_wide_terminal() {
        // tenth = 12
        assert_eq!(ColumnSize::Xs.width(120), 6);
        assert_eq!(ColumnSize::Sm.width(120), 6);
        assert_eq!(ColumnSize::Md.width(120), 24);
        assert_eq!(ColumnSize::Lg.width(120), 24);
    }

    #[test]
    fn test_column_widths_zero_width() {
        assert_eq!(ColumnSize::Xs.width(0), 1);
        assert_eq!(ColumnSize::Lg.width(0), 10);
    }

    #[test]
    fn test_table_contains_rows() {
        let rendered = task_table(&sample_tasks(), "%Y-%m-%d", Some(120)).to_string();

        assert!(rendered.contains("Created At"));
        assert!(rendered.contains("get milk"));
        assert!(rendered.contains("groceries"));
        assert!(rendered.contains("in progress"));
        assert!(rendered.contains("2024-03-02"));
    }

    #[test]
    fn test_table_uses_date_format() {
        let rendered = task_table(&sample_tasks(), "%d/%m/%Y", Some(120)).to_string();
        assert!(rendered.contains("01/03/2024"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tasks(&[], "%Y-%m-%d"), "No tasks found");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_tasks()).unwrap();
        let parsed: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_tasks());
        assert!(json.contains("\"status\": \"in progress\""));
    }
}
