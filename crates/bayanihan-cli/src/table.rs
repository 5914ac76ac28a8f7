//! Plain-text event tables.

use std::fmt::Write as _;

use bayanihan_core::{Event, ViewColumns};

const TITLE_WIDTH: usize = 40;
const LOCATION_WIDTH: usize = 45;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message printed instead of an empty table.
pub const EMPTY_TABLE: &str = "No events to display.";

/// Deadline and status columns, as used by the manager's own lists and the LGU.
pub const DETAILED: ViewColumns = ViewColumns {
    deadline: true,
    status: true,
};

/// Layout of an event table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Prefix rows with a 1-based `No.` column for selection.
    pub numbered: bool,
    /// Optional columns.
    pub columns: ViewColumns,
}

impl TableOptions {
    /// Unnumbered table with the given columns.
    pub fn plain(columns: ViewColumns) -> Self {
        Self {
            numbered: false,
            columns,
        }
    }

    /// Numbered table with the given columns.
    pub fn numbered(columns: ViewColumns) -> Self {
        Self {
            numbered: true,
            columns,
        }
    }
}

/// Cut `text` to `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Render events as a bordered table, or [`EMPTY_TABLE`] when there are none.
pub fn render_events(events: &[&Event], options: TableOptions) -> String {
    if events.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    let mut headers = Vec::new();
    if options.numbered {
        headers.push("No.");
    }
    headers.extend(["Title", "Location", "Date", "Max Volunteers"]);
    if options.columns.deadline {
        headers.push("Deadline");
    }
    if options.columns.status {
        headers.push("Status");
    }

    let rows: Vec<Vec<String>> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let d = event.details();
            let mut row = Vec::with_capacity(headers.len());
            if options.numbered {
                row.push((i + 1).to_string());
            }
            row.push(truncate(&d.title, TITLE_WIDTH));
            row.push(truncate(&d.location, LOCATION_WIDTH));
            row.push(d.date.format(DATE_FORMAT).to_string());
            row.push(d.max_volunteers.to_string());
            if options.columns.deadline {
                row.push(d.deadline.format(DATE_FORMAT).to_string());
            }
            if options.columns.status {
                row.push(event.status().to_string());
            }
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .fold(header.len(), usize::max)
        })
        .collect();

    let border = border(&widths);
    let mut out = String::new();
    out.push_str(&border);
    push_row(&mut out, headers.iter().copied(), &widths);
    out.push_str(&border);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.push_str(&border);
    // no trailing newline; callers print with `say`
    let _ = out.pop();
    out
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.zip(widths.iter().copied()) {
        let _ = write!(out, " {cell:<width$} |");
    }
    out.push('\n');
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bayanihan_core::{EventDetails, EventStatus};
    use chrono::NaiveDate;

    fn event(title: &str, location: &str) -> Event {
        let day = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        Event::with_status(
            EventDetails {
                title: title.into(),
                description: "d".into(),
                location: location.into(),
                date: day.and_hms_opt(8, 0, 0).unwrap(),
                deadline: day.pred_opt().unwrap().and_hms_opt(17, 0, 0).unwrap(),
                max_volunteers: 12,
            },
            EventStatus::Approved,
        )
    }

    #[test]
    fn truncate_limits() {
        assert_eq!(truncate("short", 40), "short");
        let forty = "a".repeat(40);
        assert_eq!(truncate(&forty, 40), forty);
        let long = "b".repeat(41);
        let cut = truncate(&long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..37], &long[..37]);
    }

    #[test]
    fn truncate_counts_characters() {
        let text = "ñ".repeat(50);
        let cut = truncate(&text, 45);
        assert_eq!(cut.chars().count(), 45);
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(render_events(&[], TableOptions::default()), EMPTY_TABLE);
    }

    #[test]
    fn plain_table_has_base_columns() {
        let e = event("Beach Cleanup", "Baywalk");
        let out = render_events(&[&e], TableOptions::default());
        let header = out.lines().nth(1).unwrap();
        assert_eq!(
            header,
            "| Title         | Location | Date       | Max Volunteers |"
        );
        assert!(out.contains("| Beach Cleanup | Baywalk  | 2026-11-20 | 12             |"));
        assert!(!out.contains("Status"));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn numbered_detailed_table() {
        let a = event("Beach Cleanup", "Baywalk");
        let b = event("Tree Planting", "Hillside");
        let out = render_events(&[&a, &b], TableOptions::numbered(DETAILED));
        let header = out.lines().nth(1).unwrap();
        assert!(header.starts_with("| No. | Title"));
        assert!(header.ends_with("| Deadline   | Status   |"));
        assert!(out.contains("| 2   | Tree Planting"));
        assert!(out.contains("| 2026-11-19 | Approved |"));
    }

    #[test]
    fn long_fields_are_cut() {
        let e = event(&"T".repeat(60), &"L".repeat(60));
        let out = render_events(&[&e], TableOptions::plain(ViewColumns::default()));
        assert!(out.contains(&format!("{}...", "T".repeat(37))));
        assert!(out.contains(&format!("{}...", "L".repeat(42))));
        assert!(!out.contains(&"T".repeat(38)));
    }
}
