use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::access::hint;
use crate::catalog::{CatalogEntry, Selection};
use crate::history::EvaluationRecord;
use crate::scoring::ScoreResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// One decimal place with a comma separator: 40.8 -> "40,8"
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score).replace('.', ",")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Numbered facility list with the login hint for each
pub fn format_facilities(facilities: &[String], current: Option<&str>, use_colors: bool) -> String {
    facilities
        .iter()
        .enumerate()
        .map(|(idx, facility)| {
            let marker = if current == Some(facility.as_str()) { "*" } else { " " };
            let index_str = format!("{:>2}.", idx + 1);
            if use_colors {
                format!("{}{} {}", marker.green(), index_str.dimmed(), hint(facility))
            } else {
                format!("{}{} {}", marker, index_str, hint(facility))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Item checklist. With a selection, each row shows a checkbox.
pub fn format_catalog(
    entries: &[CatalogEntry],
    selection: Option<&Selection>,
    use_colors: bool,
) -> String {
    if entries.is_empty() {
        return "The catalog is empty.".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let check = match selection {
                Some(s) if s.contains(entry.code) => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            let code = format!("{:<3}", entry.code);
            let weight = format!("({})", format_score(entry.item.weight));
            let badge = if entry.exclusive { "  Excluyente" } else { "" };

            if use_colors {
                format!(
                    "{}{} {} {}{}",
                    check,
                    code.bold(),
                    entry.item.label,
                    weight.dimmed(),
                    badge.yellow()
                )
            } else {
                format!("{}{} {} {}{}", check, code, entry.item.label, weight, badge)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-item contributions followed by the total
pub fn format_score_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .items
        .iter()
        .map(|item| {
            format!(
                "  {:<3} {:>6}  {}",
                item.code,
                format_score(item.weight),
                item.label
            )
        })
        .collect();

    for code in &result.breakdown.ignored {
        lines.push(format!("  {:<3} {:>6}  (unknown code, ignored)", code, "-"));
    }

    let total = format!("Total score: {}", format_score(result.score));
    if use_colors {
        lines.push(total.bold().to_string());
    } else {
        lines.push(total);
    }
    lines.join("\n")
}

/// Multi-line view of a single record
pub fn format_record_detail(record: &EvaluationRecord, use_colors: bool) -> String {
    let identifier = record.identifier.as_deref().unwrap_or("—");
    let note = record.note.as_deref().unwrap_or("—");
    let codes = if record.codes.is_empty() {
        "—".to_string()
    } else {
        record.codes.join(", ")
    };
    let score = format_score(record.total_score);

    if use_colors {
        format!(
            "{}\n  Facility: {}\n  Identifier: {}\n  Shift: {}\n  Patient: {}\n  Unit: {}\n  Items: {}\n  Note: {}\n  Score: {}",
            record.created_at.bold(),
            record.facility.cyan(),
            identifier,
            record.shift,
            record.patient_status,
            record.unit,
            codes,
            note,
            score.bold()
        )
    } else {
        format!(
            "{}\n  Facility: {}\n  Identifier: {}\n  Shift: {}\n  Patient: {}\n  Unit: {}\n  Items: {}\n  Note: {}\n  Score: {}",
            record.created_at,
            record.facility,
            identifier,
            record.shift,
            record.patient_status,
            record.unit,
            codes,
            note,
            score
        )
    }
}

/// History as a table, newest first. Notes are truncated to the terminal width.
pub fn format_history_table(records: &[EvaluationRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No local evaluations yet.".to_string();
    }

    let term_width = get_terminal_width();
    let header = format!(
        "{:<16}  {:<14}  {:<5}  {:<7}  {:<4}  {:>6}  {:<24}  {}",
        "Date", "Identifier", "Shift", "Patient", "Unit", "Score", "Items", "Note"
    );
    // Everything before the note column
    let fixed_width = 16 + 14 + 5 + 7 + 4 + 6 + 24 + 2 * 7;

    let rows = records.iter().map(|r| {
        let note = r.note.as_deref().unwrap_or("—");
        let note = match term_width {
            Some(width) if width > fixed_width + 10 => truncate(note, width - fixed_width),
            Some(_) => truncate(note, 20),
            None => note.to_string(),
        };
        let codes = if r.codes.is_empty() {
            "—".to_string()
        } else {
            truncate(&r.codes.join(" "), 24)
        };
        format!(
            "{:<16}  {:<14}  {:<5}  {:<7}  {:<4}  {:>6}  {:<24}  {}",
            r.created_at,
            truncate(r.identifier.as_deref().unwrap_or("—"), 14),
            r.shift.to_string(),
            r.patient_status.to_string(),
            r.unit.to_string(),
            format_score(r.total_score),
            codes,
            note
        )
    });

    let mut lines = Vec::with_capacity(records.len() + 1);
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }
    lines.extend(rows);
    lines.join("\n")
}
