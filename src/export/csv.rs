use crate::history::EvaluationRecord;

/// Column order of exported files
pub const CSV_HEADERS: [&str; 8] = [
    "created_at",
    "identifier",
    "shift",
    "patient_status",
    "unit",
    "total_score",
    "codes",
    "note",
];

/// Wrap in double quotes, doubling any quote inside
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_row(record: &EvaluationRecord) -> String {
    [
        quote(&record.created_at),
        quote(record.identifier.as_deref().unwrap_or("")),
        quote(&record.shift.to_string()),
        quote(&record.patient_status.to_string()),
        quote(&record.unit.to_string()),
        format!("{:.1}", record.total_score),
        quote(&record.codes.join(" ")),
        quote(record.note.as_deref().unwrap_or("")),
    ]
    .join(",")
}

/// Header line plus one line per record, joined with '\n'
pub fn to_csv(records: &[EvaluationRecord]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(records.iter().map(format_row))
        .collect::<Vec<_>>()
        .join("\n")
}
