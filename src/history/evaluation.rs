use super::types::{EvaluationRecord, PatientStatus, Shift, Unit};
use crate::catalog::{Catalog, Selection};
use crate::scoring::score;
use anyhow::{bail, Result};
use chrono::NaiveDateTime;

/// Format of `created_at` in stored records
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Form fields collected before submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationForm {
    pub created_at: Option<String>,
    pub identifier: Option<String>,
    pub shift: Shift,
    pub patient_status: PatientStatus,
    pub unit: Unit,
    pub note: Option<String>,
    pub selection: Selection,
}

impl EvaluationForm {
    /// Prefill every field from an earlier record ("duplicate last")
    pub fn from_record(record: &EvaluationRecord) -> Self {
        Self {
            created_at: Some(record.created_at.clone()).filter(|s| !s.is_empty()),
            identifier: record.identifier.clone(),
            shift: record.shift,
            patient_status: record.patient_status,
            unit: record.unit,
            note: record.note.clone(),
            selection: record.codes.iter().cloned().collect(),
        }
    }

    /// Score and stamp the form for `facility`.
    ///
    /// `now` fills in a missing date; codes are stored in catalog display order.
    pub fn into_record(
        self,
        facility: &str,
        catalog: &Catalog,
        now: NaiveDateTime,
    ) -> Result<EvaluationRecord> {
        let created_at = match self.created_at.as_deref() {
            Some(raw) => parse_created_at(raw)?,
            None => now,
        };
        let codes = catalog.ordered_codes(&self.selection);
        let total_score = score(catalog, &codes);

        Ok(EvaluationRecord {
            facility: facility.to_string(),
            created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
            identifier: non_blank(self.identifier),
            shift: self.shift,
            patient_status: self.patient_status,
            unit: self.unit,
            note: non_blank(self.note),
            codes,
            total_score,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Accept "YYYY-MM-DD HH:MM" or the datetime-local form "YYYY-MM-DDTHH:MM"
pub fn parse_created_at(raw: &str) -> Result<NaiveDateTime> {
    let candidate = raw.trim().replacen('T', " ", 1);
    match NaiveDateTime::parse_from_str(&candidate, CREATED_AT_FORMAT) {
        Ok(dt) => Ok(dt),
        Err(_) => bail!(
            "Invalid evaluation date '{}'. Use YYYY-MM-DD HH:MM",
            raw
        ),
    }
}
