use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::text::normalize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    #[default]
    #[serde(rename = "Día")]
    Day,
    #[serde(rename = "Noche")]
    Night,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Ingreso")]
    Admission,
    #[serde(rename = "Egreso")]
    Discharge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "UCI")]
    Icu,
    #[serde(rename = "UTI")]
    Intermediate,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Day => write!(f, "Día"),
            Shift::Night => write!(f, "Noche"),
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::NotApplicable => write!(f, "N/A"),
            PatientStatus::Admission => write!(f, "Ingreso"),
            PatientStatus::Discharge => write!(f, "Egreso"),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Icu => write!(f, "UCI"),
            Unit::Intermediate => write!(f, "UTI"),
        }
    }
}

/// Lowercase, accent-free form used to parse user input
fn fold(s: &str) -> String {
    normalize(s.trim()).to_lowercase()
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "dia" | "day" => Ok(Shift::Day),
            "noche" | "night" => Ok(Shift::Night),
            _ => Err(format!("unknown shift '{}' (expected Día or Noche)", s)),
        }
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "n/a" | "na" | "none" => Ok(PatientStatus::NotApplicable),
            "ingreso" | "admission" => Ok(PatientStatus::Admission),
            "egreso" | "discharge" => Ok(PatientStatus::Discharge),
            _ => Err(format!(
                "unknown patient status '{}' (expected N/A, Ingreso or Egreso)",
                s
            )),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "uci" | "icu" => Ok(Unit::Icu),
            "uti" => Ok(Unit::Intermediate),
            _ => Err(format!("unknown unit '{}' (expected UCI or UTI)", s)),
        }
    }
}

/// One submitted evaluation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(default)]
    pub facility: String,
    /// Local date and time, "YYYY-MM-DD HH:MM"
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shift: Shift,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_status: PatientStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: Unit,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub total_score: f64,
}

/// Older records store absent text fields as "" or null
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Older records may store null for an unset choice
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
