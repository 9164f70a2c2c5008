use crate::catalog::CatalogItem;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of config.yaml. Every field is optional; built-in tables fill the gaps.
///
/// Example YAML:
/// ```yaml
/// data_dir: /srv/nas-score
/// facilities:
///   - "Clínica Alemana"
///   - "Hospital del Salvador"
/// catalog:
///   items:
///     - { code: "1a", label: "Monitorización", weight: 4.5 }
///     - { code: "1b", label: "Monitorización ≥2 h", weight: 12.1 }
///   exclusion_groups:
///     - ["1a", "1b"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where histories and the session are stored
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Facilities offered at login
    #[serde(default)]
    pub facilities: Option<Vec<String>>,

    /// Replacement item catalog
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub items: Vec<CatalogItem>,

    /// Display order by code; defaults to the order of `items`
    #[serde(default)]
    pub order: Option<Vec<String>>,

    #[serde(default)]
    pub exclusion_groups: Vec<Vec<String>>,
}
