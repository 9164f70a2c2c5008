pub mod defaults;
pub mod exclusion;
pub mod render;

pub use exclusion::{ExclusionGroups, Selection};
pub use render::{project, CatalogEntry};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A scored nursing activity
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogItem {
    pub code: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    DuplicateCode(String),
    InvalidWeight { code: String, weight: f64 },
    UnknownGroupCode { group: usize, code: String },
    GroupTooSmall { group: usize },
    OverlappingGroups { code: String, first: usize, second: usize },
    DuplicateOrderEntry(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateCode(code) => write!(f, "item code '{}' is defined twice", code),
            CatalogError::InvalidWeight { code, weight } => {
                write!(f, "item '{}' has invalid weight {} (must be a non-negative number)", code, weight)
            }
            CatalogError::UnknownGroupCode { group, code } => {
                write!(f, "exclusion group {} references unknown code '{}'", group, code)
            }
            CatalogError::GroupTooSmall { group } => {
                write!(f, "exclusion group {} needs at least two codes", group)
            }
            CatalogError::OverlappingGroups { code, first, second } => write!(
                f,
                "code '{}' appears in exclusion groups {} and {}",
                code, first, second
            ),
            CatalogError::DuplicateOrderEntry(code) => {
                write!(f, "display order lists '{}' more than once", code)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Check items, order and groups together. Returns every problem found.
pub fn check_catalog(
    items: &[CatalogItem],
    order: Option<&[String]>,
    groups: &[Vec<String>],
) -> Vec<CatalogError> {
    let mut errors = Vec::new();
    let mut known: HashSet<&str> = HashSet::new();

    for item in items {
        if !known.insert(item.code.as_str()) {
            errors.push(CatalogError::DuplicateCode(item.code.clone()));
        }
        if !item.weight.is_finite() || item.weight < 0.0 {
            errors.push(CatalogError::InvalidWeight {
                code: item.code.clone(),
                weight: item.weight,
            });
        }
    }

    if let Some(order) = order {
        let mut seen = HashSet::new();
        for code in order {
            if !seen.insert(code.as_str()) {
                errors.push(CatalogError::DuplicateOrderEntry(code.clone()));
            }
        }
    }

    let mut owner: HashMap<&str, usize> = HashMap::new();
    for (index, group) in groups.iter().enumerate() {
        if group.len() < 2 {
            errors.push(CatalogError::GroupTooSmall { group: index });
        }
        for code in group {
            if !known.contains(code.as_str()) {
                errors.push(CatalogError::UnknownGroupCode {
                    group: index,
                    code: code.clone(),
                });
            }
            if let Some(&first) = owner.get(code.as_str()) {
                if first != index {
                    errors.push(CatalogError::OverlappingGroups {
                        code: code.clone(),
                        first,
                        second: index,
                    });
                }
            } else {
                owner.insert(code.as_str(), index);
            }
        }
    }

    errors
}

/// Item table, display order and exclusion groups
#[derive(Debug, Clone)]
pub struct Catalog {
    items: HashMap<String, CatalogItem>,
    order: Vec<String>,
    groups: ExclusionGroups,
}

impl Catalog {
    /// Build a catalog. Without an explicit order, items display in the order given.
    pub fn new(
        items: Vec<CatalogItem>,
        order: Option<Vec<String>>,
        groups: Vec<Vec<String>>,
    ) -> Result<Self, CatalogError> {
        if let Some(first) = check_catalog(&items, order.as_deref(), &groups)
            .into_iter()
            .next()
        {
            return Err(first);
        }

        let order = order.unwrap_or_else(|| items.iter().map(|i| i.code.clone()).collect());
        let groups = ExclusionGroups::new(groups)?;
        let items = items.into_iter().map(|i| (i.code.clone(), i)).collect();

        Ok(Self {
            items,
            order,
            groups,
        })
    }

    /// The published NAS table with its five exclusion groups
    pub fn builtin() -> Self {
        let items = defaults::NAS_ITEMS
            .iter()
            .map(|(code, label, weight)| CatalogItem {
                code: code.to_string(),
                label: label.to_string(),
                weight: *weight,
            })
            .collect::<Vec<_>>();
        let order = items.iter().map(|i| i.code.clone()).collect();
        let groups = defaults::EXCLUSION_GROUPS
            .iter()
            .map(|g| g.iter().map(|c| c.to_string()).collect())
            .collect();

        Self {
            items: items.into_iter().map(|i| (i.code.clone(), i)).collect(),
            order,
            // Built-in groups are disjoint
            groups: ExclusionGroups::new(groups).unwrap_or_default(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&CatalogItem> {
        self.items.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    /// Weight of `code`; unknown codes weigh nothing
    pub fn weight(&self, code: &str) -> f64 {
        self.items.get(code).map(|i| i.weight).unwrap_or(0.0)
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn groups(&self) -> &ExclusionGroups {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display rows in catalog order
    pub fn entries(&self) -> Vec<CatalogEntry<'_>> {
        project(&self.order, &self.items, &self.groups)
    }

    /// Selected codes in display order; codes missing from the display order go last
    pub fn ordered_codes(&self, selection: &Selection) -> Vec<String> {
        let mut codes: Vec<String> = self
            .order
            .iter()
            .filter(|code| selection.contains(code))
            .cloned()
            .collect();
        codes.extend(
            selection
                .iter()
                .filter(|code| !self.order.iter().any(|o| o == code))
                .map(str::to_string),
        );
        codes
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
