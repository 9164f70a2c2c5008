use super::exclusion::ExclusionGroups;
use super::CatalogItem;
use std::collections::HashMap;

/// One row of the item checklist
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry<'a> {
    pub code: &'a str,
    pub item: &'a CatalogItem,
    pub exclusive: bool,
}

/// Project the catalog into display rows following `order`.
/// Codes in `order` that the catalog doesn't know are dropped.
pub fn project<'a>(
    order: &'a [String],
    catalog: &'a HashMap<String, CatalogItem>,
    groups: &ExclusionGroups,
) -> Vec<CatalogEntry<'a>> {
    order
        .iter()
        .filter_map(|code| {
            catalog.get(code).map(|item| CatalogEntry {
                code: code.as_str(),
                item,
                exclusive: groups.is_exclusive(code),
            })
        })
        .collect()
}
