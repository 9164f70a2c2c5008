use super::schema::Config;
use crate::catalog::check_catalog;
use crate::text::{initials, slug};
use std::collections::HashMap;

/// Slugs whose history keys are already taken: records without a facility
/// and the shared legacy history
const RESERVED_SLUGS: [&str; 2] = ["default", "default-shared"];

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref facilities) = config.facilities {
        if facilities.is_empty() {
            errors.push("facilities: list must not be empty".to_string());
        }

        // Facilities sharing a slug would share one history
        let mut by_slug: HashMap<String, &str> = HashMap::new();
        for (i, name) in facilities.iter().enumerate() {
            let key = slug(name);
            if key.is_empty() {
                errors.push(format!(
                    "facilities[{}]: '{}' has no letters or digits",
                    i, name
                ));
                continue;
            }
            if RESERVED_SLUGS.contains(&key.as_str()) {
                errors.push(format!(
                    "facilities[{}]: '{}' uses the reserved storage key '{}'",
                    i, name, key
                ));
            }
            if initials(name).is_empty() {
                errors.push(format!(
                    "facilities[{}]: '{}' has no initials to use as an access key",
                    i, name
                ));
            }
            if let Some(previous) = by_slug.insert(key, name.as_str()) {
                errors.push(format!(
                    "facilities[{}]: '{}' collides with '{}' (same storage key)",
                    i, name, previous
                ));
            }
        }
    }

    if let Some(ref catalog) = config.catalog {
        if catalog.items.is_empty() {
            errors.push("catalog.items: list must not be empty".to_string());
        }
        for error in check_catalog(
            &catalog.items,
            catalog.order.as_deref(),
            &catalog.exclusion_groups,
        ) {
            errors.push(format!("catalog: {}", error));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
