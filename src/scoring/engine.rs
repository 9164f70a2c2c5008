use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemContribution {
    pub code: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub items: Vec<ItemContribution>,
    /// Codes that aren't in the catalog and contributed nothing
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Sum of catalog weights over `codes`. Unknown codes contribute 0.
pub fn score<I, S>(catalog: &Catalog, codes: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| catalog.weight(code.as_ref()))
        .sum()
}

/// Score with a per-item breakdown, for the detailed view
pub fn calculate_score<I, S>(catalog: &Catalog, codes: I) -> ScoreResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items = Vec::new();
    let mut ignored = Vec::new();

    for code in codes {
        let code = code.as_ref();
        match catalog.get(code) {
            Some(item) => items.push(ItemContribution {
                code: item.code.clone(),
                label: item.label.clone(),
                weight: item.weight,
            }),
            None => ignored.push(code.to_string()),
        }
    }

    ScoreResult {
        score: items.iter().map(|i| i.weight).sum(),
        breakdown: ScoreBreakdown { items, ignored },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_selection_scores_zero() {
        let catalog = Catalog::builtin();
        assert_eq!(score(&catalog, Vec::<String>::new()), 0.0);
    }

    #[test]
    fn test_score_sums_known_weights() {
        let catalog = Catalog::builtin();
        // 4.5 + 4.3 + 32.0
        assert!(approx(score(&catalog, ["1a", "2", "7b"]), 40.8));
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let catalog = Catalog::builtin();
        assert!(approx(score(&catalog, ["1a", "99z"]), 4.5));
    }

    #[test]
    fn test_score_is_order_independent() {
        let catalog = Catalog::builtin();
        let forward = score(&catalog, ["1c", "4b", "9", "23"]);
        let backward = score(&catalog, ["23", "9", "4b", "1c"]);
        assert!(approx(forward, backward));
    }

    #[test]
    fn test_breakdown_matches_score() {
        let catalog = Catalog::builtin();
        let result = calculate_score(&catalog, ["8c", "ghost", "17"]);
        assert!(approx(result.score, 37.0));
        assert!(approx(result.score, score(&catalog, ["8c", "ghost", "17"])));
        assert_eq!(result.breakdown.items.len(), 2);
        assert_eq!(result.breakdown.items[0].code, "8c");
        assert_eq!(result.breakdown.ignored, vec!["ghost".to_string()]);
    }
}
