use super::CatalogError;
use std::collections::BTreeSet;

/// The set of currently selected item codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    codes: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    pub fn remove(&mut self, code: &str) -> bool {
        self.codes.remove(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Disjoint groups of codes where at most one member may be selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionGroups {
    groups: Vec<BTreeSet<String>>,
}

impl ExclusionGroups {
    /// Build the group list, rejecting any code that appears in two groups
    pub fn new(groups: Vec<Vec<String>>) -> Result<Self, CatalogError> {
        let mut built: Vec<BTreeSet<String>> = Vec::with_capacity(groups.len());

        for (index, group) in groups.into_iter().enumerate() {
            let set: BTreeSet<String> = group.into_iter().collect();
            for code in &set {
                if let Some(first) = built.iter().position(|g| g.contains(code)) {
                    return Err(CatalogError::OverlappingGroups {
                        code: code.clone(),
                        first,
                        second: index,
                    });
                }
            }
            built.push(set);
        }

        Ok(Self { groups: built })
    }

    /// The group containing `code`, if any
    pub fn group_of(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.groups.iter().find(|g| g.contains(code))
    }

    pub fn is_exclusive(&self, code: &str) -> bool {
        self.group_of(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<String>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Clear every other selected member of `code`'s group.
    ///
    /// `code` itself keeps whatever state it has in `current`; codes outside
    /// the group are untouched.
    pub fn on_select(&self, code: &str, current: &Selection) -> Selection {
        let Some(group) = self.group_of(code) else {
            return current.clone();
        };

        current
            .iter()
            .filter(|selected| *selected == code || !group.contains(*selected))
            .collect()
    }

    /// Flip `code` in the selection, then resolve its group
    pub fn toggle(&self, code: &str, current: &Selection) -> Selection {
        let mut next = current.clone();
        if !next.remove(code) {
            next.insert(code);
        }
        self.on_select(code, &next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> ExclusionGroups {
        ExclusionGroups::new(vec![
            vec!["1a".into(), "1b".into(), "1c".into()],
            vec!["7a".into(), "7b".into()],
        ])
        .unwrap()
    }

    fn selection(codes: &[&str]) -> Selection {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_on_select_clears_group_peers() {
        let current = selection(&["1a", "1b", "2", "7a"]);
        let next = groups().on_select("1b", &current);
        assert_eq!(next, selection(&["1b", "2", "7a"]));
    }

    #[test]
    fn test_on_select_outside_groups_is_noop() {
        let current = selection(&["1a", "2", "3"]);
        let next = groups().on_select("2", &current);
        assert_eq!(next, current);
    }

    #[test]
    fn test_toggle_selects_and_resolves() {
        let g = groups();
        let s = g.toggle("1a", &Selection::new());
        let s = g.toggle("1c", &s);
        let s = g.toggle("7b", &s);
        assert_eq!(s, selection(&["1c", "7b"]));
    }

    #[test]
    fn test_toggle_deselects_selected_code() {
        let g = groups();
        let s = g.toggle("3", &selection(&["3", "1a"]));
        assert_eq!(s, selection(&["1a"]));
    }

    #[test]
    fn test_at_most_one_member_per_group_after_select() {
        let g = groups();
        let all = selection(&["1a", "1b", "1c", "7a", "7b", "2"]);
        for code in ["1a", "1b", "1c", "7a", "7b"] {
            let next = g.on_select(code, &all);
            for group in g.iter() {
                if group.contains(code) {
                    let count = next.iter().filter(|c| group.contains(*c)).count();
                    assert_eq!(count, 1, "group of {} kept {} members", code, count);
                }
            }
            assert!(next.contains(code));
            assert!(next.contains("2"));
        }
    }

    #[test]
    fn test_overlapping_groups_rejected() {
        let result = ExclusionGroups::new(vec![
            vec!["1a".into(), "1b".into()],
            vec!["1b".into(), "1c".into()],
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::OverlappingGroups {
                code: "1b".to_string(),
                first: 0,
                second: 1,
            }
        );
    }

    #[test]
    fn test_is_exclusive() {
        let g = groups();
        assert!(g.is_exclusive("7a"));
        assert!(!g.is_exclusive("9"));
    }
}
