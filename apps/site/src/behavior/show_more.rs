//! Show-more / show-less truncation of a static list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Skills shown before "Show more".
pub const TOP_SKILLS_COUNT: usize = 5;
pub const EMPLOYMENT_INITIAL_COUNT: usize = 4;
pub const RECOMMENDATIONS_INITIAL_COUNT: usize = 4;

/// The lists on the page that can be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSection {
    Skills,
    Employment,
    Recommendations,
}

impl ListSection {
    pub const ALL: [ListSection; 3] = [
        ListSection::Skills,
        ListSection::Employment,
        ListSection::Recommendations,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ListSection::Skills => "skills",
            ListSection::Employment => "employment",
            ListSection::Recommendations => "recommendations",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ListSection::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn initial_count(self) -> usize {
        match self {
            ListSection::Skills => TOP_SKILLS_COUNT,
            ListSection::Employment => EMPLOYMENT_INITIAL_COUNT,
            ListSection::Recommendations => RECOMMENDATIONS_INITIAL_COUNT,
        }
    }

    /// Id of the live region that announces newly shown items.
    pub fn live_region(self) -> &'static str {
        match self {
            ListSection::Skills => "skills-live",
            ListSection::Employment => "employment-live",
            ListSection::Recommendations => "recommendations-live",
        }
    }

    /// Parses a comma-separated list such as `skills,employment`.
    /// Unknown names are skipped.
    pub fn parse_list(raw: &str) -> Vec<ListSection> {
        let mut sections = Vec::new();
        for section in raw.split(',').filter_map(ListSection::from_name) {
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        sections
    }
}

/// An ordered collection with a visible-count threshold and an expansion flag.
///
/// Starts collapsed. The flag lives only as long as the controller.
#[derive(Debug, Clone)]
pub struct ShowMore<T> {
    items: Vec<T>,
    visible_count: usize,
    expanded: bool,
}

impl<T> ShowMore<T> {
    /// Keeps `items` in the order given.
    pub fn new(items: Vec<T>, visible_count: usize) -> Self {
        ShowMore {
            items,
            visible_count,
            expanded: false,
        }
    }

    /// Orders `items` with `compare` first (stable, so ties keep input order).
    pub fn sorted_by<F>(mut items: Vec<T>, visible_count: usize, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        items.sort_by(compare);
        Self::new(items, visible_count)
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all_items(&self) -> &[T] {
        &self.items
    }

    pub fn top_items(&self) -> &[T] {
        &self.items[..self.visible_count.min(self.items.len())]
    }

    /// Items beyond the threshold (empty when there are none).
    pub fn additional_items(&self) -> &[T] {
        &self.items[self.visible_count.min(self.items.len())..]
    }

    pub fn has_more(&self) -> bool {
        self.items.len() > self.visible_count
    }

    pub fn visible_items(&self) -> &[T] {
        if self.expanded || !self.has_more() {
            &self.items
        } else {
            self.top_items()
        }
    }

    /// Flips the flag. When this expands the list, returns the items that
    /// just became visible so they can be animated and announced.
    pub fn toggle_expand(&mut self) -> &[T] {
        self.expanded = !self.expanded;
        if self.expanded {
            self.additional_items()
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::Skill;

    fn skills() -> Vec<Skill> {
        [
            ("Vue", 90),
            ("TypeScript", 50),
            ("Sass", 98),
            ("HTML", 95),
            ("Nuxt", 50),
            ("Git", 90),
            ("Figma", 70),
        ]
        .into_iter()
        .map(|(name, level)| Skill {
            name: name.to_string(),
            level,
        })
        .collect()
    }

    #[test]
    fn test_lengths_collapsed_expanded_and_back() {
        for n in 0..7 {
            let mut list = ShowMore::new((0..7).collect::<Vec<_>>(), n);
            assert!(list.has_more());
            assert_eq!(list.visible_items().len(), n);
            list.toggle_expand();
            assert_eq!(list.visible_items().len(), 7);
            list.toggle_expand();
            assert_eq!(list.visible_items().len(), n);
        }
    }

    #[test]
    fn test_short_list_has_no_more() {
        let list = ShowMore::new(vec![1, 2, 3], 4);
        assert!(!list.has_more());
        assert_eq!(list.visible_items(), &[1, 2, 3]);
        assert!(list.additional_items().is_empty());
    }

    #[test]
    fn test_exactly_threshold_has_no_more() {
        let list = ShowMore::new(vec![1, 2, 3, 4], 4);
        assert!(!list.has_more());
        assert_eq!(list.visible_items().len(), 4);
    }

    #[test]
    fn test_skills_sorted_by_level_descending() {
        let list = ShowMore::sorted_by(skills(), 5, |a, b| b.level.cmp(&a.level));
        let top: Vec<_> = list.top_items().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(top, vec!["Sass", "HTML", "Vue", "Git", "Figma"]);

        let rest: Vec<_> = list.additional_items().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(rest, vec!["TypeScript", "Nuxt"], "ties keep input order");
    }

    #[test]
    fn test_toggle_returns_newly_revealed() {
        let mut list = ShowMore::new(vec!['a', 'b', 'c', 'd', 'e'], 3);
        assert_eq!(list.toggle_expand(), &['d', 'e']);
        assert!(list.is_expanded());
        assert!(list.toggle_expand().is_empty());
        assert!(!list.is_expanded());
    }

    #[test]
    fn test_parse_section_list() {
        assert_eq!(
            ListSection::parse_list("skills, Recommendations,bogus,"),
            vec![ListSection::Skills, ListSection::Recommendations]
        );
        assert!(ListSection::parse_list("").is_empty());
    }

    #[test]
    fn test_with_expanded() {
        let list = ShowMore::new(vec![1, 2, 3, 4, 5], 2).with_expanded(true);
        assert_eq!(list.visible_items().len(), 5);
    }
}
