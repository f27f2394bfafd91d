//! Gimmick and promotion filters.

use crate::roster::{PromotionId, RankItem};

/// The two content filters applied before pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    gimmick: String,
    promotion: Option<PromotionId>,
}

impl FilterState {
    /// No search text, all promotions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gimmick search text.
    pub fn with_gimmick(mut self, gimmick: impl Into<String>) -> Self {
        self.gimmick = gimmick.into();
        self
    }

    /// Restrict to one promotion.
    pub fn with_promotion(mut self, promotion: Option<PromotionId>) -> Self {
        self.promotion = promotion;
        self
    }

    /// The current gimmick search text, as typed.
    pub fn gimmick(&self) -> &str {
        &self.gimmick
    }

    /// Replace the gimmick search text.
    pub fn set_gimmick(&mut self, gimmick: impl Into<String>) {
        self.gimmick = gimmick.into();
    }

    /// The selected promotion, `None` meaning "all".
    pub fn promotion(&self) -> Option<PromotionId> {
        self.promotion
    }

    /// Select a promotion, or `None` for all.
    pub fn set_promotion(&mut self, promotion: Option<PromotionId>) {
        self.promotion = promotion;
    }

    /// Build the matcher for the current gimmick text.
    pub fn gimmick_matcher(&self) -> GimmickMatcher {
        GimmickMatcher::new(&self.gimmick)
    }

    /// Whether `item` passes the promotion filter.
    ///
    /// With no promotion selected every item passes, including items
    /// without promotion data.
    pub fn matches_promotion(&self, item: &RankItem) -> bool {
        match self.promotion {
            None => true,
            Some(selected) => item.promotion == Some(selected),
        }
    }

    /// Whether `item` passes both filters.
    pub fn matches(&self, item: &RankItem) -> bool {
        self.matches_promotion(item) && self.gimmick_matcher().matches(item)
    }
}

/// Case-insensitive literal substring matcher over an item's gimmicks.
///
/// The needle is lowercased once so a scan over the roster only lowercases
/// each haystack.  Search text is never interpreted as a pattern: `(`, `*`
/// and friends match themselves.
#[derive(Debug, Clone)]
pub struct GimmickMatcher {
    needle: String,
}

impl GimmickMatcher {
    /// Prepare a matcher for `query`.
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Whether `item`'s gimmicks contain the query.  An empty query matches
    /// everything.
    pub fn matches(&self, item: &RankItem) -> bool {
        self.needle.is_empty() || item.gimmicks.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(gimmicks: &str, promotion: Option<PromotionId>) -> RankItem {
        let item = RankItem::new(1, "Test", gimmicks);
        match promotion {
            Some(p) => item.with_promotion(p),
            None => item,
        }
    }

    #[test]
    fn empty_query_matches_all() {
        let m = GimmickMatcher::new("");
        assert!(m.matches(&item("", None)));
        assert!(m.matches(&item("Rainmaker", None)));
    }

    #[test]
    fn gimmick_match_is_case_insensitive() {
        let m = GimmickMatcher::new("RAIN");
        assert!(m.matches(&item("The Rainmaker", None)));
        assert!(!m.matches(&item("Stardust", None)));
    }

    #[test]
    fn gimmick_match_handles_non_ascii() {
        let m = GimmickMatcher::new("ÉLITE");
        assert!(m.matches(&item("The élite", None)));
        let m = GimmickMatcher::new("棚橋");
        assert!(m.matches(&item("Ace, 棚橋弘至", None)));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = GimmickMatcher::new("(");
        assert!(!m.matches(&item("Rainmaker", None)));
        assert!(m.matches(&item("Okada (Rainmaker)", None)));

        let m = GimmickMatcher::new(".*");
        assert!(!m.matches(&item("anything", None)));
    }

    #[test]
    fn no_promotion_selected_passes_everything() {
        let filter = FilterState::new();
        assert!(filter.matches_promotion(&item("", None)));
        assert!(filter.matches_promotion(&item("", Some(3))));
    }

    #[test]
    fn promotion_filter_requires_exact_id() {
        let filter = FilterState::new().with_promotion(Some(3));
        assert!(filter.matches_promotion(&item("", Some(3))));
        assert!(!filter.matches_promotion(&item("", Some(4))));
        assert!(!filter.matches_promotion(&item("", None)));
    }

    #[test]
    fn combined_filter_requires_both() {
        let filter = FilterState::new().with_gimmick("ace").with_promotion(Some(1));
        assert!(filter.matches(&item("The Ace", Some(1))));
        assert!(!filter.matches(&item("The Ace", Some(2))));
        assert!(!filter.matches(&item("Rainmaker", Some(1))));
    }
}
