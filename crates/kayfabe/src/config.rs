//! Rank list settings and locale resolution.

use kayfabe_rank::{PromotionId, Roster, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
use std::time::Duration;

/// Environment variables consulted for the locale, in priority order.
pub const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Errors from settings that cannot be applied to a roster.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("no promotion with id {0} in the roster")]
    UnknownPromotion(PromotionId),
}

/// Settings for one rank list session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankListConfig {
    /// Items per page.
    pub page_size: usize,
    /// Quiet period before a typed search runs.
    pub debounce: Duration,
    /// Locale tag used to pick the startup language.
    pub locale: String,
    /// Promotion selected at startup (`None` is "all").
    pub promotion: Option<PromotionId>,
    /// Search text applied at startup.
    pub gimmick: String,
    /// Page rendered at startup.
    pub page: usize,
}

impl Default for RankListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            locale: String::new(),
            promotion: None,
            gimmick: String::new(),
            page: 1,
        }
    }
}

impl RankListConfig {
    /// Check the settings against the roster they will be used with.
    pub fn validate(&self, roster: &Roster) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if let Some(id) = self.promotion {
            if roster.promotion(id).is_none() {
                return Err(ConfigError::UnknownPromotion(id));
            }
        }
        Ok(())
    }
}

/// Pick the locale: an explicit value first, then the first non-empty
/// variable from [`LOCALE_VARS`] as reported by `env`.  Empty when nothing is
/// set.
pub fn resolve_locale(
    explicit: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    if let Some(tag) = explicit.filter(|t| !t.trim().is_empty()) {
        return tag.trim().to_string();
    }
    LOCALE_VARS
        .iter()
        .filter_map(|var| env(var))
        .find(|value| !value.trim().is_empty())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// [`resolve_locale`] against the process environment.
pub fn locale_from_env(explicit: Option<&str>) -> String {
    resolve_locale(explicit, |var| std::env::var(var).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kayfabe_rank::{Promotion, RankItem};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn explicit_locale_wins() {
        let locale = resolve_locale(Some("fr-FR"), env(&[("LC_ALL", "ja_JP.UTF-8")]));
        assert_eq!(locale, "fr-FR");
    }

    #[test]
    fn env_priority_order() {
        let vars = env(&[("LANG", "en_US.UTF-8"), ("LC_MESSAGES", "ja_JP.UTF-8")]);
        assert_eq!(resolve_locale(None, vars), "ja_JP.UTF-8");

        let vars = env(&[("LC_ALL", ""), ("LANG", "de_DE")]);
        assert_eq!(resolve_locale(None, vars), "de_DE");
    }

    #[test]
    fn nothing_set_is_empty() {
        assert_eq!(resolve_locale(Some("  "), env(&[])), "");
    }

    #[test]
    fn validation() {
        let roster = Roster::new(
            vec![Promotion {
                id: 3,
                name: "DDT".into(),
                abbreviation: None,
            }],
            vec![RankItem::new(1, "HARASHIMA", "Ace").with_promotion(3)],
        )
        .unwrap();

        assert!(RankListConfig::default().validate(&roster).is_ok());

        let zero = RankListConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(&roster), Err(ConfigError::ZeroPageSize)));

        let unknown = RankListConfig {
            promotion: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            unknown.validate(&roster),
            Err(ConfigError::UnknownPromotion(4))
        ));
    }
}
