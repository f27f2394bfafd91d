//! Roster data model and JSON loading.
//!
//! A [`Roster`] is the ranked list as it arrives from the page compiler: a
//! promotion catalogue plus wrestlers in rank order.  Loading validates the
//! document so the filtering engine can assume ranks are unique and every
//! promotion reference resolves.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Identifier of a promotion (the organization a wrestler works for).
pub type PromotionId = u32;

/// Errors raised while loading or validating a roster document.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The roster file could not be read.
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    /// The roster document is not valid JSON for the expected shape.
    #[error("malformed roster: {0}")]
    Json(#[from] serde_json::Error),
    /// Two wrestlers share the same rank.
    #[error("rank {0} is assigned to more than one wrestler")]
    DuplicateRank(u32),
    /// Ranks are 1-based.
    #[error("wrestler {0:?} has rank 0; ranks start at 1")]
    ZeroRank(String),
    /// A wrestler references a promotion missing from the catalogue.
    #[error("wrestler {name:?} references unknown promotion {promotion}")]
    UnknownPromotion {
        /// Display name of the offending wrestler.
        name: String,
        /// The dangling promotion id.
        promotion: PromotionId,
    },
}

/// A promotion that wrestlers can be filtered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Stable identifier referenced by [`RankItem::promotion`].
    pub id: PromotionId,
    /// Full display name.
    pub name: String,
    /// Short label such as `NJPW`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

impl Promotion {
    /// The label shown on selector controls: the abbreviation when present.
    pub fn label(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }
}

/// One ranked row of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankItem {
    /// 1-based position in the ranking.  Doubles as the item id.
    pub rank: u32,
    /// Display name.
    pub name: String,
    /// Searchable free-text tags, already joined into one string.
    #[serde(default, deserialize_with = "deserialize_gimmicks")]
    pub gimmicks: String,
    /// Promotion the wrestler is signed to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionId>,
    /// Ranking score, if the compiler exported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl RankItem {
    /// Build an item with no promotion and no score.
    pub fn new(rank: u32, name: impl Into<String>, gimmicks: impl Into<String>) -> Self {
        Self {
            rank,
            name: name.into(),
            gimmicks: gimmicks.into(),
            promotion: None,
            score: None,
        }
    }

    /// Attach a promotion id.
    pub fn with_promotion(mut self, promotion: PromotionId) -> Self {
        self.promotion = Some(promotion);
        self
    }

    /// Attach a score.
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Gimmicks may be exported as one string or as a list of aliases.
#[derive(Deserialize)]
#[serde(untagged)]
enum GimmickField {
    One(String),
    Many(Vec<String>),
}

fn deserialize_gimmicks<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match GimmickField::deserialize(deserializer)? {
        GimmickField::One(s) => s,
        GimmickField::Many(list) => list.join(", "),
    })
}

/// The full ranked list plus its promotion catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Every promotion that may appear as a filter.
    #[serde(default)]
    pub promotions: Vec<Promotion>,
    /// Ranked items, sorted by rank after validation.
    #[serde(rename = "wrestlers")]
    pub items: Vec<RankItem>,
}

impl Roster {
    /// Build and validate a roster from parts.
    pub fn new(promotions: Vec<Promotion>, items: Vec<RankItem>) -> Result<Self, RosterError> {
        let mut roster = Self { promotions, items };
        roster.validate()?;
        Ok(roster)
    }

    /// Parse and validate a roster from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let mut roster: Roster = serde_json::from_str(json)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Read, parse and validate a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let roster = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            items = roster.items.len(),
            promotions = roster.promotions.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// Number of ranked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the roster has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a promotion by id.
    pub fn promotion(&self, id: PromotionId) -> Option<&Promotion> {
        self.promotions.iter().find(|p| p.id == id)
    }

    fn validate(&mut self) -> Result<(), RosterError> {
        let known: HashSet<PromotionId> = self.promotions.iter().map(|p| p.id).collect();
        let mut seen = HashSet::with_capacity(self.items.len());

        for item in &self.items {
            if item.rank == 0 {
                return Err(RosterError::ZeroRank(item.name.clone()));
            }
            if !seen.insert(item.rank) {
                return Err(RosterError::DuplicateRank(item.rank));
            }
            if let Some(promotion) = item.promotion {
                if !known.contains(&promotion) {
                    return Err(RosterError::UnknownPromotion {
                        name: item.name.clone(),
                        promotion,
                    });
                }
            }
        }

        self.items.sort_by_key(|item| item.rank);

        if let Some(gap) = self
            .items
            .iter()
            .enumerate()
            .find(|(i, item)| item.rank as usize != i + 1)
        {
            tracing::warn!(rank = gap.1.rank, "roster ranks are not contiguous");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "promotions": [
            { "id": 1, "name": "New Japan Pro-Wrestling", "abbreviation": "NJPW" },
            { "id": 2, "name": "DDT Pro-Wrestling" }
        ],
        "wrestlers": [
            { "rank": 2, "name": "Tetsuya Naito", "gimmicks": ["Naito", "L.I.J."], "promotion": 1 },
            { "rank": 1, "name": "Kazuchika Okada", "gimmicks": "Rainmaker", "promotion": 1, "score": 4021 },
            { "rank": 3, "name": "Yoshihiko", "gimmicks": "" }
        ]
    }"#;

    #[test]
    fn parses_and_sorts_by_rank() {
        let roster = Roster::from_json(SAMPLE).unwrap();
        let ranks: Vec<u32> = roster.items.iter().map(|i| i.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(roster.items[0].score, Some(4021));
        assert_eq!(roster.items[2].promotion, None);
    }

    #[test]
    fn gimmick_lists_are_joined() {
        let roster = Roster::from_json(SAMPLE).unwrap();
        assert_eq!(roster.items[1].gimmicks, "Naito, L.I.J.");
        assert_eq!(roster.items[0].gimmicks, "Rainmaker");
    }

    #[test]
    fn promotion_label_prefers_abbreviation() {
        let roster = Roster::from_json(SAMPLE).unwrap();
        assert_eq!(roster.promotion(1).unwrap().label(), "NJPW");
        assert_eq!(roster.promotion(2).unwrap().label(), "DDT Pro-Wrestling");
        assert!(roster.promotion(9).is_none());
    }

    #[test]
    fn duplicate_rank_rejected() {
        let err = Roster::new(
            vec![],
            vec![RankItem::new(1, "A", ""), RankItem::new(1, "B", "")],
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::DuplicateRank(1)));
    }

    #[test]
    fn zero_rank_rejected() {
        let err = Roster::new(vec![], vec![RankItem::new(0, "A", "")]).unwrap_err();
        assert!(matches!(err, RosterError::ZeroRank(name) if name == "A"));
    }

    #[test]
    fn unknown_promotion_rejected() {
        let err = Roster::new(vec![], vec![RankItem::new(1, "A", "").with_promotion(5)])
            .unwrap_err();
        match err {
            RosterError::UnknownPromotion { name, promotion } => {
                assert_eq!(name, "A");
                assert_eq!(promotion, 5);
            }
            other => panic!("Expected UnknownPromotion, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Roster::from_json("{ \"wrestlers\": 3 }").unwrap_err();
        assert!(matches!(err, RosterError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Roster::load("/nonexistent/kayfabe/roster.json").unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
    }
}
