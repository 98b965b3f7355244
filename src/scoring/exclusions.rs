use crate::types::scoring::ExclusionVerdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Category equals one of `values`, ignoring case and surrounding space.
    Category,
    /// Description contains one of `values` as a case-insensitive substring.
    Keyword,
}

/// A listing rule that keeps an event off the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub id: String,
    pub reason: String,
    pub kind: MatchKind,
    pub values: Vec<String>,
}

impl ExclusionRule {
    pub fn category(id: &str, reason: &str, values: &[&str]) -> Self {
        Self::new(id, reason, MatchKind::Category, values)
    }

    pub fn keyword(id: &str, reason: &str, values: &[&str]) -> Self {
        Self::new(id, reason, MatchKind::Keyword, values)
    }

    fn new(id: &str, reason: &str, kind: MatchKind, values: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            reason: reason.to_string(),
            kind,
            values: values.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn matches(&self, category: &str, description: &str) -> bool {
        let values = self
            .values
            .iter()
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());
        match self.kind {
            MatchKind::Category => {
                let category = category.trim().to_lowercase();
                values.into_iter().any(|value| value == category)
            }
            MatchKind::Keyword => {
                let description = description.to_lowercase();
                values.into_iter().any(|value| description.contains(&value))
            }
        }
    }
}

/// First matching rule in input order wins.
pub fn validate_event_exclusions(
    category: &str,
    description: &str,
    rules: &[ExclusionRule],
) -> ExclusionVerdict {
    match rules.iter().find(|rule| rule.matches(category, description)) {
        Some(rule) => {
            tracing::debug!(rule_id = %rule.id, category, "event excluded");
            ExclusionVerdict::excluded(rule)
        }
        None => ExclusionVerdict::allowed(),
    }
}
