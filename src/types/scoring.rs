use crate::error::Result;
use crate::scoring::exclusions::ExclusionRule;
use crate::types::audience::Audience;
use crate::types::config::PolicyConfig;
use chrono::Utc;
use serde::Serialize;

pub type Score = f32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionVerdict {
    pub is_excluded: bool,
    pub reason: Option<String>,
    pub rule_id: Option<String>,
}

impl ExclusionVerdict {
    pub fn allowed() -> Self {
        Self {
            is_excluded: false,
            reason: None,
            rule_id: None,
        }
    }

    pub fn excluded(rule: &ExclusionRule) -> Self {
        Self {
            is_excluded: true,
            reason: Some(rule.reason.clone()),
            rule_id: Some(rule.id.clone()),
        }
    }
}

/// One event scored for one audience.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub audience: String,
    pub eligible: bool,
    /// Composite before the recurrence deduction.
    pub audience_score: Score,
    pub deduction: Score,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReport {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub exclusion: ExclusionVerdict,
    pub recommended_audiences: Vec<Audience>,
    pub scores: Vec<ScoreResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEvent {
    pub rank: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub score: Score,
}

/// A recompute run: every report carries the policy that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBatch<T> {
    pub generated_at: String,
    pub policy_version: String,
    pub policy_fingerprint: String,
    pub events: Vec<T>,
}

impl<T> ScoreBatch<T> {
    pub fn new(policy: &PolicyConfig, events: Vec<T>) -> Result<Self> {
        Ok(Self {
            generated_at: Utc::now().to_rfc3339(),
            policy_version: policy.policy.version.clone(),
            policy_fingerprint: policy.fingerprint()?,
            events,
        })
    }
}
