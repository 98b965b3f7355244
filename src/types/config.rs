use crate::error::{FunalyticsError, Result};
use crate::scoring::exclusions::ExclusionRule;
use crate::types::audience::Audience;
use crate::types::event::Frequency;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_POLICY_VERSION: &str = "funalytics-2024.1";

/// The complete scoring policy: audience table, ladders, blend weights and
/// deductions. Built once, validated, then passed by reference into every
/// scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub policy: PolicySettings,
    pub frequency: FrequencyDeductions,
    pub audiences: BTreeMap<String, AudienceProfile>,
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_ai_weight")]
    pub ai_weight: f32,
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f32,
    #[serde(default = "default_keyword_score")]
    pub default_keyword_score: f32,
    #[serde(default = "default_score_floor")]
    pub score_floor: f32,
    #[serde(default = "default_score_ceiling")]
    pub score_ceiling: f32,
}

fn default_version() -> String {
    DEFAULT_POLICY_VERSION.to_string()
}

fn default_ai_weight() -> f32 {
    0.6
}

fn default_keyword_weight() -> f32 {
    0.4
}

fn default_keyword_score() -> f32 {
    50.0
}

fn default_score_floor() -> f32 {
    10.0
}

fn default_score_ceiling() -> f32 {
    100.0
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            ai_weight: default_ai_weight(),
            keyword_weight: default_keyword_weight(),
            default_keyword_score: default_keyword_score(),
            score_floor: default_score_floor(),
            score_ceiling: default_score_ceiling(),
        }
    }
}

/// Points removed from a 0-100 score for recurring events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDeductions {
    #[serde(default)]
    pub once: f32,
    #[serde(default = "default_daily")]
    pub daily: f32,
    #[serde(default = "default_weekly")]
    pub weekly: f32,
    #[serde(default = "default_monthly")]
    pub monthly: f32,
    #[serde(default = "default_yearly")]
    pub yearly: f32,
}

fn default_daily() -> f32 {
    40.0
}

fn default_weekly() -> f32 {
    25.0
}

fn default_monthly() -> f32 {
    15.0
}

fn default_yearly() -> f32 {
    5.0
}

impl Default for FrequencyDeductions {
    fn default() -> Self {
        Self {
            once: 0.0,
            daily: default_daily(),
            weekly: default_weekly(),
            monthly: default_monthly(),
            yearly: default_yearly(),
        }
    }
}

impl FrequencyDeductions {
    pub fn deduction(&self, frequency: Frequency) -> f32 {
        match frequency {
            Frequency::Once => self.once,
            Frequency::Daily => self.daily,
            Frequency::Weekly => self.weekly,
            Frequency::Monthly => self.monthly,
            Frequency::Yearly => self.yearly,
        }
    }

    fn entries(&self) -> [(&'static str, f32); 5] {
        [
            ("once", self.once),
            ("daily", self.daily),
            ("weekly", self.weekly),
            ("monthly", self.monthly),
            ("yearly", self.yearly),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudienceWeights {
    pub community: f32,
    pub family: f32,
}

impl Default for AudienceWeights {
    fn default() -> Self {
        Self {
            community: 0.5,
            family: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceProfile {
    pub min_age: u8,
    pub max_age: u8,
    #[serde(default)]
    pub excluded_hours: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<AudienceWeights>,
    /// Scoring ladder. Empty means the audience has no curated keywords.
    #[serde(default)]
    pub keywords: BTreeMap<String, u32>,
}

impl AudienceProfile {
    fn new(min_age: u8, max_age: u8, excluded_hours: &[&str]) -> Self {
        Self {
            min_age,
            max_age,
            excluded_hours: excluded_hours.iter().map(ToString::to_string).collect(),
            weights: None,
            keywords: BTreeMap::new(),
        }
    }

    fn with_weights(mut self, community: f32, family: f32) -> Self {
        self.weights = Some(AudienceWeights { community, family });
        self
    }

    fn with_ladder(mut self, ladder: &[(&str, u32)]) -> Self {
        self.keywords = ladder
            .iter()
            .map(|(keyword, points)| (keyword.to_string(), *points))
            .collect();
        self
    }

    pub fn weights(&self) -> AudienceWeights {
        self.weights.unwrap_or_default()
    }

    pub fn has_ladder(&self) -> bool {
        !self.keywords.is_empty()
    }
}

const LATE_NIGHT: [&str; 5] = ["00:00", "01:00", "02:00", "03:00", "04:00"];

fn late_night_plus(extra: &[&'static str]) -> Vec<&'static str> {
    extra.iter().copied().chain(LATE_NIGHT).collect()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let mut audiences = BTreeMap::new();
        let mut insert = |audience: Audience, profile: AudienceProfile| {
            audiences.insert(audience.name().to_string(), profile);
        };

        insert(
            Audience::Kids,
            AudienceProfile::new(0, 12, &late_night_plus(&["21:00", "22:00", "23:00", "05:00"]))
                .with_weights(0.4, 0.6)
                .with_ladder(&[
                    ("kids", 15),
                    ("children", 15),
                    ("family", 10),
                    ("playground", 10),
                    ("storytime", 15),
                    ("puppet", 10),
                    ("crafts", 10),
                    ("face painting", 15),
                    ("petting zoo", 20),
                    ("educational", 10),
                    ("games", 5),
                    ("cartoon", 10),
                ]),
        );
        insert(
            Audience::Teens,
            AudienceProfile::new(13, 17, &late_night_plus(&["23:00"]))
                .with_weights(0.7, 0.3)
                .with_ladder(&[
                    ("teen", 15),
                    ("youth", 15),
                    ("gaming", 15),
                    ("music", 10),
                    ("concert", 10),
                    ("skate", 15),
                    ("esports", 20),
                    ("dance", 10),
                    ("workshop", 5),
                    ("anime", 15),
                ]),
        );
        insert(
            Audience::Families,
            AudienceProfile::new(0, 99, &late_night_plus(&["22:00", "23:00"]))
                .with_weights(0.3, 0.7)
                .with_ladder(&[
                    ("family", 20),
                    ("kids", 10),
                    ("all ages", 15),
                    ("picnic", 10),
                    ("festival", 10),
                    ("park", 5),
                    ("parade", 15),
                    ("fair", 10),
                    ("outdoor", 5),
                    ("carnival", 15),
                ]),
        );
        insert(Audience::Students, AudienceProfile::new(18, 25, &[]));
        insert(
            Audience::Adults,
            AudienceProfile::new(18, 99, &[])
                .with_weights(0.8, 0.2)
                .with_ladder(&[
                    ("wine", 15),
                    ("beer", 15),
                    ("cocktail", 15),
                    ("networking", 10),
                    ("comedy", 10),
                    ("live music", 15),
                    ("tasting", 10),
                    ("jazz", 10),
                    ("lecture", 5),
                    ("trivia", 10),
                ]),
        );
        insert(
            Audience::Seniors,
            AudienceProfile::new(65, 99, &late_night_plus(&["23:00"])),
        );
        insert(Audience::Singles, AudienceProfile::new(21, 45, &[]));
        insert(
            Audience::DateNight,
            AudienceProfile::new(21, 99, &["05:00", "06:00", "07:00", "08:00", "09:00"]),
        );
        insert(Audience::Professionals, AudienceProfile::new(22, 65, &LATE_NIGHT));
        insert(Audience::FitnessActive, AudienceProfile::new(16, 70, &[]));
        insert(
            Audience::ArtsCulture,
            AudienceProfile::new(0, 99, &["02:00", "03:00", "04:00"]),
        );
        insert(
            Audience::TwentyOnePlus,
            AudienceProfile::new(21, 99, &["06:00", "07:00", "08:00", "09:00", "10:00"]),
        );

        Self {
            policy: PolicySettings::default(),
            frequency: FrequencyDeductions::default(),
            audiences,
            exclusions: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Profile for a known audience name; `None` for anything else.
    pub fn profile(&self, audience_name: &str) -> Option<(Audience, &AudienceProfile)> {
        let audience = Audience::parse(audience_name)?;
        self.audiences
            .get(audience.name())
            .map(|profile| (audience, profile))
    }

    /// SHA-256 of the canonical JSON form, for keying cached scores.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&canonical);
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    pub fn validate(&self) -> Result<()> {
        let settings = &self.policy;
        if settings.version.trim().is_empty() {
            return Err(FunalyticsError::ConfigParse(
                "policy.version cannot be empty".to_string(),
            ));
        }
        for (key, weight) in [
            ("ai_weight", settings.ai_weight),
            ("keyword_weight", settings.keyword_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(FunalyticsError::ConfigParse(format!(
                    "policy.{key} must be between 0.0 and 1.0"
                )));
            }
        }
        let blend_sum = settings.ai_weight + settings.keyword_weight;
        if (blend_sum - 1.0).abs() > 0.001 {
            return Err(FunalyticsError::ConfigParse(format!(
                "policy.ai_weight and policy.keyword_weight must sum to 1.0 (found {:.3})",
                blend_sum
            )));
        }
        for (key, value) in [
            ("default_keyword_score", settings.default_keyword_score),
            ("score_floor", settings.score_floor),
            ("score_ceiling", settings.score_ceiling),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(FunalyticsError::ConfigParse(format!(
                    "policy.{key} must be between 0 and 100"
                )));
            }
        }
        if settings.score_floor > settings.score_ceiling {
            return Err(FunalyticsError::ConfigParse(format!(
                "policy.score_floor ({}) cannot exceed policy.score_ceiling ({})",
                settings.score_floor, settings.score_ceiling
            )));
        }

        for (frequency, deduction) in self.frequency.entries() {
            if !(0.0..=100.0).contains(&deduction) {
                return Err(FunalyticsError::ConfigParse(format!(
                    "frequency.{frequency} deduction must be between 0 and 100"
                )));
            }
        }

        let unknown = self
            .audiences
            .keys()
            .filter(|name| Audience::parse(name).is_none())
            .cloned()
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences contains unknown audience(s): {}",
                unknown.join(", ")
            )));
        }
        let missing = Audience::ALL
            .iter()
            .filter(|audience| !self.audiences.contains_key(audience.name()))
            .map(|audience| audience.name())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences is missing: {}",
                missing.join(", ")
            )));
        }

        for (name, profile) in &self.audiences {
            validate_audience_profile(name, profile)?;
        }

        validate_exclusion_rules(&self.exclusions)
    }
}

fn validate_audience_profile(name: &str, profile: &AudienceProfile) -> Result<()> {
    if profile.min_age > profile.max_age {
        return Err(FunalyticsError::ConfigParse(format!(
            "audiences.\"{name}\".min_age cannot exceed max_age"
        )));
    }
    if profile
        .excluded_hours
        .iter()
        .any(|entry| entry.trim().is_empty())
    {
        return Err(FunalyticsError::ConfigParse(format!(
            "audiences.\"{name}\".excluded_hours entries must be non-empty"
        )));
    }
    if let Some(weights) = profile.weights {
        if !(0.0..=1.0).contains(&weights.community) || !(0.0..=1.0).contains(&weights.family) {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences.\"{name}\".weights values must be between 0.0 and 1.0"
            )));
        }
        let sum = weights.community + weights.family;
        if (sum - 1.0).abs() > 0.001 {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences.\"{name}\".weights must sum to 1.0 (found {:.3})",
                sum
            )));
        }
    }
    for (keyword, points) in &profile.keywords {
        if keyword.trim().is_empty() {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences.\"{name}\".keywords cannot contain an empty keyword"
            )));
        }
        if *keyword != keyword.to_lowercase() {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences.\"{name}\".keywords entry '{keyword}' must be lowercase"
            )));
        }
        if *points == 0 {
            return Err(FunalyticsError::ConfigParse(format!(
                "audiences.\"{name}\".keywords entry '{keyword}' must be worth at least 1 point"
            )));
        }
    }
    Ok(())
}

fn validate_exclusion_rules(rules: &[ExclusionRule]) -> Result<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        let id = rule.id.trim();
        if id.is_empty() {
            return Err(FunalyticsError::ConfigParse(
                "exclusions entries must have a non-empty id".to_string(),
            ));
        }
        if !seen.insert(id.to_string()) {
            return Err(FunalyticsError::ConfigParse(format!(
                "exclusions contains duplicate rule id: {id}"
            )));
        }
        if rule
            .values
            .iter().all(|value| value.trim().is_empty()) {
            return Err(FunalyticsError::ConfigParse(format!(
                "exclusions rule '{id}' must list at least one value"
            )));
        }
    }
    Ok(())
}
