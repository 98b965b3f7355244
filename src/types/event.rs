use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Case-insensitive; anything else is `None` and earns no deduction.
    pub fn parse(input: &str) -> Option<Frequency> {
        match input.trim().to_ascii_lowercase().as_str() {
            "once" => Some(Self::Once),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    /// Values at or below 10 are read as 0-10 and scaled up; larger values
    /// are taken as 0-100. A 0-100 rating of exactly 10 is ambiguous here.
    #[default]
    Auto,
    TenPoint,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub value: f32,
    pub scale: RatingScale,
}

impl Rating {
    pub fn new(value: f32, scale: RatingScale) -> Self {
        Self { value, scale }
    }

    pub fn auto(value: f32) -> Self {
        Self::new(value, RatingScale::Auto)
    }

    pub fn ten_point(value: f32) -> Self {
        Self::new(value, RatingScale::TenPoint)
    }

    pub fn percent(value: f32) -> Self {
        Self::new(value, RatingScale::Percent)
    }

    /// Value on the 0-100 scale. Not clamped; non-finite input reads as 0.
    pub fn normalized(self) -> f32 {
        if !self.value.is_finite() {
            return 0.0;
        }
        match self.scale {
            RatingScale::Auto if self.value <= 10.0 => self.value * 10.0,
            RatingScale::Auto | RatingScale::Percent => self.value,
            RatingScale::TenPoint => self.value * 10.0,
        }
    }
}

impl From<f32> for Rating {
    fn from(value: f32) -> Self {
        Self::auto(value)
    }
}

/// An event record as supplied by the listings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFeatures {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default)]
    pub community_vibe: f32,
    #[serde(default)]
    pub family_fun: f32,
    #[serde(default)]
    pub base_score: Option<f32>,
    #[serde(default)]
    pub rating_scale: RatingScale,
}

fn default_frequency() -> String {
    "once".to_string()
}

impl EventFeatures {
    pub fn community_vibe(&self) -> Rating {
        Rating::new(self.community_vibe, self.rating_scale)
    }

    pub fn family_fun(&self) -> Rating {
        Rating::new(self.family_fun, self.rating_scale)
    }

    /// Editorial base score, or the mean of the two normalised ratings.
    pub fn base_rating(&self) -> Rating {
        match self.base_score {
            Some(score) => Rating::new(score, self.rating_scale),
            None => Rating::percent(
                (self.community_vibe().normalized() + self.family_fun().normalized()) / 2.0,
            ),
        }
    }

    /// Two-character hour prefix of `start_time`, zero-padding "9:30" to "09".
    pub fn start_hour(&self) -> Option<String> {
        let raw = self.start_time.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let hour = match raw.split_once(':') {
            Some((hour, _)) if hour.len() == 1 => format!("0{hour}"),
            _ => raw.chars().take(2).collect(),
        };
        Some(hour)
    }

    pub fn label(&self) -> &str {
        match &self.id {
            Some(id) if self.title.is_empty() => id,
            _ => &self.title,
        }
    }
}
