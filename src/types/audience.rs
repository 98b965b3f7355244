use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed audience segments events are filtered and re-weighted for.
///
/// Declaration order is significant: recommendations are reported in the
/// order of [`Audience::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Audience {
    Kids,
    Teens,
    Families,
    Students,
    Adults,
    Seniors,
    Singles,
    #[serde(rename = "Date Night")]
    DateNight,
    Professionals,
    #[serde(rename = "Fitness & Active")]
    FitnessActive,
    #[serde(rename = "Arts & Culture")]
    ArtsCulture,
    #[serde(rename = "21+")]
    TwentyOnePlus,
}

impl Audience {
    pub const ALL: [Audience; 12] = [
        Audience::Kids,
        Audience::Teens,
        Audience::Families,
        Audience::Students,
        Audience::Adults,
        Audience::Seniors,
        Audience::Singles,
        Audience::DateNight,
        Audience::Professionals,
        Audience::FitnessActive,
        Audience::ArtsCulture,
        Audience::TwentyOnePlus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Kids => "Kids",
            Self::Teens => "Teens",
            Self::Families => "Families",
            Self::Students => "Students",
            Self::Adults => "Adults",
            Self::Seniors => "Seniors",
            Self::Singles => "Singles",
            Self::DateNight => "Date Night",
            Self::Professionals => "Professionals",
            Self::FitnessActive => "Fitness & Active",
            Self::ArtsCulture => "Arts & Culture",
            Self::TwentyOnePlus => "21+",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn parse(name: &str) -> Option<Audience> {
        Self::ALL.into_iter().find(|audience| audience.name() == name)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_display_name() {
        for audience in Audience::ALL {
            assert_eq!(Audience::parse(audience.name()), Some(audience));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_differently_cased_names() {
        assert_eq!(Audience::parse("Toddlers"), None);
        assert_eq!(Audience::parse("kids"), None);
        assert_eq!(Audience::parse(""), None);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Audience::DateNight).expect("audience should serialize");
        assert_eq!(json, "\"Date Night\"");
        let parsed: Audience = serde_json::from_str("\"21+\"").expect("audience should parse");
        assert_eq!(parsed, Audience::TwentyOnePlus);
    }
}
