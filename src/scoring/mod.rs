pub mod composition;
pub mod eligibility;
pub mod exclusions;
pub mod frequency;
pub mod keywords;

use crate::types::audience::Audience;
use crate::types::config::PolicyConfig;
use crate::types::event::{EventFeatures, Rating};
use crate::types::scoring::{EventReport, RankedEvent, ScoreResult};
use std::cmp::Ordering;

pub use composition::calculate_audience_specific_score;
pub use eligibility::{get_audience_recommendations, is_event_appropriate_for_audience};
pub use exclusions::validate_event_exclusions;
pub use frequency::apply_frequency_deduction;
pub use keywords::calculate_keyword_score;

pub fn score_event(policy: &PolicyConfig, event: &EventFeatures, audience_name: &str) -> ScoreResult {
    let eligible = is_event_appropriate_for_audience(policy, event, audience_name);
    let audience_score = calculate_audience_specific_score(
        policy,
        event.base_rating(),
        audience_name,
        event.community_vibe(),
        event.family_fun(),
        &event.description,
    );
    // The composite is already 0-100; re-inferring its scale would inflate
    // composites at or below 10.
    let score = apply_frequency_deduction(policy, Rating::percent(audience_score), &event.frequency);

    ScoreResult {
        audience: audience_name.to_string(),
        eligible,
        audience_score,
        deduction: frequency::deduction_for(policy, &event.frequency),
        score,
    }
}

/// Exclusion check, then one score per audience in declaration order.
pub fn score_all_audiences(policy: &PolicyConfig, event: &EventFeatures) -> EventReport {
    let exclusion = validate_event_exclusions(&event.category, &event.description, &policy.exclusions);
    if exclusion.is_excluded {
        return EventReport {
            title: event.title.clone(),
            id: event.id.clone(),
            exclusion,
            recommended_audiences: Vec::new(),
            scores: Vec::new(),
        };
    }

    let scores = Audience::ALL
        .iter()
        .map(|audience| score_event(policy, event, audience.name()))
        .collect();

    EventReport {
        title: event.title.clone(),
        id: event.id.clone(),
        exclusion,
        recommended_audiences: get_audience_recommendations(policy, event),
        scores,
    }
}

/// Display order for one audience: highest score first, then title
/// (case-insensitive), then input position. Excluded and ineligible
/// events are dropped; an unknown audience yields nothing.
pub fn rank_events(
    policy: &PolicyConfig,
    events: &[EventFeatures],
    audience_name: &str,
) -> Vec<RankedEvent> {
    if Audience::parse(audience_name).is_none() {
        tracing::debug!(audience = audience_name, "unrecognized audience; nothing to rank");
        return Vec::new();
    }

    let mut scored = events
        .iter()
        .filter(|event| {
            !validate_event_exclusions(&event.category, &event.description, &policy.exclusions)
                .is_excluded
        })
        .map(|event| (event, score_event(policy, event, audience_name)))
        .filter(|(_, result)| result.eligible)
        .collect::<Vec<_>>();

    // sort_by is stable, so equal keys keep input order.
    scored.sort_by(|(left_event, left), (right_event, right)| {
        right
            .score
            .partial_cmp(&left.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                left_event
                    .title
                    .to_lowercase()
                    .cmp(&right_event.title.to_lowercase())
            })
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (event, result))| RankedEvent {
            rank: index + 1,
            title: event.title.clone(),
            id: event.id.clone(),
            score: result.score,
        })
        .collect()
}
