use crate::types::audience::Audience;
use crate::types::config::PolicyConfig;
use crate::types::event::EventFeatures;

/// False for unknown audiences and for start hours on the audience's
/// exclusion list. Events without a start time always pass.
pub fn is_event_appropriate_for_audience(
    policy: &PolicyConfig,
    event: &EventFeatures,
    audience_name: &str,
) -> bool {
    let Some((_, profile)) = policy.profile(audience_name) else {
        tracing::debug!(audience = audience_name, "unrecognized audience; not eligible");
        return false;
    };
    let Some(hour) = event.start_hour() else {
        return true;
    };

    // "22:00" on the list excludes anything starting in hour "22".
    !profile
        .excluded_hours
        .iter()
        .any(|entry| entry.trim().starts_with(hour.as_str()))
}

/// Eligible audiences in declaration order.
pub fn get_audience_recommendations(policy: &PolicyConfig, event: &EventFeatures) -> Vec<Audience> {
    Audience::ALL
        .into_iter()
        .filter(|audience| is_event_appropriate_for_audience(policy, event, audience.name()))
        .collect()
}
