use crate::scoring::keywords::calculate_keyword_score;
use crate::types::config::PolicyConfig;
use crate::types::event::Rating;

/// Blend of the editorial ratings (weighted per audience) and the keyword
/// score, on 0-100. Unknown audiences get `base` back untouched.
pub fn calculate_audience_specific_score(
    policy: &PolicyConfig,
    base: Rating,
    audience_name: &str,
    community_vibe: Rating,
    family_fun: Rating,
    description: &str,
) -> f32 {
    let Some((audience, profile)) = policy.profile(audience_name) else {
        tracing::debug!(
            audience = audience_name,
            "unrecognized audience; passing base score through"
        );
        return base.value;
    };

    let weights = profile.weights();
    let weighted_ai_score =
        community_vibe.normalized() * weights.community + family_fun.normalized() * weights.family;
    let keyword_score = calculate_keyword_score(policy, description, audience_name);

    let blended = policy.policy.ai_weight * weighted_ai_score
        + policy.policy.keyword_weight * keyword_score;
    tracing::debug!(
        audience = %audience,
        weighted_ai_score,
        keyword_score,
        blended,
        "audience score composed"
    );
    blended.clamp(0.0, 100.0)
}
