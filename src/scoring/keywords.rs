use crate::types::config::PolicyConfig;

/// Sum of ladder points for every keyword found in `text`, capped at 100.
///
/// Matching is plain substring containment on the lowercased text, so
/// "kids" also hits "kidsfest". A keyword counts once however often it
/// appears. Audiences without a ladder get the policy's neutral default.
pub fn calculate_keyword_score(policy: &PolicyConfig, text: &str, audience_name: &str) -> f32 {
    let ladder = match policy.profile(audience_name) {
        Some((_, profile)) if profile.has_ladder() => &profile.keywords,
        _ => {
            tracing::debug!(
                audience = audience_name,
                "no keyword ladder; using default keyword score"
            );
            return policy.policy.default_keyword_score;
        }
    };

    let haystack = text.to_lowercase();
    let total: u32 = ladder
        .iter()
        .filter(|(keyword, _)| haystack.contains(keyword.as_str()))
        .map(|(keyword, points)| {
            tracing::trace!(audience = audience_name, keyword = %keyword, points, "keyword hit");
            *points
        })
        .fold(0, u32::saturating_add);

    (total as f32).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audiences_without_ladder_get_default() {
        let policy = PolicyConfig::default();
        assert_eq!(calculate_keyword_score(&policy, "kids storytime", "Seniors"), 50.0);
        assert_eq!(calculate_keyword_score(&policy, "anything", "Toddlers"), 50.0);
    }

    #[test]
    fn empty_text_scores_zero_for_laddered_audience() {
        let policy = PolicyConfig::default();
        assert_eq!(calculate_keyword_score(&policy, "", "Kids"), 0.0);
    }

    #[test]
    fn keywords_accumulate_case_insensitively() {
        let policy = PolicyConfig::default();
        let score = calculate_keyword_score(&policy, "Petting Zoo and STORYTIME", "Kids");
        assert_eq!(score, 35.0);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let policy = PolicyConfig::default();
        let once = calculate_keyword_score(&policy, "puppet show", "Kids");
        let many = calculate_keyword_score(&policy, "puppet puppet puppet", "Kids");
        assert_eq!(once, many);
    }

    #[test]
    fn substring_inside_longer_word_counts() {
        let policy = PolicyConfig::default();
        assert_eq!(calculate_keyword_score(&policy, "winery tour", "Adults"), 15.0);
    }

    #[test]
    fn total_is_capped_at_one_hundred() {
        let policy = PolicyConfig::default();
        let text = "kids children family playground storytime puppet crafts face painting \
                    petting zoo educational games cartoon";
        assert_eq!(calculate_keyword_score(&policy, text, "Kids"), 100.0);
    }
}
