use crate::types::scoring::{EventReport, RankedEvent, ScoreBatch};

pub fn scores_to_markdown(batch: &ScoreBatch<EventReport>) -> String {
    let mut output = String::new();
    output.push_str("# Funalytics Scores\n\n");
    push_header(&mut output, batch);

    if batch.events.is_empty() {
        output.push_str("- no events\n");
        return output;
    }

    for report in &batch.events {
        output.push_str(&format!("## {}\n\n", report.title));
        if report.exclusion.is_excluded {
            output.push_str(&format!(
                "Excluded by `{}`: {}\n\n",
                report.exclusion.rule_id.as_deref().unwrap_or("unknown"),
                report.exclusion.reason.as_deref().unwrap_or("no reason given")
            ));
            continue;
        }

        let recommended = report
            .recommended_audiences
            .iter()
            .map(|audience| audience.name())
            .collect::<Vec<_>>();
        output.push_str(&format!(
            "Recommended for: {}\n\n",
            if recommended.is_empty() {
                "none".to_string()
            } else {
                recommended.join(", ")
            }
        ));

        output.push_str("| audience | eligible | composite | deduction | score |\n");
        output.push_str("|---|---|---|---|---|\n");
        for result in &report.scores {
            output.push_str(&format!(
                "| {} | {} | {:.1} | {:.1} | {:.1} |\n",
                result.audience,
                if result.eligible { "yes" } else { "no" },
                result.audience_score,
                result.deduction,
                result.score
            ));
        }
        output.push('\n');
    }

    output
}

pub fn ranking_to_markdown(batch: &ScoreBatch<RankedEvent>, audience: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Funalytics Ranking: {audience}\n\n"));
    push_header(&mut output, batch);

    if batch.events.is_empty() {
        output.push_str("- no eligible events\n");
        return output;
    }

    for entry in &batch.events {
        output.push_str(&format!("{}. {} ({:.1})\n", entry.rank, entry.title, entry.score));
    }
    output
}

fn push_header<T>(output: &mut String, batch: &ScoreBatch<T>) {
    output.push_str(&format!(
        "Policy {} (`{}`), generated {}\n\n",
        batch.policy_version,
        short_fingerprint(&batch.policy_fingerprint),
        batch.generated_at
    ));
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::audience::Audience;
    use crate::types::scoring::{ExclusionVerdict, ScoreResult};

    fn batch<T>(events: Vec<T>) -> ScoreBatch<T> {
        ScoreBatch {
            generated_at: "2024-05-01T00:00:00+00:00".to_string(),
            policy_version: "funalytics-2024.1".to_string(),
            policy_fingerprint: "0123456789abcdef0123".to_string(),
            events,
        }
    }

    #[test]
    fn markdown_scores_contain_table_and_recommendations() {
        let report = EventReport {
            title: "Harvest Fair".to_string(),
            id: None,
            exclusion: ExclusionVerdict::allowed(),
            recommended_audiences: vec![Audience::Families, Audience::DateNight],
            scores: vec![ScoreResult {
                audience: "Families".to_string(),
                eligible: true,
                audience_score: 71.24,
                deduction: 5.0,
                score: 66.24,
            }],
        };

        let rendered = scores_to_markdown(&batch(vec![report]));
        assert!(rendered.contains("# Funalytics Scores"));
        assert!(rendered.contains("## Harvest Fair"));
        assert!(rendered.contains("Recommended for: Families, Date Night"));
        assert!(rendered.contains("| Families | yes | 71.2 | 5.0 | 66.2 |"));
        assert!(rendered.contains("`0123456789ab`"));
    }

    #[test]
    fn markdown_scores_explain_exclusions() {
        let report = EventReport {
            title: "Casino Night".to_string(),
            id: None,
            exclusion: ExclusionVerdict {
                is_excluded: true,
                reason: Some("no gambling".to_string()),
                rule_id: Some("gambling".to_string()),
            },
            recommended_audiences: Vec::new(),
            scores: Vec::new(),
        };

        let rendered = scores_to_markdown(&batch(vec![report]));
        assert!(rendered.contains("Excluded by `gambling`: no gambling"));
        assert!(!rendered.contains("| audience |"));
    }

    #[test]
    fn markdown_ranking_lists_entries_in_rank_order() {
        let entries = vec![
            RankedEvent {
                rank: 1,
                title: "Zoo Day".to_string(),
                id: None,
                score: 53.6,
            },
            RankedEvent {
                rank: 2,
                title: "Walk".to_string(),
                id: None,
                score: 10.0,
            },
        ];

        let rendered = ranking_to_markdown(&batch(entries), "Kids");
        assert!(rendered.contains("# Funalytics Ranking: Kids"));
        assert!(rendered.contains("1. Zoo Day (53.6)\n2. Walk (10.0)"));
    }

    #[test]
    fn markdown_ranking_handles_empty_batch() {
        let rendered = ranking_to_markdown(&batch(Vec::new()), "Seniors");
        assert!(rendered.contains("- no eligible events"));
    }
}
