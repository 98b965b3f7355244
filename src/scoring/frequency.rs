use crate::types::config::PolicyConfig;
use crate::types::event::{Frequency, Rating};

/// Score after the recurrence deduction, held within the policy floor and
/// ceiling. Unknown frequency classes lose nothing.
pub fn apply_frequency_deduction(policy: &PolicyConfig, base: Rating, frequency: &str) -> f32 {
    let deduction = deduction_for(policy, frequency);
    let settings = &policy.policy;
    // max/min rather than clamp: an unvalidated policy must not panic here.
    (base.normalized() - deduction)
        .max(settings.score_floor)
        .min(settings.score_ceiling)
}

pub fn deduction_for(policy: &PolicyConfig, frequency: &str) -> f32 {
    match Frequency::parse(frequency) {
        Some(frequency) => policy.frequency.deduction(frequency),
        None => {
            tracing::debug!(frequency, "unknown frequency class; no deduction");
            0.0
        }
    }
}
