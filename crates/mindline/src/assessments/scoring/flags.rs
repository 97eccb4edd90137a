//! Item-level risk-flag derivation, kept separate from band derivation so
//! each can be tested against its own boundary table. A low questionnaire
//! total never suppresses an item-level flag.

use super::super::catalog::PHQ9_SELF_HARM_ITEM;
use super::super::domain::{ItemResponse, RiskFlag};

const GAD7_SEVERE_ANXIETY_THRESHOLD: u32 = 15;

/// PHQ-9 flags come from the self-harm item alone: any endorsement flags
/// ideation, the maximum endorsement additionally flags intent.
pub(crate) fn phq9_flags(responses: &[ItemResponse]) -> Vec<RiskFlag> {
    let mut flags = Vec::new();
    if let Some(item) = responses
        .iter()
        .find(|response| response.question_id == PHQ9_SELF_HARM_ITEM)
    {
        if item.score >= 1 {
            flags.push(RiskFlag::SuicideIdeation);
            if item.score >= 3 {
                flags.push(RiskFlag::SuicideIntent);
            }
        }
    }
    flags
}

pub(crate) fn gad7_flags(total: u32) -> Vec<RiskFlag> {
    if total >= GAD7_SEVERE_ANXIETY_THRESHOLD {
        vec![RiskFlag::SevereAnxiety]
    } else {
        Vec::new()
    }
}
