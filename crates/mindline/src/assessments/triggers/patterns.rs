//! Keyword scanning for assessment trigger candidates.
//!
//! Three independent pattern groups run over the lower-cased message, one
//! per instrument domain. Every pattern carries a 1-4 weight; a group's
//! candidate takes the maximum weight matched, never a sum, so several weak
//! signals cannot outrank one strong one. This is a deliberately simple
//! heuristic, not a classifier.

use std::sync::LazyLock;

use regex::Regex;

use super::super::domain::{AssessmentType, TriggerCandidate, TriggerReason};

const DEPRESSION_PATTERNS: &[(&str, u8)] = &[
    (r"\b(depress(ed|ing)?|hopeless|worthless|empty)\b", 2),
    (r"\b(cannot|can't) enjoy\b", 2),
    (r"\b(fatigued?|exhausted?|tired all the time)\b", 1),
];

const ANXIETY_PATTERNS: &[(&str, u8)] = &[
    (r"\b(anxiet(y|ies)|anxious|panic attack)\b", 2),
    (r"\b(worry|worried|overthink(ing)?)\b", 1),
    (r"\b(restless|on edge|nervous)\b", 1),
];

const SUICIDALITY_PATTERNS: &[(&str, u8)] = &[
    (r"\b(suicid(al|e)|kill(ing)? myself|end(ing)? my life)\b", 3),
    (r"\b(self[- ]harm|hurt(ing)? myself on purpose)\b", 3),
    (r"\b(thinking|think|thought) about ending it\b", 3),
    (r"\b(no reason to live|can't go on|end(ing)? it all)\b", 2),
    (r"\b(i have a plan|worked out how to)\b", 4),
];

struct PatternGroup {
    assessment_type: AssessmentType,
    reason: TriggerReason,
    patterns: Vec<(Regex, u8)>,
}

impl PatternGroup {
    fn compile(
        assessment_type: AssessmentType,
        reason: TriggerReason,
        patterns: &[(&str, u8)],
    ) -> Self {
        let patterns = patterns
            .iter()
            .map(|(pattern, weight)| {
                (
                    Regex::new(pattern).expect("symptom pattern compiles"),
                    *weight,
                )
            })
            .collect();

        Self {
            assessment_type,
            reason,
            patterns,
        }
    }

    fn strongest_match(&self, text: &str) -> Option<u8> {
        self.patterns
            .iter()
            .filter(|(pattern, _)| pattern.is_match(text))
            .map(|(_, weight)| *weight)
            .max()
    }
}

static GROUPS: LazyLock<[PatternGroup; 3]> = LazyLock::new(|| {
    [
        PatternGroup::compile(
            AssessmentType::Phq9,
            TriggerReason::DepressiveSymptomsDetected,
            DEPRESSION_PATTERNS,
        ),
        PatternGroup::compile(
            AssessmentType::Gad7,
            TriggerReason::AnxietySymptomsDetected,
            ANXIETY_PATTERNS,
        ),
        PatternGroup::compile(
            AssessmentType::Columbia,
            TriggerReason::SuicidalityLanguageDetected,
            SUICIDALITY_PATTERNS,
        ),
    ]
});

/// Return candidate assessments suggested by a conversation snippet.
///
/// Groups are independent: one message can raise zero to three candidates.
pub fn scan(message: &str) -> Vec<TriggerCandidate> {
    let text = message.to_lowercase();

    GROUPS
        .iter()
        .filter_map(|group| {
            group.strongest_match(&text).map(|severity| TriggerCandidate {
                assessment_type: group.assessment_type,
                reason: group.reason,
                severity,
            })
        })
        .collect()
}
