//! Deterministic hand-off selection for the conversation layer.
//!
//! The platform's agent graph offers several therapy-technique agents; this
//! module picks which one a message should be handed to. The choice is a
//! keyword heuristic over the lower-cased message, with one hard rule: any
//! suicidality candidate from the trigger scan forces the crisis route
//! before any technique matching runs. Prompting and model invocation live
//! outside this crate.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::assessments::{AssessmentType, TriggerCandidate};

/// Support techniques the conversation layer can hand a message to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueRoute {
    Crisis,
    Memory,
    AntDetection,
    Dbt,
    Act,
    Cbt,
    General,
}

impl TechniqueRoute {
    pub const fn label(self) -> &'static str {
        match self {
            TechniqueRoute::Crisis => "crisis",
            TechniqueRoute::Memory => "memory",
            TechniqueRoute::AntDetection => "ant_detection",
            TechniqueRoute::Dbt => "dbt",
            TechniqueRoute::Act => "act",
            TechniqueRoute::Cbt => "cbt",
            TechniqueRoute::General => "general",
        }
    }
}

const MEMORY_PATTERNS: &[&str] = &[
    r"\bremember\b",
    r"\blast (session|time) we\b",
    r"\byou (said|told me)\b",
    r"\bmy (goal|plan) from\b",
];

const ANT_PATTERNS: &[&str] = &[
    r"\bi always (fail|mess|ruin)\b",
    r"\bi never (get|do) anything right\b",
    r"\beveryone (hates|is judging) me\b",
    r"\b(i'm|i am) (a|such a) failure\b",
    r"\bworst.{0,20}ever\b",
];

const DBT_PATTERNS: &[&str] = &[
    r"\boverwhelm(ed|ing)?\b",
    r"\bcan't control my (emotions|anger)\b",
    r"\b(rage|furious|explod(e|ing))\b",
    r"\burge(s)? to\b",
    r"\bdistress\b",
];

const ACT_PATTERNS: &[&str] = &[
    r"\bavoid(ing|ance)?\b",
    r"\bfeel(ing)? stuck\b",
    r"\bwhat (really )?matters to me\b",
    r"\bgo(ing)? numb\b",
    r"\bacceptance\b",
];

const CBT_PATTERNS: &[&str] = &[
    r"\bnegative thought(s)?\b",
    r"\bthought pattern(s)?\b",
    r"\breframe\b",
    r"\bkeep thinking\b",
    r"\bcatastroph(e|izing|ize)\b",
];

static ROUTE_TABLE: LazyLock<Vec<(TechniqueRoute, Vec<Regex>)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|pattern| Regex::new(pattern).expect("route pattern compiles"))
            .collect()
    };

    vec![
        (TechniqueRoute::Memory, compile(MEMORY_PATTERNS)),
        (TechniqueRoute::AntDetection, compile(ANT_PATTERNS)),
        (TechniqueRoute::Dbt, compile(DBT_PATTERNS)),
        (TechniqueRoute::Act, compile(ACT_PATTERNS)),
        (TechniqueRoute::Cbt, compile(CBT_PATTERNS)),
    ]
});

/// Pick the hand-off target for one message.
///
/// `candidates` is the output of the trigger scan for the same message; a
/// suicidality candidate short-circuits to [`TechniqueRoute::Crisis`].
pub fn route(message: &str, candidates: &[TriggerCandidate]) -> TechniqueRoute {
    if candidates
        .iter()
        .any(|candidate| candidate.assessment_type == AssessmentType::Columbia)
    {
        return TechniqueRoute::Crisis;
    }

    let text = message.to_lowercase();
    for (target, patterns) in ROUTE_TABLE.iter() {
        if patterns.iter().any(|pattern| pattern.is_match(&text)) {
            return *target;
        }
    }

    TechniqueRoute::General
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::{scan, TriggerReason};

    #[test]
    fn suicidality_candidate_forces_crisis_route() {
        let message = "I keep thinking about ending it";
        let candidates = scan(message);
        assert!(candidates
            .iter()
            .any(|candidate| candidate.assessment_type == AssessmentType::Columbia));
        assert_eq!(route(message, &candidates), TechniqueRoute::Crisis);
    }

    #[test]
    fn crisis_wins_over_technique_keywords() {
        let candidates = vec![TriggerCandidate {
            assessment_type: AssessmentType::Columbia,
            reason: TriggerReason::SuicidalityLanguageDetected,
            severity: 3,
        }];
        let routed = route("I want to reframe my negative thoughts", &candidates);
        assert_eq!(routed, TechniqueRoute::Crisis);
    }

    #[test]
    fn automatic_negative_thoughts_route_to_ant_detection() {
        let message = "I always fail at everything I try";
        assert_eq!(route(message, &scan(message)), TechniqueRoute::AntDetection);
    }

    #[test]
    fn emotion_regulation_language_routes_to_dbt() {
        let message = "I'm so overwhelmed I can't control my emotions today";
        assert_eq!(route(message, &scan(message)), TechniqueRoute::Dbt);
    }

    #[test]
    fn avoidance_language_routes_to_act() {
        let message = "I've been avoiding my friends and feeling stuck";
        assert_eq!(route(message, &scan(message)), TechniqueRoute::Act);
    }

    #[test]
    fn thought_work_routes_to_cbt() {
        let message = "These negative thoughts will not leave me alone";
        assert_eq!(route(message, &scan(message)), TechniqueRoute::Cbt);
    }

    #[test]
    fn recall_requests_route_to_memory() {
        let message = "Do you remember what we worked on before?";
        assert_eq!(route(message, &scan(message)), TechniqueRoute::Memory);
    }

    #[test]
    fn neutral_messages_fall_back_to_general() {
        let message = "The weather was nice on my walk today";
        assert!(scan(message).is_empty());
        assert_eq!(route(message, &scan(message)), TechniqueRoute::General);
    }
}
