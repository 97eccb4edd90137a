//! Severity band tables and the Columbia precedence ladder.
//!
//! PHQ-9 and GAD-7 band on the questionnaire total through an ordered list
//! of upper bounds scanned first-match-wins, which keeps every cut-point
//! auditable in one place. The Columbia screen never bands on its total:
//! risk is decided purely by which items were answered "yes", in strict
//! precedence order, because a single behavioral answer outranks any
//! combination of lower-severity ones.

use std::collections::BTreeMap;

use super::super::catalog::{
    CSSRS_ACTIVE_THOUGHTS, CSSRS_BEHAVIOR, CSSRS_INTENT_TO_ACT, CSSRS_METHOD_THOUGHTS,
    CSSRS_PLAN_DETAILS, CSSRS_WISHED_DEAD,
};
use super::super::domain::{RiskFlag, SeverityLevel};

/// One row of a total-score band table.
pub(crate) struct SeverityBand {
    pub upper_bound: u32,
    pub severity: SeverityLevel,
    pub cooldown_days: i64,
    pub recommendation: &'static str,
}

pub(crate) const PHQ9_BANDS: [SeverityBand; 5] = [
    SeverityBand {
        upper_bound: 4,
        severity: SeverityLevel::MinimalDepression,
        cooldown_days: 60,
        recommendation:
            "Maintain current coping strategies and continue monitoring mood weekly.",
    },
    SeverityBand {
        upper_bound: 9,
        severity: SeverityLevel::MildDepression,
        cooldown_days: 45,
        recommendation:
            "Consider behavioural activation exercises and follow-up within 6 weeks.",
    },
    SeverityBand {
        upper_bound: 14,
        severity: SeverityLevel::ModerateDepression,
        cooldown_days: 30,
        recommendation: "Schedule structured therapy check-in and reassess within a month.",
    },
    SeverityBand {
        upper_bound: 19,
        severity: SeverityLevel::ModeratelySevereDepression,
        cooldown_days: 21,
        recommendation:
            "Increase therapy frequency if possible and discuss pharmacotherapy options with a clinician.",
    },
    SeverityBand {
        upper_bound: 27,
        severity: SeverityLevel::SevereDepression,
        cooldown_days: 14,
        recommendation:
            "Coordinate urgent clinical evaluation, ensure crisis resources are available, and reassess within two weeks.",
    },
];

pub(crate) const GAD7_BANDS: [SeverityBand; 4] = [
    SeverityBand {
        upper_bound: 4,
        severity: SeverityLevel::MinimalAnxiety,
        cooldown_days: 60,
        recommendation: "Continue resilience strategies and monitor symptoms monthly.",
    },
    SeverityBand {
        upper_bound: 9,
        severity: SeverityLevel::MildAnxiety,
        cooldown_days: 45,
        recommendation: "Introduce relaxation and grounding techniques; follow-up in 4-6 weeks.",
    },
    SeverityBand {
        upper_bound: 14,
        severity: SeverityLevel::ModerateAnxiety,
        cooldown_days: 30,
        recommendation:
            "Practice CBT-based worry logs and schedule therapy review within a month.",
    },
    SeverityBand {
        upper_bound: 21,
        severity: SeverityLevel::SevereAnxiety,
        cooldown_days: 21,
        recommendation:
            "Escalate to clinician for medication review and intensive coping strategies; reassess in 3 weeks.",
    },
];

/// First band whose upper bound admits the total. Validation bounds totals
/// to the table range, so the last band always matches as a fallback.
pub(crate) fn band_for_total(bands: &[SeverityBand], total: u32) -> &SeverityBand {
    bands
        .iter()
        .find(|band| total <= band.upper_bound)
        .unwrap_or(&bands[bands.len() - 1])
}

/// One rung of the Columbia precedence ladder: fires when any listed item
/// was answered "yes".
pub(crate) struct ColumbiaRung {
    pub question_ids: &'static [&'static str],
    pub severity: SeverityLevel,
    pub cooldown_days: i64,
    pub flags: &'static [RiskFlag],
    pub recommendations: &'static [&'static str],
}

pub(crate) const COLUMBIA_LADDER: [ColumbiaRung; 4] = [
    ColumbiaRung {
        question_ids: &[CSSRS_BEHAVIOR],
        severity: SeverityLevel::ImminentSuicideRisk,
        cooldown_days: 1,
        flags: &[RiskFlag::SuicideBehavior],
        recommendations: &[
            "Activate emergency safety plan immediately and ensure direct clinical supervision.",
            "Contact crisis services or emergency responders if immediate support is unavailable.",
        ],
    },
    ColumbiaRung {
        question_ids: &[CSSRS_PLAN_DETAILS, CSSRS_INTENT_TO_ACT],
        severity: SeverityLevel::HighSuicideRisk,
        cooldown_days: 2,
        flags: &[RiskFlag::SuicideIntent, RiskFlag::SuicidePlan],
        recommendations: &[
            "Begin high-intensity monitoring, restrict access to means, and coordinate rapid clinician follow-up.",
        ],
    },
    ColumbiaRung {
        question_ids: &[CSSRS_ACTIVE_THOUGHTS, CSSRS_METHOD_THOUGHTS],
        severity: SeverityLevel::ModerateSuicideRisk,
        cooldown_days: 3,
        flags: &[RiskFlag::SuicideIdeation],
        recommendations: &[
            "Create collaborative safety plan, increase contact frequency, and reassess within 72 hours.",
        ],
    },
    ColumbiaRung {
        question_ids: &[CSSRS_WISHED_DEAD],
        severity: SeverityLevel::LowSuicideRisk,
        cooldown_days: 7,
        flags: &[],
        recommendations: &[
            "Provide crisis resources and encourage daily mood tracking; reassess within a week.",
        ],
    },
];

/// Standard screening cadence when no item fired.
pub(crate) const COLUMBIA_BASELINE: ColumbiaRung = ColumbiaRung {
    question_ids: &[],
    severity: SeverityLevel::NoSuicideRisk,
    cooldown_days: 7,
    flags: &[],
    recommendations: &["Continue routine monitoring and reinforce protective factors."],
};

/// Walk the ladder in severity order; the first rung with a "yes" wins.
pub(crate) fn columbia_rung(scores: &BTreeMap<&str, u8>) -> &'static ColumbiaRung {
    COLUMBIA_LADDER
        .iter()
        .find(|rung| {
            rung.question_ids
                .iter()
                .any(|id| scores.get(id).copied().unwrap_or(0) >= 1)
        })
        .unwrap_or(&COLUMBIA_BASELINE)
}
