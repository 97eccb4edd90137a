//! The trigger gate: decides whether a detected candidate should actually
//! start a new administration, balancing screening sensitivity against
//! screening fatigue.
//!
//! The decision is an ordered rule ladder evaluated first-match-wins. Due
//! dates and first-time screens always win; a maximal textual severity
//! bypasses every cooldown; below that, higher severity compresses the
//! re-screen interval monotonically, and a materially different concern is
//! allowed back in after a short reflection period.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Most recent stored administration of one instrument, as the gate sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestAssessment {
    pub completed_at: DateTime<Utc>,
    pub next_assessment_due: DateTime<Utc>,
    pub triggered_by: String,
}

/// Inputs for a single gating decision.
#[derive(Debug, Clone)]
pub struct GateContext<'a> {
    pub now: DateTime<Utc>,
    /// Due-lookup verdict: true when no record exists or the stored
    /// `next_assessment_due` has passed.
    pub due: bool,
    pub latest: Option<&'a LatestAssessment>,
    pub reason: &'a str,
    /// Textual signal strength (1-4) from scanning; `None` for manual or
    /// scheduled checks.
    pub severity: Option<u8>,
}

impl GateContext<'_> {
    fn severity_at_least(&self, floor: u8) -> bool {
        self.severity.is_some_and(|severity| severity >= floor)
    }

    fn elapsed_at_least(&self, days: i64) -> bool {
        match self.latest {
            Some(latest) => self.now - latest.completed_at >= Duration::days(days),
            None => true,
        }
    }
}

/// Verdict of the ladder, naming the rule that settled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub triggered: bool,
    pub rule: &'static str,
}

impl GateDecision {
    /// Failure verdict used when history cannot be consulted: degrade
    /// toward screening, never away from it.
    pub const fn history_unavailable() -> Self {
        Self {
            triggered: true,
            rule: "history_unavailable",
        }
    }
}

struct GateRule {
    name: &'static str,
    fires: fn(&GateContext<'_>) -> bool,
}

const BASE_COOLDOWN_DAYS: i64 = 14;
const MIN_COOLDOWN_DAYS: i64 = 5;

/// Cooldown shrinks two days per severity point, floored so even the
/// strongest sub-override signal cannot demand screening more often than
/// the explicit severity ladder above it allows.
fn scaled_cooldown_days(severity: Option<u8>) -> i64 {
    match severity {
        Some(severity) => (BASE_COOLDOWN_DAYS - 2 * i64::from(severity)).max(MIN_COOLDOWN_DAYS),
        None => BASE_COOLDOWN_DAYS,
    }
}

/// Ordered ladder; every rule that fires means "trigger now".
const RULES: &[GateRule] = &[
    GateRule {
        name: "assessment_due",
        fires: |ctx| ctx.due,
    },
    GateRule {
        name: "first_screen",
        fires: |ctx| ctx.latest.is_none(),
    },
    GateRule {
        name: "next_due_elapsed",
        fires: |ctx| {
            ctx.latest
                .is_some_and(|latest| latest.next_assessment_due <= ctx.now)
        },
    },
    GateRule {
        name: "severity_override",
        fires: |ctx| ctx.severity_at_least(4),
    },
    GateRule {
        name: "high_severity_window",
        fires: |ctx| ctx.severity_at_least(3) && ctx.elapsed_at_least(3),
    },
    GateRule {
        name: "elevated_severity_window",
        fires: |ctx| ctx.severity_at_least(2) && ctx.elapsed_at_least(7),
    },
    GateRule {
        name: "scaled_cooldown_elapsed",
        fires: |ctx| ctx.elapsed_at_least(scaled_cooldown_days(ctx.severity)),
    },
    GateRule {
        name: "reason_changed",
        fires: |ctx| {
            ctx.latest
                .is_some_and(|latest| latest.triggered_by != ctx.reason)
                && ctx.elapsed_at_least(2)
        },
    },
];

/// Rule name reported when no ladder rule fired.
pub const WITHIN_COOLDOWN: &str = "within_cooldown";

/// Walk the ladder; the first rule that fires triggers a new screen.
pub fn decide(ctx: &GateContext<'_>) -> GateDecision {
    for rule in RULES {
        if (rule.fires)(ctx) {
            return GateDecision {
                triggered: true,
                rule: rule.name,
            };
        }
    }

    GateDecision {
        triggered: false,
        rule: WITHIN_COOLDOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest(days_ago: i64, due_in_days: i64, reason: &str) -> LatestAssessment {
        let now = Utc::now();
        LatestAssessment {
            completed_at: now - Duration::days(days_ago),
            next_assessment_due: now + Duration::days(due_in_days),
            triggered_by: reason.to_string(),
        }
    }

    fn ctx<'a>(
        due: bool,
        latest: Option<&'a LatestAssessment>,
        reason: &'a str,
        severity: Option<u8>,
    ) -> GateContext<'a> {
        GateContext {
            now: Utc::now(),
            due,
            latest,
            reason,
            severity,
        }
    }

    #[test]
    fn scaled_cooldown_floors_at_five_days() {
        assert_eq!(scaled_cooldown_days(None), 14);
        assert_eq!(scaled_cooldown_days(Some(1)), 12);
        assert_eq!(scaled_cooldown_days(Some(3)), 8);
        assert_eq!(scaled_cooldown_days(Some(4)), 6);
        assert_eq!(scaled_cooldown_days(Some(5)), 5);
        assert_eq!(scaled_cooldown_days(Some(6)), 5);
    }

    #[test]
    fn due_lookup_wins_regardless_of_severity() {
        let record = latest(1, 5, "depressive_symptoms_detected");
        let decision = decide(&ctx(true, Some(&record), "depressive_symptoms_detected", None));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "assessment_due");
    }

    #[test]
    fn first_screen_triggers_without_history() {
        let decision = decide(&ctx(false, None, "anxiety_symptoms_detected", Some(1)));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "first_screen");
    }

    #[test]
    fn severity_override_bypasses_fresh_cooldown() {
        let record = latest(1, 13, "suicidality_language_detected");
        let decision = decide(&ctx(
            false,
            Some(&record),
            "suicidality_language_detected",
            Some(4),
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "severity_override");
    }

    #[test]
    fn low_severity_same_reason_stays_in_cooldown() {
        let record = latest(1, 13, "depressive_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&record),
            "depressive_symptoms_detected",
            Some(1),
        ));
        assert!(!decision.triggered);
        assert_eq!(decision.rule, WITHIN_COOLDOWN);
    }

    #[test]
    fn changed_reason_needs_two_day_reflection() {
        let fresh = latest(1, 13, "depressive_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&fresh),
            "anxiety_symptoms_detected",
            Some(1),
        ));
        assert!(!decision.triggered);

        let rested = latest(2, 13, "depressive_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&rested),
            "anxiety_symptoms_detected",
            Some(1),
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "reason_changed");
    }

    #[test]
    fn severity_three_waits_three_days() {
        let fresh = latest(2, 20, "suicidality_language_detected");
        let decision = decide(&ctx(
            false,
            Some(&fresh),
            "suicidality_language_detected",
            Some(3),
        ));
        assert!(!decision.triggered);

        let rested = latest(3, 20, "suicidality_language_detected");
        let decision = decide(&ctx(
            false,
            Some(&rested),
            "suicidality_language_detected",
            Some(3),
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "high_severity_window");
    }

    #[test]
    fn severity_two_waits_a_week() {
        let rested = latest(7, 20, "anxiety_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&rested),
            "anxiety_symptoms_detected",
            Some(2),
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "elevated_severity_window");
    }

    #[test]
    fn passed_due_date_triggers_even_without_severity() {
        let record = latest(3, -1, "depressive_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&record),
            "depressive_symptoms_detected",
            None,
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "next_due_elapsed");
    }

    #[test]
    fn unscored_check_falls_back_to_base_cooldown() {
        let record = latest(14, 20, "depressive_symptoms_detected");
        let decision = decide(&ctx(
            false,
            Some(&record),
            "depressive_symptoms_detected",
            None,
        ));
        assert!(decision.triggered);
        assert_eq!(decision.rule, "scaled_cooldown_elapsed");
    }
}
