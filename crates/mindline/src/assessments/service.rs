use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::{AssessmentType, ItemResponse, RiskFlag, SeverityLevel, TriggerCandidate};
use super::repository::{
    AlertError, AssessmentRecord, AssessmentRepository, CrisisAlert, CrisisAlertPublisher,
    RepositoryError,
};
use super::scoring::ScoringEngine;
use super::triggers::{self, GateContext, GateDecision};
use super::validation::ValidationError;

/// Service composing the scorer, the trigger gate, the history store, and
/// the crisis alert hook.
pub struct AssessmentService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    engine: ScoringEngine,
}

impl<R, A> AssessmentService<R, A>
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>) -> Self {
        Self {
            repository,
            alerts,
            engine: ScoringEngine::new(),
        }
    }

    /// Score a completed submission, persist it, and raise a crisis alert
    /// when the result carries suicide-related flags.
    pub fn submit(
        &self,
        user_id: i64,
        assessment_type: AssessmentType,
        triggered_by: &str,
        responses: Vec<ItemResponse>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.submit_at(user_id, assessment_type, triggered_by, responses, Utc::now())
    }

    pub fn submit_at(
        &self,
        user_id: i64,
        assessment_type: AssessmentType,
        triggered_by: &str,
        responses: Vec<ItemResponse>,
        now: DateTime<Utc>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let result = self.engine.process_at(assessment_type, &responses, now)?;

        let record = AssessmentRecord {
            user_id,
            assessment_type,
            triggered_by: triggered_by.to_string(),
            responses,
            result,
            completed_at: now,
        };

        self.repository.append(record.clone())?;

        if record
            .result
            .risk_flags
            .iter()
            .any(|flag| flag.is_suicide_related())
        {
            warn!(
                user_id,
                assessment_type = %record.assessment_type,
                severity = %record.result.severity_level,
                "assessment raised suicide-related risk flags"
            );
            self.alerts.publish(CrisisAlert {
                user_id,
                assessment_type,
                severity_level: record.result.severity_level,
                risk_flags: record.result.risk_flags.clone(),
            })?;
        }

        Ok(record)
    }

    /// Scan a message and gate every candidate against stored history.
    pub fn evaluate_message(&self, user_id: i64, message: &str) -> Vec<TriggerDecision> {
        self.evaluate_message_at(user_id, message, Utc::now())
    }

    pub fn evaluate_message_at(
        &self,
        user_id: i64,
        message: &str,
        now: DateTime<Utc>,
    ) -> Vec<TriggerDecision> {
        triggers::scan(message)
            .into_iter()
            .map(|candidate| {
                let decision = self.gate_candidate(user_id, &candidate, now);
                TriggerDecision {
                    candidate,
                    triggered: decision.triggered,
                    rule: decision.rule,
                }
            })
            .collect()
    }

    fn gate_candidate(
        &self,
        user_id: i64,
        candidate: &TriggerCandidate,
        now: DateTime<Utc>,
    ) -> GateDecision {
        // History faults degrade toward screening: an extra questionnaire
        // prompt costs far less than a missed safety signal.
        let due = match self.repository.due_types(user_id, now) {
            Ok(types) => types.contains(&candidate.assessment_type),
            Err(error) => {
                warn!(user_id, %error, "due lookup failed; defaulting to screen");
                return GateDecision::history_unavailable();
            }
        };

        let latest = match self.repository.latest(user_id, candidate.assessment_type) {
            Ok(record) => record,
            Err(error) => {
                warn!(user_id, %error, "history lookup failed; defaulting to screen");
                return GateDecision::history_unavailable();
            }
        };

        let latest_view = latest.as_ref().map(AssessmentRecord::latest_view);
        let ctx = GateContext {
            now,
            due,
            latest: latest_view.as_ref(),
            reason: candidate.reason.label(),
            severity: Some(candidate.severity),
        };

        triggers::decide(&ctx)
    }

    /// Instruments currently due for this user.
    pub fn due(&self, user_id: i64) -> Result<Vec<AssessmentType>, AssessmentServiceError> {
        Ok(self.repository.due_types(user_id, Utc::now())?)
    }

    /// Stored history, most recent first.
    pub fn history(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.history(user_id, limit)?)
    }

    /// Latest-per-instrument roll-up used to personalize conversations.
    pub fn summary(&self, user_id: i64) -> Result<AssessmentSummary, AssessmentServiceError> {
        let mut severity_levels = BTreeMap::new();
        let mut risk_flags: Vec<RiskFlag> = Vec::new();
        let mut recommendations = Vec::new();

        for assessment_type in AssessmentType::ALL {
            if let Some(record) = self.repository.latest(user_id, assessment_type)? {
                severity_levels.insert(assessment_type.label(), record.result.severity_level);
                for flag in &record.result.risk_flags {
                    if !risk_flags.contains(flag) {
                        risk_flags.push(*flag);
                    }
                }
                for recommendation in &record.result.recommendations {
                    recommendations.push(format!("{assessment_type}: {recommendation}"));
                }
            }
        }

        let overall_risk = overall_risk(&severity_levels, &risk_flags);

        Ok(AssessmentSummary {
            severity_levels,
            risk_flags,
            recommendations,
            overall_risk,
        })
    }
}

/// Gate verdict for one candidate raised from a message.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerDecision {
    #[serde(flatten)]
    pub candidate: TriggerCandidate,
    pub triggered: bool,
    pub rule: &'static str,
}

/// Latest-per-instrument roll-up for conversation personalization.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummary {
    pub severity_levels: BTreeMap<&'static str, SeverityLevel>,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub overall_risk: OverallRisk,
}

/// Coarse risk roll-up across a user's latest assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallRisk {
    Low,
    Mild,
    Moderate,
    High,
    Imminent,
}

impl OverallRisk {
    pub const fn label(self) -> &'static str {
        match self {
            OverallRisk::Low => "low",
            OverallRisk::Mild => "mild",
            OverallRisk::Moderate => "moderate",
            OverallRisk::High => "high",
            OverallRisk::Imminent => "imminent",
        }
    }
}

impl SeverityLevel {
    /// Rank a clinical band on the roll-up scale.
    const fn overall(self) -> OverallRisk {
        match self {
            SeverityLevel::MinimalDepression
            | SeverityLevel::MinimalAnxiety
            | SeverityLevel::NoSuicideRisk => OverallRisk::Low,
            SeverityLevel::MildDepression
            | SeverityLevel::MildAnxiety
            | SeverityLevel::LowSuicideRisk => OverallRisk::Mild,
            SeverityLevel::ModerateDepression
            | SeverityLevel::ModerateAnxiety
            | SeverityLevel::ModerateSuicideRisk => OverallRisk::Moderate,
            SeverityLevel::ModeratelySevereDepression
            | SeverityLevel::SevereDepression
            | SeverityLevel::SevereAnxiety
            | SeverityLevel::HighSuicideRisk => OverallRisk::High,
            SeverityLevel::ImminentSuicideRisk => OverallRisk::Imminent,
        }
    }
}

fn overall_risk(
    severity_levels: &BTreeMap<&'static str, SeverityLevel>,
    risk_flags: &[RiskFlag],
) -> OverallRisk {
    let from_flags = risk_flags
        .iter()
        .map(|flag| match flag {
            RiskFlag::SuicideBehavior | RiskFlag::SuicidePlan => OverallRisk::Imminent,
            RiskFlag::SuicideIntent => OverallRisk::High,
            RiskFlag::SuicideIdeation => OverallRisk::Moderate,
            RiskFlag::SevereAnxiety => OverallRisk::High,
        })
        .max()
        .unwrap_or(OverallRisk::Low);

    let from_bands = severity_levels
        .values()
        .map(|severity| severity.overall())
        .max()
        .unwrap_or(OverallRisk::Low);

    from_flags.max(from_bands)
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
