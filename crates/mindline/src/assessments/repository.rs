use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentResult, AssessmentType, ItemResponse, RiskFlag, SeverityLevel};
use super::triggers::LatestAssessment;

/// One persisted administration of a questionnaire. Records are append-only
/// and never mutated after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub user_id: i64,
    pub assessment_type: AssessmentType,
    pub triggered_by: String,
    pub responses: Vec<ItemResponse>,
    pub result: AssessmentResult,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Projection the trigger gate consumes.
    pub fn latest_view(&self) -> LatestAssessment {
        LatestAssessment {
            completed_at: self.completed_at,
            next_assessment_due: self.result.next_assessment_due,
            triggered_by: self.triggered_by.clone(),
        }
    }

    pub fn view(&self) -> AssessmentRecordView {
        AssessmentRecordView {
            user_id: self.user_id,
            assessment_type: self.assessment_type,
            triggered_by: self.triggered_by.clone(),
            total_score: self.result.total_score,
            severity_level: self.result.severity_level,
            risk_flags: self.result.risk_flags.clone(),
            recommendations: self.result.recommendations.clone(),
            next_assessment_due: self.result.next_assessment_due,
            completed_at: self.completed_at,
        }
    }
}

/// Sanitized record representation exposed over the API; raw answers stay
/// out of summary payloads.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecordView {
    pub user_id: i64,
    pub assessment_type: AssessmentType,
    pub triggered_by: String,
    pub total_score: u32,
    pub severity_level: SeverityLevel,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub next_assessment_due: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Storage abstraction so the service and router can be exercised in
/// isolation. Implementations must keep per-user append order.
pub trait AssessmentRepository: Send + Sync {
    fn append(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;

    /// Most recent record for one `(user, instrument)` pair.
    fn latest(
        &self,
        user_id: i64,
        assessment_type: AssessmentType,
    ) -> Result<Option<AssessmentRecord>, RepositoryError>;

    /// Stored history for a user, most recent first.
    fn history(&self, user_id: i64, limit: usize)
        -> Result<Vec<AssessmentRecord>, RepositoryError>;

    /// Instruments due for (re)administration: never taken, or the stored
    /// `next_assessment_due` has passed.
    fn due_types(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssessmentType>, RepositoryError> {
        let mut due = Vec::new();
        for assessment_type in AssessmentType::ALL {
            match self.latest(user_id, assessment_type)? {
                None => due.push(assessment_type),
                Some(record) if record.result.next_assessment_due <= now => {
                    due.push(assessment_type)
                }
                Some(_) => {}
            }
        }
        Ok(due)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound safety alert raised when scoring surfaces suicide-related
/// flags, so downstream crisis handling can act without polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAlert {
    pub user_id: i64,
    pub assessment_type: AssessmentType,
    pub severity_level: SeverityLevel,
    pub risk_flags: Vec<RiskFlag>,
}

/// Trait describing outbound crisis hooks (pager, care-team queue, etc.).
pub trait CrisisAlertPublisher: Send + Sync {
    fn publish(&self, alert: CrisisAlert) -> Result<(), AlertError>;
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
