//! Standardized mental-health assessments: catalog, validation, scoring,
//! and conversational trigger gating.
//!
//! Scoring and gating are pure computations over in-memory values; all
//! persistence sits behind the [`AssessmentRepository`] trait so the service
//! can be exercised with in-memory adapters in tests and demos.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod triggers;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{Choice, Question};
pub use domain::{
    AssessmentResult, AssessmentType, ItemResponse, RiskFlag, SeverityLevel, TriggerCandidate,
    TriggerReason, UnknownAssessmentType,
};
pub use repository::{
    AlertError, AssessmentRecord, AssessmentRecordView, AssessmentRepository, CrisisAlert,
    CrisisAlertPublisher, RepositoryError,
};
pub use router::assessment_router;
pub use scoring::ScoringEngine;
pub use service::{
    AssessmentService, AssessmentServiceError, AssessmentSummary, OverallRisk, TriggerDecision,
};
pub use triggers::{decide, scan, GateContext, GateDecision, LatestAssessment};
pub use validation::{validate_responses, ValidationError};
