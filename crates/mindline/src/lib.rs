//! Core domain crate for the Mindline mental-health support backend.
//!
//! The crate owns the deterministic parts of the platform: questionnaire
//! definitions, validation, scoring of standardized assessments (PHQ-9,
//! GAD-7, Columbia-style suicide screen), the trigger gate that decides when
//! a conversation should prompt a new screen, and the hand-off routing that
//! picks a support technique for an inbound message. The conversational
//! agent layer and the durable store are consumers wired in by `services/api`.

pub mod assessments;
pub mod config;
pub mod conversation;
pub mod error;
pub mod telemetry;
