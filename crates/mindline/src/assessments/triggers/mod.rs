//! Conversation-driven assessment triggering: candidate detection over free
//! text plus the gating ladder that rations re-screens.

mod gate;
mod patterns;

pub use gate::{decide, GateContext, GateDecision, LatestAssessment, WITHIN_COOLDOWN};
pub use patterns::scan;
