use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standardized screening instruments administered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Phq9,
    Gad7,
    Columbia,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 3] = [Self::Phq9, Self::Gad7, Self::Columbia];

    pub const fn label(self) -> &'static str {
        match self {
            AssessmentType::Phq9 => "phq9",
            AssessmentType::Gad7 => "gad7",
            AssessmentType::Columbia => "columbia",
        }
    }

    /// Maximum per-item score on the instrument's answer scale.
    pub const fn max_item_score(self) -> u8 {
        match self {
            AssessmentType::Phq9 | AssessmentType::Gad7 => 3,
            AssessmentType::Columbia => 1,
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssessmentType {
    type Err = UnknownAssessmentType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "phq9" | "phq-9" => Ok(Self::Phq9),
            "gad7" | "gad-7" => Ok(Self::Gad7),
            "columbia" | "cssrs" | "c-ssrs" => Ok(Self::Columbia),
            other => Err(UnknownAssessmentType(other.to_string())),
        }
    }
}

/// Raised when a wire label does not name one of the supported instruments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assessment type '{0}'")]
pub struct UnknownAssessmentType(pub String);

/// Single answered question within a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub question_id: String,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl ItemResponse {
    pub fn new(question_id: impl Into<String>, score: u8) -> Self {
        Self {
            question_id: question_id.into(),
            score,
            answer: None,
        }
    }
}

/// Named severity band an administration maps to. Bands drive both the
/// messaging surfaced to the user and the re-screen cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    MinimalDepression,
    MildDepression,
    ModerateDepression,
    ModeratelySevereDepression,
    SevereDepression,
    MinimalAnxiety,
    MildAnxiety,
    ModerateAnxiety,
    SevereAnxiety,
    NoSuicideRisk,
    LowSuicideRisk,
    ModerateSuicideRisk,
    HighSuicideRisk,
    ImminentSuicideRisk,
}

impl SeverityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            SeverityLevel::MinimalDepression => "minimal_depression",
            SeverityLevel::MildDepression => "mild_depression",
            SeverityLevel::ModerateDepression => "moderate_depression",
            SeverityLevel::ModeratelySevereDepression => "moderately_severe_depression",
            SeverityLevel::SevereDepression => "severe_depression",
            SeverityLevel::MinimalAnxiety => "minimal_anxiety",
            SeverityLevel::MildAnxiety => "mild_anxiety",
            SeverityLevel::ModerateAnxiety => "moderate_anxiety",
            SeverityLevel::SevereAnxiety => "severe_anxiety",
            SeverityLevel::NoSuicideRisk => "no_suicide_risk",
            SeverityLevel::LowSuicideRisk => "low_suicide_risk",
            SeverityLevel::ModerateSuicideRisk => "moderate_suicide_risk",
            SeverityLevel::HighSuicideRisk => "high_suicide_risk",
            SeverityLevel::ImminentSuicideRisk => "imminent_suicide_risk",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Safety tag attached to a result independently of its severity band,
/// surfaced to downstream crisis handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    SuicideIdeation,
    SuicideIntent,
    SuicidePlan,
    SuicideBehavior,
    SevereAnxiety,
}

impl RiskFlag {
    pub const fn label(self) -> &'static str {
        match self {
            RiskFlag::SuicideIdeation => "suicide_ideation",
            RiskFlag::SuicideIntent => "suicide_intent",
            RiskFlag::SuicidePlan => "suicide_plan",
            RiskFlag::SuicideBehavior => "suicide_behavior",
            RiskFlag::SevereAnxiety => "severe_anxiety",
        }
    }

    pub const fn is_suicide_related(self) -> bool {
        !matches!(self, RiskFlag::SevereAnxiety)
    }
}

/// Immutable outcome of scoring one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub total_score: u32,
    pub severity_level: SeverityLevel,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub next_assessment_due: DateTime<Utc>,
}

/// Reason tag carried by trigger candidates and stored on records as
/// `triggered_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    DepressiveSymptomsDetected,
    AnxietySymptomsDetected,
    SuicidalityLanguageDetected,
}

impl TriggerReason {
    pub const fn label(self) -> &'static str {
        match self {
            TriggerReason::DepressiveSymptomsDetected => "depressive_symptoms_detected",
            TriggerReason::AnxietySymptomsDetected => "anxiety_symptoms_detected",
            TriggerReason::SuicidalityLanguageDetected => "suicidality_language_detected",
        }
    }
}

/// Candidate screen raised by scanning a single message.
///
/// `severity` ranks textual signal strength on a 1-4 scale. It is a
/// different axis from the clinical severity bands a completed questionnaire
/// scores into and the two must never be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCandidate {
    pub assessment_type: AssessmentType,
    pub reason: TriggerReason,
    pub severity: u8,
}
