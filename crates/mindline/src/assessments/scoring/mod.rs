mod bands;
mod flags;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::domain::{AssessmentResult, AssessmentType, ItemResponse};
use super::validation::{validate_responses, ValidationError};

/// Stateless scorer applying the instrument band tables and risk-flag rules.
///
/// Each invocation is a pure function of the submission and the scoring
/// timestamp, so results are cheap to recompute and safe to produce in
/// parallel across users.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate and score a submission against the current time.
    pub fn process(
        &self,
        assessment_type: AssessmentType,
        responses: &[ItemResponse],
    ) -> Result<AssessmentResult, ValidationError> {
        self.process_at(assessment_type, responses, Utc::now())
    }

    /// Validate and score a submission; `now` anchors `next_assessment_due`.
    pub fn process_at(
        &self,
        assessment_type: AssessmentType,
        responses: &[ItemResponse],
        now: DateTime<Utc>,
    ) -> Result<AssessmentResult, ValidationError> {
        validate_responses(assessment_type, responses)?;

        let total: u32 = responses
            .iter()
            .map(|response| u32::from(response.score))
            .sum();

        let result = match assessment_type {
            AssessmentType::Phq9 => {
                score_banded(total, &bands::PHQ9_BANDS, flags::phq9_flags(responses), now)
            }
            AssessmentType::Gad7 => {
                score_banded(total, &bands::GAD7_BANDS, flags::gad7_flags(total), now)
            }
            AssessmentType::Columbia => score_columbia(total, responses, now),
        };

        Ok(result)
    }
}

fn score_banded(
    total: u32,
    table: &[bands::SeverityBand],
    risk_flags: Vec<super::domain::RiskFlag>,
    now: DateTime<Utc>,
) -> AssessmentResult {
    let band = bands::band_for_total(table, total);

    AssessmentResult {
        total_score: total,
        severity_level: band.severity,
        risk_flags,
        recommendations: vec![band.recommendation.to_string()],
        next_assessment_due: now + Duration::days(band.cooldown_days),
    }
}

fn score_columbia(total: u32, responses: &[ItemResponse], now: DateTime<Utc>) -> AssessmentResult {
    let scores: BTreeMap<&str, u8> = responses
        .iter()
        .map(|response| (response.question_id.as_str(), response.score))
        .collect();

    let rung = bands::columbia_rung(&scores);

    AssessmentResult {
        // The Columbia total is informational only; banding is item-driven.
        total_score: total,
        severity_level: rung.severity,
        risk_flags: rung.flags.to_vec(),
        recommendations: rung
            .recommendations
            .iter()
            .map(|text| (*text).to_string())
            .collect(),
        next_assessment_due: now + Duration::days(rung.cooldown_days),
    }
}
