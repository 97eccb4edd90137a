//! Submission validation executed before any scoring math.
//!
//! A submission must cover the instrument's question-id set exactly: no
//! missing ids, no duplicates, no foreign ids, and every score on the
//! instrument's answer scale.

use std::collections::{BTreeMap, BTreeSet};

use super::domain::{AssessmentType, ItemResponse};

/// Rejection reasons for a malformed submission. Fatal to the submission,
/// never to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing responses for questions: {}", ids.join(", "))]
    MissingResponses { ids: Vec<String> },
    #[error("duplicate responses detected: {}", ids.join(", "))]
    DuplicateResponses { ids: Vec<String> },
    #[error("question '{id}' does not belong to the {assessment_type} questionnaire")]
    ForeignQuestion {
        assessment_type: AssessmentType,
        id: String,
    },
    #[error("score {score} for '{question_id}' exceeds the 0-{max} scale")]
    ScoreOutOfRange {
        question_id: String,
        score: u8,
        max: u8,
    },
    #[error("responses contain an empty question id")]
    EmptyQuestionId,
}

/// Check a submission against the instrument's fixed question set.
///
/// Missing ids and duplicates are both collected before reporting so a
/// caller sees the full shape of the problem, not just the first condition
/// encountered.
pub fn validate_responses(
    assessment_type: AssessmentType,
    responses: &[ItemResponse],
) -> Result<(), ValidationError> {
    let expected: BTreeSet<&str> = assessment_type.expected_ids().collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for response in responses {
        if response.question_id.is_empty() {
            return Err(ValidationError::EmptyQuestionId);
        }
        if !expected.contains(response.question_id.as_str()) {
            return Err(ValidationError::ForeignQuestion {
                assessment_type,
                id: response.question_id.clone(),
            });
        }
        *counts.entry(response.question_id.as_str()).or_insert(0) += 1;
    }

    let missing: Vec<String> = expected
        .iter()
        .filter(|id| !counts.contains_key(**id))
        .map(|id| (*id).to_string())
        .collect();
    let duplicates: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(id, _)| (*id).to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingResponses { ids: missing });
    }
    if !duplicates.is_empty() {
        return Err(ValidationError::DuplicateResponses { ids: duplicates });
    }

    let max = assessment_type.max_item_score();
    for response in responses {
        if response.score > max {
            return Err(ValidationError::ScoreOutOfRange {
                question_id: response.question_id.clone(),
                score: response.score,
                max,
            });
        }
    }

    Ok(())
}
