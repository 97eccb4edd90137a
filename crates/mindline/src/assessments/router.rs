use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::conversation;

use super::domain::{AssessmentType, ItemResponse};
use super::repository::{AssessmentRecord, AssessmentRepository, CrisisAlertPublisher};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing HTTP endpoints for submissions, history, and
/// message triage.
pub fn assessment_router<R, A>(service: Arc<AssessmentService<R, A>>) -> Router
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R, A>))
        .route(
            "/api/v1/assessments/:user_id",
            get(history_handler::<R, A>),
        )
        .route(
            "/api/v1/assessments/:user_id/summary",
            get(summary_handler::<R, A>),
        )
        .route(
            "/api/v1/assessments/:user_id/due",
            get(due_handler::<R, A>),
        )
        .route("/api/v1/triage", post(triage_handler::<R, A>))
        .route(
            "/api/v1/questionnaires/:assessment_type",
            get(questionnaire_handler),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAssessmentRequest {
    pub(crate) user_id: i64,
    pub(crate) assessment_type: AssessmentType,
    #[serde(default = "default_triggered_by")]
    pub(crate) triggered_by: String,
    pub(crate) responses: Vec<ItemResponse>,
}

fn default_triggered_by() -> String {
    "manual".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriageRequest {
    pub(crate) user_id: i64,
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub(crate) limit: usize,
}

fn default_history_limit() -> usize {
    25
}

pub(crate) async fn submit_handler<R, A>(
    State(service): State<Arc<AssessmentService<R, A>>>,
    axum::Json(request): axum::Json<SubmitAssessmentRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    match service.submit(
        request.user_id,
        request.assessment_type,
        &request.triggered_by,
        request.responses,
    ) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(AssessmentServiceError::Validation(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Alert(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn history_handler<R, A>(
    State(service): State<Arc<AssessmentService<R, A>>>,
    Path(user_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    match service.history(user_id, query.limit) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(AssessmentRecord::view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn summary_handler<R, A>(
    State(service): State<Arc<AssessmentService<R, A>>>,
    Path(user_id): Path<i64>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    match service.summary(user_id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn due_handler<R, A>(
    State(service): State<Arc<AssessmentService<R, A>>>,
    Path(user_id): Path<i64>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    match service.due(user_id) {
        Ok(due) => (StatusCode::OK, axum::Json(json!({ "due": due }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn triage_handler<R, A>(
    State(service): State<Arc<AssessmentService<R, A>>>,
    axum::Json(request): axum::Json<TriageRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    A: CrisisAlertPublisher + 'static,
{
    let decisions = service.evaluate_message(request.user_id, &request.message);
    let candidates: Vec<_> = decisions
        .iter()
        .map(|decision| decision.candidate)
        .collect();
    let route = conversation::route(&request.message, &candidates);

    let payload = json!({
        "route": route,
        "decisions": decisions,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn questionnaire_handler(Path(assessment_type): Path<String>) -> Response {
    match AssessmentType::from_str(&assessment_type) {
        Ok(assessment_type) => {
            let payload = json!({
                "assessment_type": assessment_type,
                "questions": assessment_type.questions(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn internal_error(error: AssessmentServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
