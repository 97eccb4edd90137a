use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::assessments::domain::{AssessmentType, ItemResponse};
use crate::assessments::repository::{
    AlertError, AssessmentRecord, AssessmentRepository, CrisisAlert, CrisisAlertPublisher,
    RepositoryError,
};
use crate::assessments::{assessment_router, AssessmentService};

pub(super) fn phq9_responses(scores: [u8; 9]) -> Vec<ItemResponse> {
    AssessmentType::Phq9
        .expected_ids()
        .zip(scores)
        .map(|(id, score)| ItemResponse::new(id, score))
        .collect()
}

pub(super) fn gad7_responses(scores: [u8; 7]) -> Vec<ItemResponse> {
    AssessmentType::Gad7
        .expected_ids()
        .zip(scores)
        .map(|(id, score)| ItemResponse::new(id, score))
        .collect()
}

/// Columbia submission answering "yes" only to the listed question ids.
pub(super) fn columbia_responses(yes_ids: &[&str]) -> Vec<ItemResponse> {
    AssessmentType::Columbia
        .expected_ids()
        .map(|id| ItemResponse::new(id, u8::from(yes_ids.contains(&id))))
        .collect()
}

/// PHQ-9 responses summing to `total` with the self-harm item pinned.
pub(super) fn phq9_with_total(total: u32, item9: u8) -> Vec<ItemResponse> {
    let mut remaining = total - u32::from(item9);
    let mut scores = [0u8; 9];
    scores[8] = item9;
    for slot in scores.iter_mut().take(8) {
        let take = remaining.min(3) as u8;
        *slot = take;
        remaining -= u32::from(take);
    }
    assert_eq!(remaining, 0, "total {total} not representable");
    phq9_responses(scores)
}

pub(super) fn gad7_with_total(total: u32) -> Vec<ItemResponse> {
    let mut remaining = total;
    let mut scores = [0u8; 7];
    for slot in scores.iter_mut() {
        let take = remaining.min(3) as u8;
        *slot = take;
        remaining -= u32::from(take);
    }
    assert_eq!(remaining, 0, "total {total} not representable");
    gad7_responses(scores)
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = AssessmentService::new(repository.clone(), alerts.clone());
    (service, repository, alerts)
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryRepository, MemoryAlerts>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn append(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
        Ok(())
    }

    fn latest(
        &self,
        user_id: i64,
        assessment_type: AssessmentType,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                record.user_id == user_id && record.assessment_type == assessment_type
            })
            .max_by_key(|record| record.completed_at)
            .cloned())
    }

    fn history(
        &self,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(record.completed_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<CrisisAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<CrisisAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl CrisisAlertPublisher for MemoryAlerts {
    fn publish(&self, alert: CrisisAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn append(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(
        &self,
        _user_id: i64,
        _assessment_type: AssessmentType,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(
        &self,
        _user_id: i64,
        _limit: usize,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingAlerts;

impl CrisisAlertPublisher for FailingAlerts {
    fn publish(&self, _alert: CrisisAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("pager webhook down".to_string()))
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    "2025-01-01T00:00:00Z"
        .parse()
        .expect("valid fixture timestamp")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
