use metrics_exporter_prometheus::PrometheusHandle;
use mindline::assessments::{
    AlertError, AssessmentRecord, AssessmentRepository, AssessmentType, CrisisAlert,
    CrisisAlertPublisher, RepositoryError,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Append-only in-process store. Suitable for demos and single-node
/// deployments; a database-backed adapter implements the same trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn append(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record);
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

/// Logs crisis alerts and retains them for inspection. Production
/// deployments swap in a pager or care-team queue transport.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCrisisAlertPublisher {
    events: Arc<Mutex<Vec<CrisisAlert>>>,
}

impl CrisisAlertPublisher for InMemoryCrisisAlertPublisher {
    fn publish(&self, alert: CrisisAlert) -> Result<(), AlertError> {
        warn!(
            user_id = alert.user_id,
            assessment_type = %alert.assessment_type,
            severity = %alert.severity_level,
            "crisis alert raised"
        );
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryCrisisAlertPublisher {
    pub(crate) fn events(&self) -> Vec<CrisisAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}
