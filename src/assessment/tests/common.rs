use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::domain::{EvaluationSnapshot, InputParameters, RawReadings};
use crate::assessment::repository::{RepositoryError, SessionRepository};
use crate::assessment::session::{AssessmentSession, SessionId};
use crate::assessment::{
    assessment_router, models, Assessment, AssessmentConfig, AssessmentService, InputPolicy,
};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn params(ph: f64, temperature: f64, turbidity: f64) -> InputParameters {
    InputParameters::try_new(RawReadings::new(ph, temperature, turbidity))
        .expect("readings within domain")
}

/// Mid-range reading used across scenarios: neutral pH, 20 °C, 5 NTU.
pub(super) fn reference_params() -> InputParameters {
    params(7.0, 20.0, 5.0)
}

pub(super) fn timestamp(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::minutes(offset_minutes)
}

pub(super) fn snapshot(ph: f64, temperature: f64, turbidity: f64, offset: i64) -> EvaluationSnapshot {
    let inputs = params(ph, temperature, turbidity);
    EvaluationSnapshot {
        recorded_at: timestamp(offset),
        inputs,
        scores: models::score(&inputs),
    }
}

pub(super) fn config(policy: InputPolicy, limit: Option<usize>) -> AssessmentConfig {
    AssessmentConfig {
        input_policy: policy,
        history_limit: limit.and_then(NonZeroUsize::new),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, AssessmentSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: AssessmentSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn append(
        &self,
        id: &SessionId,
        assessment: &Assessment,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(session.record_now(assessment))
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.remove(id))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: AssessmentSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn append(
        &self,
        _id: &SessionId,
        _assessment: &Assessment,
    ) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service(
    policy: InputPolicy,
    limit: Option<usize>,
) -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(repository.clone(), config(policy, limit));
    (service, repository)
}

pub(super) fn router(policy: InputPolicy) -> axum::Router {
    let (service, _) = build_service(policy, None);
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
