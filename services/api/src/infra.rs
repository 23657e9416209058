use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use suvision::assessment::{
    Assessment, AssessmentSession, RepositoryError, SessionId, SessionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store; sessions vanish when the service stops.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, AssessmentSession>>>,
}

impl InMemorySessionRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, AssessmentSession>>, RepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: AssessmentSession) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(session.record_now(assessment))
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError> {
        Ok(self.lock()?.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suvision::assessment::{AssessmentEngine, InputPolicy, RawReadings};

    fn assessment() -> Assessment {
        AssessmentEngine::new(InputPolicy::Reject)
            .assess_raw(RawReadings::new(7.0, 20.0, 5.0))
            .expect("valid readings")
    }

    #[test]
    fn insert_rejects_duplicate_sessions() {
        let repository = InMemorySessionRepository::default();
        let id = SessionId("session-1".to_string());

        repository
            .insert(AssessmentSession::new(id.clone(), None))
            .expect("first insert");
        assert!(matches!(
            repository.insert(AssessmentSession::new(id, None)),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn append_targets_a_single_session() {
        let repository = InMemorySessionRepository::default();
        let first = SessionId("session-1".to_string());
        let second = SessionId("session-2".to_string());
        repository
            .insert(AssessmentSession::new(first.clone(), None))
            .expect("insert");
        repository
            .insert(AssessmentSession::new(second.clone(), None))
            .expect("insert");

        assert_eq!(repository.append(&first, &assessment()).expect("append"), 1);
        assert_eq!(repository.append(&first, &assessment()).expect("append"), 2);

        let untouched = repository.fetch(&second).expect("fetch").expect("present");
        assert!(untouched.history().is_empty());
        assert!(matches!(
            repository.append(&SessionId("ghost".to_string()), &assessment()),
            Err(RepositoryError::NotFound)
        ));
    }
}
