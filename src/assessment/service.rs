use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::config::AssessmentConfig;
use super::domain::{InputError, RawReadings};
use super::engine::{Assessment, AssessmentEngine};
use super::history::EvaluationHistory;
use super::repository::{RepositoryError, SessionRepository};
use super::session::{AssessmentSession, SessionId, SessionSummary};
use serde::Serialize;

/// Service composing the assessment engine with session storage.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    engine: AssessmentEngine,
    config: AssessmentConfig,
    sequence: AtomicU64,
}

impl<R> AssessmentService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: AssessmentConfig) -> Self {
        Self {
            repository,
            engine: AssessmentEngine::new(config.input_policy),
            config,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("session-{id:06}"))
    }

    /// Score readings without touching any session.
    pub fn assess(&self, readings: RawReadings) -> Result<Assessment, AssessmentServiceError> {
        Ok(self.engine.assess_raw(readings)?)
    }

    /// Start a new session with an empty history.
    pub fn open_session(&self) -> Result<SessionSummary, AssessmentServiceError> {
        let session = AssessmentSession::new(self.next_session_id(), self.config.history_limit);
        let summary = session.summary();
        self.repository.insert(session)?;
        info!(session = %summary.session_id.0, "assessment session opened");
        Ok(summary)
    }

    /// Evaluate readings within a session and append the snapshot to its history.
    pub fn evaluate(
        &self,
        session_id: &SessionId,
        readings: RawReadings,
    ) -> Result<SessionEvaluation, AssessmentServiceError> {
        let assessment = self.engine.assess_raw(readings)?;
        let history_len = self.repository.append(session_id, &assessment)?;

        Ok(SessionEvaluation {
            session_id: session_id.clone(),
            assessment,
            history_len,
        })
    }

    pub fn session(
        &self,
        session_id: &SessionId,
    ) -> Result<AssessmentSession, AssessmentServiceError> {
        let session = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    pub fn history(
        &self,
        session_id: &SessionId,
    ) -> Result<EvaluationHistory, AssessmentServiceError> {
        Ok(self.session(session_id)?.into_history())
    }

    /// Render a session's history as CSV bytes.
    pub fn export_csv(&self, session_id: &SessionId) -> Result<Vec<u8>, AssessmentServiceError> {
        let history = self.history(session_id)?;
        let mut buffer = Vec::new();
        history.write_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// End a session; its history is discarded.
    pub fn close_session(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSummary, AssessmentServiceError> {
        let session = self
            .repository
            .remove(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        let summary = session.summary();
        info!(
            session = %summary.session_id.0,
            evaluations = summary.history_len,
            "assessment session closed"
        );
        Ok(summary)
    }
}

/// Result of evaluating readings inside a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvaluation {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub history_len: usize,
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("history export failed: {0}")]
    Export(#[from] csv::Error),
}
