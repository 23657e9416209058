use super::engine::Assessment;
use super::session::{AssessmentSession, SessionId};

/// Storage abstraction for live sessions so the service can be exercised in isolation.
///
/// Implementations must apply `append` atomically per session and stamp the
/// snapshot while holding the session, so `recorded_at` never decreases along a
/// history.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: AssessmentSession) -> Result<(), RepositoryError>;
    /// Append to a session's history, returning the new history length.
    fn append(&self, id: &SessionId, assessment: &Assessment) -> Result<usize, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<Option<AssessmentSession>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
