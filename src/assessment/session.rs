use super::domain::{EvaluationSnapshot, InputError, RawReadings};
use super::engine::{Assessment, AssessmentEngine};
use super::history::EvaluationHistory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

/// Identifier wrapper for assessment sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Session context owning exactly one evaluation history.
///
/// Each session is independent; dropping it drops its history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    history: EvaluationHistory,
}

impl AssessmentSession {
    pub fn new(id: SessionId, history_limit: Option<NonZeroUsize>) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            history: EvaluationHistory::with_limit(history_limit),
        }
    }

    /// Evaluate readings and append the resulting snapshot to this session.
    pub fn evaluate(
        &mut self,
        engine: &AssessmentEngine,
        readings: RawReadings,
    ) -> Result<Assessment, InputError> {
        let assessment = engine.assess_raw(readings)?;
        self.record_now(&assessment);
        Ok(assessment)
    }

    /// Append an already computed assessment as a snapshot.
    pub fn record(&mut self, assessment: &Assessment, recorded_at: DateTime<Utc>) -> usize {
        self.push(snapshot_of(assessment, recorded_at))
    }

    /// Append an assessment stamped with the current time.
    pub fn record_now(&mut self, assessment: &Assessment) -> usize {
        self.record(assessment, Utc::now())
    }

    /// Append a snapshot, returning the retained history length.
    pub fn push(&mut self, snapshot: EvaluationSnapshot) -> usize {
        let wqi = snapshot.scores.water_quality_index;
        self.history.append(snapshot);
        debug!(
            session = %self.id.0,
            history_len = self.history.len(),
            wqi,
            "evaluation recorded"
        );
        self.history.len()
    }

    pub fn history(&self) -> &EvaluationHistory {
        &self.history
    }

    pub fn into_history(self) -> EvaluationHistory {
        self.history
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            created_at: self.created_at,
            history_len: self.history.len(),
            history_limit: self.history.limit().map(NonZeroUsize::get),
        }
    }
}

pub fn snapshot_of(assessment: &Assessment, recorded_at: DateTime<Utc>) -> EvaluationSnapshot {
    EvaluationSnapshot {
        recorded_at,
        inputs: assessment.inputs,
        scores: assessment.scores,
    }
}

/// Public description of a session without its history payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub created_at: DateTime<Utc>,
    pub history_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}
