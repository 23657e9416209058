//! Water-quality assessment: scoring models, tier classification, advisories, and
//! per-session evaluation history.

pub mod advisory;
pub mod classification;
mod config;
pub mod domain;
mod engine;
pub mod history;
mod import;
pub mod models;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use advisory::{Advisory, AdvisoryTopic};
pub use classification::{
    ClassificationSet, Likelihood, PhTier, QualityTier, SriTier, TemperatureTier, TurbidityTier,
};
pub use config::AssessmentConfig;
pub use domain::{
    Adjustment, EvaluationSnapshot, InputError, InputParameters, InputPolicy, Parameter,
    RawReadings, Sanitized, ScoreSet, Severity,
};
pub use engine::{Assessment, AssessmentEngine};
pub use history::{EvaluationHistory, HistorySeries};
pub use import::{ImportError, ReadingsImporter};
pub use repository::{RepositoryError, SessionRepository};
pub use router::{assessment_router, HistoryView};
pub use service::{AssessmentService, AssessmentServiceError, SessionEvaluation};
pub use session::{AssessmentSession, SessionId, SessionSummary};
