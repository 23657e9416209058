use super::domain::InputPolicy;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Engine and session settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub input_policy: InputPolicy,
    /// Per-session history cap; `None` keeps every evaluation for the session's lifetime.
    pub history_limit: Option<NonZeroUsize>,
}
