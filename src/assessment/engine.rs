use super::advisory::{advise, Advisory};
use super::classification::ClassificationSet;
use super::domain::{
    Adjustment, InputError, InputParameters, InputPolicy, RawReadings, ScoreSet, Severity,
};
use super::models;
use serde::Serialize;

/// Stateless evaluator applying the input policy, models, tiers, and advisories.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentEngine {
    policy: InputPolicy,
}

impl AssessmentEngine {
    pub const fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Score already-validated readings.
    pub fn assess(&self, params: &InputParameters) -> Assessment {
        let scores = models::score(params);
        let classification = ClassificationSet::classify(params, &scores);
        let advisories = advise(&classification);

        Assessment {
            inputs: *params,
            scores,
            overall: classification.overall(),
            classification,
            advisories,
            adjustments: Vec::new(),
        }
    }

    /// Sanitize untrusted readings under the configured policy, then score them.
    pub fn assess_raw(&self, raw: RawReadings) -> Result<Assessment, InputError> {
        let sanitized = self.policy.apply(raw)?;
        let mut assessment = self.assess(&sanitized.params);
        assessment.adjustments = sanitized.adjustments;
        Ok(assessment)
    }
}

/// Full output of one evaluation, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub inputs: InputParameters,
    pub scores: ScoreSet,
    pub classification: ClassificationSet,
    pub overall: Severity,
    pub advisories: Vec<Advisory>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}
