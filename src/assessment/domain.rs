use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Water parameter measured by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Temperature,
    Turbidity,
}

impl Parameter {
    pub const fn ordered() -> [Self; 3] {
        [Self::Ph, Self::Temperature, Self::Turbidity]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ph => "pH",
            Self::Temperature => "Temperature (°C)",
            Self::Turbidity => "Turbidity (NTU)",
        }
    }

    /// Closed domain accepted by the scoring models.
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::Ph => (0.0, 14.0),
            Self::Temperature => (0.0, 40.0),
            Self::Turbidity => (0.0, 10.0),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Untrusted readings as they arrive from a form, CLI flag, or CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawReadings {
    pub ph: f64,
    pub temperature: f64,
    pub turbidity: f64,
}

impl RawReadings {
    pub const fn new(ph: f64, temperature: f64, turbidity: f64) -> Self {
        Self {
            ph,
            temperature,
            turbidity,
        }
    }

    fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Temperature => self.temperature,
            Parameter::Turbidity => self.turbidity,
        }
    }
}

/// Validated readings; every field lies inside [`Parameter::range`].
///
/// Construction goes through [`InputParameters::clamped`] or
/// [`InputParameters::try_new`], so the models never see out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputParameters {
    ph: f64,
    temperature: f64,
    turbidity: f64,
}

impl InputParameters {
    /// Strict constructor: any value outside its domain is rejected.
    pub fn try_new(raw: RawReadings) -> Result<Self, InputError> {
        for parameter in Parameter::ordered() {
            let value = raw.value(parameter);
            let (min, max) = parameter.range();
            if value.is_nan() {
                return Err(InputError::NotANumber { parameter });
            }
            if value < min || value > max {
                return Err(InputError::OutOfRange {
                    parameter,
                    value,
                    min,
                    max,
                });
            }
        }

        Ok(Self {
            ph: raw.ph,
            temperature: raw.temperature,
            turbidity: raw.turbidity,
        })
    }

    /// Permissive constructor: out-of-range values snap to the nearest boundary.
    ///
    /// NaN has no nearest boundary and is still rejected.
    pub fn clamped(raw: RawReadings) -> Result<Sanitized, InputError> {
        let mut adjustments = Vec::new();
        let mut clamp = |parameter: Parameter| -> Result<f64, InputError> {
            let value = raw.value(parameter);
            if value.is_nan() {
                return Err(InputError::NotANumber { parameter });
            }
            let (min, max) = parameter.range();
            let bounded = value.clamp(min, max);
            if bounded != value {
                warn!(%parameter, value, bounded, "reading outside domain clamped");
                adjustments.push(Adjustment {
                    parameter,
                    received: value,
                    applied: bounded,
                });
            }
            Ok(bounded)
        };

        let params = Self {
            ph: clamp(Parameter::Ph)?,
            temperature: clamp(Parameter::Temperature)?,
            turbidity: clamp(Parameter::Turbidity)?,
        };

        Ok(Sanitized {
            params,
            adjustments,
        })
    }

    pub const fn ph(&self) -> f64 {
        self.ph
    }

    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    pub const fn turbidity(&self) -> f64 {
        self.turbidity
    }

    /// Absolute deviation of pH from neutral (7).
    pub fn ph_deviation(&self) -> f64 {
        (self.ph - 7.0).abs()
    }
}

impl<'de> Deserialize<'de> for InputParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawReadings::deserialize(deserializer)?;
        Self::try_new(raw).map_err(serde::de::Error::custom)
    }
}

/// Record of a reading that was pulled back inside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub parameter: Parameter,
    pub received: f64,
    pub applied: f64,
}

/// Result of running raw readings through an [`InputPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sanitized {
    pub params: InputParameters,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}

/// How out-of-range readings are treated before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    #[default]
    Clamp,
    Reject,
}

impl InputPolicy {
    pub fn apply(self, raw: RawReadings) -> Result<Sanitized, InputError> {
        match self {
            Self::Clamp => InputParameters::clamped(raw),
            Self::Reject => InputParameters::try_new(raw).map(|params| Sanitized {
                params,
                adjustments: Vec::new(),
            }),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Some(Self::Clamp),
            "reject" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Input sanitization failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{parameter} reading {value} outside accepted range [{min}, {max}]")]
    OutOfRange {
        parameter: Parameter,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{parameter} reading is not a number")]
    NotANumber { parameter: Parameter },
}

/// Derived scores for one evaluation, each within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub bloom_probability: f64,
    pub pollution_probability: f64,
    pub sri: f64,
    pub water_quality_index: f64,
}

/// One stored evaluation: what was measured and what it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSnapshot {
    pub recorded_at: DateTime<Utc>,
    pub inputs: InputParameters,
    pub scores: ScoreSet,
}

/// Severity attached to tiers and advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}
