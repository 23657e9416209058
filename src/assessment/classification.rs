use super::domain::{InputParameters, ScoreSet, Severity};
use serde::{Deserialize, Serialize};

pub const PH_ACIDIC_BELOW: f64 = 6.5;
pub const PH_ALKALINE_ABOVE: f64 = 8.5;
pub const TEMPERATURE_LOW_BELOW: f64 = 10.0;
pub const TEMPERATURE_HIGH_ABOVE: f64 = 25.0;
pub const TURBIDITY_CLEAR_MAX: f64 = 1.0;
pub const TURBIDITY_MODERATE_MAX: f64 = 5.0;
pub const LIKELY_FROM: f64 = 50.0;
pub const SRI_RISK_FROM: f64 = 15.0;
pub const SRI_HIGH_RISK_FROM: f64 = 25.0;
pub const SRI_BLOOM_FROM: f64 = 35.0;
pub const QUALITY_GOOD_ABOVE: f64 = 70.0;
pub const QUALITY_MODERATE_ABOVE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhTier {
    Normal,
    Acidic,
    Alkaline,
}

impl PhTier {
    pub fn classify(ph: f64) -> Self {
        if ph < PH_ACIDIC_BELOW {
            Self::Acidic
        } else if ph > PH_ALKALINE_ABOVE {
            Self::Alkaline
        } else {
            Self::Normal
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Normal => Severity::Ok,
            Self::Acidic | Self::Alkaline => Severity::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Acidic => "Acidic",
            Self::Alkaline => "Alkaline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureTier {
    Normal,
    Low,
    High,
}

impl TemperatureTier {
    pub fn classify(temperature: f64) -> Self {
        if temperature < TEMPERATURE_LOW_BELOW {
            Self::Low
        } else if temperature > TEMPERATURE_HIGH_ABOVE {
            Self::High
        } else {
            Self::Normal
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Normal => Severity::Ok,
            Self::Low | Self::High => Severity::Warning,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurbidityTier {
    Clear,
    Moderate,
    High,
}

impl TurbidityTier {
    pub fn classify(turbidity: f64) -> Self {
        if turbidity <= TURBIDITY_CLEAR_MAX {
            Self::Clear
        } else if turbidity <= TURBIDITY_MODERATE_MAX {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Clear => Severity::Ok,
            Self::Moderate | Self::High => Severity::Warning,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Tier shared by bloom and pollution probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    Unlikely,
    Likely,
}

impl Likelihood {
    pub fn classify(probability: f64) -> Self {
        if probability >= LIKELY_FROM {
            Self::Likely
        } else {
            Self::Unlikely
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Unlikely => Severity::Ok,
            Self::Likely => Severity::Warning,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unlikely => "Unlikely",
            Self::Likely => "Likely",
        }
    }

    pub const fn is_likely(self) -> bool {
        matches!(self, Self::Likely)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SriTier {
    Normal,
    Risk,
    HighRisk,
    BloomCritical,
}

impl SriTier {
    pub fn classify(sri: f64) -> Self {
        if sri < SRI_RISK_FROM {
            Self::Normal
        } else if sri < SRI_HIGH_RISK_FROM {
            Self::Risk
        } else if sri < SRI_BLOOM_FROM {
            Self::HighRisk
        } else {
            Self::BloomCritical
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Normal => Severity::Ok,
            Self::Risk => Severity::Warning,
            Self::HighRisk | Self::BloomCritical => Severity::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Risk => "Risk",
            Self::HighRisk => "High Risk",
            Self::BloomCritical => "Bloom",
        }
    }

    /// Narrative for the detailed breakdown of the water body.
    pub const fn detail(self) -> &'static str {
        match self {
            Self::Normal => "Ecosystem is stable and the water is in good condition.",
            Self::Risk => "Deviations present and problems are possible. Monitoring required.",
            Self::HighRisk => {
                "Ecosystem under threat; parameters deviate significantly from normal."
            }
            Self::BloomCritical => {
                "High probability of explosive microalgae growth; urgent action required."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Good,
    Moderate,
    Poor,
}

impl QualityTier {
    pub fn classify(water_quality_index: f64) -> Self {
        if water_quality_index > QUALITY_GOOD_ABOVE {
            Self::Good
        } else if water_quality_index > QUALITY_MODERATE_ABOVE {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::Good => Severity::Ok,
            Self::Moderate => Severity::Warning,
            Self::Poor => Severity::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        }
    }

    /// Gauge band colour used by renderers.
    pub const fn band_color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Moderate => "orange",
            Self::Poor => "red",
        }
    }
}

/// Tier for every scored quantity of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSet {
    pub ph: PhTier,
    pub temperature: TemperatureTier,
    pub turbidity: TurbidityTier,
    pub bloom: Likelihood,
    pub pollution: Likelihood,
    pub sri: SriTier,
    pub water_quality: QualityTier,
}

impl ClassificationSet {
    pub fn classify(params: &InputParameters, scores: &ScoreSet) -> Self {
        Self {
            ph: PhTier::classify(params.ph()),
            temperature: TemperatureTier::classify(params.temperature()),
            turbidity: TurbidityTier::classify(params.turbidity()),
            bloom: Likelihood::classify(scores.bloom_probability),
            pollution: Likelihood::classify(scores.pollution_probability),
            sri: SriTier::classify(scores.sri),
            water_quality: QualityTier::classify(scores.water_quality_index),
        }
    }

    /// Highest severity across all quantities.
    pub fn overall(&self) -> Severity {
        [
            self.ph.severity(),
            self.temperature.severity(),
            self.turbidity.severity(),
            self.bloom.severity(),
            self.pollution.severity(),
            self.sri.severity(),
            self.water_quality.severity(),
        ]
        .into_iter()
        .max()
        .unwrap_or(Severity::Ok)
    }
}
