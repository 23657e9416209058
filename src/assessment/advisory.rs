use super::classification::{ClassificationSet, PhTier, TemperatureTier, TurbidityTier};
use super::domain::Severity;
use serde::Serialize;

/// What an advisory is about; also its position in the advisory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTopic {
    Ph,
    Temperature,
    Turbidity,
    Bloom,
    Pollution,
}

/// Human-readable recommendation tagged with a severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub topic: AdvisoryTopic,
    pub message: &'static str,
    pub severity: Severity,
}

fn ph_advisory(tier: PhTier) -> Advisory {
    let message = match tier {
        PhTier::Acidic => {
            "Water is acidic: risk of pipe corrosion, metal leaching, and stress on fish. \
             Apply liming and use neutralizing filters."
        }
        PhTier::Alkaline => {
            "Water is alkaline: possible wastewater inflow or excess minerals. \
             Audit inflow sources and consider reverse osmosis."
        }
        PhTier::Normal => "pH is normal. The ecosystem is stable.",
    };

    Advisory {
        topic: AdvisoryTopic::Ph,
        message,
        severity: tier.severity(),
    }
}

fn temperature_advisory(tier: TemperatureTier) -> Advisory {
    let message = match tier {
        TemperatureTier::High => {
            "High temperature: accelerated algae growth and bloom risk. \
             Increase aeration and biofiltration."
        }
        TemperatureTier::Low => {
            "Low temperature: slower biological processes and reduced self-purification. \
             Keep monitoring."
        }
        TemperatureTier::Normal => "Temperature is normal.",
    };

    Advisory {
        topic: AdvisoryTopic::Temperature,
        message,
        severity: tier.severity(),
    }
}

fn turbidity_advisory(tier: TurbidityTier) -> Advisory {
    let message = match tier {
        TurbidityTier::High => {
            "Turbidity is elevated: suspended particle contamination. \
             Use sand or carbon filtration and audit inflow sources."
        }
        TurbidityTier::Moderate => "Turbidity is moderate: acceptable but needs monitoring.",
        TurbidityTier::Clear => "Turbidity is low: water is clear and safe.",
    };

    Advisory {
        topic: AdvisoryTopic::Turbidity,
        message,
        severity: tier.severity(),
    }
}

/// Build the advisory list for one classification.
///
/// Always starts with the pH, temperature, and turbidity advisories, in that
/// order, followed by bloom then pollution only when each is likely.
pub fn advise(classification: &ClassificationSet) -> Vec<Advisory> {
    let mut advisories = vec![
        ph_advisory(classification.ph),
        temperature_advisory(classification.temperature),
        turbidity_advisory(classification.turbidity),
    ];

    if classification.bloom.is_likely() {
        advisories.push(Advisory {
            topic: AdvisoryTopic::Bloom,
            message: "Bloom is likely: take measures to reduce temperature and turbidity.",
            severity: classification.bloom.severity(),
        });
    }

    if classification.pollution.is_likely() {
        advisories.push(Advisory {
            topic: AdvisoryTopic::Pollution,
            message: "Pollution is likely: inspect wastewater discharge and run treatment.",
            severity: classification.pollution.severity(),
        });
    }

    advisories
}
