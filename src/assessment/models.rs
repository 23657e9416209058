//! Fixed heuristic scoring models.
//!
//! Every function is total over [`InputParameters`] and returns a value in `[0, 100]`.
//! Weights are uncalibrated heuristics and must stay exactly as written.

use super::domain::{InputParameters, ScoreSet};

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;
const NEUTRAL_PH: f64 = 7.0;
const TEMPERATURE_SPAN: f64 = 40.0;

/// Smallest turbidity fed to `log10`.
///
/// Numeric-stability floor only: keeps `log10(0)` defined and bounds the
/// negative contribution of near-zero readings. It carries no domain meaning.
pub const TURBIDITY_LOG_FLOOR: f64 = 0.1;

/// Divisor of the sustainability index.
pub const SRI_K: f64 = 10.0;

fn clip(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Temperature rescaled from `[0, 40]` to `[0, 10]`.
fn temperature_signal(params: &InputParameters) -> f64 {
    params.temperature() / TEMPERATURE_SPAN * 10.0
}

/// Likelihood of algal bloom.
pub fn bloom_probability(params: &InputParameters) -> f64 {
    let neutrality = NEUTRAL_PH - params.ph_deviation();
    clip(
        (0.4 * neutrality + 0.3 * temperature_signal(params) + 0.3 * params.turbidity()) * 10.0,
    )
}

/// Likelihood of contamination; weighs turbidity and pH deviation.
pub fn pollution_probability(params: &InputParameters) -> f64 {
    clip(
        (0.3 * params.ph_deviation()
            + 0.3 * temperature_signal(params)
            + 0.4 * params.turbidity())
            * 10.0,
    )
}

/// Sustainability Risk Index (SRI).
pub fn sustainability_index(params: &InputParameters) -> f64 {
    let thermal_stress = params.temperature() * params.ph_deviation();
    let turbidity_term = params.turbidity().max(TURBIDITY_LOG_FLOOR).log10();
    clip((thermal_stress + turbidity_term) / SRI_K * 10.0)
}

/// Composite Water Quality Index.
///
/// Both probabilities are already in `[0, 100]`, so their mean is too, and so is
/// its complement; no extra clip is applied.
pub fn water_quality_index(bloom_probability: f64, pollution_probability: f64) -> f64 {
    SCORE_MAX - (bloom_probability + pollution_probability) / 2.0
}

/// Run every model for one set of readings.
pub fn score(params: &InputParameters) -> ScoreSet {
    let bloom = bloom_probability(params);
    let pollution = pollution_probability(params);

    ScoreSet {
        bloom_probability: bloom,
        pollution_probability: pollution,
        sri: sustainability_index(params),
        water_quality_index: water_quality_index(bloom, pollution),
    }
}
