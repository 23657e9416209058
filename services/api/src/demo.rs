use crate::cli::AssessmentOverrides;
use crate::infra::InMemorySessionRepository;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use suvision::assessment::{
    Assessment, AssessmentEngine, AssessmentService, EvaluationHistory, RawReadings,
    ReadingsImporter,
};
use suvision::config::AppConfig;
use suvision::error::AppError;
use suvision::telemetry::{self, LogSink};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Water pH (0-14)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) ph: f64,
    /// Water temperature in °C (0-40)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) temperature: f64,
    /// Turbidity in NTU (0-10)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) turbidity: f64,
    /// Print the assessment as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) overrides: AssessmentOverrides,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Readings CSV with ph, temperature, and turbidity columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Write the resulting session history as CSV
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) overrides: AssessmentOverrides,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the resulting session history as CSV
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Print the advisories for every reading, not just the last one
    #[arg(long)]
    pub(crate) verbose: bool,
    #[command(flatten)]
    pub(crate) overrides: AssessmentOverrides,
}

fn load_config(overrides: &AssessmentOverrides) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    overrides.apply(&mut config.assessment);
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = load_config(&args.overrides)?;
    let engine = AssessmentEngine::new(config.assessment.input_policy);

    let assessment =
        engine.assess_raw(RawReadings::new(args.ph, args.temperature, args.turbidity))?;

    if args.json {
        println!("{}", assessment_json(&assessment)?);
    } else {
        render_assessment(&assessment);
    }

    Ok(())
}

fn assessment_json(assessment: &Assessment) -> Result<String, AppError> {
    serde_json::to_string_pretty(assessment)
        .map_err(|err| AppError::Io(std::io::Error::from(err)))
}

pub(crate) fn run_replay(args: ReplayArgs) -> Result<(), AppError> {
    let config = load_config(&args.overrides)?;
    let readings = ReadingsImporter::from_path(&args.csv)?;

    println!(
        "Replaying {} reading(s) from {}",
        readings.len(),
        args.csv.display()
    );
    replay_session(config, readings, args.export, false)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = load_config(&args.overrides)?;

    println!("SuVision water assessment demo");
    replay_session(config, seasonal_readings(), args.export, args.verbose)
}

/// Spring-to-late-summer drift of a shallow pond.
fn seasonal_readings() -> Vec<RawReadings> {
    vec![
        RawReadings::new(7.2, 12.0, 0.8),
        RawReadings::new(7.4, 16.5, 1.6),
        RawReadings::new(7.9, 21.0, 3.2),
        RawReadings::new(8.6, 26.5, 5.4),
        RawReadings::new(9.1, 29.0, 7.8),
        RawReadings::new(6.2, 24.0, 6.1),
        RawReadings::new(7.0, 18.0, 2.5),
    ]
}

fn replay_session(
    config: AppConfig,
    readings: Vec<RawReadings>,
    export: Option<PathBuf>,
    verbose: bool,
) -> Result<(), AppError> {
    let service = AssessmentService::new(
        Arc::new(InMemorySessionRepository::default()),
        config.assessment,
    );
    let session = service.open_session()?;

    let mut last = None;
    for (index, reading) in readings.into_iter().enumerate() {
        let evaluation = match service.evaluate(&session.session_id, reading) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                println!("- reading {} skipped: {err}", index + 1);
                continue;
            }
        };
        if verbose {
            println!("\nReading {}", index + 1);
            render_assessment(&evaluation.assessment);
        }
        last = Some(evaluation.assessment);
    }

    let history = service.history(&session.session_id)?;
    render_history(&history);

    match last {
        Some(assessment) if !verbose => {
            println!("\nLatest reading");
            render_assessment(&assessment);
        }
        Some(_) => {}
        None => println!("\nNo readings evaluated"),
    }

    if let Some(path) = export {
        let csv = service.export_csv(&session.session_id)?;
        fs::write(&path, csv)?;
        println!("\nHistory exported to {}", path.display());
    }

    service.close_session(&session.session_id)?;
    Ok(())
}

pub(crate) fn render_assessment(assessment: &Assessment) {
    let inputs = &assessment.inputs;
    let scores = &assessment.scores;
    let tiers = &assessment.classification;

    println!(
        "Inputs: pH {:.1} | {:.1} °C | {:.1} NTU",
        inputs.ph(),
        inputs.temperature(),
        inputs.turbidity()
    );
    for adjustment in &assessment.adjustments {
        println!(
            "  ({} reading {} clamped to {})",
            adjustment.parameter, adjustment.received, adjustment.applied
        );
    }

    println!("\nForecast");
    println!(
        "- Bloom probability: {:.1}% ({})",
        scores.bloom_probability,
        tiers.bloom.label()
    );
    println!(
        "- Pollution probability: {:.1}% ({})",
        scores.pollution_probability,
        tiers.pollution.label()
    );
    println!(
        "- Sustainability risk index (SRI): {:.1}/100 ({})",
        scores.sri,
        tiers.sri.label()
    );
    println!(
        "- Water quality index: {:.1} ({}, {} band)",
        scores.water_quality_index,
        tiers.water_quality.label(),
        tiers.water_quality.band_color()
    );

    println!("\nBreakdown: {}", tiers.sri.detail());

    println!("\nAdvisories");
    for advisory in &assessment.advisories {
        println!("- [{}] {}", advisory.severity.label(), advisory.message);
    }
}

fn render_history(history: &EvaluationHistory) {
    println!("\nEvaluation history ({} retained)", history.len());
    if history.evicted() > 0 {
        println!("  {} older evaluation(s) evicted", history.evicted());
    }
    println!("  #  | bloom % | pollution % | quality | SRI");
    for (index, entry) in history.all().enumerate() {
        println!(
            "  {:<2} | {:>7.1} | {:>11.1} | {:>7.1} | {:>5.1}",
            index + 1,
            entry.scores.bloom_probability,
            entry.scores.pollution_probability,
            entry.scores.water_quality_index,
            entry.scores.sri
        );
    }

    let series = history.series();
    if let (Some(first), Some(last)) = (
        series.water_quality_index.first(),
        series.water_quality_index.last(),
    ) {
        println!("  Quality index trend: {first:.1} -> {last:.1}");
    }
}
