use crate::demo::{run_assess, run_demo, run_replay, AssessArgs, DemoArgs, ReplayArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use suvision::assessment::{AssessmentConfig, InputPolicy};
use suvision::config::parse_input_policy;
use suvision::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SuVision",
    about = "Score water readings for bloom, pollution, and sustainability risk",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single reading and print tiers and advisories
    Assess(AssessArgs),
    /// Evaluate every row of a readings CSV in one session and print the trend
    Replay(ReplayArgs),
    /// Replay a built-in seasonal sequence of readings
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) overrides: AssessmentOverrides,
}

/// Flags shared by every command that evaluates readings.
#[derive(Args, Debug, Default)]
pub(crate) struct AssessmentOverrides {
    /// Treatment of out-of-range readings: clamp or reject
    #[arg(long, value_parser = parse_policy)]
    pub(crate) input_policy: Option<InputPolicy>,
    /// Cap on evaluations retained per session (unbounded when omitted)
    #[arg(long)]
    pub(crate) history_limit: Option<NonZeroUsize>,
}

impl AssessmentOverrides {
    pub(crate) fn apply(&self, config: &mut AssessmentConfig) {
        if let Some(policy) = self.input_policy {
            config.input_policy = policy;
        }
        if let Some(limit) = self.history_limit {
            config.history_limit = Some(limit);
        }
    }
}

fn parse_policy(raw: &str) -> Result<InputPolicy, String> {
    parse_input_policy(raw).map_err(|err| err.to_string())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Replay(args) => run_replay(args),
        Command::Demo(args) => run_demo(args),
    }
}
