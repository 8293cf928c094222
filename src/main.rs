use anyhow::{Context, Result};
use clap::Parser;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use maternal_vitals::cli::{
    Cli, Commands, EstimateBpArgs, ForecastArgs, GenerateArgs, TrainArgs, VitalArgs,
};
use maternal_vitals::ctx::{Ctx, RunKind};
use maternal_vitals::error::VitalsError;
use maternal_vitals::io;
use maternal_vitals::model::bundle::HealthModels;
use maternal_vitals::pipeline::Pipeline;
use maternal_vitals::schema::v1::{BpOutput, ErrorOutput, ForecastOutput};
use maternal_vitals::scores::bp::BloodPressureEstimator;
use maternal_vitals::scores::health::evaluate;
use maternal_vitals::vitals::VitalSample;

const BP_MODEL_FILE: &str = "bp_model.json";

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // estimate-bp reports every failure, argument errors included, as one JSON line.
        Err(err) if err.use_stderr() && invoked_estimate_bp() => {
            let output = ErrorOutput {
                error: parse_error_message(&err),
            };
            io::write_json_line(stdout().lock(), &output)?;
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => err.exit(),
    };

    // Single-shot commands keep stderr quiet unless RUST_LOG asks otherwise.
    let default_level = match cli.command {
        Commands::Generate(_) | Commands::Train(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => run_generate(args)?,
        Commands::Train(args) => run_train(args)?,
        Commands::Evaluate(args) => {
            let v = args.vitals;
            let assessment = evaluate(v.heart_rate, v.spo2, v.temperature, v.blood_pressure);
            io::write_json_line(stdout().lock(), &assessment)?;
        }
        Commands::Forecast(args) => run_forecast(args)?,
        Commands::EstimateBp(args) => return run_estimate_bp(args),
    }

    Ok(ExitCode::SUCCESS)
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        RunKind::Generate,
        args.samples,
        args.seed,
        args.out,
        args.json,
        args.tsv,
        env!("CARGO_PKG_VERSION"),
    );
    Pipeline::generate().run(&mut ctx)?;
    print_summary(&ctx)
}

fn run_train(args: TrainArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        RunKind::Train,
        args.samples,
        args.seed,
        args.out,
        false,
        args.tsv,
        env!("CARGO_PKG_VERSION"),
    );
    ctx.test_fraction = args.test_fraction;
    ctx.calibration_samples = args.calibration_samples;
    Pipeline::train().run(&mut ctx)?;
    print_summary(&ctx)
}

fn run_forecast(args: ForecastArgs) -> Result<()> {
    let models: HealthModels = io::read_json(&args.models)
        .with_context(|| format!("failed to load models from {}", args.models.display()))?;
    let sample = to_sample(args.vitals, args.pregnancy_week);
    let forecast = models.forecast(&sample)?;
    let output = ForecastOutput {
        forecast,
        rule_based: evaluate(
            sample.heart_rate,
            sample.spo2,
            sample.temperature,
            sample.blood_pressure,
        ),
    };
    io::write_json_line(stdout().lock(), &output)
}

fn run_estimate_bp(args: EstimateBpArgs) -> Result<ExitCode> {
    match estimate_bp(&args) {
        Ok(bp) => {
            io::write_json_line(stdout().lock(), &BpOutput { bp })?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let output = ErrorOutput {
                error: err.to_string(),
            };
            io::write_json_line(stdout().lock(), &output)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn estimate_bp(args: &EstimateBpArgs) -> Result<f64, VitalsError> {
    let heart_rate = parse_vital("heart_rate", &args.heart_rate)?;
    let spo2 = parse_vital("spo2", &args.spo2)?;
    let model_path = args.model.clone().unwrap_or_else(default_model_path);
    BloodPressureEstimator::load(&model_path).estimate(heart_rate, spo2)
}

fn parse_vital(name: &str, raw: &str) -> Result<f64, VitalsError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| VitalsError::InvalidInput(format!("{} must be numeric, got {:?}", name, raw)))
}

fn invoked_estimate_bp() -> bool {
    std::env::args_os()
        .nth(1)
        .is_some_and(|arg| arg == "estimate-bp")
}

/// Message part of a clap error, without the usage block, on one line.
fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let body = rendered.split("\n\n").next().unwrap_or_default();
    body.trim_start_matches("error: ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_model_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BP_MODEL_FILE)))
        .unwrap_or_else(|| PathBuf::from(BP_MODEL_FILE))
}

fn to_sample(v: VitalArgs, pregnancy_week: u8) -> VitalSample {
    VitalSample {
        heart_rate: v.heart_rate,
        spo2: v.spo2,
        temperature: v.temperature,
        blood_pressure: v.blood_pressure,
        pregnancy_week,
    }
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
