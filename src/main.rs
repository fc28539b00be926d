//! Vital Signs Anomaly Detection - CLI Entry Point
//!
//! Prints exactly one JSON line to stdout per invocation. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;

use vitals_anomaly_core::api;
use vitals_anomaly_core::constants::{APP_NAME, APP_VERSION};
use vitals_anomaly_core::DetectorConfig;

#[derive(Parser)]
#[command(name = "vitals-anomaly")]
#[command(about = "Vital-sign anomaly detection", long_about = None)]
struct Cli {
    /// Model artifact path (overrides VITALS_MODEL_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one reading given as a JSON object
    Predict {
        /// {"heart_rate": .., "spo2": .., "temperature": .., "bp_systolic": .., "bp_diastolic": .., "ecg": ..}
        json: String,
    },

    /// Score a JSON array of readings and print a summary
    #[command(name = "analyze_batch")]
    AnalyzeBatch {
        json: String,
    },

    /// Train on a JSONL corpus and save the model
    Train {
        /// Labelled corpus (one record per line)
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Write a synthetic labelled corpus
    Generate {
        #[arg(short, long, default_value = "10000")]
        samples: usize,

        #[arg(long, default_value = "0.3")]
        anomaly_rate: f64,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Show metadata of the saved model
    Info,
}

fn to_line<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn error_line(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Parse without exiting, so usage errors can still be reported as JSON
fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

fn run(cli: Cli) -> Result<String, String> {
    let mut config = DetectorConfig::from_env();
    if let Some(path) = cli.model {
        config = config.with_model_path(path);
    }

    match cli.command {
        Commands::Predict { json } => {
            let detector = api::load_detector(config)?;
            to_line(&api::predict(&detector, &json)?)
        }
        Commands::AnalyzeBatch { json } => {
            let detector = api::load_detector(config)?;
            to_line(&api::analyze_batch(&detector, &json)?)
        }
        Commands::Train { data } => to_line(&api::train(config, &data)?),
        Commands::Generate { samples, anomaly_rate, output, seed } => {
            to_line(&api::generate(samples, anomaly_rate, seed, &output)?)
        }
        Commands::Info => {
            let detector = api::load_detector(config)?;
            to_line(&api::model_info(&detector)?)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            log::error!("{}", e);
            println!("{}", error_line(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{} v{}", APP_NAME, APP_VERSION);

    match run(cli) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            println!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}
