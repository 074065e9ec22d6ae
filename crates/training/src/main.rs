//! rul - train and query the CMAPSS RUL pipeline from the command line

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use inference_engine::PredictionService;
use sensor_schema::{sensor_description, SensorValidator, SENSOR_NAMES};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use training::{predict_units, run, TrainingConfig};

#[derive(Parser)]
#[command(name = "rul", about = "Turbofan remaining-useful-life training and prediction")]
struct Cli {
    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the scaler + regression pipeline on CMAPSS data
    Train(TrainArgs),
    /// Predict RUL for raw cycle logs or a single normalized reading
    Predict(PredictArgs),
    /// List sensor keys and what they measure
    Sensors,
}

#[derive(Args)]
struct TrainArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory with train_/test_/RUL_ files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Dataset suffix, e.g. FD001
    #[arg(long)]
    dataset: Option<String>,
    /// Artifact output path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Held-out fraction for the test subset
    #[arg(long)]
    test_size: Option<f64>,
    /// Split seed
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct PredictArgs {
    /// Fitted pipeline artifact
    #[arg(long, default_value = "Models/lr_rul_pipeline.bin")]
    model: PathBuf,
    /// Whitespace-delimited CMAPSS cycle table; scores each unit's last cycle
    #[arg(long, conflicts_with = "reading", required_unless_present = "reading")]
    input: Option<PathBuf>,
    /// JSON object with normalized s_1..s_21 values in [0, 1]
    #[arg(long)]
    reading: Option<String>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn train(args: TrainArgs) -> Result<()> {
    let mut config = TrainingConfig::load(args.config.as_deref()).context("loading training config")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(test_size) = args.test_size {
        config.test_size = test_size;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    info!("Training with {:?}", config);
    let outcome = run(&config).context("training run failed")?;
    println!("{}", outcome.report);
    println!("Model saved: {}", config.output_path.display());
    Ok(())
}

fn predict(args: PredictArgs) -> Result<()> {
    let service = PredictionService::load(&args.model)
        .with_context(|| format!("loading model {}", args.model.display()))?;

    if let Some(input) = args.input {
        let rows = feature_engine::read_cycle_rows(&input)?;
        let predictions = predict_units(service.pipeline(), &rows)?;
        println!("unit_number predicted_rul");
        for p in predictions {
            println!("{} {:.2}", p.unit_number, p.predicted_rul);
        }
        return Ok(());
    }

    let Some(raw) = args.reading else {
        bail!("either --input or --reading is required");
    };
    let value: serde_json::Value = serde_json::from_str(&raw).context("parsing --reading JSON")?;
    let reading = SensorValidator::default().validate_value(&value)?;
    let rul = service.predict(&reading)?;
    println!("Predicted RUL: {:.2} cycles", rul);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Train(args) => train(args),
        Commands::Predict(args) => predict(args),
        Commands::Sensors => {
            for name in SENSOR_NAMES {
                println!("{:<5} {}", name, sensor_description(name).unwrap_or(""));
            }
            Ok(())
        }
    }
}
