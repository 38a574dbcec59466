//! Attrition pipeline entrypoint: runs one stage, or every stage in order, against the
//! files named by the pipeline config. Each finished stage prints a JSON summary line.

use attrition_pipeline::{
    cleaning, dataset,
    config::PipelineConfig,
    explore,
    features::{self, Feature},
    logging::{StageSummary, StructuredLogger},
    predict::{self, PredictionInput},
    split, training, validation,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// File-based employee attrition pipeline
#[derive(Parser)]
#[command(name = "attrition-pipeline")]
#[command(about = "Validate, engineer, train and score employee attrition data", long_about = None)]
#[command(version)]
struct Cli {
    /// Pipeline config file (JSON); falls back to ATTRITION_CONFIG_PATH, then pipeline.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the raw CSV and write the ingestion file
    Ingest,
    /// Schema-check the ingested rows
    Validate,
    /// Describe columns, attrition balance and correlations
    Explore,
    /// Report duplicates and missing values
    Clean,
    /// Encode categoricals and derive features
    Features,
    /// Stratified train/test split
    Split,
    /// Fit and persist the model artifact
    Train,
    /// Score the artifact on the test partition
    Evaluate,
    /// Stratified k-fold recall of the trained model's recipe
    Cv,
    /// Grid search around the trained model, refit and write metrics
    Tune,
    /// Score one engineered record
    Predict {
        /// JSON object keyed by engineered column names
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Every stage from ingestion to tuning
    Run,
}

fn run_stage(config: &PipelineConfig, command: &Commands) -> Result<StageSummary<'static>, BoxError> {
    let paths = &config.paths;
    let summary = match command {
        Commands::Ingest => {
            let t = dataset::ingest(config)?;
            let (rows, cols) = t.shape();
            StageSummary::new("ingest", rows, cols).with_output(&paths.ingestion())
        }
        Commands::Validate => {
            let t = validation::validate(config)?;
            let (rows, cols) = t.shape();
            StageSummary::new("validate", rows, cols).with_output(&paths.validation())
        }
        Commands::Explore => {
            let report = explore::explore(config)?;
            let rows = report.attrition_counts.values().sum();
            StageSummary::new("explore", rows, report.columns.len()).with_output(&paths.eda())
        }
        Commands::Clean => {
            let report = cleaning::clean(config)?;
            StageSummary::new("clean", report.rows, report.missing.len()).with_output(&paths.cleaning())
        }
        Commands::Features => {
            let records = features::feature_engineering(config)?;
            StageSummary::new("features", records.len(), Feature::ALL.len() + 1).with_output(&paths.featured())
        }
        Commands::Split => {
            let (train, test) = split::split(config)?;
            info!(path = %paths.test().display(), rows = test.len(), "test partition");
            StageSummary::new("split", train.len(), Feature::ALL.len() + 1).with_output(&paths.train())
        }
        Commands::Train => {
            let model = training::train(config)?;
            StageSummary::new("train", 0, model.feature_columns.len()).with_output(&paths.model())
        }
        Commands::Evaluate => {
            let eval = training::evaluate(config)?;
            StageSummary::new("evaluate", eval.confusion.total(), eval.coefficients.len())
        }
        Commands::Cv => {
            let scores = training::cross_validate(config)?;
            StageSummary::new("cv", scores.len(), 1)
        }
        Commands::Tune => {
            let outcome = training::tune(config)?;
            StageSummary::new("tune", outcome.grid.len(), 2).with_output(&paths.metrics())
        }
        Commands::Predict { input } => {
            let input = PredictionInput::from_json_file(input)?;
            match predict::predict(config, &input)? {
                Some(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    StageSummary::new("predict", 1, Feature::ALL.len())
                }
                None => {
                    warn!("no usable model artifact; run `train` first");
                    StageSummary::failed("predict", "model artifact unavailable")
                }
            }
        }
        Commands::Run => {
            let stages = [
                Commands::Ingest,
                Commands::Validate,
                Commands::Explore,
                Commands::Clean,
                Commands::Features,
                Commands::Split,
                Commands::Train,
                Commands::Evaluate,
                Commands::Cv,
                Commands::Tune,
            ];
            for stage in &stages {
                let summary = run_stage(config, stage)?;
                StructuredLogger::emit_json(&summary, &mut std::io::stdout());
            }
            StageSummary::new("run", stages.len(), 0)
        }
    };
    Ok(summary)
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| {
        std::env::var("ATTRITION_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pipeline.json"))
    });
    let config = PipelineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "attrition pipeline starting");

    config.ensure_dirs()?;

    match run_stage(&config, &cli.command) {
        Ok(summary) => {
            StructuredLogger::emit_json(&summary, &mut std::io::stdout());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "stage failed");
            StructuredLogger::emit_json(&StageSummary::failed("pipeline", &e), &mut std::io::stdout());
            Err(e)
        }
    }
}
