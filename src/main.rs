//! AgroYield - Main entry point
//!
//! Two operating modes: a batch training job that fits and selects a
//! model, and a long-running prediction service. A one-shot `predict`
//! command covers manual checks against a saved artifact.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use agroyield::artifact::ModelArtifact;
use agroyield::dataset::load_training_data;
use agroyield::inference::InferenceEngine;
use agroyield::schema::FeatureRecord;
use agroyield::server::{run_server, ServerConfig};
use agroyield::training::train_and_select;

#[derive(Parser)]
#[command(name = "agroyield", about = "Crop yield prediction", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train both candidate models on a CSV and save the winner
    Train {
        /// Path to the training CSV
        #[arg(long)]
        data: PathBuf,
        /// Where to write the model artifact
        #[arg(long, default_value = "models/model.bin")]
        output: PathBuf,
    },
    /// Start the HTTP prediction service
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Path to the model artifact
        #[arg(long, default_value = "models/model.bin")]
        model: PathBuf,
    },
    /// Predict one record from a JSON file
    Predict {
        /// Path to the model artifact
        #[arg(long, default_value = "models/model.bin")]
        model: PathBuf,
        /// JSON file containing one feature record
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agroyield=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { data, output } => cmd_train(&data, &output),
        Commands::Serve { host, port, model } => {
            run_server(ServerConfig {
                host,
                port,
                model_path: model,
            })
            .await
        }
        Commands::Predict { model, input } => cmd_predict(&model, &input),
    }
}

fn cmd_train(data: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    let (records, targets) = load_training_data(data)
        .with_context(|| format!("loading training data from {}", data.display()))?;

    let result = train_and_select(&records, &targets)?;
    for candidate in &result.candidates {
        tracing::info!(
            family = %candidate.family,
            cv_score = candidate.cv_score,
            params = %candidate.params,
            "candidate result"
        );
    }

    result
        .artifact
        .save(output)
        .with_context(|| format!("saving artifact to {}", output.display()))?;

    tracing::info!(winner = %result.winner(), output = %output.display(), "training complete");
    Ok(())
}

fn cmd_predict(model: &PathBuf, input: &PathBuf) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading record from {}", input.display()))?;
    let record: FeatureRecord = serde_json::from_str(&json)
        .with_context(|| format!("parsing feature record from {}", input.display()))?;

    // Fail fast on a bad artifact before touching the record
    let artifact = ModelArtifact::load(model)?;
    let engine = InferenceEngine::from_artifact(artifact);

    let result = engine.predict_with_recommendations(&record)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
