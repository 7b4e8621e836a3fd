//! landmark — command-line client for the landmark prediction service

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use landmark_client::{
    ClientConfig, ImageReference, Platform, PredictionResult, RemoteClient,
};

/// Landmark prediction CLI
#[derive(Parser)]
#[command(name = "landmark")]
#[command(version = landmark_client::PKG_VERSION)]
#[command(about = "Landmark prediction service client")]
struct Args {
    /// Service base URL (endpoints are derived from it)
    #[arg(short, long, env = "LANDMARK_BASE_URL")]
    base_url: Option<String>,

    /// Config file (default: ~/.landmark/config.toml, then /etc/landmark/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Payload variant to use instead of the detected one
    #[arg(long)]
    platform: Option<Platform>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check service health
    Health,

    /// Upload an image and print the predictions
    Predict {
        /// Image file (or omit to read image bytes from stdin)
        image: Option<PathBuf>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// List past predictions
    History {
        /// Maximum number of records to request
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // --base-url skips config file lookup entirely
    let config = match args.base_url {
        Some(ref base_url) => ClientConfig::from_base_url(base_url),
        None => ClientConfig::load(args.config.as_deref())?,
    };

    let mut builder = RemoteClient::builder().config(config);
    if let Some(platform) = args.platform {
        builder = builder.platform(platform);
    }
    let client = builder.build()?;

    match args.command {
        Command::Health => {
            let status = client.check_health().await;
            println!("status: {status}");
            if !status.is_healthy() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Predict { image, json } => {
            let image = resolve_image(image)?;
            let result = client.predict(&image).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_predictions(&result);
            }
        }

        Command::History { limit } => {
            let records = client.history(limit).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Use the given file, or image bytes piped on stdin.
fn resolve_image(arg: Option<PathBuf>) -> Result<ImageReference, Box<dyn std::error::Error>> {
    if let Some(path) = arg {
        return Ok(ImageReference::File(path));
    }
    if io::stdin().is_terminal() {
        return Err("predict: no image provided (pass a file or pipe image bytes)".into());
    }

    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    if buf.is_empty() {
        return Err("predict: stdin was empty".into());
    }
    Ok(ImageReference::blob(buf))
}

fn print_predictions(result: &PredictionResult) {
    if result.predictions.is_empty() {
        println!("no predictions");
        return;
    }
    for (rank, p) in result.predictions.iter().enumerate() {
        println!("{}. {} ({:.1}%)", rank + 1, p.label, p.confidence * 100.0);
    }
}
