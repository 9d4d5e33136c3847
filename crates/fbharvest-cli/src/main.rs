mod harvest;
mod ocr;
mod sink;
mod summary;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fbharvest_core::naming::{DOM_DIR, OCR_DIR};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fbharvest")]
#[command(about = "Harvest monthly post reactions from public pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scroll each account back to a month and capture its posts.
    Harvest {
        /// Target month as YYYYMM.
        #[arg(long)]
        month: String,
        /// Account list, one URL per line. Defaults to `FBHARVEST_URLS_PATH`.
        #[arg(long)]
        urls: Option<PathBuf>,
    },
    /// Recognize reaction counts from captured images.
    Ocr {
        /// Capture directory, relative to the output root.
        #[arg(long, default_value = OCR_DIR)]
        dir: PathBuf,
    },
    /// Aggregate per-account triples into the summary file.
    Summary {
        /// `DOM` or `OCR`, relative to the output root.
        #[arg(long, value_parser = [DOM_DIR, OCR_DIR])]
        dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fbharvest_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Harvest { month, urls } => {
            harvest::run_harvest(&config, &month, urls.as_deref()).await
        }
        Commands::Ocr { dir } => ocr::run_ocr(&config, &dir).await,
        Commands::Summary { dir } => summary::run_summary(&config, Path::new(&dir)),
    }
}
