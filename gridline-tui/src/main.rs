use std::fs::{self, File};

use gridline_tui::config::AppConfig;
use gridline_tui::error::AppError;
use gridline_tui::{paths, runtime};
use log::info;
use simplelog::{Config as LogConfig, WriteLogger};

fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    paths::rotate_logs();
    let cache = paths::cache_dir().ok_or(AppError::NoCacheDir)?;
    fs::create_dir_all(&cache)?;
    let path = paths::log_file().ok_or(AppError::NoCacheDir)?;
    let file = File::create(&path)?;
    WriteLogger::init(config.level_filter(), LogConfig::default(), file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    init_logging(&config)?;
    info!("Config: {:?}", config);
    runtime::run(config).await
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
