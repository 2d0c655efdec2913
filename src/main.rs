use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use term_snake::app::App;
use term_snake::game::GameConfig;
use term_snake::persistence::FileStore;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: usize,

    /// Starting milliseconds between ticks
    #[arg(long, default_value = "160")]
    interval: u64,

    /// Where the best score is kept between sessions
    #[arg(long, default_value = ".term_snake_best.json")]
    best_file: PathBuf,

    /// Log file (the terminal itself belongs to the game while it runs)
    #[arg(long, default_value = "term_snake.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up file logging before touching the terminal
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(LevelFilter::Info, LogConfig::default(), log_file)
        .context("Failed to initialize logger")?;

    let base = GameConfig::new(cli.width, cli.height);
    let config = GameConfig {
        initial_interval_ms: cli.interval,
        min_interval_ms: base.min_interval_ms.min(cli.interval),
        ..base
    };
    config.validate().context("Invalid game configuration")?;

    info!(
        "starting: grid {}x{}, interval {} ms",
        config.grid_width, config.grid_height, config.initial_interval_ms
    );

    let store = FileStore::new(cli.best_file);
    let mut app = App::new(config, Box::new(store));
    app.run().await?;

    info!("clean shutdown");
    Ok(())
}
