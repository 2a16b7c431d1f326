mod clock;
mod config;
mod error;
mod game;
mod hud;
mod input;
mod render;
mod session;
mod snake;
mod sprite;
mod state;
mod surface;
mod term;

use std::{fs::File, path::{Path, PathBuf}, process::ExitCode};

use clap::Parser;
use env_logger::{Env, Target};

use config::Config;
use error::Result;

/// A grid coordinate, in cells rather than pixels.
pub type Cell = (i32, i32);

#[derive(Parser, Debug)]
#[command(version, about = "The classic snake game, in your terminal")]
struct Args {
    /// TOML file with board settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Size of one grid cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Milliseconds between snake moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// File settings first, then flags on top.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(width) = self.width { config.width = width; }
        if let Some(height) = self.height { config.height = height; }
        if let Some(cell_size) = self.cell_size { config.cell_size = cell_size; }
        if let Some(tick_ms) = self.tick_ms { config.tick_ms = tick_ms; }

        Ok(config)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // Anything on stderr lands on top of the board, so stay quiet unless logging to a file
    let default_filter = if log_file.is_some() {"info"} else {"error"};
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn run(args: Args) -> Result<()> {
    init_logging(args.log_file.as_deref())?;

    let config = args.config()?;
    log::info!("Starting with {:?}", config);

    let mut game = game::SnakeGame::new(&config)?;

    // The terminal has to be restored even when the game loop fails
    let result = game.initialize()
        .and_then(|_| game.show_intro())
        .and_then(|_| game.play());
    game.restore()?;

    result
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snake: {}", e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["snake", "--width", "600", "--tick-ms", "90"]);
        let config = args.config().unwrap();

        assert_eq!(config, Config { width: 600, tick_ms: 90, ..Config::default() });
    }

    #[test]
    fn no_flags_gives_defaults() {
        let args = Args::parse_from(["snake"]);
        assert_eq!(args.config().unwrap(), Config::default());
    }
}
