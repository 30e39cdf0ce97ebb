//! Command-line interface for the simulator.

use std::path::PathBuf;

use clap::Parser;

/// Replays a scripted scenario against the attackable AI
#[derive(Parser, Debug)]
#[command(name = "ai-sim")]
#[command(about = "Headless simulator for attackable NPC combat AI")]
#[command(version)]
pub struct Args {
    /// Scenario name, loaded from `<data-dir>/scenarios/<name>.ron`
    #[arg(default_value = "ambush")]
    pub scenario: String,

    /// Content directory holding config.toml, skills.ron and templates.ron
    /// (falls back to `AI_SIM_DATA_DIR`, then the bundled content)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Run length in milliseconds; overrides the scenario's own duration
    #[arg(long, value_name = "MS")]
    pub duration_ms: Option<u64>,

    /// Seed for the AI's random rolls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Period between two think cycles of an active actor
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub think_interval_ms: u64,

    /// Directory for the log file (defaults to the platform cache directory)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| std::env::var_os("AI_SIM_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/content")))
    }
}
