//! Headless simulator entry point.
//!
//! Loads content, populates a sandbox world from a scenario, hands its NPCs
//! to the AI runtime and replays the scenario script in real time. AI events
//! stream to stdout as JSON lines; logs go to a file.
mod cli;
mod logging;
mod output;
mod stage;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use combat_content::ContentFactory;
use runtime::{AiRuntime, RuntimeConfig};

use crate::stage::{Director, Stage};

const DEFAULT_DURATION_MS: u64 = 30_000;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    let log_file = logging::setup_logging(args.log_dir.as_deref(), &args.scenario)?;
    eprintln!("ai-sim: logging to {}", log_file.display());

    let factory = ContentFactory::new(args.data_dir());
    let ai_config = factory.load_config()?;
    let skills = factory.load_skills()?;
    let templates = factory.load_templates(&skills)?;
    let scenario = factory.load_scenario(&args.scenario)?;
    tracing::info!(
        scenario = %scenario.name,
        skills = skills.len(),
        templates = templates.len(),
        "content loaded"
    );

    let stage = Stage::build(&scenario, &templates)?;
    let runtime = AiRuntime::builder()
        .sandbox(stage.world.clone())
        .ai_config(ai_config)
        .config(RuntimeConfig {
            think_interval: Duration::from_millis(args.think_interval_ms),
            seed: args.seed,
            ..RuntimeConfig::default()
        })
        .build()?;

    let printers = output::spawn_printers(&runtime);
    for spawn in stage.spawns.iter().cloned() {
        runtime.spawn(spawn)?;
    }

    let duration = Duration::from_millis(
        args.duration_ms
            .or(scenario.duration_ms)
            .unwrap_or(DEFAULT_DURATION_MS),
    );
    Director::new(&runtime, &stage.world)
        .replay(&scenario.script, duration)
        .await?;

    output::print_summary(&runtime, &stage.world);
    runtime.shutdown().await?;
    for printer in printers {
        printer.await?;
    }
    tracing::info!(orders = stage.world.orders().len(), "run finished");
    Ok(())
}
