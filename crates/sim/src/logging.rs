//! File logging for simulator runs.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Routes tracing output to `<log_dir>/<run>/sim.log`.
///
/// Stdout stays reserved for the JSON event stream.
pub fn setup_logging(log_dir: Option<&Path>, scenario: &str) -> Result<PathBuf> {
    let base = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let run_dir = base.join(format!("{}_{}", scenario, started));
    std::fs::create_dir_all(&run_dir)?;

    let file_appender = tracing_appender::rolling::never(&run_dir, "sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::DEBUG.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    let log_file = run_dir.join("sim.log");
    tracing::info!(scenario, log = %log_file.display(), "logging initialized");
    Ok(log_file)
}

/// Platform cache directory, e.g. `~/.cache/attackable-ai/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "attackable-ai")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/attackable-ai"))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lands_in_a_per_run_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = setup_logging(Some(dir.path()), "ambush").unwrap();

        assert!(log_file.starts_with(dir.path()));
        assert!(log_file.ends_with("sim.log"));
        let run_dir = log_file.parent().unwrap();
        assert!(run_dir.is_dir());
        let run = run_dir.file_name().unwrap().to_string_lossy();
        assert!(run.starts_with("ambush_"), "{run}");
    }
}
