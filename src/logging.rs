use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Logs to stderr and, optionally, to `logfile` (without any colour codes)
pub fn setup_logging(verbose: bool, logfile: Option<&Path>) -> Result<()> {
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer);

    if let Some(path) = logfile {
        let file = File::create(path)
            .with_context(|| format!("failed to create the log file {}", path.display()))?;
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true);

        subscriber.with(file_layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}
