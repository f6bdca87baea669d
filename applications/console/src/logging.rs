/// Tracing initialisation
use anyhow::Context;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "insyd=info,insyd_console=info,insyd_client=info,insyd_views=info";
const DEBUG_FILTER: &str = "insyd=debug,insyd_console=debug,insyd_client=debug,insyd_views=debug";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; the terminal UI owns stdout and stderr.
    File(PathBuf),
}

/// `RUST_LOG` wins unless `debug` is set.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

pub fn init(debug: bool, target: &LogTarget) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(filter(debug));

    match target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install log subscriber")?,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}
