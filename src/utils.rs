use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use time::macros::format_description;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{AnalyzerError, Result};

/// Routes diagnostics to `log_path` (truncated) with local timestamps.
/// Errors are echoed to stderr as well.
pub fn setup_logging(log_path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .map_err(|source| AnalyzerError::DiagnosticSink {
            path: log_path.to_path_buf(),
            source,
        })?;

    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("email_analyzer=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("email_analyzer=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_timer(LocalTime::new(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                ))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(LevelFilter::ERROR),
        )
        .try_init()?;

    Ok(())
}

/// Fallback when the diagnostic file is unavailable.
pub fn setup_console_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .finish()
        .try_init()?;
    Ok(())
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Counts given on the command line must be positive.
pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    for (flag, value) in [("--top", args.top), ("--workers", args.workers)] {
        if value == Some(0) {
            anyhow::bail!("{flag} must be greater than 0");
        }
    }
    Ok(())
}
