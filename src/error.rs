use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Error initializing log file {path:?}: {source}")]
    DiagnosticSink { path: PathBuf, source: io::Error },

    #[error("Error installing log subscriber: {0}")]
    SubscriberInit(#[from] tracing_subscriber::util::TryInitError),

    #[error("Error opening input file {path:?}: {source}")]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Error creating report file {path:?}: {source}")]
    CreateReport { path: PathBuf, source: io::Error },

    #[error("Error reading input: {0}")]
    Read(#[source] io::Error),

    #[error("Error writing report: {0}")]
    Write(#[source] io::Error),

    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Error building worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
