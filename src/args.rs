use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalyzerConfig, DEFAULT_INPUT_PATH, DEFAULT_LOG_PATH, DEFAULT_OUTPUT_PATH};
use crate::report::ReportOptions;

#[derive(Parser, Debug)]
#[command(
    name = "email-analyzer",
    about = "Count email log lines by sender domain and subject keyword",
    version,
    long_about = None
)]
pub struct Args {
    /// Email log to analyze, one event per line
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Report file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Diagnostic log file
    #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
    pub log: PathBuf,

    /// Number of worker threads (parses in parallel when greater than 1)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Parse in parallel using one worker per CPU (at most 8)
    #[arg(long)]
    pub parallel: bool,

    /// Number of top entries to keep in each count section
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Redact domain names for privacy
    #[arg(long)]
    pub redact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> AnalyzerConfig {
        let workers = self.workers.or_else(|| {
            self.parallel
                .then(|| std::cmp::min(num_cpus::get(), 8))
        });

        AnalyzerConfig {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            log_path: self.log.clone(),
            workers,
            report: ReportOptions {
                top: self.top,
                redact: self.redact,
            },
        }
    }
}
