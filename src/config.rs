use std::path::PathBuf;

use crate::report::ReportOptions;

pub const DEFAULT_INPUT_PATH: &str = "emails.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "email_analysis_report.txt";
pub const DEFAULT_LOG_PATH: &str = "email_analysis.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    /// Parse on a worker pool when greater than one.
    pub workers: Option<usize>,
    pub report: ReportOptions,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            workers: None,
            report: ReportOptions::default(),
        }
    }
}
