pub mod analyzer;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod parser;
pub mod patterns;
pub mod report;
pub mod stats;
pub mod utils;

pub use analyzer::{analyze_lines_parallel, analyze_reader, run};
pub use args::Args;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use parser::{LineFormatError, LineParser, ParsedRecord};
pub use report::{render_report, ReportOptions};
pub use stats::{AggregateState, AnalysisOutcome};
