use anyhow::Result;
use clap::Parser;
use email_analyzer::utils::{self, format_number};
use email_analyzer::{analyzer, AnalysisOutcome, AnalyzerConfig, Args};
use tracing::error;

fn print_summary(outcome: &AnalysisOutcome, config: &AnalyzerConfig) {
    println!("\n--- Email Analysis ---");
    println!("Lines read: {}", format_number(outcome.lines_read));
    println!("Emails counted: {}", format_number(outcome.state.total_emails));
    println!("Lines rejected: {}", format_number(outcome.lines_rejected));
    println!(
        "Distinct domains: {}",
        format_number(outcome.state.domain_counts.len() as u64)
    );
    println!(
        "Distinct subject keywords: {}",
        format_number(outcome.state.subject_keyword_counts.len() as u64)
    );
    println!("Report written to {}", config.output_path.display());
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::validate_args(&args)?;
    let config = args.config();

    if let Err(e) = utils::setup_logging(&config.log_path, args.verbose) {
        // Nothing has been opened yet; report on stderr and stop.
        match utils::setup_console_logging() {
            Ok(()) => {
                error!(action = "init", component = "diagnostic_sink", error = %e, "Error initializing log file handler");
            }
            Err(_) => eprintln!("Error initializing log file handler: {e}"),
        }
        std::process::exit(1);
    }

    match analyzer::run(&config) {
        Ok(outcome) => {
            print_summary(&outcome, &config);
            Ok(())
        }
        Err(e) => {
            error!(action = "abort", component = "analysis", error = %e, "Error reading or writing file");
            std::process::exit(1);
        }
    }
}
