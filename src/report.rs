use std::borrow::Cow;
use std::io::{self, Write};

use crate::domain::redact_domain;
use crate::stats::AggregateState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Keep only the first N entries of each count section.
    pub top: Option<usize>,
    /// Mask domain labels in the domain section.
    pub redact: bool,
}

/// Renders the report text. Sections are ordered by count descending, ties
/// broken by key.
pub fn render_report(state: &AggregateState, options: &ReportOptions) -> String {
    let limit = options.top.unwrap_or(usize::MAX);
    let mut report = String::from("Email Analysis Report\n");
    report.push_str(&format!("Total Emails: {}\n\n", state.total_emails));

    report.push_str("Domain Counts:\n");
    for (domain, count) in state.sorted_domains().into_iter().take(limit) {
        let domain = if options.redact {
            Cow::Owned(redact_domain(domain))
        } else {
            Cow::Borrowed(domain)
        };
        report.push_str(&format!("{}: {}\n", domain, count));
    }
    report.push('\n');

    report.push_str("Subject Keyword Counts:\n");
    for (keyword, count) in state.sorted_keywords().into_iter().take(limit) {
        report.push_str(&format!("{}: {}\n", keyword, count));
    }

    report
}

pub fn write_report<W: Write>(writer: &mut W, report: &str) -> io::Result<()> {
    writer.write_all(report.as_bytes())?;
    writer.flush()
}
