use std::collections::HashMap;

use crate::parser::ParsedRecord;

/// Running counters for one analysis run.
///
/// Every accepted line bumps `total_emails` and exactly one entry in each
/// map, so both maps always sum to the total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateState {
    pub total_emails: u64,
    pub domain_counts: HashMap<String, u64>,
    pub subject_keyword_counts: HashMap<String, u64>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, domain: &str, keyword: &str) {
        self.total_emails += 1;
        *self.domain_counts.entry(domain.to_string()).or_insert(0) += 1;
        *self
            .subject_keyword_counts
            .entry(keyword.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_parsed(&mut self, record: ParsedRecord) {
        self.record(&record.domain, &record.subject_keyword);
    }

    /// Folds a partial state from another worker into this one.
    pub fn merge(&mut self, other: AggregateState) {
        self.total_emails += other.total_emails;
        for (domain, count) in other.domain_counts {
            *self.domain_counts.entry(domain).or_insert(0) += count;
        }
        for (keyword, count) in other.subject_keyword_counts {
            *self.subject_keyword_counts.entry(keyword).or_insert(0) += count;
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.domain_counts.values().sum::<u64>() == self.total_emails
            && self.subject_keyword_counts.values().sum::<u64>() == self.total_emails
    }

    pub fn sorted_domains(&self) -> Vec<(&str, u64)> {
        sorted_counts(&self.domain_counts)
    }

    pub fn sorted_keywords(&self) -> Vec<(&str, u64)> {
        sorted_counts(&self.subject_keyword_counts)
    }
}

/// Count descending, then key ascending.
fn sorted_counts(counts: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut sorted: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

/// Outcome of one pass over the input.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub state: AggregateState,
    pub lines_read: u64,
    pub lines_rejected: u64,
}
