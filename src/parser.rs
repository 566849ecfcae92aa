use thiserror::Error;

use crate::domain::email_domain;
use crate::patterns::LinePatterns;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Content of the first bracketed group.
    pub recipient: String,
    /// Matched text of the first bracketed email, brackets included.
    pub sender_email: String,
    /// Aggregation key, taken from the sender address.
    pub domain: String,
    pub subject_keyword: String,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormatError {
    #[error("no bracketed token")]
    MissingBracket,

    #[error("no bracketed email address")]
    MissingEmail,

    #[error("no bracketed alphabetic keyword")]
    MissingKeyword,
}

/// Classifies log lines. Each field is found by its own first-match scan over
/// the whole line, so the keyword may come from any letters-only bracket,
/// including the recipient's.
#[derive(Debug, Clone)]
pub struct LineParser {
    patterns: LinePatterns,
}

impl LineParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_patterns(LinePatterns::compile()?))
    }

    pub fn with_patterns(patterns: LinePatterns) -> Self {
        Self { patterns }
    }

    pub fn parse_line(&self, line: &str) -> Result<ParsedRecord, LineFormatError> {
        let recipient = self
            .patterns
            .bracket
            .captures(line)
            .and_then(|caps| caps.get(1))
            .ok_or(LineFormatError::MissingBracket)?;

        let email = self
            .patterns
            .email
            .captures(line)
            .ok_or(LineFormatError::MissingEmail)?;
        let (sender_email, address) = match (email.get(0), email.get(1)) {
            (Some(full), Some(address)) => (full.as_str(), address.as_str()),
            _ => return Err(LineFormatError::MissingEmail),
        };

        let subject_keyword = self
            .patterns
            .keyword
            .captures(line)
            .and_then(|caps| caps.get(1))
            .ok_or(LineFormatError::MissingKeyword)?;

        Ok(ParsedRecord {
            recipient: recipient.as_str().to_string(),
            sender_email: sender_email.to_string(),
            domain: email_domain(address).to_string(),
            subject_keyword: subject_keyword.as_str().to_string(),
        })
    }
}
