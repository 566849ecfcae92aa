use regex::Regex;
use tracing::debug;

/// First bracketed group on a line; the capture stops at the first `]`.
pub const BRACKET_PATTERN: &str = r"\[(.*?)\]";

/// Bracketed `local@domain.tld`. The local part must open with a word
/// character, matching a word boundary right after the `[`.
pub const EMAIL_PATTERN: &str =
    r"\[([A-Za-z0-9_][A-Za-z0-9._%+-]*@[A-Za-z0-9.-]+\.[A-Za-z]{2,})\]";

/// Bracketed run of ASCII letters only.
pub const KEYWORD_PATTERN: &str = r"\[([A-Za-z]+)\]";

#[derive(Debug, Clone)]
pub struct LinePatterns {
    pub bracket: Regex,
    pub email: Regex,
    pub keyword: Regex,
}

impl LinePatterns {
    pub fn compile() -> Result<Self, regex::Error> {
        let patterns = Self {
            bracket: Regex::new(BRACKET_PATTERN)?,
            email: Regex::new(EMAIL_PATTERN)?,
            keyword: Regex::new(KEYWORD_PATTERN)?,
        };
        debug!(
            action = "compiled",
            component = "line_patterns",
            pattern_count = 3,
            "Compiled line patterns"
        );
        Ok(patterns)
    }
}
