use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of one redaction pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RedactionOutcome {
    /// No keyword was selected on any line; nothing was written
    NoOp,
    Redacted(RedactionSummary),
}

impl RedactionOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, RedactionOutcome::NoOp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionSummary {
    pub output: PathBuf,
    /// Lines that carried at least one keyword
    pub lines: usize,
    pub keywords: usize,
    /// Regions actually painted
    pub regions: usize,
    /// Keywords left unpainted because of the exclusion list
    pub excluded: usize,
}
