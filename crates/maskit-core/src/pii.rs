use serde::{Deserialize, Serialize};

/// A PII span reported for one line of text
///
/// Offsets are character offsets into the line that produced the entity,
/// `begin_offset` inclusive and `end_offset` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    pub score: f64,
    pub begin_offset: usize,
    pub end_offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl PiiEntity {
    pub fn new(score: f64, begin_offset: usize, end_offset: usize) -> Self {
        Self {
            score,
            begin_offset,
            end_offset,
            entity_type: None,
        }
    }

    /// Extract the entity's span from `text`, clamping offsets into the text
    pub fn span(&self, text: &str) -> String {
        let len = text.chars().count();
        let begin = self.begin_offset.min(len);
        let end = self.end_offset.min(len);
        if begin >= end {
            return String::new();
        }
        text.chars().skip(begin).take(end - begin).collect()
    }
}
