use maskit_core::{DetectionLine, MaskError, PiiEntity, Result};
use regex::Regex;
use tracing::debug;

use crate::locator::contains_ignore_case;

/// Compiled redaction rules, in configuration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Regex>,
}

impl RuleSet {
    /// Compile every pattern. A single bad pattern rejects the whole set.
    pub fn compile<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| MaskError::InvalidRule {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }
}

/// Append every rule match found in the line text
pub fn add_rule_keywords(line: &mut DetectionLine, rules: &RuleSet) {
    for rule in &rules.rules {
        for matched in rule.find_iter(&line.text) {
            line.keywords.push(matched.as_str().to_string());
        }
    }
}

/// Append each configured keyword (as configured) once if the line contains it
pub fn add_explicit_keywords(line: &mut DetectionLine, keywords: &[String]) {
    for keyword in keywords {
        if contains_ignore_case(&line.text, keyword) {
            line.keywords.push(keyword.clone());
        }
    }
}

/// Append the span of every entity scoring strictly above `threshold`
pub fn add_pii_keywords(line: &mut DetectionLine, entities: &[PiiEntity], threshold: f64) {
    for entity in entities {
        if entity.score > threshold {
            let keyword = entity.span(&line.text);
            debug!(
                entity_type = ?entity.entity_type,
                score = entity.score,
                keyword = %keyword,
                "Selected PII entity"
            );
            line.keywords.push(keyword);
        }
    }
}

/// The keyword sources enabled for one redaction pass
#[derive(Debug, Clone, Default)]
pub struct KeywordSelector {
    rules: Option<RuleSet>,
    keywords: Vec<String>,
    pii_threshold: Option<f64>,
}

impl KeywordSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Enable PII-based selection. The threshold must lie in `[0, 1]`.
    pub fn with_pii_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MaskError::InvalidThreshold(threshold));
        }
        self.pii_threshold = Some(threshold);
        Ok(self)
    }

    pub fn pii_enabled(&self) -> bool {
        self.pii_threshold.is_some()
    }

    /// True when no source is enabled at all
    pub fn is_empty(&self) -> bool {
        self.rules.is_none() && self.keywords.is_empty() && self.pii_threshold.is_none()
    }

    /// Apply rules, explicit keywords, then PII entities to `line`
    pub fn select(&self, line: &mut DetectionLine, entities: &[PiiEntity]) {
        if let Some(rules) = &self.rules {
            add_rule_keywords(line, rules);
        }
        if !self.keywords.is_empty() {
            add_explicit_keywords(line, &self.keywords);
        }
        if let Some(threshold) = self.pii_threshold {
            add_pii_keywords(line, entities, threshold);
        }
    }
}
