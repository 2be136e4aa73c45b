use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use maskit_core::PiiEntity;
use serde::Deserialize;
use tracing::debug;

use crate::handler::PiiDetector;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PiiResponse {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEntity {
    score: f64,
    #[serde(rename = "Type", default)]
    entity_type: Option<String>,
    begin_offset: usize,
    end_offset: usize,
}

impl From<RawEntity> for PiiEntity {
    fn from(raw: RawEntity) -> Self {
        PiiEntity {
            score: raw.score,
            begin_offset: raw.begin_offset,
            end_offset: raw.end_offset,
            entity_type: raw.entity_type,
        }
    }
}

/// PII detector backed by saved responses, keyed by line text
///
/// The file is a JSON object mapping each line's text to the PII service's
/// response for it (`{"Entities": [...]}`). Lines with no entry have no
/// entities.
#[derive(Debug, Clone, Default)]
pub struct PiiEntityFile {
    responses: HashMap<String, Vec<PiiEntity>>,
}

impl PiiEntityFile {
    /// Load saved responses from `path`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, PiiResponse> =
            serde_json::from_str(json).context("Failed to parse PII responses")?;

        let responses = raw
            .into_iter()
            .map(|(text, response)| {
                let entities = response.entities.into_iter().map(PiiEntity::from).collect();
                (text, entities)
            })
            .collect();

        Ok(Self { responses })
    }
}

#[async_trait]
impl PiiDetector for PiiEntityFile {
    async fn detect_pii(&self, text: &str) -> anyhow::Result<Vec<PiiEntity>> {
        let entities = self.responses.get(text).cloned().unwrap_or_default();
        debug!("Detected {} PII entities in {}", entities.len(), text);
        Ok(entities)
    }
}
