use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use maskit_core::{DetectionRecord, ImageKind};
use serde::Deserialize;
use tracing::debug;

use crate::aws::{Geometry, line_from};
use crate::handler::TextDetector;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DocumentTextResponse {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Block {
    block_type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// Parse a saved document text-detection response (`{"Blocks": [...]}`)
pub fn parse_document_response(json: &str) -> anyhow::Result<Vec<DetectionRecord>> {
    let response: DocumentTextResponse =
        serde_json::from_str(json).context("Failed to parse document detection response")?;

    Ok(response
        .blocks
        .into_iter()
        .map(|block| {
            let kind = block.block_type.clone();
            match line_from(&block.block_type, block.text, block.geometry) {
                Some(line) => DetectionRecord::DocumentLine(line),
                None => DetectionRecord::Other { kind },
            }
        })
        .collect())
}

/// Document detector backed by a saved response file
pub struct DocumentDetections {
    path: PathBuf,
}

impl DocumentDetections {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextDetector for DocumentDetections {
    async fn detect(
        &self,
        _image: &[u8],
        image_name: &str,
    ) -> anyhow::Result<Vec<DetectionRecord>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let records = parse_document_response(&json)?;
        debug!("Detected {} blocks in {}", records.len(), image_name);
        Ok(records)
    }

    fn kind(&self) -> ImageKind {
        ImageKind::Document
    }
}
