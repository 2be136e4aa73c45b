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
struct PhotoTextResponse {
    #[serde(default)]
    text_detections: Vec<TextDetection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TextDetection {
    #[serde(rename = "Type")]
    detection_type: String,
    #[serde(default)]
    detected_text: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// Parse a saved scene text-detection response (`{"TextDetections": [...]}`)
pub fn parse_photo_response(json: &str) -> anyhow::Result<Vec<DetectionRecord>> {
    let response: PhotoTextResponse =
        serde_json::from_str(json).context("Failed to parse photo detection response")?;

    Ok(response
        .text_detections
        .into_iter()
        .map(|detection| {
            let kind = detection.detection_type.clone();
            match line_from(
                &detection.detection_type,
                detection.detected_text,
                detection.geometry,
            ) {
                Some(line) => DetectionRecord::PhotoLine(line),
                None => DetectionRecord::Other { kind },
            }
        })
        .collect())
}

/// Photo detector backed by a saved response file
pub struct PhotoDetections {
    path: PathBuf,
}

impl PhotoDetections {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextDetector for PhotoDetections {
    async fn detect(
        &self,
        _image: &[u8],
        image_name: &str,
    ) -> anyhow::Result<Vec<DetectionRecord>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let records = parse_photo_response(&json)?;
        debug!("Detected {} texts in {}", records.len(), image_name);
        Ok(records)
    }

    fn kind(&self) -> ImageKind {
        ImageKind::Photo
    }
}
