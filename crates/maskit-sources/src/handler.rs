//! Provider traits

use std::path::PathBuf;

use async_trait::async_trait;
use maskit_core::{DetectionRecord, ImageKind, PiiEntity};

use crate::{DocumentDetections, PhotoDetections};

/// Detects lines of text in an image
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Detect text records in the encoded image
    async fn detect(&self, image: &[u8], image_name: &str) -> anyhow::Result<Vec<DetectionRecord>>;

    /// The kind of image this detector is meant for
    fn kind(&self) -> ImageKind;
}

/// Detects PII entities in one line of text
#[async_trait]
pub trait PiiDetector: Send + Sync {
    async fn detect_pii(&self, text: &str) -> anyhow::Result<Vec<PiiEntity>>;
}

/// Build the file-backed detector for `kind`, reading the saved response at `path`
pub fn text_detector(kind: ImageKind, path: impl Into<PathBuf>) -> Box<dyn TextDetector> {
    match kind {
        ImageKind::Document => Box::new(DocumentDetections::new(path)),
        ImageKind::Photo => Box::new(PhotoDetections::new(path)),
    }
}
