//! One redaction pass over one image
//!
//! Detection and PII results are fully resolved before the image is decoded.
//! The decoded image is then painted region by region and written once.

use std::path::Path;

use maskit_core::{DetectionLine, MaskError, RedactionOutcome, RedactionSummary, Result};
use maskit_redact::renderer::{commit, decode};
use maskit_redact::{KeywordSelector, MaskRenderer};
use maskit_sources::{PiiDetector, TextDetector};
use tracing::{debug, info, warn};

pub struct MaskEngine {
    detector: Box<dyn TextDetector>,
    pii_detector: Option<Box<dyn PiiDetector>>,
    selector: KeywordSelector,
    renderer: MaskRenderer,
}

impl MaskEngine {
    pub fn new(
        detector: Box<dyn TextDetector>,
        selector: KeywordSelector,
        renderer: MaskRenderer,
    ) -> Self {
        Self {
            detector,
            pii_detector: None,
            selector,
            renderer,
        }
    }

    pub fn with_pii_detector(mut self, pii_detector: Box<dyn PiiDetector>) -> Self {
        self.pii_detector = Some(pii_detector);
        self
    }

    /// Detect lines in `image` and select their keywords.
    ///
    /// Only lines that ended up with at least one keyword are returned. A
    /// failed text detection is logged and treated as an empty detection.
    pub async fn select_lines(&self, image: &[u8], image_name: &str) -> Result<Vec<DetectionLine>> {
        if self.selector.is_empty() {
            debug!("No keyword source enabled, skipping detection of {}", image_name);
            return Ok(Vec::new());
        }

        let pii_detector = match (self.selector.pii_enabled(), &self.pii_detector) {
            (true, Some(detector)) => Some(detector),
            (true, None) => {
                return Err(MaskError::PiiUnavailable(
                    "PII masking is enabled but no PII detector is configured".to_string(),
                ));
            }
            (false, _) => None,
        };

        debug!("Detecting text in {} as {}", image_name, self.detector.kind());
        let records = match self.detector.detect(image, image_name).await {
            Ok(records) => records,
            Err(e) => {
                let err = MaskError::DetectionUnavailable(format!("{:#}", e));
                warn!("{} ({})", err, image_name);
                Vec::new()
            }
        };

        let mut lines = Vec::new();
        for record in records {
            let Some(mut line) = record.into_line() else {
                continue;
            };
            debug!("Detected line: {}", line.text);

            let entities = match pii_detector {
                Some(detector) => detector
                    .detect_pii(&line.text)
                    .await
                    .map_err(|e| MaskError::PiiUnavailable(format!("{:#}", e)))?,
                None => Vec::new(),
            };

            self.selector.select(&mut line, &entities);
            if line.has_keywords() {
                debug!(keywords = ?line.keywords, "Selected keywords");
                lines.push(line);
            }
        }

        Ok(lines)
    }

    /// Redact the image at `input` and write the result to `output`.
    ///
    /// Nothing is written when no line carries a keyword.
    pub async fn redact_file(&self, input: &Path, output: &Path) -> Result<RedactionOutcome> {
        let bytes = tokio::fs::read(input).await?;
        let image_name = input.display().to_string();

        let lines = self.select_lines(&bytes, &image_name).await?;
        if lines.is_empty() {
            info!("No texts need to be masked in {}", image_name);
            return Ok(RedactionOutcome::NoOp);
        }

        let (image, format) = decode(&bytes)?;
        let color = image.color();
        let mut canvas = image.into_rgba8();

        let stats = self.renderer.render(&mut canvas, &lines);
        commit(canvas, color, format, output)?;

        Ok(RedactionOutcome::Redacted(RedactionSummary {
            output: output.to_path_buf(),
            lines: lines.len(),
            keywords: lines.iter().map(|line| line.keywords.len()).sum(),
            regions: stats.regions,
            excluded: stats.excluded,
        }))
    }
}
