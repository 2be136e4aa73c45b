use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use maskit_core::{
    BoundingBox, DetectionLine, DetectionRecord, ImageKind, MaskError, PiiEntity, RedactionOutcome,
    RenderStyle,
};
use maskit_engine::MaskEngine;
use maskit_redact::{KeywordSelector, MaskRenderer, RuleSet};
use maskit_sources::{DocumentDetections, PiiDetector, PiiEntityFile, TextDetector};

const WIDTH: u32 = 300;
const HEIGHT: u32 = 100;
const BACKGROUND: Rgba<u8> = Rgba([10, 20, 30, 255]);
const SSN_TEXT: &str = "SSN 123-45-6789";

struct StaticDetector(Vec<DetectionRecord>);

#[async_trait]
impl TextDetector for StaticDetector {
    async fn detect(
        &self,
        _image: &[u8],
        _image_name: &str,
    ) -> anyhow::Result<Vec<DetectionRecord>> {
        Ok(self.0.clone())
    }

    fn kind(&self) -> ImageKind {
        ImageKind::Document
    }
}

struct FailingDetector;

#[async_trait]
impl TextDetector for FailingDetector {
    async fn detect(
        &self,
        _image: &[u8],
        _image_name: &str,
    ) -> anyhow::Result<Vec<DetectionRecord>> {
        anyhow::bail!("service unreachable")
    }

    fn kind(&self) -> ImageKind {
        ImageKind::Photo
    }
}

struct CountingDetector(Arc<AtomicUsize>);

#[async_trait]
impl TextDetector for CountingDetector {
    async fn detect(
        &self,
        _image: &[u8],
        _image_name: &str,
    ) -> anyhow::Result<Vec<DetectionRecord>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(ssn_records())
    }

    fn kind(&self) -> ImageKind {
        ImageKind::Document
    }
}

struct StaticPii(Vec<PiiEntity>);

#[async_trait]
impl PiiDetector for StaticPii {
    async fn detect_pii(&self, _text: &str) -> anyhow::Result<Vec<PiiEntity>> {
        Ok(self.0.clone())
    }
}

struct FailingPii;

#[async_trait]
impl PiiDetector for FailingPii {
    async fn detect_pii(&self, _text: &str) -> anyhow::Result<Vec<PiiEntity>> {
        anyhow::bail!("throttled")
    }
}

fn ssn_bbox() -> BoundingBox {
    BoundingBox::new(0.1, 0.2, 0.6, 0.3)
}

fn ssn_records() -> Vec<DetectionRecord> {
    vec![
        DetectionRecord::Other {
            kind: "PAGE".to_string(),
        },
        DetectionRecord::DocumentLine(DetectionLine::new(SSN_TEXT, ssn_bbox())),
        DetectionRecord::Other {
            kind: "WORD".to_string(),
        },
    ]
}

fn write_source_image(dir: &Path) -> PathBuf {
    let path = dir.join("scan.png");
    RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND)
        .save(&path)
        .unwrap();
    path
}

fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path).unwrap().into_rgba8()
}

fn engine(selector: KeywordSelector, exclude_words: &[String]) -> MaskEngine {
    MaskEngine::new(
        Box::new(StaticDetector(ssn_records())),
        selector,
        MaskRenderer::new(RenderStyle::SolidWhite, exclude_words),
    )
}

fn explicit_ssn() -> KeywordSelector {
    KeywordSelector::new().with_keywords(vec!["123-45-6789".to_string()])
}

#[tokio::test]
async fn test_explicit_keyword_masks_inside_line_box() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("masked_scan.png");
    let engine = engine(explicit_ssn(), &[]);

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(maskit_redact::locate("123-45-6789", &lines[0].text), vec![4]);

    let renderer = MaskRenderer::new(RenderStyle::SolidWhite, &[]);
    let regions = renderer.regions(&lines[0], WIDTH, HEIGHT);
    assert_eq!(regions.len(), 1);
    let region = regions[0];
    let bbox = ssn_bbox();
    assert!(region.left < region.right);
    assert!(region.top < region.bottom);
    assert!(region.left >= (bbox.left * f64::from(WIDTH)) as u32);
    assert!(region.right <= ((bbox.left + bbox.width) * f64::from(WIDTH)) as u32);
    assert!(region.top >= (bbox.top * f64::from(HEIGHT)) as u32);
    assert!(region.bottom <= ((bbox.top + bbox.height) * f64::from(HEIGHT)) as u32);

    let outcome = engine.redact_file(&input, &output).await.unwrap();

    let RedactionOutcome::Redacted(summary) = outcome else {
        panic!("expected a redaction");
    };
    assert_eq!(summary.output, output);
    assert_eq!(summary.lines, 1);
    assert_eq!(summary.keywords, 1);
    assert_eq!(summary.regions, 1);

    let masked = read_rgba(&output);
    assert_eq!(masked.dimensions(), (WIDTH, HEIGHT));
    for (x, y, pixel) in masked.enumerate_pixels() {
        if region.contains(x, y) {
            assert_ne!(*pixel, BACKGROUND);
        } else {
            assert_eq!(*pixel, BACKGROUND);
        }
    }
}

#[tokio::test]
async fn test_rule_keyword_appended_once() {
    let rules = RuleSet::compile([r"\d{3}-\d{2}-\d{4}"]).unwrap();
    let engine = engine(KeywordSelector::new().with_rules(rules), &[]);

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].keywords, vec!["123-45-6789"]);
}

#[tokio::test]
async fn test_pii_keywords_above_threshold() {
    let selector = KeywordSelector::new().with_pii_threshold(0.8).unwrap();
    let engine = engine(selector, &[]).with_pii_detector(Box::new(StaticPii(vec![
        PiiEntity::new(0.9, 4, 15),
        PiiEntity::new(0.5, 0, 3),
    ])));

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].keywords, vec!["123-45-6789"]);
}

#[tokio::test]
async fn test_no_sources_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("masked_scan.png");
    let engine = engine(KeywordSelector::new(), &[]);

    let outcome = engine.redact_file(&input, &output).await.unwrap();

    assert!(outcome.is_noop());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_no_sources_skips_detection() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = MaskEngine::new(
        Box::new(CountingDetector(calls.clone())),
        KeywordSelector::new(),
        MaskRenderer::new(RenderStyle::SolidWhite, &[]),
    );

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();
    assert!(lines.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let engine = MaskEngine::new(
        Box::new(CountingDetector(calls.clone())),
        explicit_ssn(),
        MaskRenderer::new(RenderStyle::SolidWhite, &[]),
    );
    engine.select_lines(&[], "scan.png").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_excluded_keyword_stays_selected_but_unpainted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("masked_scan.png");
    let engine = engine(explicit_ssn(), &["123-45-6789".to_string()]);

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();
    assert_eq!(lines[0].keywords, vec!["123-45-6789"]);

    let outcome = engine.redact_file(&input, &output).await.unwrap();

    let RedactionOutcome::Redacted(summary) = outcome else {
        panic!("expected a redaction");
    };
    assert_eq!(summary.keywords, 1);
    assert_eq!(summary.regions, 0);
    assert_eq!(summary.excluded, 1);
    assert_eq!(read_rgba(&output), read_rgba(&input));
}

#[tokio::test]
async fn test_exclusion_is_case_insensitive() {
    let selector = KeywordSelector::new().with_keywords(vec!["ssn".to_string()]);
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("out.png");
    let engine = engine(selector, &["SSN".to_string()]);

    engine.redact_file(&input, &output).await.unwrap();

    assert_eq!(read_rgba(&output), read_rgba(&input));
}

#[tokio::test]
async fn test_redaction_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let once = dir.path().join("once.png");
    let twice = dir.path().join("twice.png");
    let engine = engine(explicit_ssn(), &[]);

    engine.redact_file(&input, &once).await.unwrap();
    engine.redact_file(&once, &twice).await.unwrap();

    assert_eq!(read_rgba(&once), read_rgba(&twice));
}

#[tokio::test]
async fn test_detection_failure_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("out.png");
    let engine = MaskEngine::new(
        Box::new(FailingDetector),
        explicit_ssn(),
        MaskRenderer::new(RenderStyle::SolidGrey, &[]),
    );

    let outcome = engine.redact_file(&input, &output).await.unwrap();

    assert_eq!(outcome, RedactionOutcome::NoOp);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_pii_failure_is_an_error() {
    let selector = KeywordSelector::new().with_pii_threshold(0.5).unwrap();
    let engine = engine(selector, &[]).with_pii_detector(Box::new(FailingPii));

    let err = engine.select_lines(&[], "scan.png").await.unwrap_err();

    assert!(matches!(err, MaskError::PiiUnavailable(msg) if msg.contains("throttled")));
}

#[tokio::test]
async fn test_pii_enabled_without_detector() {
    let selector = KeywordSelector::new().with_pii_threshold(0.5).unwrap();
    let engine = engine(selector, &[]);

    assert!(matches!(
        engine.select_lines(&[], "scan.png").await,
        Err(MaskError::PiiUnavailable(_))
    ));
}

#[tokio::test]
async fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.png");
    let engine = engine(explicit_ssn(), &[]);

    let err = engine
        .redact_file(&dir.path().join("missing.png"), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, MaskError::Io(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("no-such-dir").join("out.png");
    let engine = engine(explicit_ssn(), &[]);

    let err = engine.redact_file(&input, &output).await.unwrap_err();

    assert!(matches!(err, MaskError::Io(_)));
}

#[tokio::test]
async fn test_file_backed_providers() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source_image(dir.path());
    let output = dir.path().join("out.png");
    let blocks = dir.path().join("blocks.json");
    std::fs::write(
        &blocks,
        r#"{"Blocks": [
            {"BlockType": "LINE", "Text": "Contact jane@example.com",
             "Geometry": {"BoundingBox": {"Width": 0.8, "Height": 0.2, "Left": 0.1, "Top": 0.5}}}
        ]}"#,
    )
    .unwrap();
    let pii = PiiEntityFile::parse(
        r#"{"Contact jane@example.com": {"Entities": [
            {"Score": 0.99, "Type": "EMAIL", "BeginOffset": 8, "EndOffset": 24}
        ]}}"#,
    )
    .unwrap();
    let engine = MaskEngine::new(
        Box::new(DocumentDetections::new(&blocks)),
        KeywordSelector::new().with_pii_threshold(0.8).unwrap(),
        MaskRenderer::new(RenderStyle::SolidGrey, &[]),
    )
    .with_pii_detector(Box::new(pii));

    let lines = engine.select_lines(&[], "scan.png").await.unwrap();
    assert_eq!(lines[0].keywords, vec!["jane@example.com"]);

    let outcome = engine.redact_file(&input, &output).await.unwrap();

    assert!(!outcome.is_noop());
    let masked = read_rgba(&output);
    assert!(masked.pixels().any(|p| *p == Rgba([128, 128, 128, 255])));
}
