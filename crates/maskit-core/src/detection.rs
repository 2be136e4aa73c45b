use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of text detector an image calls for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    /// Scanned pages, forms, screenshots of documents
    #[default]
    Document,
    /// Scene text in photos
    Photo,
}

impl FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" => Ok(ImageKind::Document),
            "photo" => Ok(ImageKind::Photo),
            other => Err(format!(
                "Unknown image type '{}' (expected 'document' or 'photo')",
                other
            )),
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::Document => write!(f, "document"),
            ImageKind::Photo => write!(f, "photo"),
        }
    }
}

/// Line bounding box, each value a fraction of the image width or height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// One detected line of text plus the keywords selected for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionLine {
    pub text: String,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DetectionLine {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            keywords: Vec::new(),
        }
    }

    /// Length of the text in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// A detection record, resolved once from the provider's response shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectionRecord {
    /// Line from a document-oriented detector
    DocumentLine(DetectionLine),
    /// Line from a scene/photo-oriented detector
    PhotoLine(DetectionLine),
    /// Any non-line granularity (words, pages, ...)
    Other { kind: String },
}

impl DetectionRecord {
    pub fn line(&self) -> Option<&DetectionLine> {
        match self {
            DetectionRecord::DocumentLine(line) | DetectionRecord::PhotoLine(line) => Some(line),
            DetectionRecord::Other { .. } => None,
        }
    }

    pub fn into_line(self) -> Option<DetectionLine> {
        match self {
            DetectionRecord::DocumentLine(line) | DetectionRecord::PhotoLine(line) => Some(line),
            DetectionRecord::Other { .. } => None,
        }
    }
}
