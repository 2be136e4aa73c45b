//! Response shapes shared by the document and photo detection services

use maskit_core::{BoundingBox, DetectionLine};
use serde::Deserialize;

/// Record type marking a full line of text
pub const LINE: &str = "LINE";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    pub bounding_box: AwsBoundingBox,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsBoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl From<AwsBoundingBox> for BoundingBox {
    fn from(b: AwsBoundingBox) -> Self {
        BoundingBox::new(b.left, b.top, b.width, b.height)
    }
}

/// Build a line when the record is a non-empty `LINE` with geometry
pub fn line_from(
    record_type: &str,
    text: Option<String>,
    geometry: Option<Geometry>,
) -> Option<DetectionLine> {
    if record_type != LINE {
        return None;
    }
    let text = text.filter(|t| !t.is_empty())?;
    let geometry = geometry?;
    Some(DetectionLine::new(text, geometry.bounding_box.into()))
}
