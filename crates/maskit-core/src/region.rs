use serde::{Deserialize, Serialize};

/// Pixel rectangle for one keyword occurrence
///
/// `right` and `bottom` are exclusive, like a crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl MaskRegion {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Overlay fill used when masking a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// White patch with a grey asterisk pattern
    #[default]
    SolidWhite,
    /// Flat grey patch
    SolidGrey,
}

impl RenderStyle {
    pub fn fill(&self) -> [u8; 3] {
        match self {
            RenderStyle::SolidWhite => [255, 255, 255],
            RenderStyle::SolidGrey => [128, 128, 128],
        }
    }

    /// Color of the asterisk strokes drawn over the fill
    pub fn pattern(&self) -> [u8; 3] {
        [128, 128, 128]
    }
}
