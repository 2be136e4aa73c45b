//! Text region redaction
//!
//! Keyword selection, offset location, geometry projection and mask rendering
//! for text lines detected inside raster images.

pub mod geometry;
pub mod locator;
pub mod renderer;
pub mod selector;

pub use geometry::project;
pub use locator::{contains_ignore_case, locate};
pub use renderer::{MaskRenderer, RenderStats};
pub use selector::{KeywordSelector, RuleSet};
