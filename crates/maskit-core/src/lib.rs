//! Core domain models for maskit
//!
//! This crate contains:
//! - Detection records as delivered by text-detection providers
//! - PII entities and the regions/styles used when masking
//! - The shared error type

pub mod detection;
pub mod error;
pub mod outcome;
pub mod pii;
pub mod region;

pub use detection::{BoundingBox, DetectionLine, DetectionRecord, ImageKind};
pub use error::{MaskError, Result};
pub use outcome::{RedactionOutcome, RedactionSummary};
pub use pii::PiiEntity;
pub use region::{MaskRegion, RenderStyle};
