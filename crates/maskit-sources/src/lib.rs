//! Detection providers and rule sources
//!
//! Text and PII detection are external services. This crate defines the
//! traits the engine talks to and ships providers that read saved provider
//! responses from disk.

pub mod aws;
pub mod document;
pub mod handler;
pub mod photo;
pub mod pii;
pub mod rules;

pub use document::DocumentDetections;
pub use handler::{PiiDetector, TextDetector, text_detector};
pub use photo::PhotoDetections;
pub use pii::PiiEntityFile;
pub use rules::{RulesConfig, load_rules};
