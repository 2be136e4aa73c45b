use clap::{Args, Parser, Subcommand};
use maskit_core::ImageKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maskit")]
#[command(about = "Mask sensitive text in images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mask keywords, rule matches and PII in an image
    Mask(MaskArgs),

    /// Write the default configuration file
    Init,
}

#[derive(Args)]
pub struct MaskArgs {
    /// Original image file
    #[arg(short, long)]
    pub input_file: PathBuf,

    /// Masked image output file (default: ./masked_<input file name>)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Rules file (YAML with a `rules` list of regexes)
    #[arg(short, long)]
    pub rules_file: Option<PathBuf>,

    /// Mask the keyword (case insensitive, repeatable)
    #[arg(short, long = "keywords")]
    pub keywords: Vec<String>,

    /// Never mask this word (case insensitive, repeatable)
    #[arg(short, long = "exclude-words")]
    pub exclude_words: Vec<String>,

    /// Image type: document or photo (default from config: document)
    #[arg(short = 't', long)]
    pub image_type: Option<ImageKind>,

    /// Saved text detection response for the image (JSON)
    #[arg(short, long)]
    pub detections: PathBuf,

    /// Mask Personally Identifiable Information (PII)
    #[arg(long)]
    pub pii: bool,

    /// Saved PII detection responses keyed by line text (JSON)
    #[arg(long)]
    pub pii_entities: Option<PathBuf>,

    /// PII confidence threshold between 0 and 1 (default from config: 0.8)
    #[arg(long)]
    pub pii_confidence_threshold: Option<f64>,

    /// Use a flat grey rectangle instead of asterisks
    #[arg(long)]
    pub use_grey_rectangle: bool,
}
