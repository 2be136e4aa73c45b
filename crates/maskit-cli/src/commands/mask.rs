use anyhow::{Context, Result};
use maskit_config::Config;
use maskit_core::{RedactionOutcome, RenderStyle};
use maskit_engine::MaskEngine;
use maskit_redact::{KeywordSelector, MaskRenderer, RuleSet};
use maskit_sources::{PiiEntityFile, load_rules, text_detector};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::MaskArgs;

pub async fn handle(args: MaskArgs, config: &Config) -> Result<()> {
    let rules_file = args.rules_file.clone().or_else(|| config.rules.file.clone());
    let pii = args.pii || config.pii.enabled;

    if args.keywords.is_empty() && rules_file.is_none() && !pii {
        anyhow::bail!(
            "Please specify at least one of the parameters: --rules-file, --keywords, --pii"
        );
    }

    let output = args
        .output_file
        .clone()
        .unwrap_or_else(|| default_output(&args.input_file));
    let image_type = args.image_type.unwrap_or(config.image_type);
    let style = if args.use_grey_rectangle {
        RenderStyle::SolidGrey
    } else {
        config.style
    };
    let mut exclude_words = config.exclude_words.clone();
    exclude_words.extend(args.exclude_words);

    let mut selector = KeywordSelector::new().with_keywords(args.keywords);

    if let Some(path) = &rules_file {
        let rules = load_rules(path)?;
        selector = selector.with_rules(RuleSet::compile(&rules.rules)?);
    }

    let mut pii_detector = None;
    if pii {
        let threshold = args
            .pii_confidence_threshold
            .unwrap_or(config.pii.confidence_threshold);
        selector = selector.with_pii_threshold(threshold)?;

        let path = args
            .pii_entities
            .as_ref()
            .context("--pii needs --pii-entities pointing at saved PII detection responses")?;
        pii_detector = Some(PiiEntityFile::load(path)?);
    }

    debug!(
        "Image type is {}, reading detections from {}",
        image_type,
        args.detections.display()
    );
    let mut engine = MaskEngine::new(
        text_detector(image_type, &args.detections),
        selector,
        MaskRenderer::new(style, &exclude_words),
    );
    if let Some(detector) = pii_detector {
        engine = engine.with_pii_detector(Box::new(detector));
    }

    match engine.redact_file(&args.input_file, &output).await? {
        RedactionOutcome::NoOp => {
            println!("No texts need to be masked in {}", args.input_file.display());
        }
        RedactionOutcome::Redacted(summary) => {
            println!("✓ Masked {}", summary.output.display());
            println!(
                "  Lines: {}, keywords: {}, regions: {}",
                summary.lines, summary.keywords, summary.regions
            );
            if summary.excluded > 0 {
                println!("  Skipped {} excluded keyword(s)", summary.excluded);
            }
        }
    }

    Ok(())
}

/// `./masked_<file name>` next to the current directory
fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");
    PathBuf::from(format!("./masked_{}", name))
}
