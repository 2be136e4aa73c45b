use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Contents of a rules file
///
/// ```yaml
/// rules:
///   - '\d{3}-\d{2}-\d{4}'
///   - '[\w.+-]+@[\w-]+\.[\w.]+'
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<String>,
}

/// Read a YAML rules file
pub fn load_rules(path: &Path) -> anyhow::Result<RulesConfig> {
    if !path.exists() {
        anyhow::bail!("{} does not exist", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: RulesConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse rules in {}", path.display()))?;
    Ok(config)
}
