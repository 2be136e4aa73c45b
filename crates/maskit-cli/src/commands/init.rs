use anyhow::Result;
use maskit_config::Config;
use std::path::Path;

pub fn handle(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    Config::default().save_to(path)?;

    println!("✓ Created {}", path.display());
    Ok(())
}
