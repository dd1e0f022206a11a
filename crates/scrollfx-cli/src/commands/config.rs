use std::path::Path;

use anyhow::{bail, Result};

use scrollfx_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn path(config_path: &Path) -> Result<()> {
    let state = if config_path.exists() { "" } else { " (not created)" };
    println!("{}{}", config_path.display(), state);
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, AppConfig::default().to_toml()?)?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}
