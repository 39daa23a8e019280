//! `triton config show|init`.

use std::path::Path;

use anyhow::{bail, Result};

use triton_config::{apply_all_defaults, redact, write_config, TritonConfig};

pub fn show(config: &TritonConfig) -> Result<()> {
    let value = redact(&serde_json::to_value(config)?);
    print!("{}", serde_yaml::to_string(&value)?);
    Ok(())
}

pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite (the old file is kept as a backup)",
            path.display()
        );
    }
    let config = apply_all_defaults(TritonConfig::default());
    write_config(&config, path).await?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
