use anyhow::Context;
use pubflow_core::config::{config_path, Config, CONFIG_FILE};
use std::path::Path;

pub fn run(root: &Path, owner: &str, repo: &str) -> anyhow::Result<()> {
    println!("Initializing pubflow in: {}", root.display());

    if config_path(root).exists() {
        println!("  exists:  {CONFIG_FILE}");
    } else {
        let cfg = Config::new(owner, repo);
        cfg.save(root)
            .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
        println!("  created: {CONFIG_FILE}");
    }

    println!("\nNext: pubflow sync <issue-number> --token $GITHUB_TOKEN");
    Ok(())
}
