use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use pubflow_core::config::{Config, WarnLevel};
use pubflow_core::labels::LabelStyle;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load pubflow.yaml")?;

    if json {
        print_json(&config)?;
        return Ok(());
    }

    println!("Repository:   {}/{}", config.repo.owner, config.repo.name);
    println!("Scan mode:    {}", config.resolver.scan_mode);
    println!("Empty body:   {}", config.resolver.empty_body);
    println!(
        "Label style:  {}",
        style_display(&config.resolver.label_style)
    );
    println!("Checklist:");
    for (i, item) in config.resolver.checklist.iter().enumerate() {
        println!("  {:>2}. {item}", i + 1);
    }
    Ok(())
}

fn style_display(style: &LabelStyle) -> String {
    match style {
        LabelStyle::Flat => "flat".to_string(),
        LabelStyle::Prefixed { prefix } => format!("prefixed ('{prefix}')"),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load pubflow.yaml")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
