use crate::output::print_json;
use anyhow::Context;
use pubflow_core::{config::Config, resolver, types::ScanMode, PubflowError};
use std::io::Read;
use std::path::Path;

pub fn run(
    root: &Path,
    body_file: Option<&Path>,
    mode: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load pubflow.yaml")?;
    let mode = match mode {
        Some(s) => s.parse::<ScanMode>()?,
        None => config.resolver.scan_mode,
    };

    let body = match body_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read body from stdin")?;
            buf
        }
    };

    let body = body.trim();
    if body.is_empty() {
        return Err(PubflowError::NoContent.into());
    }

    let checklist = config.checklist()?;
    let count = resolver::progress(body, &checklist, mode)?;
    let stage = config.stage_map().stage_for(count);

    if json {
        print_json(&serde_json::json!({
            "scan_mode": mode,
            "progress": count,
            "of": checklist.len(),
            "stage": stage,
            "label": stage.as_str(),
        }))?;
    } else {
        println!("Scan mode: {mode}");
        println!("Progress:  {count}/{}", checklist.len());
        println!("Stage:     {stage}");
    }

    Ok(())
}
