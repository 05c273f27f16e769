use crate::output::{print_json, print_table};
use anyhow::Context;
use pubflow_core::{config::Config, types::Stage};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load pubflow.yaml")?;
    let map = config.stage_map();

    if json {
        print_json(&map.thresholds())?;
        return Ok(());
    }

    let mut rows = vec![vec!["0".to_string(), Stage::Backlog.as_str().to_string()]];
    for t in map.thresholds().iter().rev() {
        rows.push(vec![format!(">= {}", t.min), t.stage.as_str().to_string()]);
    }
    print_table(&["CHECKED", "STAGE"], rows);

    Ok(())
}
