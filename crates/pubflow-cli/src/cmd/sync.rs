use crate::output::print_json;
use anyhow::Context;
use pubflow_core::{
    config::Config,
    github::GitHubIssueStore,
    sync::{sync_issue, SyncOutcome},
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(
    root: &Path,
    issues: &[u64],
    dry_run: bool,
    token: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load pubflow.yaml")?;
    let store = GitHubIssueStore::new(token, &config.repo.owner, &config.repo.name)?;

    let mut outcomes = Vec::with_capacity(issues.len());
    for &number in issues {
        let outcome = sync_issue(&store, &config, number, dry_run)
            .with_context(|| format!("failed to sync issue #{number}"))?;
        match &outcome {
            SyncOutcome::Updated { stage, labels, .. } if !dry_run => {
                info!(
                    "issue #{number}: stage '{stage}', labels now [{}]",
                    labels.join(", ")
                );
            }
            SyncOutcome::Skipped { .. } => {
                warn!("issue #{number}: no body content, skipped");
            }
            _ => {}
        }
        outcomes.push(outcome);
    }

    if json {
        print_json(&outcomes)?;
        return Ok(());
    }

    let marker = if dry_run { " (dry run)" } else { "" };
    for outcome in &outcomes {
        match outcome {
            SyncOutcome::Updated {
                issue,
                stage,
                progress,
                ..
            } => println!("#{issue}  {progress:>2} checked  -> {stage}{marker}"),
            SyncOutcome::Unchanged {
                issue,
                stage,
                progress,
            } => println!("#{issue}  {progress:>2} checked  already '{stage}'"),
            SyncOutcome::Skipped { issue } => println!("#{issue}  no body, skipped"),
        }
    }

    Ok(())
}
