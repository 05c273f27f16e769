use crate::config::Config;
use crate::error::Result;
use crate::issue::IssueStore;
use crate::resolver;
use crate::types::{EmptyBodyPolicy, Stage};
use serde::Serialize;

// ---------------------------------------------------------------------------
// SyncOutcome
// ---------------------------------------------------------------------------

/// What happened to one issue during a sync pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The label set changed (or would change, on a dry run).
    Updated {
        issue: u64,
        stage: Stage,
        progress: usize,
        labels: Vec<String>,
    },
    /// The labels already matched the resolved stage; nothing was written.
    Unchanged {
        issue: u64,
        stage: Stage,
        progress: usize,
    },
    /// The issue had no body and the configured policy is to skip it.
    Skipped { issue: u64 },
}

// ---------------------------------------------------------------------------
// sync_issue
// ---------------------------------------------------------------------------

/// Fetch one issue, resolve its stage from the checklist in its body, and
/// replace its stage label through the store. Non-stage labels are never
/// touched. With `dry_run` the computed outcome is returned without writing.
pub fn sync_issue(
    store: &dyn IssueStore,
    config: &Config,
    number: u64,
    dry_run: bool,
) -> Result<SyncOutcome> {
    let issue = store.get_issue(number)?;
    let checklist = config.checklist()?;
    let policy = config.label_policy();

    let body = issue
        .body
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());
    let progress = match body {
        Some(body) => resolver::progress(body, &checklist, config.resolver.scan_mode)?,
        None => match config.resolver.empty_body {
            EmptyBodyPolicy::Skip => return Ok(SyncOutcome::Skipped { issue: number }),
            EmptyBodyPolicy::TreatAsBacklog => 0,
        },
    };
    let stage = config.stage_map().stage_for(progress);

    // Nothing checked: remove any stale stage label but do not add one.
    let new_labels = if progress == 0 {
        policy.strip(&issue.labels)
    } else {
        policy.apply(&issue.labels, stage)
    };

    if same_label_set(&issue.labels, &new_labels) {
        return Ok(SyncOutcome::Unchanged {
            issue: number,
            stage,
            progress,
        });
    }

    if !dry_run {
        store.set_labels(number, &new_labels)?;
    }
    Ok(SyncOutcome::Updated {
        issue: number,
        stage,
        progress,
        labels: new_labels,
    })
}

/// Label order is not meaningful on the issue side, so compare as sets.
fn same_label_set(a: &[String], b: &[String]) -> bool {
    let mut a: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b: Vec<&str> = b.iter().map(String::as_str).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PubflowError;
    use crate::issue::Issue;
    use crate::types::ScanMode;
    use chrono::Utc;
    use std::cell::{Cell, RefCell};

    struct FakeStore {
        issue: RefCell<Issue>,
        writes: Cell<usize>,
    }

    impl FakeStore {
        fn with_issue(body: Option<&str>, labels: &[&str]) -> Self {
            Self {
                issue: RefCell::new(Issue {
                    number: 42,
                    title: "New launch post".to_string(),
                    body: body.map(str::to_string),
                    labels: labels.iter().map(|s| (*s).to_string()).collect(),
                    updated_at: Utc::now(),
                }),
                writes: Cell::new(0),
            }
        }

        fn labels(&self) -> Vec<String> {
            self.issue.borrow().labels.clone()
        }
    }

    impl IssueStore for FakeStore {
        fn get_issue(&self, _number: u64) -> Result<Issue> {
            Ok(self.issue.borrow().clone())
        }

        fn set_labels(&self, _number: u64, labels: &[String]) -> Result<()> {
            self.issue.borrow_mut().labels = labels.to_vec();
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    fn config() -> Config {
        Config::new("acme", "blog")
    }

    fn checked_body(n: usize) -> String {
        crate::checklist::Checklist::publication()
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mark = if i < n { "x" } else { " " };
                format!("- [{mark}] {item}\n")
            })
            .collect()
    }

    #[test]
    fn updates_stage_label_and_keeps_the_rest() {
        let store = FakeStore::with_issue(
            Some(&checked_body(6)),
            &["blog", "comms review", "needs-images"],
        );
        let outcome = sync_issue(&store, &config(), 42, false).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Updated {
                issue: 42,
                stage: Stage::Copyedit,
                progress: 6,
                labels: vec![
                    "blog".to_string(),
                    "needs-images".to_string(),
                    "copyedit".to_string(),
                ],
            }
        );
        assert_eq!(store.writes.get(), 1);
        assert_eq!(store.labels(), vec!["blog", "needs-images", "copyedit"]);
    }

    #[test]
    fn unchanged_labels_skip_the_write() {
        let store = FakeStore::with_issue(Some(&checked_body(6)), &["copyedit", "blog"]);
        let outcome = sync_issue(&store, &config(), 42, false).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Unchanged {
                issue: 42,
                stage: Stage::Copyedit,
                progress: 6,
            }
        );
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn empty_body_skipped_by_default() {
        for body in [None, Some(""), Some("  \n")] {
            let store = FakeStore::with_issue(body, &["blog"]);
            let outcome = sync_issue(&store, &config(), 42, false).unwrap();
            assert_eq!(outcome, SyncOutcome::Skipped { issue: 42 });
            assert_eq!(store.writes.get(), 0);
        }
    }

    #[test]
    fn empty_body_as_backlog_strips_stale_labels() {
        let mut config = config();
        config.resolver.empty_body = EmptyBodyPolicy::TreatAsBacklog;
        let store = FakeStore::with_issue(None, &["draft submitted", "blog"]);
        let outcome = sync_issue(&store, &config, 42, false).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Updated {
                issue: 42,
                stage: Stage::Backlog,
                progress: 0,
                labels: vec!["blog".to_string()],
            }
        );
        assert_eq!(store.labels(), vec!["blog"]);
    }

    #[test]
    fn zero_progress_never_adds_a_backlog_label() {
        let store = FakeStore::with_issue(Some("no checklist here"), &["blog"]);
        let outcome = sync_issue(&store, &config(), 42, false).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Unchanged {
                issue: 42,
                stage: Stage::Backlog,
                progress: 0,
            }
        );
        assert_eq!(store.labels(), vec!["blog"]);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let store = FakeStore::with_issue(Some(&checked_body(2)), &["blog"]);
        let outcome = sync_issue(&store, &config(), 42, true).unwrap();
        match outcome {
            SyncOutcome::Updated { stage, labels, .. } => {
                assert_eq!(stage, Stage::ContentTeamReviews);
                assert!(labels.contains(&"content team reviews".to_string()));
            }
            other => panic!("expected Updated, got {other:?}"),
        }
        assert_eq!(store.writes.get(), 0);
        assert_eq!(store.labels(), vec!["blog"]);
    }

    #[test]
    fn scan_mode_comes_from_config() {
        // Items 0-1 checked plus item 3: the two modes disagree.
        let mut body = checked_body(2);
        body = body.replace(
            "- [ ] Team stakeholders approval (sponsor/approver)",
            "- [x] Team stakeholders approval (sponsor/approver)",
        );

        let store = FakeStore::with_issue(Some(&body), &[]);
        let outcome = sync_issue(&store, &config(), 42, true).unwrap();
        match outcome {
            SyncOutcome::Updated { stage, progress, .. } => {
                assert_eq!(progress, 4);
                assert_eq!(stage, Stage::ReadyForCalendar);
            }
            other => panic!("expected Updated, got {other:?}"),
        }

        let mut strict = config();
        strict.resolver.scan_mode = ScanMode::ConsecutivePrefix;
        let store = FakeStore::with_issue(Some(&body), &[]);
        let outcome = sync_issue(&store, &strict, 42, true).unwrap();
        match outcome {
            SyncOutcome::Updated { stage, progress, .. } => {
                assert_eq!(progress, 2);
                assert_eq!(stage, Stage::ContentTeamReviews);
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn store_errors_propagate() {
        struct FailingStore;
        impl IssueStore for FailingStore {
            fn get_issue(&self, _number: u64) -> Result<Issue> {
                Err(PubflowError::Api {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            }
            fn set_labels(&self, _number: u64, _labels: &[String]) -> Result<()> {
                unreachable!("get_issue fails first")
            }
        }

        let err = sync_issue(&FailingStore, &config(), 42, false).unwrap_err();
        assert!(matches!(err, PubflowError::Api { status: 404, .. }));
    }

    #[test]
    fn outcome_json_is_tagged() {
        let outcome = SyncOutcome::Skipped { issue: 7 };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"skipped\""));
        assert!(json.contains("\"issue\":7"));
    }
}
