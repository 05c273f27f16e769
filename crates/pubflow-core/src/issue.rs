use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of an issue the resolver cares about: the body to scan and the
/// labels to rewrite. Everything else stays on the platform side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// The external capability the sync layer depends on. The GitHub client
/// implements it for real; tests use an in-memory store.
pub trait IssueStore {
    fn get_issue(&self, number: u64) -> Result<Issue>;

    /// Replace the issue's full label set.
    fn set_labels(&self, number: u64, labels: &[String]) -> Result<()>;
}
