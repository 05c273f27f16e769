use crate::error::{PubflowError, Result};
use crate::issue::{Issue, IssueStore};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("pubflow/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiIssue {
    number: u64,
    title: String,
    body: Option<String>,
    labels: Vec<ApiLabel>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ---------------------------------------------------------------------------
// GitHubIssueStore
// ---------------------------------------------------------------------------

/// GitHub-backed `IssueStore` over the REST v3 issues API.
pub struct GitHubIssueStore {
    http: Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GitHubIssueStore {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token, owner, repo)
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    fn issue_url(&self, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url, self.owner, self.repo, number
        )
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiError>()
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        Err(PubflowError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl IssueStore for GitHubIssueStore {
    fn get_issue(&self, number: u64) -> Result<Issue> {
        let response = self.authed(self.http.get(self.issue_url(number))).send()?;
        let api: ApiIssue = Self::check(response)?.json()?;
        Ok(Issue {
            number: api.number,
            title: api.title,
            body: api.body,
            labels: api.labels.into_iter().map(|l| l.name).collect(),
            updated_at: api.updated_at,
        })
    }

    fn set_labels(&self, number: u64, labels: &[String]) -> Result<()> {
        let url = format!("{}/labels", self.issue_url(number));
        let body = serde_json::json!({ "labels": labels });
        let response = self.authed(self.http.put(url)).json(&body).send()?;
        Self::check(response)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
