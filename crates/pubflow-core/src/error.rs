use thiserror::Error;

#[derive(Debug, Error)]
pub enum PubflowError {
    #[error("not initialized: run 'pubflow init'")]
    NotInitialized,

    #[error("issue has no body content")]
    NoContent,

    #[error("checklist must contain at least one item")]
    EmptyChecklist,

    #[error("checklist item {0} is blank")]
    BlankChecklistItem(usize),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid scan mode '{0}': expected any_checked or consecutive_prefix")]
    InvalidScanMode(String),

    #[error("GitHub API error: {status} {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PubflowError>;
