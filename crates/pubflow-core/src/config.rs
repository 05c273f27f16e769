use crate::checklist::{Checklist, PUBLICATION_ITEMS};
use crate::error::{PubflowError, Result};
use crate::labels::{LabelPolicy, LabelStyle};
use crate::resolver::{StageMap, StageThreshold};
use crate::types::{EmptyBodyPolicy, ScanMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "pubflow.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// RepoConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    pub owner: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// ResolverConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub scan_mode: ScanMode,
    #[serde(default)]
    pub empty_body: EmptyBodyPolicy,
    #[serde(default)]
    pub label_style: LabelStyle,
    #[serde(default = "default_checklist_items")]
    pub checklist: Vec<String>,
    /// Override for the stage threshold table; the default publication
    /// ladder applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<StageThreshold>>,
}

fn default_checklist_items() -> Vec<String> {
    PUBLICATION_ITEMS.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scan_mode: ScanMode::default(),
            empty_body: EmptyBodyPolicy::default(),
            label_style: LabelStyle::default(),
            checklist: default_checklist_items(),
            thresholds: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub repo: RepoConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: 1,
            repo: RepoConfig {
                owner: owner.into(),
                name: name.into(),
            },
            resolver: ResolverConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Err(PubflowError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Derived pieces
    // -----------------------------------------------------------------------

    pub fn checklist(&self) -> Result<Checklist> {
        Checklist::new(self.resolver.checklist.clone())
    }

    pub fn stage_map(&self) -> StageMap {
        self.resolver
            .thresholds
            .clone()
            .map(StageMap::new)
            .unwrap_or_default()
    }

    pub fn label_policy(&self) -> LabelPolicy {
        LabelPolicy::new(self.resolver.label_style.clone())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.repo.owner.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "repo.owner is empty".to_string(),
            });
        }
        if self.repo.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "repo.name is empty".to_string(),
            });
        }

        let checklist = &self.resolver.checklist;
        if checklist.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "resolver.checklist is empty".to_string(),
            });
        }
        for (i, item) in checklist.iter().enumerate() {
            if item.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("checklist item {} is blank", i + 1),
                });
            }
        }
        let mut seen: Vec<String> = Vec::new();
        for item in checklist {
            let lower = item.trim().to_ascii_lowercase();
            if seen.contains(&lower) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("duplicate checklist item '{}'", item.trim()),
                });
            } else {
                seen.push(lower);
            }
        }

        if let Some(thresholds) = &self.resolver.thresholds {
            let mut mins: Vec<usize> = Vec::new();
            for t in thresholds {
                if t.min == 0 {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "threshold 'min: 0' for stage '{}' is implicit; counts below every \
                             threshold already fall back to backlog",
                            t.stage
                        ),
                    });
                }
                if t.min > checklist.len() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "threshold 'min: {}' for stage '{}' exceeds the checklist length {} \
                             and can never match",
                            t.min,
                            t.stage,
                            checklist.len()
                        ),
                    });
                }
                if mins.contains(&t.min) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("duplicate threshold 'min: {}'", t.min),
                    });
                } else {
                    mins.push(t.min);
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
