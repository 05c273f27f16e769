use crate::types::Stage;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LabelStyle
// ---------------------------------------------------------------------------

/// How a stage is rendered as a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum LabelStyle {
    /// The label is the bare stage name, e.g. `copyedit`.
    Flat,
    /// The label carries a prefix, e.g. `stage: copyedit`.
    Prefixed {
        #[serde(default = "default_prefix")]
        prefix: String,
    },
}

fn default_prefix() -> String {
    "stage: ".to_string()
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle::Flat
    }
}

// ---------------------------------------------------------------------------
// LabelPolicy
// ---------------------------------------------------------------------------

/// Renders stage labels and replaces them on an issue's label set without
/// touching anything else. After `apply` the set carries exactly one stage
/// label; after `strip` it carries none.
#[derive(Debug, Clone)]
pub struct LabelPolicy {
    style: LabelStyle,
}

impl LabelPolicy {
    pub fn new(style: LabelStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, stage: Stage) -> String {
        match &self.style {
            LabelStyle::Flat => stage.as_str().to_string(),
            LabelStyle::Prefixed { prefix } => format!("{prefix}{}", stage.as_str()),
        }
    }

    /// Whether `label` was produced by this resolver. Bare stage names are
    /// always recognized so that switching styles still cleans up labels
    /// written under the old one.
    pub fn is_stage_label(&self, label: &str) -> bool {
        let label = label.trim().to_ascii_lowercase();
        if Stage::all().iter().any(|s| label == s.as_str()) {
            return true;
        }
        if let LabelStyle::Prefixed { prefix } = &self.style {
            if let Some(rest) = label.strip_prefix(&prefix.to_ascii_lowercase()) {
                return Stage::all().iter().any(|s| rest == s.as_str());
            }
        }
        false
    }

    /// Remove every recognized stage label, preserving all other labels in
    /// their original order.
    pub fn strip(&self, current: &[String]) -> Vec<String> {
        current
            .iter()
            .filter(|label| !self.is_stage_label(label))
            .cloned()
            .collect()
    }

    /// Replace any existing stage label with the one for `stage`.
    pub fn apply(&self, current: &[String], stage: Stage) -> Vec<String> {
        let mut labels = self.strip(current);
        labels.push(self.render(stage));
        labels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
