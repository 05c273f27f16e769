use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One rung of the publication workflow ladder, from nothing-yet-done to
/// ready-to-publish. Ordering follows workflow progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Backlog,
    DraftSubmitted,
    ContentTeamReviews,
    TeamAndStakeholderReviews,
    ReadyForCalendar,
    CommsReview,
    Copyedit,
    ReadyForStaging,
    PreviewApproval,
    ReadyToPublish,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Backlog,
            Stage::DraftSubmitted,
            Stage::ContentTeamReviews,
            Stage::TeamAndStakeholderReviews,
            Stage::ReadyForCalendar,
            Stage::CommsReview,
            Stage::Copyedit,
            Stage::ReadyForStaging,
            Stage::PreviewApproval,
            Stage::ReadyToPublish,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The human-readable form, which is also the label text in `flat` style.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Backlog => "backlog",
            Stage::DraftSubmitted => "draft submitted",
            Stage::ContentTeamReviews => "content team reviews",
            Stage::TeamAndStakeholderReviews => "team and stakeholder reviews",
            Stage::ReadyForCalendar => "ready for calendar",
            Stage::CommsReview => "comms review",
            Stage::Copyedit => "copyedit",
            Stage::ReadyForStaging => "ready for staging",
            Stage::PreviewApproval => "preview approval",
            Stage::ReadyToPublish => "ready to publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = crate::error::PubflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::all()
            .iter()
            .find(|stage| stage.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::PubflowError::InvalidStage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ScanMode
// ---------------------------------------------------------------------------

/// How checked items are counted. A policy choice, injected through
/// configuration rather than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Progress is the position of the furthest checked item, gaps allowed.
    AnyChecked,
    /// Progress is the unbroken run of checked items from the top; the first
    /// gap stops the count even if later items are checked.
    ConsecutivePrefix,
}

impl ScanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::AnyChecked => "any_checked",
            ScanMode::ConsecutivePrefix => "consecutive_prefix",
        }
    }
}

impl Default for ScanMode {
    fn default() -> Self {
        ScanMode::AnyChecked
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScanMode {
    type Err = crate::error::PubflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_checked" => Ok(ScanMode::AnyChecked),
            "consecutive_prefix" => Ok(ScanMode::ConsecutivePrefix),
            _ => Err(crate::error::PubflowError::InvalidScanMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// EmptyBodyPolicy
// ---------------------------------------------------------------------------

/// What to do when an issue has no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyBodyPolicy {
    /// Leave the issue untouched.
    Skip,
    /// Proceed with progress 0.
    TreatAsBacklog,
}

impl EmptyBodyPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            EmptyBodyPolicy::Skip => "skip",
            EmptyBodyPolicy::TreatAsBacklog => "treat_as_backlog",
        }
    }
}

impl Default for EmptyBodyPolicy {
    fn default() -> Self {
        EmptyBodyPolicy::Skip
    }
}

impl fmt::Display for EmptyBodyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Backlog < Stage::DraftSubmitted);
        assert!(Stage::Copyedit < Stage::ReadyForStaging);
        assert!(Stage::ReadyToPublish > Stage::PreviewApproval);
    }

    #[test]
    fn stage_index_matches_ladder_position() {
        assert_eq!(Stage::Backlog.index(), 0);
        assert_eq!(Stage::ReadyToPublish.index(), 9);
        for (i, stage) in Stage::all().iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn stage_roundtrip() {
        for stage in Stage::all() {
            let parsed = Stage::from_str(stage.as_str()).unwrap();
            assert_eq!(*stage, parsed);
        }
    }

    #[test]
    fn stage_from_str_rejects_unknown() {
        assert!(Stage::from_str("shipped").is_err());
        assert!(Stage::from_str("").is_err());
    }

    #[test]
    fn stage_serde_snake_case() {
        let yaml = serde_yaml::to_string(&Stage::ReadyToPublish).unwrap();
        assert_eq!(yaml.trim(), "ready_to_publish");
        let parsed: Stage = serde_yaml::from_str("team_and_stakeholder_reviews").unwrap();
        assert_eq!(parsed, Stage::TeamAndStakeholderReviews);
    }

    #[test]
    fn scan_mode_roundtrip() {
        for mode in [ScanMode::AnyChecked, ScanMode::ConsecutivePrefix] {
            assert_eq!(ScanMode::from_str(mode.as_str()).unwrap(), mode);
        }
        assert!(ScanMode::from_str("whole_scan").is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(ScanMode::default(), ScanMode::AnyChecked);
        assert_eq!(EmptyBodyPolicy::default(), EmptyBodyPolicy::Skip);
    }
}
