use crate::checklist::Checklist;
use crate::error::{PubflowError, Result};
use crate::types::{ScanMode, Stage};
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Checkbox matching
// ---------------------------------------------------------------------------

/// Build the pattern for one checklist item: a line starting with a `- [x]`
/// marker (case-insensitive, whitespace tolerated around the brackets)
/// followed by the item's literal text. The item text is escaped so that
/// parentheses, periods, and other metacharacters match literally.
fn item_pattern(item: &str) -> Result<Regex> {
    let pattern = format!(
        r"(?mi)^\s*-\s*\[\s*x\s*\]\s*{}",
        regex::escape(item)
    );
    Ok(Regex::new(&pattern)?)
}

/// Whether `body` contains a checked checkbox line for `item`. Malformed
/// checkbox syntax simply fails to match and counts as unchecked.
pub fn is_checked(body: &str, item: &str) -> Result<bool> {
    Ok(item_pattern(item)?.is_match(body))
}

// ---------------------------------------------------------------------------
// Progress counting
// ---------------------------------------------------------------------------

/// Count checked items according to `mode`. The result is in
/// `[0, checklist.len()]`.
pub fn progress(body: &str, checklist: &Checklist, mode: ScanMode) -> Result<usize> {
    match mode {
        ScanMode::AnyChecked => {
            let mut furthest = 0;
            for (i, item) in checklist.items().iter().enumerate() {
                if is_checked(body, item)? {
                    furthest = i + 1;
                }
            }
            Ok(furthest)
        }
        ScanMode::ConsecutivePrefix => {
            let mut count = 0;
            for item in checklist.items() {
                if !is_checked(body, item)? {
                    break;
                }
                count += 1;
            }
            Ok(count)
        }
    }
}

// ---------------------------------------------------------------------------
// StageMap
// ---------------------------------------------------------------------------

/// One row of the threshold table: progress counts of at least `min` map to
/// `stage` unless a higher row matches first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThreshold {
    pub min: usize,
    pub stage: Stage,
}

/// Ordered threshold table mapping a progress count to a stage. Rows are
/// checked highest-first; a count below every row falls back to backlog.
#[derive(Debug, Clone, PartialEq)]
pub struct StageMap {
    thresholds: Vec<StageThreshold>,
}

impl StageMap {
    pub fn new(mut thresholds: Vec<StageThreshold>) -> Self {
        thresholds.sort_by(|a, b| b.min.cmp(&a.min));
        Self { thresholds }
    }

    pub fn stage_for(&self, count: usize) -> Stage {
        self.thresholds
            .iter()
            .find(|t| count >= t.min)
            .map(|t| t.stage)
            .unwrap_or(Stage::Backlog)
    }

    /// Rows in descending `min` order.
    pub fn thresholds(&self) -> &[StageThreshold] {
        &self.thresholds
    }
}

impl Default for StageMap {
    /// The publication ladder: one stage per count up to 9, where the table
    /// saturates at `ready to publish`.
    fn default() -> Self {
        let thresholds = Stage::all()
            .iter()
            .filter(|s| **s != Stage::Backlog)
            .map(|&stage| StageThreshold {
                min: stage.index(),
                stage,
            })
            .collect();
        Self::new(thresholds)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve the stage for an issue body. `None` or a blank body signals
/// `NoContent`; the caller decides whether that skips the update or counts
/// as backlog. Otherwise this is a total, deterministic mapping with no side
/// effects.
pub fn resolve(
    body: Option<&str>,
    checklist: &Checklist,
    mode: ScanMode,
    map: &StageMap,
) -> Result<Stage> {
    let body = body
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or(PubflowError::NoContent)?;
    let count = progress(body, checklist, mode)?;
    Ok(map.stage_for(count))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
