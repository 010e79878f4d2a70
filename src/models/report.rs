use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Terminal outcome of applying one manifest entry.
///
/// - `Applied`: The tag field was written.
/// - `TargetMissing`: The target file does not exist or cannot be opened.
/// - `FormatError`: The file exists but its metadata could not be read or written.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplyResult {
    Applied,
    TargetMissing,
    FormatError,
}

impl ApplyResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::TargetMissing => "target_missing",
            Self::FormatError => "format_error",
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Outcome of one entry, kept in manifest order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryOutcome {
    pub target: String,
    /// The path the target resolved to.
    pub path: PathBuf,
    pub result: ApplyResult,
    /// Codec diagnostic for failed entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Append-only record of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<EntryOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: EntryOutcome) {
        self.entries.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, result: ApplyResult) -> usize {
        self.entries.iter().filter(|e| e.result == result).count()
    }

    pub fn applied_count(&self) -> usize {
        self.count(ApplyResult::Applied)
    }

    /// Entries that were not applied, in manifest order.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.entries.iter().filter(|e| !e.result.is_applied())
    }

    /// `(target, result)` pairs in manifest order.
    pub fn results(&self) -> Vec<(&str, ApplyResult)> {
        self.entries
            .iter()
            .map(|e| (e.target.as_str(), e.result))
            .collect()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {} of {} applied, {} missing, {} format errors",
            self.applied_count(),
            self.len(),
            self.count(ApplyResult::TargetMissing),
            self.count(ApplyResult::FormatError),
        )?;
        for failure in self.failures() {
            match &failure.detail {
                Some(detail) => write!(
                    f,
                    "\n  {}: {} ({})",
                    failure.target,
                    failure.result.as_str(),
                    detail
                )?,
                None => write!(f, "\n  {}: {}", failure.target, failure.result.as_str())?,
            }
        }
        Ok(())
    }
}
