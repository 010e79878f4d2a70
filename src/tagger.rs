//! Best-effort batch apply.
//!
//! Entries are applied one at a time in manifest order. A failed entry is
//! recorded and reported once; it never stops the entries after it.

use crate::codec::MetadataCodec;
use crate::error::CodecError;
use crate::models::{ApplyResult, BatchReport, EntryOutcome, ManifestEntry, RootPath};

pub struct BatchTagger<C> {
    codec: C,
}

impl<C: MetadataCodec> BatchTagger<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Apply every entry and return their outcomes in order.
    pub fn run(&self, root: &RootPath, entries: &[ManifestEntry]) -> BatchReport {
        let mut report = BatchReport::default();
        for entry in entries {
            report.push(self.apply(root, entry));
        }

        tracing::info!(
            applied = report.applied_count(),
            total = report.len(),
            "Batch finished"
        );
        report
    }

    fn apply(&self, root: &RootPath, entry: &ManifestEntry) -> EntryOutcome {
        let file = root.resolve(&entry.target);
        let blank = entry.tags.iter().filter(|t| t.is_empty()).count();
        if blank > 0 {
            tracing::warn!(file = %file.target, blank, "Skipping empty tags");
        }

        let (result, detail) = match self.codec.write_tags(&file.path, &entry.tags) {
            Ok(()) => {
                tracing::info!(file = %file.target, tags = entry.tags.len(), "Applied tags");
                (ApplyResult::Applied, None)
            }
            Err(err @ CodecError::NotFound(_)) => {
                tracing::warn!("{}", err);
                (ApplyResult::TargetMissing, Some(err.to_string()))
            }
            Err(err) => {
                tracing::error!(file = %file.target, "{}", err);
                (ApplyResult::FormatError, Some(err.to_string()))
            }
        };

        EntryOutcome {
            target: file.target,
            path: file.path,
            result,
            detail,
        }
    }
}
