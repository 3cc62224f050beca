//! Revision tracking for mutable entities.
//!
//! Every mutable entity carries a [`Metadata`] block: creation and update
//! timestamps, a monotonically increasing revision counter, and an
//! append-only history of accepted changes. The revision counter doubles as
//! the optimistic-concurrency primitive: callers that saw revision `n`
//! submit `n` back, and a mismatch means someone else committed first.

use crate::error::StoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted change in an entity's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    /// Revision this change produced.
    pub revision: u64,
    /// When the change was committed.
    pub at: DateTime<Utc>,
    /// Short description of what changed.
    pub summary: String,
}

/// Timestamps, revision counter, and change history for one entity.
///
/// Fields are private: `record_change` is the only writer, which keeps the
/// history append-only and the revision strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u64,
    history: Vec<RevisionEntry>,
}

impl Metadata {
    /// Fresh metadata at revision 0 with a single "created" entry.
    pub fn attach() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            revision: 0,
            history: vec![RevisionEntry {
                revision: 0,
                at: now,
                summary: String::from("created"),
            }],
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Current revision. Bumped by every accepted mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Full change history, oldest first.
    pub fn history(&self) -> &[RevisionEntry] {
        &self.history
    }

    /// Record an accepted change, guarded by the caller's view of the
    /// current revision.
    ///
    /// Fails with `StaleRevision` when `expected` does not match, leaving
    /// the metadata untouched. Returns the new revision on success.
    pub fn record_change(
        &mut self,
        expected: u64,
        summary: impl Into<String>,
    ) -> Result<u64, StoryError> {
        if expected != self.revision {
            return Err(StoryError::StaleRevision {
                expected,
                actual: self.revision,
            });
        }
        Ok(self.touch(summary))
    }

    /// Record an accepted change without a revision guard.
    ///
    /// Used by the aggregate after its own validation has passed; cannot
    /// fail, which is what makes command application atomic.
    pub(crate) fn touch(&mut self, summary: impl Into<String>) -> u64 {
        let now = Utc::now();
        self.revision += 1;
        self.updated_at = now;
        self.history.push(RevisionEntry {
            revision: self.revision,
            at: now,
            summary: summary.into(),
        });
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_starts_at_zero() {
        let meta = Metadata::attach();
        assert_eq!(meta.revision(), 0);
        assert_eq!(meta.history().len(), 1);
        assert_eq!(meta.history()[0].summary, "created");
        assert_eq!(meta.created_at(), meta.updated_at());
    }

    #[test]
    fn test_record_change_bumps_revision() {
        let mut meta = Metadata::attach();
        let rev = meta.record_change(0, "renamed").unwrap();
        assert_eq!(rev, 1);
        assert_eq!(meta.revision(), 1);
        assert_eq!(meta.history().len(), 2);
        assert_eq!(meta.history()[1].summary, "renamed");
    }

    #[test]
    fn test_stale_revision_rejected() {
        let mut meta = Metadata::attach();
        meta.touch("first edit");

        let err = meta.record_change(0, "concurrent edit").unwrap_err();
        assert_eq!(
            err,
            StoryError::StaleRevision {
                expected: 0,
                actual: 1
            }
        );
        // Entity stays at the last committed revision.
        assert_eq!(meta.revision(), 1);
        assert_eq!(meta.history().len(), 2);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut meta = Metadata::attach();
        for i in 0..5 {
            meta.touch(format!("edit {i}"));
        }
        let revisions: Vec<u64> = meta.history().iter().map(|e| e.revision).collect();
        assert_eq!(revisions, vec![0, 1, 2, 3, 4, 5]);
    }
}
