//! Active workbook snapshot and staged-import lifecycle.
//!
//! Snapshots are immutable once published and shared as `Arc<Snapshot>`;
//! every transition swaps the whole snapshot, so a reader holding an `Arc`
//! never observes a partially replaced workbook.

use std::collections::BTreeMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use codeset_map::classify_workbook;
use codeset_model::{ColumnRoles, Workbook, WorkbookDiff};

use crate::diff::compute_diff;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no import is staged")]
    NothingStaged,
}

/// SHA-256 over sheet names, headers and cells, hex encoded.
pub fn fingerprint(workbook: &Workbook) -> String {
    let mut hasher = Sha256::new();
    for (name, table) in workbook.sheets() {
        hasher.update(b"\x1dsheet\x1f");
        hasher.update(name.as_bytes());
        for column in table.columns() {
            hasher.update(b"\x1f");
            hasher.update(column.as_bytes());
        }
        for row in table.rows() {
            hasher.update(b"\x1e");
            for cell in row {
                hasher.update(b"\x1f");
                hasher.update(cell.as_bytes());
            }
        }
    }
    hex::encode(hasher.finalize())
}

/// A loaded workbook with its classified roles.
#[derive(Debug, Clone)]
pub struct Snapshot {
    workbook: Workbook,
    roles: BTreeMap<String, ColumnRoles>,
    fingerprint: String,
}

impl Snapshot {
    pub fn new(workbook: Workbook) -> Self {
        let roles = classify_workbook(&workbook);
        let fingerprint = fingerprint(&workbook);
        Self {
            workbook,
            roles,
            fingerprint,
        }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn roles(&self) -> &BTreeMap<String, ColumnRoles> {
        &self.roles
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// An incoming workbook held until it is applied or cancelled.
#[derive(Debug, Clone)]
pub struct StagedImport {
    incoming: Arc<Snapshot>,
    diff: WorkbookDiff,
    /// Fingerprint of the snapshot the diff was computed against.
    base_fingerprint: Option<String>,
}

impl StagedImport {
    pub fn incoming(&self) -> &Arc<Snapshot> {
        &self.incoming
    }

    pub fn diff(&self) -> &WorkbookDiff {
        &self.diff
    }

    pub fn base_fingerprint(&self) -> Option<&str> {
        self.base_fingerprint.as_deref()
    }
}

/// One user's editing context: the active snapshot and at most one staged import.
#[derive(Debug, Default)]
pub struct WorkbookSession {
    active: Option<Arc<Snapshot>>,
    staged: Option<StagedImport>,
}

impl WorkbookSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `workbook` the active snapshot, discarding any staged import.
    pub fn load(&mut self, workbook: Workbook) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::new(workbook));
        if self.staged.take().is_some() {
            debug!("discarded staged import on load");
        }
        info!(
            sheets = snapshot.workbook().len(),
            fingerprint = snapshot.fingerprint(),
            "loaded workbook"
        );
        self.active = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn active(&self) -> Option<Arc<Snapshot>> {
        self.active.clone()
    }

    pub fn staged(&self) -> Option<&StagedImport> {
        self.staged.as_ref()
    }

    /// Diffs `workbook` against the active snapshot and holds it pending.
    ///
    /// Without an active snapshot every row counts as added. A previously
    /// staged import is replaced.
    pub fn stage_import(&mut self, workbook: Workbook) -> &StagedImport {
        let incoming = Arc::new(Snapshot::new(workbook));
        let empty = Workbook::new();
        let no_roles = BTreeMap::new();
        let (base, roles) = match &self.active {
            Some(active) => (active.workbook(), active.roles()),
            None => (&empty, &no_roles),
        };
        let diff = compute_diff(base, incoming.workbook(), roles);
        info!(
            has_changes = diff.has_changes,
            fingerprint = incoming.fingerprint(),
            "staged import"
        );
        let staged = StagedImport {
            base_fingerprint: self
                .active
                .as_ref()
                .map(|active| active.fingerprint().to_string()),
            incoming,
            diff,
        };
        self.staged.insert(staged)
    }

    /// Replaces the active snapshot with the staged one.
    pub fn apply_import(&mut self) -> Result<Arc<Snapshot>, SessionError> {
        let staged = self.staged.take().ok_or(SessionError::NothingStaged)?;
        info!(
            fingerprint = staged.incoming.fingerprint(),
            "applied staged import"
        );
        self.active = Some(Arc::clone(&staged.incoming));
        Ok(staged.incoming)
    }

    /// Discards the staged import; returns whether one existed.
    pub fn cancel_import(&mut self) -> bool {
        let cancelled = self.staged.take().is_some();
        if cancelled {
            info!("cancelled staged import");
        }
        cancelled
    }
}
