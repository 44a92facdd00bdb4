//! Import reconciliation for codeset workbooks.
//!
//! [`normalize_rows`] turns a sheet into keyed [`DiffRow`]s, [`compute_diff`]
//! correlates two workbooks sheet by sheet, and [`WorkbookSession`] owns the
//! active snapshot plus at most one staged import awaiting a decision.
//!
//! [`DiffRow`]: codeset_model::DiffRow

#![deny(unsafe_code)]

pub mod compare;
pub mod diff;
pub mod normalize;
pub mod session;

pub use compare::{COMPARE_SUFFIX, overlay_comparison};
pub use diff::{compute_diff, diff_sheet};
pub use normalize::{normalize_projected, normalize_rows, positional_key};
pub use session::{SessionError, Snapshot, StagedImport, WorkbookSession, fingerprint};
