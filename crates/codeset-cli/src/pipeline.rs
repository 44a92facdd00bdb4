//! Load, classify and resolve stages shared by the subcommands.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use codeset_diff::WorkbookSession;
use codeset_ingest::{LoadedWorkbook, read_workbook};
use codeset_map::{SheetResolution, classify_workbook, extract_lookup_tables, resolve_workbook};
use codeset_model::{ColumnRoles, LookupTables, Workbook, WorkbookDiff};
use codeset_report::{TransformerOptions, build_transformer_xml};

use crate::logging::redact_value;

/// A workbook after classification and mapping resolution.
#[derive(Debug)]
pub struct PreparedWorkbook {
    /// Tables with blank mapped cells backfilled.
    pub workbook: Workbook,
    pub roles: BTreeMap<String, ColumnRoles>,
    pub lookups: LookupTables,
    pub resolutions: BTreeMap<String, SheetResolution>,
}

pub fn load(path: &Path) -> Result<LoadedWorkbook> {
    let start = Instant::now();
    let loaded = read_workbook(path).with_context(|| format!("load {}", path.display()))?;
    info!(
        path = %path.display(),
        sheet_count = loaded.workbook.len(),
        formula_sheets = loaded.formulas.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(loaded)
}

/// Loads a workbook, classifies its sheets and resolves their mappings.
pub fn prepare(path: &Path) -> Result<PreparedWorkbook> {
    let LoadedWorkbook {
        mut workbook,
        formulas,
    } = load(path)?;

    let roles = info_span!("classify").in_scope(|| classify_workbook(&workbook));
    let unmappable = roles.values().filter(|roles| roles.is_unmappable()).count();
    info!(
        sheet_count = roles.len(),
        unmappable, "classification complete"
    );

    let start = Instant::now();
    let lookups = extract_lookup_tables(&workbook, &formulas);
    let resolutions = resolve_workbook(&mut workbook, &roles, &lookups);
    let filled: usize = resolutions.values().map(|resolution| resolution.filled).sum();
    info!(
        lookup_columns = lookups.len(),
        resolved_sheets = resolutions.len(),
        filled,
        duration_ms = start.elapsed().as_millis(),
        "resolution complete"
    );
    for (sheet, resolution) in &resolutions {
        for (key, value) in resolution.mapping.iter() {
            trace!(
                sheet = %sheet,
                key = redact_value(key),
                value = redact_value(value),
                "mapping entry"
            );
        }
    }

    Ok(PreparedWorkbook {
        workbook,
        roles,
        lookups,
        resolutions,
    })
}

/// Stages `incoming` as an import over `base` and returns the diff.
pub fn stage_diff(base: &Path, incoming: &Path) -> Result<WorkbookDiff> {
    let base = load(base)?;
    let incoming = load(incoming)?;
    let mut session = WorkbookSession::new();
    session.load(base.workbook);
    let staged = session.stage_import(incoming.workbook);
    let diff = staged.diff().clone();
    info!(
        added = diff.summary.added_total,
        removed = diff.summary.removed_total,
        changed = diff.summary.changed_total,
        "import staged"
    );
    Ok(diff)
}

/// Renders the transformer document of a prepared workbook.
pub fn export_transformer(
    prepared: &PreparedWorkbook,
    options: &TransformerOptions,
) -> Result<String> {
    build_transformer_xml(&prepared.workbook, &prepared.roles, options)
        .context("generate transformer")
}
