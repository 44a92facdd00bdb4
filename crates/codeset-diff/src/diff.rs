//! Sheet and workbook diffing over normalized rows.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, info_span};

use codeset_map::classify;
use codeset_model::{
    ChangedRow, ColumnRoles, DiffRow, LogicalTable, SheetDiff, Workbook, WorkbookDiff,
    normalize_header,
};

use crate::normalize::normalize_projected;

/// Diffs `incoming` against `base`, sheet by sheet.
///
/// A sheet missing on one side counts as all rows added or all rows removed.
/// Sheets without changes are omitted from the result.
pub fn compute_diff(
    base: &Workbook,
    incoming: &Workbook,
    roles_by_sheet: &BTreeMap<String, ColumnRoles>,
) -> WorkbookDiff {
    let span = info_span!("diff", base_sheets = base.len(), incoming_sheets = incoming.len());
    let _guard = span.enter();

    let mut names: Vec<&str> = incoming.sheet_names().collect();
    for name in base.sheet_names() {
        if incoming.sheet(name).is_none() {
            names.push(name);
        }
    }

    let sheets = names.into_iter().map(|name| {
        let sheet = diff_sheet(
            base.sheet(name),
            incoming.sheet(name),
            roles_by_sheet.get(name),
        );
        debug!(
            sheet = name,
            added = sheet.added.len(),
            removed = sheet.removed.len(),
            changed = sheet.changed.len(),
            "diffed sheet"
        );
        (name.to_string(), sheet)
    });
    let diff = WorkbookDiff::from_sheets(sheets);
    info!(
        sheets = diff.summary.sheet_count,
        added = diff.summary.added_total,
        removed = diff.summary.removed_total,
        changed = diff.summary.changed_total,
        "workbook diff complete"
    );
    diff
}

/// Diffs one sheet. `roles` are the known roles of the sheet, if any.
///
/// Compared columns are the code, display and mapped-value columns. Each
/// table is read through its own headers: a role comes from `roles` when the
/// table has that column, otherwise from classifying the table itself, so
/// `Code` in one snapshot lines up with `CODE` in the other. Rows correlate
/// on code, else display, else mapped value. A sheet with none of those
/// compares the union of its columns (matched by normalized header) by
/// position.
pub fn diff_sheet(
    base: Option<&LogicalTable>,
    incoming: Option<&LogicalTable>,
    roles: Option<&ColumnRoles>,
) -> SheetDiff {
    let plan = ComparisonPlan::new(base, incoming, roles);

    let base_rows = base.map_or_else(Vec::new, |table| {
        normalize_projected(table, &plan.labels, &plan.base_sources, plan.identity)
    });
    let incoming_rows = incoming.map_or_else(Vec::new, |table| {
        normalize_projected(table, &plan.labels, &plan.incoming_sources, plan.identity)
    });

    let base_by_key: HashMap<&str, &DiffRow> =
        base_rows.iter().map(|row| (row.key.as_str(), row)).collect();
    let incoming_by_key: HashMap<&str, &DiffRow> = incoming_rows
        .iter()
        .map(|row| (row.key.as_str(), row))
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for row in &incoming_rows {
        match base_by_key.get(row.key.as_str()) {
            None => added.push(row.clone()),
            Some(before) => {
                let changed_columns = changed_columns(&plan.labels, before, row);
                if !changed_columns.is_empty() {
                    changed.push(ChangedRow {
                        key: row.key.clone(),
                        display_key: row.display_key.clone(),
                        before: (*before).clone(),
                        after: row.clone(),
                        changed_columns,
                    });
                }
            }
        }
    }
    let removed: Vec<DiffRow> = base_rows
        .iter()
        .filter(|row| !incoming_by_key.contains_key(row.key.as_str()))
        .cloned()
        .collect();

    let key_column = plan.identity.map(|index| plan.labels[index].clone());
    let mut sheet = SheetDiff {
        columns: plan.labels,
        key_column,
        added,
        removed,
        changed,
        ..SheetDiff::default()
    };
    sheet.recount();
    sheet
}

fn changed_columns(columns: &[String], before: &DiffRow, after: &DiffRow) -> Vec<String> {
    columns
        .iter()
        .filter(|column| before.values.get(*column) != after.values.get(*column))
        .cloned()
        .collect()
}

/// Compared column labels and, per side, the column each label reads from.
struct ComparisonPlan {
    labels: Vec<String>,
    base_sources: Vec<Option<String>>,
    incoming_sources: Vec<Option<String>>,
    /// Index into `labels` of the identity column.
    identity: Option<usize>,
}

impl ComparisonPlan {
    fn new(
        base: Option<&LogicalTable>,
        incoming: Option<&LogicalTable>,
        roles: Option<&ColumnRoles>,
    ) -> Self {
        let base_roles = base.map(|table| identity_roles(table, roles));
        let incoming_roles = incoming.map(|table| identity_roles(table, roles));

        let mut plan = Self {
            labels: Vec::new(),
            base_sources: Vec::new(),
            incoming_sources: Vec::new(),
            identity: None,
        };
        for role in 0..3 {
            let base_column = base_roles.as_ref().and_then(|columns| columns[role].clone());
            let incoming_column = incoming_roles
                .as_ref()
                .and_then(|columns| columns[role].clone());
            let Some(label) = incoming_column.clone().or_else(|| base_column.clone()) else {
                continue;
            };
            if plan.labels.contains(&label) {
                continue;
            }
            plan.labels.push(label);
            plan.base_sources.push(base_column);
            plan.incoming_sources.push(incoming_column);
        }
        if plan.labels.is_empty() {
            plan.union_of_columns(base, incoming);
        } else {
            plan.identity = Some(0);
        }
        plan
    }

    /// Every column of either table, matched across tables by normalized header.
    fn union_of_columns(&mut self, base: Option<&LogicalTable>, incoming: Option<&LogicalTable>) {
        let mut seen: Vec<String> = Vec::new();
        for table in [base, incoming].into_iter().flatten() {
            for column in table.columns() {
                let normalized = normalize_header(column);
                if seen.contains(&normalized) {
                    continue;
                }
                seen.push(normalized.clone());
                self.labels.push(column.clone());
                self.base_sources
                    .push(base.and_then(|table| same_header(table, &normalized)));
                self.incoming_sources
                    .push(incoming.and_then(|table| same_header(table, &normalized)));
            }
        }
    }
}

fn same_header(table: &LogicalTable, normalized: &str) -> Option<String> {
    table
        .columns()
        .iter()
        .find(|column| normalize_header(column) == normalized)
        .cloned()
}

/// Code, display and mapped-value columns of `table`, in identity order.
///
/// A role of `known` is used when `table` has that column; otherwise the
/// table's own classification decides.
fn identity_roles(table: &LogicalTable, known: Option<&ColumnRoles>) -> [Option<String>; 3] {
    let own = classify(table);
    [
        pick_column(table, known.and_then(|roles| roles.code.as_deref()), own.code.as_deref()),
        pick_column(
            table,
            known.and_then(|roles| roles.display.as_deref()),
            own.display.as_deref(),
        ),
        pick_column(
            table,
            known.and_then(ColumnRoles::mapped_column),
            own.mapped_column(),
        ),
    ]
}

fn pick_column(table: &LogicalTable, known: Option<&str>, own: Option<&str>) -> Option<String> {
    known
        .filter(|column| table.has_column(column))
        .or(own)
        .map(str::to_string)
}
