//! Row normalization: stable keys and stripped values for diffing.

use std::collections::HashSet;

use indexmap::IndexMap;

use codeset_model::{DiffRow, LogicalTable, spreadsheet_row};

/// Placeholder key of a row without a usable identity value.
pub fn positional_key(index: usize) -> String {
    format!("__row_{index}")
}

/// Normalizes every row of `table` over exactly `columns`.
///
/// Values are stripped; a repeated header reads from its densest variant and
/// an absent column reads as empty. Keys come from `identity` and fall back
/// to [`positional_key`] when the column is absent or the cell blank.
/// Repeats of a key get `#1`, `#2`, ... in row order, skipping suffixes that
/// are already taken, so keys are unique within the result.
pub fn normalize_rows(
    table: &LogicalTable,
    columns: &[String],
    identity: Option<&str>,
) -> Vec<DiffRow> {
    let positions: Vec<Option<usize>> = columns
        .iter()
        .map(|column| table.canonical_position(column))
        .collect();
    let identity_position = identity.and_then(|column| table.canonical_position(column));
    normalize_positions(table, columns, &positions, identity_position)
}

/// Normalizes every row of `table` under shared column labels.
///
/// `sources[i]` names the column of this table that holds `labels[i]`
/// (`None` when the table lacks it), so two tables spelling a header
/// differently still produce rows keyed by the same labels. `identity` is an
/// index into `labels`.
pub fn normalize_projected(
    table: &LogicalTable,
    labels: &[String],
    sources: &[Option<String>],
    identity: Option<usize>,
) -> Vec<DiffRow> {
    debug_assert_eq!(labels.len(), sources.len());
    let positions: Vec<Option<usize>> = sources
        .iter()
        .map(|source| {
            source
                .as_deref()
                .and_then(|column| table.canonical_position(column))
        })
        .collect();
    let identity_position = identity.and_then(|index| positions.get(index).copied().flatten());
    normalize_positions(table, labels, &positions, identity_position)
}

fn normalize_positions(
    table: &LogicalTable,
    labels: &[String],
    positions: &[Option<usize>],
    identity_position: Option<usize>,
) -> Vec<DiffRow> {
    let mut taken: HashSet<String> = HashSet::with_capacity(table.height());
    let mut rows = Vec::with_capacity(table.height());
    for index in 0..table.height() {
        let row_number = spreadsheet_row(index);
        let natural = identity_position
            .map(|position| table.cell(index, position).trim())
            .filter(|value| !value.is_empty());
        let (base, display_key) = match natural {
            Some(value) => (value.to_string(), value.to_string()),
            None => (positional_key(index), format!("Row {row_number}")),
        };

        let key = unique_key(&base, &mut taken);

        let values: IndexMap<String, String> = labels
            .iter()
            .zip(positions)
            .map(|(label, position)| {
                let value = position.map_or("", |position| table.cell(index, position).trim());
                (label.clone(), value.to_string())
            })
            .collect();

        rows.push(DiffRow {
            key,
            display_key,
            row_number,
            values,
        });
    }
    rows
}

fn unique_key(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}#{suffix}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}
