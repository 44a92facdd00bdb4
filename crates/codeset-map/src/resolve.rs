//! Effective local-to-standard mapping of a sheet.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::{debug, info_span};

use codeset_model::{
    ColumnRoles, LogicalTable, LookupTables, MappedKind, SheetMapping, Workbook, combine_standard,
};

/// Outcome of resolving one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetResolution {
    pub mapping: SheetMapping,
    /// Distinct standard values offered as mapped-value choices.
    pub options: Vec<String>,
    /// Blank mapped/sub-definition cells filled from the mapping.
    pub filled: usize,
    /// Cells cleared on rows carrying only a standard reference.
    pub cleared: usize,
}

/// Resolves the sheet mapping and backfills blank mapped cells in place.
///
/// Sources, lowest priority first:
/// 1. `lookup` (the formula-derived map of the sub-definition column);
/// 2. the sheet itself: standard code + description pairs when both columns
///    exist, otherwise mapped value -> sub-definition (rows with a blank
///    sub-definition contribute nothing).
///
/// Afterwards rows whose local code and display are blank but which carry a
/// standard code and description get their mapped and sub-definition cells
/// cleared. Duplicate local codes are not an error here.
pub fn resolve_mapping(
    table: &mut LogicalTable,
    roles: &ColumnRoles,
    lookup: Option<&IndexMap<String, String>>,
) -> SheetResolution {
    let own = sheet_mapping(table, roles);
    let mapping = match (lookup, roles.sub_definition.is_some()) {
        (Some(base), true) => own.over(base),
        _ => own,
    };
    let options = mapped_options(table, roles);
    let filled = backfill(table, roles, &mapping);
    let cleared = clear_orphans(table, roles);
    SheetResolution {
        mapping,
        options,
        filled,
        cleared,
    }
}

/// Resolves every sheet, using the lookup map of each sheet's sub-definition column.
pub fn resolve_workbook(
    workbook: &mut Workbook,
    roles_by_sheet: &BTreeMap<String, ColumnRoles>,
    lookups: &LookupTables,
) -> BTreeMap<String, SheetResolution> {
    let mut out = BTreeMap::new();
    for (name, table) in workbook.sheets_mut() {
        let Some(roles) = roles_by_sheet.get(name) else {
            continue;
        };
        if roles.is_unmappable() {
            continue;
        }
        let span = info_span!("resolve", sheet = name);
        let _guard = span.enter();
        let lookup = roles
            .sub_definition
            .as_deref()
            .and_then(|column| lookups.get(name, column));
        let resolution = resolve_mapping(table, roles, lookup);
        debug!(
            entries = resolution.mapping.len(),
            options = resolution.options.len(),
            filled = resolution.filled,
            cleared = resolution.cleared,
            from_lookup = lookup.is_some(),
            "resolved sheet mapping"
        );
        out.insert(name.to_string(), resolution);
    }
    out
}

fn sheet_mapping(table: &LogicalTable, roles: &ColumnRoles) -> SheetMapping {
    let mut mapping = SheetMapping::new();
    if let (Some(code_col), Some(desc_col)) = (&roles.standard_code, &roles.standard_description)
    {
        let codes = table.column_values(code_col);
        let descriptions = table.column_values(desc_col);
        for (code, description) in codes.iter().zip(&descriptions) {
            if description.is_empty() {
                continue;
            }
            let key = match roles.mapped_kind() {
                MappedKind::Description => description,
                MappedKind::Code => code,
            };
            mapping.insert(key, combine_standard(code, description));
        }
    } else if let (Some(mapped_col), Some(sub_col)) =
        (roles.mapped_column(), &roles.sub_definition)
    {
        let mapped = table.column_values(mapped_col);
        let subs = table.column_values(sub_col);
        for (key, value) in mapped.iter().zip(subs) {
            if key.is_empty() || value.is_empty() {
                continue;
            }
            mapping.insert(key, value);
        }
    }
    mapping
}

fn mapped_options(table: &LogicalTable, roles: &ColumnRoles) -> Vec<String> {
    let (Some(desc_col), Some(_)) = (&roles.standard_description, &roles.mapped) else {
        return Vec::new();
    };
    let source = match (roles.mapped_kind(), &roles.standard_code) {
        (MappedKind::Code, Some(code_col)) => code_col,
        _ => desc_col,
    };
    let mut options: Vec<String> = Vec::new();
    for value in table.column_values(source) {
        if !value.is_empty() && !options.contains(&value) {
            options.push(value);
        }
    }
    options
}

fn backfill(table: &mut LogicalTable, roles: &ColumnRoles, mapping: &SheetMapping) -> usize {
    let (Some(mapped_col), Some(sub_col)) = (roles.mapped_column(), &roles.sub_definition) else {
        return 0;
    };
    let (Some(mapped_pos), Some(sub_pos)) = (
        table.canonical_position(mapped_col),
        table.canonical_position(sub_col),
    ) else {
        return 0;
    };
    let mut filled = 0;
    for row in 0..table.height() {
        let mapped = table.cell(row, mapped_pos).trim().to_string();
        let sub = table.cell(row, sub_pos).trim().to_string();
        if sub.is_empty() && !mapped.is_empty() {
            if let Some(value) = mapping.get(&mapped).filter(|value| !value.is_empty()) {
                let value = value.to_string();
                table.set_cell(row, sub_pos, value);
                filled += 1;
            }
        } else if mapped.is_empty() && !sub.is_empty() {
            if let Some(key) = mapping.key_for_value(&sub) {
                let key = key.to_string();
                table.set_cell(row, mapped_pos, key);
                filled += 1;
            }
        }
    }
    filled
}

fn clear_orphans(table: &mut LogicalTable, roles: &ColumnRoles) -> usize {
    if roles.code.is_none() && roles.display.is_none() {
        return 0;
    }
    let (Some(code_col), Some(desc_col)) = (&roles.standard_code, &roles.standard_description)
    else {
        return 0;
    };
    let targets: Vec<usize> = [roles.mapped_column(), roles.sub_definition.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(|column| table.canonical_position(column))
        .collect();
    if targets.is_empty() {
        return 0;
    }
    let locals = local_presence(table, roles);
    let codes = table.column_values(code_col);
    let descriptions = table.column_values(desc_col);
    let mut cleared = 0;
    for row in 0..table.height() {
        if locals[row] || codes[row].is_empty() || descriptions[row].is_empty() {
            continue;
        }
        for &position in &targets {
            if !table.cell(row, position).trim().is_empty() {
                table.set_cell(row, position, String::new());
                cleared += 1;
            }
        }
    }
    cleared
}

/// Per row, whether a local code or display value is present.
fn local_presence(table: &LogicalTable, roles: &ColumnRoles) -> Vec<bool> {
    let mut present = vec![false; table.height()];
    for column in [roles.code.as_deref(), roles.display.as_deref()]
        .into_iter()
        .flatten()
    {
        for (row, value) in table.column_values(column).iter().enumerate() {
            if !value.is_empty() {
                present[row] = true;
            }
        }
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;

    fn table(columns: &[&str], rows: &[&[&str]]) -> LogicalTable {
        LogicalTable::from_rows(
            columns.iter().map(|c| (*c).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn standard_pairs_key_on_description() {
        let mut sheet = table(
            &["CODE", "DISPLAY", "STANDARD_CODE", "STANDARD_DESCRIPTION", "MAPPED_STD_DESCRIPTION"],
            &[
                &["F", "Female", "F", "Female", "Female"],
                &["M", "Male", "M", "Male", ""],
                &["", "", "U", "Unknown", ""],
            ],
        );
        let roles = classify(&sheet);
        let resolved = resolve_mapping(&mut sheet, &roles, None);
        assert_eq!(resolved.mapping.get("Female"), Some("F^Female"));
        assert_eq!(resolved.mapping.get("Unknown"), Some("U^Unknown"));
        assert_eq!(resolved.options, vec!["Female", "Male", "Unknown"]);
    }

    #[test]
    fn code_kind_keys_on_code_and_offers_codes() {
        let mut sheet = table(
            &["CODE", "STANDARD_CODE", "STANDARD_DESCRIPTION", "MAPPED_STD_CODE"],
            &[&["A", "1", "One", ""], &["B", "2", "Two", ""], &["C", "", "Three", ""]],
        );
        let roles = classify(&sheet);
        let resolved = resolve_mapping(&mut sheet, &roles, None);
        assert_eq!(resolved.mapping.get("1"), Some("1^One"));
        assert_eq!(resolved.mapping.get("2"), Some("2^Two"));
        assert_eq!(resolved.mapping.len(), 2);
        assert_eq!(resolved.options, vec!["1", "2"]);
    }
}
