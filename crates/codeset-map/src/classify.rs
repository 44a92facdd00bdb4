//! Column role inference from header names.

use std::collections::BTreeMap;

use tracing::debug;

use codeset_model::{ColumnRoles, LogicalTable, MappedColumn, MappedKind, Workbook};

use crate::patterns::{HeaderRole, header_role};

/// Infers the column roles of one sheet.
///
/// The first header claiming a role wins; later duplicates stay in the table
/// but are ignored here. When no mapped, standard-code or
/// standard-description column exists, a `DEFINITION` column is promoted to
/// the mapped role (description kind) and becomes visible. A sheet without
/// recognized headers yields empty roles.
pub fn classify(table: &LogicalTable) -> ColumnRoles {
    let mut roles = ColumnRoles::default();
    for column in table.columns() {
        let Some(role) = header_role(column) else {
            continue;
        };
        let slot = match role {
            HeaderRole::Code => &mut roles.code,
            HeaderRole::Display => &mut roles.display,
            HeaderRole::SubDefinition => &mut roles.sub_definition,
            HeaderRole::StandardCode => &mut roles.standard_code,
            HeaderRole::StandardDescription => &mut roles.standard_description,
            HeaderRole::Definition => &mut roles.definition,
            HeaderRole::Oid => &mut roles.oid,
            HeaderRole::Url => &mut roles.url,
            HeaderRole::Mapped(kind) => {
                if roles.mapped.is_none() {
                    roles.mapped = Some(MappedColumn {
                        column: column.clone(),
                        kind,
                        promoted: false,
                    });
                }
                continue;
            }
        };
        if slot.is_none() {
            *slot = Some(column.clone());
        }
    }

    if let Some(definition) = roles.definition.clone() {
        let has_standard_source = roles.mapped.is_some()
            || roles.standard_code.is_some()
            || roles.standard_description.is_some();
        if has_standard_source {
            roles.hidden.push(definition);
        } else {
            roles.mapped = Some(MappedColumn {
                column: definition,
                kind: MappedKind::Description,
                promoted: true,
            });
        }
    }
    roles
}

/// Classifies every sheet of a workbook.
pub fn classify_workbook(workbook: &Workbook) -> BTreeMap<String, ColumnRoles> {
    workbook
        .sheets()
        .map(|(name, table)| {
            let roles = classify(table);
            debug!(
                sheet = name,
                code = ?roles.code,
                display = ?roles.display,
                mapped = ?roles.mapped_column(),
                unmappable = roles.is_unmappable(),
                "classified sheet"
            );
            (name.to_string(), roles)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> LogicalTable {
        LogicalTable::new(columns.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn first_matching_header_wins() {
        let roles = classify(&table(&["CODE", "Display Value", "DISPLAY", "CODE"]));
        assert_eq!(roles.code.as_deref(), Some("CODE"));
        assert_eq!(roles.display.as_deref(), Some("Display Value"));
    }

    #[test]
    fn definition_is_hidden_when_standard_columns_exist() {
        let roles = classify(&table(&["CODE", "STANDARD_CODE", "DEFINITION"]));
        assert_eq!(roles.definition.as_deref(), Some("DEFINITION"));
        assert!(roles.is_hidden("DEFINITION"));
        assert!(roles.mapped.is_none());
    }

    #[test]
    fn definition_is_promoted_without_standard_columns() {
        let roles = classify(&table(&["CODE", "DISPLAY", "Definition"]));
        let mapped = roles.mapped.as_ref().expect("promoted mapped column");
        assert_eq!(mapped.column, "Definition");
        assert_eq!(mapped.kind, MappedKind::Description);
        assert!(mapped.promoted);
        assert!(!roles.is_hidden("Definition"));
    }

    #[test]
    fn unrecognized_sheet_is_unmappable() {
        let roles = classify(&table(&["NOTES", "OWNER"]));
        assert!(roles.is_unmappable());
        assert_eq!(roles, ColumnRoles::default());
    }
}
