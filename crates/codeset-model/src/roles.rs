//! Semantic roles of the columns of one sheet.

use serde::{Deserialize, Serialize};

use crate::table::LogicalTable;

/// Normalizes a header for role matching: trimmed, upper-cased, spaces to `_`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_uppercase().replace(' ', "_")
}

/// What the mapped-value column holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappedKind {
    /// Standard description (or a `CODE^DESC` override).
    #[default]
    Description,
    /// Standard code.
    Code,
}

/// The mapped/override column together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub column: String,
    pub kind: MappedKind,
    /// True when a free-text `DEFINITION` column was promoted to this role.
    #[serde(default)]
    pub promoted: bool,
}

/// Column roles inferred for one sheet.
///
/// Every role names a column of the table it was classified from, or is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub code: Option<String>,
    pub display: Option<String>,
    pub mapped: Option<MappedColumn>,
    pub sub_definition: Option<String>,
    pub standard_code: Option<String>,
    pub standard_description: Option<String>,
    pub definition: Option<String>,
    pub oid: Option<String>,
    pub url: Option<String>,
    /// Columns kept in the table but not shown by the editing UI.
    #[serde(default)]
    pub hidden: Vec<String>,
}

impl ColumnRoles {
    pub fn mapped_column(&self) -> Option<&str> {
        self.mapped.as_ref().map(|mapped| mapped.column.as_str())
    }

    pub fn mapped_kind(&self) -> MappedKind {
        self.mapped
            .as_ref()
            .map_or(MappedKind::Description, |mapped| mapped.kind)
    }

    /// True when nothing the mapping or transformer paths use was recognized.
    pub fn is_unmappable(&self) -> bool {
        self.code.is_none()
            && self.display.is_none()
            && self.mapped.is_none()
            && self.standard_code.is_none()
            && self.standard_description.is_none()
            && self.sub_definition.is_none()
    }

    pub fn is_hidden(&self, column: &str) -> bool {
        self.hidden.iter().any(|hidden| hidden == column)
    }

    /// The row-identity column for diffing: code, else display, else mapped value.
    pub fn identity_column(&self) -> Option<&str> {
        self.code
            .as_deref()
            .or(self.display.as_deref())
            .or_else(|| self.mapped_column())
    }

    /// Columns compared by the diff engine, in code/display/mapped order.
    pub fn comparison_columns(&self) -> Vec<String> {
        [
            self.code.as_deref(),
            self.display.as_deref(),
            self.mapped_column(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
    }

    /// Every assigned role column, without repeats.
    pub fn assigned_columns(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let candidates = [
            self.code.as_deref(),
            self.display.as_deref(),
            self.mapped_column(),
            self.sub_definition.as_deref(),
            self.standard_code.as_deref(),
            self.standard_description.as_deref(),
            self.definition.as_deref(),
            self.oid.as_deref(),
            self.url.as_deref(),
        ];
        for column in candidates.into_iter().flatten() {
            if !out.contains(&column) {
                out.push(column);
            }
        }
        out
    }

    /// Checks that every role names a column present in `table`.
    pub fn points_into(&self, table: &LogicalTable) -> bool {
        self.assigned_columns()
            .into_iter()
            .all(|column| table.has_column(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header(" Display value "), "DISPLAY_VALUE");
        assert_eq!(normalize_header("Sub Definition"), "SUB_DEFINITION");
    }

    #[test]
    fn identity_prefers_code_then_display() {
        let mut roles = ColumnRoles {
            display: Some("DISPLAY".to_string()),
            mapped: Some(MappedColumn {
                column: "MAPPED".to_string(),
                kind: MappedKind::Description,
                promoted: false,
            }),
            ..ColumnRoles::default()
        };
        assert_eq!(roles.identity_column(), Some("DISPLAY"));
        roles.code = Some("CODE".to_string());
        assert_eq!(roles.identity_column(), Some("CODE"));
        assert_eq!(roles.comparison_columns(), vec!["CODE", "DISPLAY", "MAPPED"]);
    }
}
