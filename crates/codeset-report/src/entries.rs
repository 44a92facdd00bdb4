//! Per-row resolution of the `<Code>` entries of one codeset.

use std::collections::HashMap;

use indexmap::IndexMap;

use codeset_map::{CodedValue, codeset_display_name, parse_coded_value, same_text};
use codeset_model::{ColumnRoles, LogicalTable, spreadsheet_row};

/// One `<Code>` element: a local code/display and its standard pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeEntry {
    pub local_code: String,
    pub local_display: String,
    pub standard_code: Option<String>,
    pub standard_display: Option<String>,
    /// Spreadsheet rows that produced this entry, in row order.
    pub rows: Vec<usize>,
}

type EntryIdentity = (String, String, Option<String>, Option<String>);

impl CodeEntry {
    fn identity(&self) -> EntryIdentity {
        (
            self.local_code.clone(),
            self.local_display.clone(),
            self.standard_code.clone(),
            self.standard_display.clone(),
        )
    }
}

/// The `<Codeset>` of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodesetBlock {
    pub sheet: String,
    pub name: String,
    pub oid: Option<String>,
    pub url: Option<String>,
    /// Deduplicated entries in first-seen row order.
    pub codes: Vec<CodeEntry>,
}

/// Whether a sheet produces a `<Codeset>` at all.
pub fn emits_codeset(roles: &ColumnRoles) -> bool {
    roles.code.is_some()
        || roles.display.is_some()
        || roles.standard_code.is_some()
        || roles.standard_description.is_some()
}

/// Builds the codeset of `sheet`, or `None` when no qualifying role resolved.
///
/// Rows need a non-blank local code and display. Rows resolving to the same
/// `(code, display, standard code, standard display)` collapse into one entry
/// that remembers every source row.
pub fn codeset_block(sheet: &str, table: &LogicalTable, roles: &ColumnRoles) -> Option<CodesetBlock> {
    if !emits_codeset(roles) {
        return None;
    }
    let columns = RowColumns::new(table, roles);
    let mut codes: IndexMap<EntryIdentity, CodeEntry> = IndexMap::new();
    for index in 0..table.height() {
        let Some(entry) = columns.entry(index) else {
            continue;
        };
        match codes.get_mut(&entry.identity()) {
            Some(existing) => existing.rows.extend(entry.rows),
            None => {
                codes.insert(entry.identity(), entry);
            }
        }
    }
    Some(CodesetBlock {
        sheet: sheet.to_string(),
        name: codeset_display_name(sheet),
        oid: first_non_blank(table, roles.oid.as_deref()),
        url: first_non_blank(table, roles.url.as_deref()),
        codes: codes.into_values().collect(),
    })
}

fn first_non_blank(table: &LogicalTable, column: Option<&str>) -> Option<String> {
    column.and_then(|column| {
        table
            .column_values(column)
            .into_iter()
            .find(|value| !value.is_empty())
    })
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Trimmed columns of one sheet, read once.
struct RowColumns<'a> {
    roles: &'a ColumnRoles,
    code: Vec<String>,
    display: Vec<String>,
    mapped: Option<Vec<String>>,
    standard_code: Vec<String>,
    standard_description: Vec<String>,
    definition: Option<Vec<String>>,
    sub_definition: Option<Vec<String>>,
    /// Upper-cased standard description to the first non-blank standard code.
    code_by_description: HashMap<String, String>,
}

impl<'a> RowColumns<'a> {
    fn new(table: &LogicalTable, roles: &'a ColumnRoles) -> Self {
        let read = |column: Option<&str>| -> Vec<String> {
            column.map_or_else(
                || vec![String::new(); table.height()],
                |column| table.column_values(column),
            )
        };
        // A free-text definition only stands in when no mapped or
        // sub-definition column exists; blank ones do not count as absent.
        let definition_usable = roles.sub_definition.is_none()
            && roles.mapped.as_ref().is_none_or(|mapped| mapped.promoted);
        let standard_code = read(roles.standard_code.as_deref());
        let standard_description = read(roles.standard_description.as_deref());
        let mut code_by_description = HashMap::new();
        if roles.standard_description.is_some() {
            for (description, code) in standard_description.iter().zip(&standard_code) {
                if description.trim().is_empty() || code.is_empty() {
                    continue;
                }
                code_by_description
                    .entry(description.trim().to_uppercase())
                    .or_insert_with(|| code.clone());
            }
        }
        Self {
            roles,
            code: read(roles.code.as_deref()),
            display: read(roles.display.as_deref()),
            mapped: roles.mapped_column().map(|column| table.column_values(column)),
            standard_code,
            standard_description,
            definition: roles
                .definition
                .as_deref()
                .filter(|_| definition_usable)
                .map(|column| table.column_values(column)),
            sub_definition: roles
                .sub_definition
                .as_deref()
                .map(|column| table.column_values(column)),
            code_by_description,
        }
    }

    fn parsed(column: Option<&Vec<String>>, index: usize) -> CodedValue {
        column.map_or_else(CodedValue::default, |values| parse_coded_value(&values[index]))
    }

    fn entry(&self, index: usize) -> Option<CodeEntry> {
        let local_code = non_blank(&self.code[index])?;
        let local_display = non_blank(&self.display[index])?;
        let (standard_code, standard_display) = self.resolve_standard(index);
        Some(CodeEntry {
            local_code,
            local_display,
            standard_code,
            standard_display,
            rows: vec![spreadsheet_row(index)],
        })
    }

    fn resolve_standard(&self, index: usize) -> (Option<String>, Option<String>) {
        let raw_code = non_blank(&self.standard_code[index]);
        let raw_description = non_blank(&self.standard_description[index]);
        let mapped = Self::parsed(self.mapped.as_ref(), index);
        let definition = Self::parsed(self.definition.as_ref(), index);

        let mut description = mapped
            .description
            .clone()
            .or_else(|| raw_description.clone())
            .or_else(|| definition.description.clone());

        let agrees = |candidate: Option<&String>, resolved: Option<&String>| match (candidate, resolved) {
            (Some(candidate), Some(resolved)) => same_text(candidate, resolved),
            _ => false,
        };

        let mut code = if raw_code.is_some() && agrees(raw_description.as_ref(), description.as_ref()) {
            raw_code.clone()
        } else if definition.code.is_some()
            && agrees(definition.description.as_ref(), description.as_ref())
        {
            definition.code.clone()
        } else if mapped.code.is_some() {
            mapped.code.clone()
        } else if definition.code.is_some() {
            definition.code.clone()
        } else if self.roles.standard_description.is_none() {
            raw_code.clone()
        } else {
            None
        };

        if code.is_none() || description.is_none() {
            let sub = Self::parsed(self.sub_definition.as_ref(), index);
            if description.is_none() {
                description = sub.description.clone();
            }
            if sub.code.is_some() && agrees(sub.description.as_ref(), description.as_ref()) {
                code = sub.code;
            } else if code.is_none() {
                code = sub.code;
            }
        }

        if code.is_none() {
            if let Some(resolved) = &description {
                code = self.reverse_lookup(resolved);
            }
        }
        (code, description)
    }

    /// Standard code paired with `description` in the sheet's own standard columns.
    fn reverse_lookup(&self, description: &str) -> Option<String> {
        let key = description.trim().to_uppercase();
        if key.is_empty() {
            return None;
        }
        self.code_by_description.get(&key).cloned()
    }
}

/// Distinct local codes of `block` carrying two or more different entries.
pub(crate) fn conflicting_codes(block: &CodesetBlock) -> Vec<(&str, Vec<usize>)> {
    let mut by_code: IndexMap<&str, (usize, Vec<usize>)> = IndexMap::new();
    for entry in &block.codes {
        let (count, rows) = by_code.entry(entry.local_code.as_str()).or_default();
        *count += 1;
        rows.extend(entry.rows.iter().copied());
    }
    by_code
        .into_iter()
        .filter(|(_, (count, _))| *count >= 2)
        .map(|(code, (_, mut rows))| {
            rows.sort_unstable();
            (code, rows)
        })
        .collect()
}
