//! Narrow parser for single-range `VLOOKUP` formulas.
//!
//! Grammar (case-insensitive, `$` anchors allowed, leading `=` optional):
//!
//! ```text
//! VLOOKUP(<arg>, [<sheet>!]<col>[<row>]:<col>[<row>], <int>[, ...])
//! ```
//!
//! `<sheet>` is either a bare name or single-quoted. Formulas outside this
//! shape produce no mapping; nothing here evaluates general formulas.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use codeset_model::{FormulaCells, LookupTables, Workbook, SPREADSHEET_ROW_OFFSET};

/// A cell range reference such as `'CS Codes'!$A$2:$C$200`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub sheet: Option<String>,
    /// Zero-based first column.
    pub first_column: usize,
    /// Zero-based last column.
    pub last_column: usize,
    /// One-based spreadsheet rows; `None` for whole columns.
    pub first_row: Option<usize>,
    pub last_row: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlookupFormula {
    pub lookup_arg: String,
    pub range: RangeRef,
    /// One-based column within the range.
    pub column_index: usize,
}

fn vlookup_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?ix)
            ^\s*=?\s*VLOOKUP\(\s*
            (?P<arg>[^,()]+?)\s*,\s*
            (?:(?:'(?P<quoted>[^']+)'|(?P<bare>[A-Za-z0-9_.]+))!)?
            \$?(?P<c1>[A-Z]{1,3})\$?(?P<r1>[0-9]+)?\s*:\s*
            \$?(?P<c2>[A-Z]{1,3})\$?(?P<r2>[0-9]+)?\s*,\s*
            (?P<col>[0-9]+)\s*
            (?:,[^)]*)?\)\s*$",
        )
        .expect("VLOOKUP pattern is valid")
    })
}

/// Zero-based index of a column reference such as `A` or `AB`.
fn column_index(letters: &str) -> Option<usize> {
    let mut index = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    index.checked_sub(1)
}

/// Parses a formula in the supported `VLOOKUP` shape.
pub fn parse_vlookup(formula: &str) -> Option<VlookupFormula> {
    let captures = vlookup_regex().captures(formula)?;
    let sheet = captures
        .name("quoted")
        .or_else(|| captures.name("bare"))
        .map(|m| m.as_str().to_string());
    let first_column = column_index(captures.name("c1")?.as_str())?;
    let last_column = column_index(captures.name("c2")?.as_str())?;
    let first_row = captures.name("r1").and_then(|m| m.as_str().parse().ok());
    let last_row = captures.name("r2").and_then(|m| m.as_str().parse().ok());
    let column = captures.name("col")?.as_str().parse::<usize>().ok()?;
    if column == 0 || last_column < first_column {
        return None;
    }
    Some(VlookupFormula {
        lookup_arg: captures.name("arg")?.as_str().trim().to_string(),
        range: RangeRef {
            sheet,
            first_column,
            last_column,
            first_row,
            last_row,
        },
        column_index: column,
    })
}

/// Builds the key -> value map a `VLOOKUP` would consult.
///
/// The range resolves against `current_sheet` when it names no sheet. The
/// first row for a key wins, as with `VLOOKUP` exact matching. Returns `None`
/// when the sheet or columns do not exist or no key is present.
pub fn resolve_vlookup(
    formula: &VlookupFormula,
    workbook: &Workbook,
    current_sheet: &str,
) -> Option<IndexMap<String, String>> {
    let sheet = formula.range.sheet.as_deref().unwrap_or(current_sheet);
    let table = workbook.sheet(sheet)?;
    let key_position = formula.range.first_column;
    let value_position = key_position.checked_add(formula.column_index - 1)?;
    if value_position > formula.range.last_column || value_position >= table.width() {
        return None;
    }
    let first = formula
        .range
        .first_row
        .map_or(0, |row| row.saturating_sub(SPREADSHEET_ROW_OFFSET));
    let last = formula.range.last_row.map_or(table.height(), |row| {
        (row + 1)
            .saturating_sub(SPREADSHEET_ROW_OFFSET)
            .min(table.height())
    });
    let mut entries = IndexMap::new();
    for row in first..last {
        let key = table.cell(row, key_position).trim();
        if key.is_empty() {
            continue;
        }
        entries
            .entry(key.to_string())
            .or_insert_with(|| table.cell(row, value_position).trim().to_string());
    }
    (!entries.is_empty()).then_some(entries)
}

/// Resolves every supported formula of `formulas` into lookup maps.
pub fn extract_lookup_tables(workbook: &Workbook, formulas: &FormulaCells) -> LookupTables {
    let mut lookups = LookupTables::new();
    for (sheet, columns) in formulas {
        for (column, formula) in columns {
            let Some(parsed) = parse_vlookup(formula) else {
                debug!(sheet = %sheet, column = %column, "formula outside VLOOKUP grammar");
                continue;
            };
            match resolve_vlookup(&parsed, workbook, sheet) {
                Some(entries) => {
                    debug!(
                        sheet = %sheet,
                        column = %column,
                        entries = entries.len(),
                        "resolved lookup formula"
                    );
                    lookups.insert(sheet.clone(), column.clone(), entries);
                }
                None => {
                    debug!(sheet = %sheet, column = %column, "lookup range did not resolve");
                }
            }
        }
    }
    lookups
}
