//! Side-by-side comparison overlay.

use codeset_model::{ColumnRoles, LogicalTable, normalize_header};

/// Suffix of the overlay columns added by [`overlay_comparison`].
pub const COMPARE_SUFFIX: &str = "_COMPARE";

/// Copies `primary` and appends the code, display and mapped-value columns
/// of `compare` as `<HEADER>_COMPARE` columns, aligned by row position.
///
/// `compare_roles` are the roles of `compare`. Rows beyond the primary
/// table's height are dropped; missing rows read as empty. Ending a
/// comparison is just going back to `primary`.
pub fn overlay_comparison(
    primary: &LogicalTable,
    compare: &LogicalTable,
    compare_roles: &ColumnRoles,
) -> LogicalTable {
    let mut overlay = primary.clone();
    for column in compare_roles.comparison_columns() {
        let header = format!("{}{COMPARE_SUFFIX}", normalize_header(&column));
        if overlay.has_column(&header) {
            continue;
        }
        let mut values = compare.column_values(&column);
        values.truncate(primary.height());
        overlay.push_column(header, values);
    }
    overlay
}
