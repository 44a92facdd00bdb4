//! Duplicate local code detection.

use codeset_model::{ColumnRoles, LogicalTable};

use crate::entries::{codeset_block, conflicting_codes};
use crate::error::DuplicateCode;

/// Local codes of one sheet that resolve to conflicting `<Code>` entries.
///
/// Rows identical in code, display and standard pair are not conflicts.
pub fn duplicate_codes(sheet: &str, table: &LogicalTable, roles: &ColumnRoles) -> Vec<DuplicateCode> {
    codeset_block(sheet, table, roles)
        .map(|block| {
            conflicting_codes(&block)
                .into_iter()
                .map(|(code, rows)| DuplicateCode {
                    sheet: sheet.to_string(),
                    code: code.to_string(),
                    rows,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeset_map::classify;

    #[test]
    fn reports_rows_of_conflicting_codes() {
        let sheet = LogicalTable::from_rows(
            vec!["CODE".to_string(), "DISPLAY".to_string()],
            vec![
                vec!["UNK".to_string(), "Unknown".to_string()],
                vec!["F".to_string(), "Female".to_string()],
                vec!["UNK".to_string(), "Not recorded".to_string()],
            ],
        )
        .unwrap();
        let duplicates = duplicate_codes("CS_GENDER", &sheet, &classify(&sheet));
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].rows, vec![2, 4]);
        assert_eq!(
            duplicates[0].to_string(),
            "CS_GENDER rows 2, 4 have duplicate CODE 'UNK'"
        );
    }
}
