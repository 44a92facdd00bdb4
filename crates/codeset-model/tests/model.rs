//! Tests for codeset-model types.

use indexmap::IndexMap;

use codeset_model::{
    DiffRow, LogicalTable, SheetDiff, Workbook, WorkbookDiff, spreadsheet_row,
};

fn diff_row(key: &str, row_number: usize, values: &[(&str, &str)]) -> DiffRow {
    DiffRow {
        key: key.to_string(),
        display_key: key.to_string(),
        row_number,
        values: values
            .iter()
            .map(|(column, value)| ((*column).to_string(), (*value).to_string()))
            .collect::<IndexMap<_, _>>(),
    }
}

#[test]
fn workbook_keeps_sheet_order() {
    let mut workbook = Workbook::new();
    workbook.insert_sheet("CS_RACE", LogicalTable::new(vec!["CODE".to_string()]));
    workbook.insert_sheet("CS_GENDER", LogicalTable::new(vec!["CODE".to_string()]));
    workbook.insert_sheet("CS_RACE", LogicalTable::new(vec!["DISPLAY".to_string()]));
    let names: Vec<&str> = workbook.sheet_names().collect();
    assert_eq!(names, vec!["CS_RACE", "CS_GENDER"]);
    assert_eq!(
        workbook.sheet("CS_RACE").unwrap().columns(),
        &["DISPLAY".to_string()]
    );
    assert!(workbook.sheet_mut("CS_MISSING").is_err());
}

#[test]
fn spreadsheet_rows_account_for_header() {
    assert_eq!(spreadsheet_row(0), 2);
    assert_eq!(spreadsheet_row(9), 11);
}

#[test]
fn workbook_diff_drops_unchanged_sheets_and_sums() {
    let changed = SheetDiff {
        added: vec![diff_row("B", 3, &[("CODE", "B")])],
        removed: vec![
            diff_row("C", 4, &[("CODE", "C")]),
            diff_row("D", 5, &[("CODE", "D")]),
        ],
        ..SheetDiff::default()
    };
    let diff = WorkbookDiff::from_sheets(vec![
        ("CS_GENDER".to_string(), changed),
        ("CS_RACE".to_string(), SheetDiff::default()),
    ]);
    assert!(diff.has_changes);
    assert_eq!(diff.summary.sheet_count, 1);
    assert_eq!(diff.summary.added_total, 1);
    assert_eq!(diff.summary.removed_total, 2);
    assert_eq!(diff.sheets["CS_GENDER"].removed_count, 2);
    assert!(!diff.sheets.contains_key("CS_RACE"));
}

#[test]
fn workbook_diff_json_shape() {
    let sheet = SheetDiff {
        columns: vec!["CODE".to_string(), "DISPLAY".to_string()],
        key_column: Some("CODE".to_string()),
        added: vec![diff_row("B", 3, &[("CODE", "B"), ("DISPLAY", "Beta")])],
        ..SheetDiff::default()
    };
    let diff = WorkbookDiff::from_sheets(vec![("Sheet1".to_string(), sheet)]);
    insta::assert_json_snapshot!(diff, @r#"
    {
      "sheets": {
        "Sheet1": {
          "columns": [
            "CODE",
            "DISPLAY"
          ],
          "key_column": "CODE",
          "added": [
            {
              "key": "B",
              "display_key": "B",
              "row_number": 3,
              "values": {
                "CODE": "B",
                "DISPLAY": "Beta"
              }
            }
          ],
          "removed": [],
          "changed": [],
          "added_count": 1,
          "removed_count": 0,
          "changed_count": 0
        }
      },
      "summary": {
        "added_total": 1,
        "removed_total": 0,
        "changed_total": 0,
        "sheet_count": 1
      },
      "has_changes": true
    }
    "#);
}

#[test]
fn empty_diff_has_no_changes() {
    let diff = WorkbookDiff::from_sheets(Vec::new());
    assert!(!diff.has_changes);
    assert_eq!(diff.summary.sheet_count, 0);
    let json = serde_json::to_value(&diff).expect("serialize diff");
    assert_eq!(json["has_changes"], serde_json::Value::Bool(false));
}
