//! Integration tests for mapping resolution.

use indexmap::IndexMap;

use codeset_map::{classify, classify_workbook, resolve_mapping, resolve_workbook};
use codeset_model::{LogicalTable, LookupTables, Workbook};

fn table(columns: &[&str], rows: &[&[&str]]) -> LogicalTable {
    LogicalTable::from_rows(
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect(),
    )
    .expect("valid table")
}

#[test]
fn mapped_to_sub_definition_and_backfill() {
    let mut sheet = table(
        &["CODE", "DISPLAY", "MAPPED_STD_DESCRIPTION", "SUB_DEFINITION"],
        &[
            &["CARD", "Cardiology", "Cardiology Clinic", "CARD^Cardiology Clinic"],
            &["CAR2", "Cardio", "Cardiology Clinic", ""],
            &["ALG", "Allergy", "", "CARD^Cardiology Clinic"],
        ],
    );
    let roles = classify(&sheet);
    let resolved = resolve_mapping(&mut sheet, &roles, None);

    assert_eq!(
        resolved.mapping.get("Cardiology Clinic"),
        Some("CARD^Cardiology Clinic")
    );
    assert_eq!(resolved.filled, 2);
    assert_eq!(sheet.value(1, "SUB_DEFINITION"), "CARD^Cardiology Clinic");
    assert_eq!(sheet.value(2, "MAPPED_STD_DESCRIPTION"), "Cardiology Clinic");
}

#[test]
fn non_blank_cells_are_preserved() {
    let mut sheet = table(
        &["CODE", "MAPPED_STD_DESCRIPTION", "SUB_DEFINITION"],
        &[
            &["A", "Alpha", "A1^Alpha"],
            &["B", "Alpha", "B1^Other"],
        ],
    );
    let roles = classify(&sheet);
    resolve_mapping(&mut sheet, &roles, None);
    assert_eq!(sheet.value(1, "SUB_DEFINITION"), "B1^Other");
}

#[test]
fn sheet_values_override_lookup_base() {
    let mut sheet = table(
        &["CODE", "MAPPED_STD_DESCRIPTION", "SUB_DEFINITION"],
        &[&["A", "Alpha", "SHEET^Alpha"], &["B", "Beta", ""]],
    );
    let roles = classify(&sheet);
    let mut lookup = IndexMap::new();
    lookup.insert("Alpha".to_string(), "LOOKUP^Alpha".to_string());
    lookup.insert("Beta".to_string(), "B^Beta".to_string());

    let resolved = resolve_mapping(&mut sheet, &roles, Some(&lookup));

    assert_eq!(resolved.mapping.get("Alpha"), Some("SHEET^Alpha"));
    assert_eq!(resolved.mapping.get("Beta"), Some("B^Beta"));
    assert_eq!(sheet.value(1, "SUB_DEFINITION"), "B^Beta");
}

#[test]
fn standard_pairs_take_precedence_over_sub_definition_pairs() {
    let mut sheet = table(
        &[
            "CODE",
            "STANDARD_CODE",
            "STANDARD_DESCRIPTION",
            "MAPPED_STD_DESCRIPTION",
            "SUB_DEFINITION",
        ],
        &[&["F", "F", "Female", "Female", "X^Wrong"]],
    );
    let roles = classify(&sheet);
    let resolved = resolve_mapping(&mut sheet, &roles, None);
    assert_eq!(resolved.mapping.get("Female"), Some("F^Female"));
    assert_eq!(resolved.mapping.len(), 1);
}

#[test]
fn orphan_standard_rows_are_cleared() {
    let mut sheet = table(
        &[
            "CODE",
            "DISPLAY VALUE",
            "STANDARD_CODE",
            "STANDARD_DESCRIPTION",
            "MAPPED_STD_DESCRIPTION",
        ],
        &[
            &["A", "Alpha", "1", "One", "One"],
            &["", "", "2", "Two", "Two"],
            &["", "", "", "", "Mapped Only"],
        ],
    );
    let roles = classify(&sheet);
    let resolved = resolve_mapping(&mut sheet, &roles, None);
    assert_eq!(resolved.cleared, 1);
    assert_eq!(sheet.value(0, "MAPPED_STD_DESCRIPTION"), "One");
    assert_eq!(sheet.value(1, "MAPPED_STD_DESCRIPTION"), "");
    assert_eq!(sheet.value(2, "MAPPED_STD_DESCRIPTION"), "Mapped Only");
}

#[test]
fn unmappable_sheet_resolves_to_nothing() {
    let mut sheet = table(&["NOTES"], &[&["anything"]]);
    let roles = classify(&sheet);
    let resolved = resolve_mapping(&mut sheet, &roles, None);
    assert!(resolved.mapping.is_empty());
    assert!(resolved.options.is_empty());
}

#[test]
fn workbook_resolution_uses_sub_definition_lookups() {
    let mut workbook = Workbook::new();
    workbook.insert_sheet(
        "CS_CLINIC",
        table(
            &["CODE", "DISPLAY", "MAPPED_STD_DESCRIPTION", "SUB_DEFINITION"],
            &[&["ALG", "Allergy", "Allergy Clinic", ""]],
        ),
    );
    workbook.insert_sheet("README", table(&["NOTES"], &[&["hello"]]));
    let roles = classify_workbook(&workbook);
    let mut lookups = LookupTables::new();
    let mut entries = IndexMap::new();
    entries.insert("Allergy Clinic".to_string(), "ALL^Allergy Clinic".to_string());
    lookups.insert("CS_CLINIC", "SUB_DEFINITION", entries);

    let resolved = resolve_workbook(&mut workbook, &roles, &lookups);

    assert!(!resolved.contains_key("README"));
    assert_eq!(
        resolved["CS_CLINIC"].mapping.get("Allergy Clinic"),
        Some("ALL^Allergy Clinic")
    );
    assert_eq!(
        workbook.sheet("CS_CLINIC").unwrap().value(0, "SUB_DEFINITION"),
        "ALL^Allergy Clinic"
    );
}
