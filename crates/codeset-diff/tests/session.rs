//! Staged-import lifecycle tests.

use std::sync::Arc;

use codeset_diff::{SessionError, WorkbookSession, fingerprint};
use codeset_model::{LogicalTable, Workbook};

fn workbook(rows: &[(&str, &str)]) -> Workbook {
    workbook_with_headers(["CODE", "DISPLAY"], rows)
}

fn workbook_with_headers(headers: [&str; 2], rows: &[(&str, &str)]) -> Workbook {
    let table = LogicalTable::from_rows(
        headers.iter().map(|header| (*header).to_string()).collect(),
        rows.iter()
            .map(|(code, display)| vec![(*code).to_string(), (*display).to_string()])
            .collect(),
    )
    .expect("valid table");
    let mut workbook = Workbook::new();
    workbook.insert_sheet("CS_GENDER", table);
    workbook
}

#[test]
fn apply_swaps_the_whole_snapshot() {
    let mut session = WorkbookSession::new();
    let original = session.load(workbook(&[("F", "Female")]));

    let staged = session.stage_import(workbook(&[("F", "Female"), ("M", "Male")]));
    assert_eq!(staged.diff().summary.added_total, 1);
    assert_eq!(staged.base_fingerprint(), Some(original.fingerprint()));

    let applied = session.apply_import().expect("import staged");
    let active = session.active().expect("active snapshot");
    assert!(Arc::ptr_eq(&applied, &active));
    assert!(session.staged().is_none());

    // Readers of the previous snapshot keep a consistent view.
    assert_eq!(original.workbook().sheet("CS_GENDER").unwrap().height(), 1);
    assert_eq!(active.workbook().sheet("CS_GENDER").unwrap().height(), 2);
}

#[test]
fn cancel_keeps_the_active_snapshot() {
    let mut session = WorkbookSession::new();
    let original = session.load(workbook(&[("F", "Female")]));
    session.stage_import(workbook(&[("M", "Male")]));

    assert!(session.cancel_import());
    assert!(!session.cancel_import());
    assert!(Arc::ptr_eq(&original, &session.active().unwrap()));
    assert!(matches!(
        session.apply_import(),
        Err(SessionError::NothingStaged)
    ));
}

#[test]
fn staging_without_active_snapshot_adds_everything() {
    let mut session = WorkbookSession::new();
    let staged = session.stage_import(workbook(&[("F", "Female"), ("M", "Male")]));
    assert_eq!(staged.diff().summary.added_total, 2);
    assert_eq!(staged.base_fingerprint(), None);
}

#[test]
fn loading_discards_staged_import() {
    let mut session = WorkbookSession::new();
    session.load(workbook(&[("F", "Female")]));
    session.stage_import(workbook(&[("M", "Male")]));
    session.load(workbook(&[("U", "Unknown")]));
    assert!(session.staged().is_none());
}

#[test]
fn fingerprint_tracks_content() {
    let a = workbook(&[("F", "Female")]);
    let b = workbook(&[("F", "Woman")]);
    assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
    assert_ne!(fingerprint(&a), fingerprint(&b));
    assert_eq!(fingerprint(&a).len(), 64);
}

#[test]
fn import_with_respelled_headers_matches_rows() {
    let rows = [("F", "Female"), ("M", "Male")];
    let mut session = WorkbookSession::new();
    session.load(workbook(&rows));

    let staged = session.stage_import(workbook_with_headers(["Code", "Display"], &rows));
    assert!(!staged.diff().has_changes);
    assert_eq!(staged.diff().summary.added_total, 0);
    assert_eq!(staged.diff().summary.removed_total, 0);

    let staged = session.stage_import(workbook_with_headers(
        ["Code", "Display Value"],
        &[("F", "Female"), ("M", "Man")],
    ));
    let sheet = &staged.diff().sheets["CS_GENDER"];
    assert_eq!(sheet.changed_count, 1);
    assert_eq!(sheet.changed[0].key, "M");
    assert_eq!(sheet.changed[0].changed_columns, vec!["Display Value"]);
}
