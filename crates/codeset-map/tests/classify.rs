//! Integration tests for column classification.

use proptest::prelude::*;

use codeset_map::classify;
use codeset_model::{LogicalTable, MappedKind};

fn table(columns: &[&str]) -> LogicalTable {
    LogicalTable::new(columns.iter().map(|c| (*c).to_string()).collect())
}

#[test]
fn classifies_full_template() {
    let roles = classify(&table(&[
        "CODE",
        "DISPLAY VALUE",
        "STANDARD_CODE",
        "STADARD_DESCRIPTION",
        "MAPPED_STD_DESCRIPTION",
        "SUB DEFINITION",
        "DEFINITION",
        "OID",
        "URL",
    ]));
    assert_eq!(roles.code.as_deref(), Some("CODE"));
    assert_eq!(roles.display.as_deref(), Some("DISPLAY VALUE"));
    assert_eq!(roles.standard_code.as_deref(), Some("STANDARD_CODE"));
    assert_eq!(
        roles.standard_description.as_deref(),
        Some("STADARD_DESCRIPTION")
    );
    assert_eq!(roles.mapped_column(), Some("MAPPED_STD_DESCRIPTION"));
    assert_eq!(roles.mapped_kind(), MappedKind::Description);
    assert_eq!(roles.sub_definition.as_deref(), Some("SUB DEFINITION"));
    assert_eq!(roles.oid.as_deref(), Some("OID"));
    assert_eq!(roles.url.as_deref(), Some("URL"));
    assert_eq!(roles.hidden, vec!["DEFINITION".to_string()]);
}

#[test]
fn first_mapped_header_decides_kind() {
    let roles = classify(&table(&["MAPPED_STD_CODE", "MAPPED_STD_DESCRIPTION"]));
    assert_eq!(roles.mapped_column(), Some("MAPPED_STD_CODE"));
    assert_eq!(roles.mapped_kind(), MappedKind::Code);
}

#[test]
fn roles_point_into_table() {
    let sheet = table(&["Code", "Display", "Std Code", "Definition", "Notes"]);
    let roles = classify(&sheet);
    assert!(roles.points_into(&sheet));
    assert_eq!(roles.standard_code.as_deref(), Some("Std Code"));
}

const VOCABULARY: &[&str] = &[
    "CODE",
    "DISPLAY",
    "DISPLAY VALUE",
    "STANDARD_CODE",
    "STD DESCRIPTION",
    "STADARD_DESC",
    "MAPPED_STANDARD_CODE",
    "MAPPED_STD_DESCRIPTION",
    "SUBDEFINITION",
    "DEFINITION",
    "OID",
    "URL",
    "NOTES",
    "COMMENTS",
];

proptest! {
    #[test]
    fn classification_is_idempotent(picks in prop::collection::vec(0..VOCABULARY.len(), 0..10)) {
        let columns: Vec<&str> = picks.iter().map(|&idx| VOCABULARY[idx]).collect();
        let sheet = table(&columns);
        let first = classify(&sheet);
        let second = classify(&sheet);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.points_into(&sheet));
    }
}
