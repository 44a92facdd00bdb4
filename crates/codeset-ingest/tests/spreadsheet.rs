//! Spreadsheet loading against workbooks written with rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::{Workbook as XlsxWorkbook, XlsxError};
use tempfile::tempdir;

use codeset_ingest::read_workbook;
use codeset_map::extract_lookup_tables;

/// Both sheets leave column A empty, so their used ranges start at column B.
fn write_fixture(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = XlsxWorkbook::new();

    let clinics = workbook.add_worksheet();
    clinics.set_name("CS_CLINIC")?;
    for (column, header) in ["CODE", "DISPLAY", "MAPPED_STD_DESCRIPTION", "SUB_DEFINITION"]
        .iter()
        .enumerate()
    {
        clinics.write_string(0, column as u16 + 1, *header)?;
    }
    clinics.write_string(1, 1, "CARD")?;
    clinics.write_string(1, 2, "Cardiology")?;
    clinics.write_string(1, 3, "Cardiology Clinic")?;
    clinics.write_formula(1, 4, "=VLOOKUP(D2,'Std Clinics'!$B$2:$C$10,2,FALSE)")?;
    clinics.write_string(2, 1, "ALG")?;
    clinics.write_string(2, 2, "Allergy")?;
    clinics.write_string(2, 3, "Allergy Clinic")?;

    let standard = workbook.add_worksheet();
    standard.set_name("Std Clinics")?;
    standard.write_string(0, 1, "DESCRIPTION")?;
    standard.write_string(0, 2, "COMBINED")?;
    standard.write_string(1, 1, "Cardiology Clinic")?;
    standard.write_string(1, 2, "CARD^Cardiology Clinic")?;
    standard.write_string(2, 1, "Allergy Clinic")?;
    standard.write_string(2, 2, "ALL^Allergy Clinic")?;
    standard.write_number(3, 1, 42)?;
    standard.write_string(3, 2, "NUM^Numeric")?;

    workbook.save(path)
}

#[test]
fn reads_values_and_first_row_formulas() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("codesets.xlsx");
    write_fixture(&path).expect("write xlsx");

    let loaded = read_workbook(&path).expect("read xlsx");
    let names: Vec<&str> = loaded.workbook.sheet_names().collect();
    assert_eq!(names, vec!["CS_CLINIC", "Std Clinics"]);

    let clinics = loaded.workbook.sheet("CS_CLINIC").expect("clinic sheet");
    assert_eq!(clinics.height(), 2);
    assert_eq!(clinics.value(0, "CODE"), "CARD");
    assert_eq!(clinics.value(1, "MAPPED_STD_DESCRIPTION"), "Allergy Clinic");

    let standard = loaded.workbook.sheet("Std Clinics").expect("standard sheet");
    assert_eq!(standard.value(2, "DESCRIPTION"), "42");

    let formula = &loaded.formulas["CS_CLINIC"]["SUB_DEFINITION"];
    assert!(formula.contains("VLOOKUP(D2,"), "formula: {formula}");
    assert!(!loaded.formulas.contains_key("Std Clinics"));
}

#[test]
fn lookup_ranges_use_spreadsheet_columns() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("codesets.xlsx");
    write_fixture(&path).expect("write xlsx");

    let loaded = read_workbook(&path).expect("read xlsx");
    let standard = loaded.workbook.sheet("Std Clinics").expect("standard sheet");
    assert_eq!(standard.cell(0, 1), "Cardiology Clinic");
    assert_eq!(standard.cell(0, 2), "CARD^Cardiology Clinic");

    let lookups = extract_lookup_tables(&loaded.workbook, &loaded.formulas);
    let entries = lookups
        .get("CS_CLINIC", "SUB_DEFINITION")
        .expect("resolved lookup");
    assert_eq!(entries["Cardiology Clinic"], "CARD^Cardiology Clinic");
    assert_eq!(entries["Allergy Clinic"], "ALL^Allergy Clinic");
    assert_eq!(entries["42"], "NUM^Numeric");
}
