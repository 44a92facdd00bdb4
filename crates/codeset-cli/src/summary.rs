use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use codeset_map::SheetResolution;
use codeset_model::{ColumnRoles, MappedKind, Workbook, WorkbookDiff};

pub fn print_roles(workbook: &Workbook, roles_by_sheet: &BTreeMap<String, ColumnRoles>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Code"),
        header_cell("Display"),
        header_cell("Mapped"),
        header_cell("Sub-definition"),
        header_cell("Standard code"),
        header_cell("Standard description"),
        header_cell("Definition"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (sheet, data) in workbook.sheets() {
        let Some(roles) = roles_by_sheet.get(sheet) else {
            continue;
        };
        let sheet_cell = if roles.is_unmappable() {
            dim_cell(sheet)
        } else {
            Cell::new(sheet).fg(Color::Blue).add_attribute(Attribute::Bold)
        };
        let mapped = roles.mapped.as_ref().map(|mapped| {
            let kind = match mapped.kind {
                MappedKind::Description => "description",
                MappedKind::Code => "code",
            };
            if mapped.promoted {
                format!("{} ({kind}, promoted)", mapped.column)
            } else {
                format!("{} ({kind})", mapped.column)
            }
        });
        table.add_row(vec![
            sheet_cell,
            Cell::new(data.height()),
            role_cell(roles.code.as_deref()),
            role_cell(roles.display.as_deref()),
            role_cell(mapped.as_deref()),
            role_cell(roles.sub_definition.as_deref()),
            role_cell(roles.standard_code.as_deref()),
            role_cell(roles.standard_description.as_deref()),
            role_cell(roles.definition.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_mapping(sheet: &str, resolution: &SheetResolution) {
    println!("Sheet: {sheet}");
    println!(
        "Entries: {}  Options: {}  Filled: {}  Cleared: {}",
        resolution.mapping.len(),
        resolution.options.len(),
        resolution.filled,
        resolution.cleared
    );
    if resolution.mapping.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Standard value")]);
    apply_table_style(&mut table);
    for (key, value) in resolution.mapping.iter() {
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(key), value_cell]);
    }
    println!("{table}");
}

pub fn print_diff(diff: &WorkbookDiff) {
    if !diff.has_changes {
        println!("No changes.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Key column"),
        header_cell("Added"),
        header_cell("Removed"),
        header_cell("Changed"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (sheet, sheet_diff) in &diff.sheets {
        if sheet_diff.is_empty() {
            continue;
        }
        let key_cell = match &sheet_diff.key_column {
            Some(column) => Cell::new(column),
            None => dim_cell("(row position)"),
        };
        table.add_row(vec![
            Cell::new(sheet).fg(Color::Blue).add_attribute(Attribute::Bold),
            key_cell,
            count_cell(sheet_diff.added_count, Color::Green),
            count_cell(sheet_diff.removed_count, Color::Red),
            count_cell(sheet_diff.changed_count, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(diff.summary.added_total, Color::Green).add_attribute(Attribute::Bold),
        count_cell(diff.summary.removed_total, Color::Red).add_attribute(Attribute::Bold),
        count_cell(diff.summary.changed_total, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    for (sheet, sheet_diff) in &diff.sheets {
        for changed in &sheet_diff.changed {
            println!(
                "{sheet} {} (row {}): {}",
                changed.display_key,
                changed.after.row_number,
                changed.changed_columns.join(", ")
            );
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn role_cell(column: Option<&str>) -> Cell {
    match column {
        Some(name) => Cell::new(name),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
