//! Transformer XML document generation.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use codeset_map::classify;
use codeset_model::{ColumnRoles, Workbook};

use crate::aligned::{AlignedGroup, attribute};
use crate::entries::{CodesetBlock, codeset_block, conflicting_codes};
use crate::error::{DuplicateCode, Result, TransformerError};
use crate::fields::FIELD_REGISTRY;

const FIELD_ATTRIBUTES: &[&str] = &["Name", "Codeset", "OutputType", "Enabled", "Description"];
const CODE_ATTRIBUTES: &[&str] = &["LocalCode", "LocalDisplay", "StandardCode", "StandardDisplay"];

/// Options for transformer output, loadable from the `[transformer]` table of
/// a TOML configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformerOptions {
    /// Render the static `<Fields>` registry.
    pub include_fields: bool,
    /// Codeset keys whose fields are free text (`Enabled="False"`).
    pub free_text: BTreeSet<String>,
}

impl Default for TransformerOptions {
    fn default() -> Self {
        Self {
            include_fields: true,
            free_text: BTreeSet::new(),
        }
    }
}

impl TransformerOptions {
    pub fn is_free_text(&self, codeset: &str) -> bool {
        self.free_text.contains(codeset)
    }
}

/// Resolves the `<Codeset>` blocks of a workbook in sheet order.
///
/// Sheets without roles in `roles_by_sheet` are classified on the fly.
/// Fails when any sheet carries a local code with conflicting entries.
pub fn codeset_blocks(
    workbook: &Workbook,
    roles_by_sheet: &BTreeMap<String, ColumnRoles>,
) -> Result<Vec<CodesetBlock>> {
    let mut blocks = Vec::new();
    let mut duplicates = Vec::new();
    for (sheet, table) in workbook.sheets() {
        let roles = roles_by_sheet
            .get(sheet)
            .map_or_else(|| Cow::Owned(classify(table)), Cow::Borrowed);
        let Some(block) = codeset_block(sheet, table, &roles) else {
            continue;
        };
        duplicates.extend(conflicting_codes(&block).into_iter().map(|(code, rows)| {
            DuplicateCode {
                sheet: sheet.to_string(),
                code: code.to_string(),
                rows,
            }
        }));
        blocks.push(block);
    }
    if !duplicates.is_empty() {
        for duplicate in &duplicates {
            warn!(sheet = %duplicate.sheet, rows = ?duplicate.rows, "duplicate local code");
        }
        return Err(TransformerError::DuplicateCodes(duplicates));
    }
    Ok(blocks)
}

/// Renders the transformer document for `workbook`.
///
/// The output has no XML declaration, CRLF line endings and two-space
/// indentation. Identical input always yields byte-identical output.
pub fn build_transformer_xml(
    workbook: &Workbook,
    roles_by_sheet: &BTreeMap<String, ColumnRoles>,
    options: &TransformerOptions,
) -> Result<String> {
    let span = info_span!("serialize", sheets = workbook.len());
    let _guard = span.enter();

    let blocks = codeset_blocks(workbook, roles_by_sheet)?;
    let xml = render_document(&blocks, options).map_err(|err| TransformerError::Write(err.to_string()))?;
    info!(
        codesets = blocks.len(),
        codes = blocks.iter().map(|block| block.codes.len()).sum::<usize>(),
        fields = options.include_fields,
        "rendered transformer"
    );
    Ok(xml)
}

fn render_document(
    blocks: &[CodesetBlock],
    options: &TransformerOptions,
) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Start(BytesStart::new("CodesetTransformer")))?;

    if options.include_fields {
        xml.write_event(Event::Start(BytesStart::new("Fields")))?;
        let mut fields = AlignedGroup::new(FIELD_ATTRIBUTES);
        for binding in FIELD_REGISTRY {
            let enabled = if options.is_free_text(binding.codeset) {
                "False"
            } else {
                "True"
            };
            fields.push(vec![
                Some(binding.field.to_string()),
                Some(binding.codeset.to_string()),
                Some(binding.output_type.as_str().to_string()),
                Some(enabled.to_string()),
                Some(binding.description.to_string()),
            ]);
        }
        for line in fields.render() {
            xml.write_event(Event::Empty(element("Field", &line)))?;
        }
        xml.write_event(Event::End(BytesEnd::new("Fields")))?;
    }

    xml.write_event(Event::Start(BytesStart::new("Codesets")))?;
    for block in blocks {
        let mut header = attribute("Name", &block.name);
        for (name, value) in [("Oid", &block.oid), ("Url", &block.url)] {
            if let Some(value) = value {
                header.push(' ');
                header.push_str(&attribute(name, value));
            }
        }
        if block.codes.is_empty() {
            xml.write_event(Event::Empty(element("Codeset", &header)))?;
            continue;
        }
        xml.write_event(Event::Start(element("Codeset", &header)))?;
        let mut codes = AlignedGroup::new(CODE_ATTRIBUTES);
        for entry in &block.codes {
            codes.push(vec![
                Some(entry.local_code.clone()),
                Some(entry.local_display.clone()),
                entry.standard_code.clone(),
                entry.standard_display.clone(),
            ]);
        }
        for line in codes.render() {
            xml.write_event(Event::Empty(element("Code", &line)))?;
        }
        xml.write_event(Event::End(BytesEnd::new("Codeset")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("Codesets")))?;
    xml.write_event(Event::End(BytesEnd::new("CodesetTransformer")))?;

    let text = String::from_utf8(xml.into_inner())?;
    Ok(text.replace('\n', "\r\n"))
}

/// Start tag content made of a name and pre-rendered attribute text.
fn element<'a>(name: &str, attributes: &str) -> BytesStart<'a> {
    let content = if attributes.is_empty() {
        name.to_string()
    } else {
        format!("{name} {attributes}")
    };
    BytesStart::from_content(content, name.len())
}
