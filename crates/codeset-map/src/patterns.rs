//! Header vocabulary used to recognize column roles.
//!
//! Every synonym is compared against [`normalize_header`] output, so entries
//! are upper-case with underscores.

use codeset_model::{MappedKind, normalize_header};

pub const MAPPED_DESCRIPTION_HEADERS: &[&str] =
    &["MAPPED_STANDARD_DESCRIPTION", "MAPPED_STD_DESCRIPTION"];
pub const MAPPED_CODE_HEADERS: &[&str] = &["MAPPED_STANDARD_CODE", "MAPPED_STD_CODE"];
/// Includes the `STADARD` misspelling found in older templates.
pub const STANDARD_DESCRIPTION_HEADERS: &[&str] = &[
    "STANDARD_DESCRIPTION",
    "STD_DESCRIPTION",
    "STANDARD_DESC",
    "STADARD_DESCRIPTION",
    "STADARD_DESC",
];
pub const STANDARD_CODE_HEADERS: &[&str] = &["STANDARD_CODE", "STD_CODE"];
pub const CODE_HEADERS: &[&str] = &["CODE"];
pub const DISPLAY_HEADERS: &[&str] = &["DISPLAY_VALUE", "DISPLAY"];
pub const SUB_DEFINITION_HEADERS: &[&str] = &[
    "SUB_DEFINITION",
    "SUB_DEFINITION_DESCRIPTION",
    "SUBDEFINITION",
];
pub const DEFINITION_HEADERS: &[&str] = &["DEFINITION"];
pub const OID_HEADERS: &[&str] = &["OID"];
pub const URL_HEADERS: &[&str] = &["URL"];

/// Role a single header can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    Code,
    Display,
    Mapped(MappedKind),
    SubDefinition,
    StandardCode,
    StandardDescription,
    Definition,
    Oid,
    Url,
}

const HEADER_ROLES: &[(&[&str], HeaderRole)] = &[
    (
        MAPPED_DESCRIPTION_HEADERS,
        HeaderRole::Mapped(MappedKind::Description),
    ),
    (MAPPED_CODE_HEADERS, HeaderRole::Mapped(MappedKind::Code)),
    (STANDARD_DESCRIPTION_HEADERS, HeaderRole::StandardDescription),
    (STANDARD_CODE_HEADERS, HeaderRole::StandardCode),
    (CODE_HEADERS, HeaderRole::Code),
    (DISPLAY_HEADERS, HeaderRole::Display),
    (SUB_DEFINITION_HEADERS, HeaderRole::SubDefinition),
    (DEFINITION_HEADERS, HeaderRole::Definition),
    (OID_HEADERS, HeaderRole::Oid),
    (URL_HEADERS, HeaderRole::Url),
];

/// Role claimed by a raw header, if it is part of the vocabulary.
pub fn header_role(raw: &str) -> Option<HeaderRole> {
    let normalized = normalize_header(raw);
    HEADER_ROLES
        .iter()
        .find(|(synonyms, _)| synonyms.contains(&normalized.as_str()))
        .map(|(_, role)| *role)
}
