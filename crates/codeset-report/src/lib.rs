//! Transformer XML generation for codeset workbooks.
//!
//! The transformer document lists, per codeset sheet, every local code with
//! its resolved standard code and display, preceded by an optional static
//! registry of HL7 fields bound to those codesets:
//!
//! - **Fields**: fixed reference data, see [`FIELD_REGISTRY`]
//! - **Codesets**: one `<Codeset>` per sheet with local or standard columns
//!
//! Export refuses workbooks in which one local code resolves to conflicting
//! entries; [`duplicate_codes`] reports those ahead of time.

mod aligned;
mod duplicates;
mod entries;
mod error;
mod fields;
mod transformer;

pub use aligned::{AlignedGroup, attribute, escape_attribute};
pub use duplicates::duplicate_codes;
pub use entries::{CodeEntry, CodesetBlock, codeset_block, emits_codeset};
pub use error::{DuplicateCode, Result, TransformerError};
pub use fields::{FIELD_REGISTRY, FieldBinding, OutputType};
pub use transformer::{TransformerOptions, build_transformer_xml, codeset_blocks};
