#![deny(unsafe_code)]

//! Column classification and mapping resolution for codeset sheets.
//!
//! [`classify`] infers which columns hold local codes, displays, standard
//! values and mapped overrides. [`resolve_mapping`] merges the candidate
//! sources of one sheet into a [`SheetMapping`](codeset_model::SheetMapping)
//! and backfills blank mapped cells. [`extract_lookup_tables`] turns simple
//! `VLOOKUP` formulas into lookup maps the resolver can layer under the
//! sheet's own values.

pub mod classify;
pub mod lookup;
pub mod patterns;
pub mod resolve;
pub mod utils;
pub mod value;

pub use classify::{classify, classify_workbook};
pub use lookup::{RangeRef, VlookupFormula, extract_lookup_tables, parse_vlookup, resolve_vlookup};
pub use resolve::{SheetResolution, resolve_mapping, resolve_workbook};
pub use utils::{codeset_display_name, same_text};
pub use value::{CodedValue, parse_coded_value};
