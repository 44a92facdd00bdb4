//! Parsing of free-text mapped values (`CODE^DESC`, `CODE-DESC`, description only).

use serde::{Deserialize, Serialize};

/// A standard code/description pair parsed from one cell; either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedValue {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl CodedValue {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.description.is_none()
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses a mapped or definition cell.
///
/// `CODE^DESC` splits on the first caret. Otherwise the text splits on its
/// first hyphen only when the left part has no space and the right part has
/// one (`CARD-Cardiology Clinic`); `HIPAA OPT-OUT` and `Non-Hispanic` stay
/// whole. Anything else is a description. Never fails.
pub fn parse_coded_value(raw: &str) -> CodedValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CodedValue::default();
    }
    if let Some((code, description)) = trimmed.split_once('^') {
        return CodedValue {
            code: non_blank(code),
            description: non_blank(description),
        };
    }
    if let Some((left, right)) = trimmed.split_once('-') {
        let left = left.trim();
        let right = right.trim();
        if !left.is_empty() && !left.contains(' ') && right.contains(' ') {
            return CodedValue {
                code: Some(left.to_string()),
                description: Some(right.to_string()),
            };
        }
    }
    CodedValue {
        code: None,
        description: Some(trimmed.to_string()),
    }
}
