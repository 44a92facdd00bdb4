//! Utility functions for mapping operations.

/// Compares two cell values trimmed and case-insensitively.
///
/// Blank values never match anything, including another blank.
pub fn same_text(left: &str, right: &str) -> bool {
    let left = left.trim();
    let right = right.trim();
    !left.is_empty() && left.to_uppercase() == right.to_uppercase()
}

/// Title-cases a sheet key into a codeset name: `CS_DIAGNOSTIC_SERVICE` -> `Diagnostic Service`.
pub fn codeset_display_name(sheet: &str) -> String {
    let trimmed = sheet.trim();
    let stripped = trimmed.strip_prefix("CS_").unwrap_or(trimmed);
    stripped
        .replace('_', " ")
        .split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_ignores_case_and_padding() {
        assert!(same_text(" Female", "FEMALE "));
        assert!(!same_text("", ""));
        assert!(!same_text("Male", "Female"));
    }

    #[test]
    fn codeset_names_are_title_cased() {
        assert_eq!(
            codeset_display_name("CS_DIAGNOSTIC_SERVICE_SECTION"),
            "Diagnostic Service Section"
        );
        assert_eq!(codeset_display_name("gender"), "Gender");
    }
}
