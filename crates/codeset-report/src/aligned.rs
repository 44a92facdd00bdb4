//! Column-aligned attribute lists.
//!
//! Every element of a group shares one attribute order. Each attribute
//! except the last one written on a line is padded to the widest
//! `Name="value"` of that attribute in the group plus two spaces, so the
//! attributes line up vertically.

use std::borrow::Cow;

use quick_xml::escape::escape;

/// Escapes an attribute value, including whitespace that would otherwise be
/// normalized away or break the line layout.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if escaped.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            escaped
                .replace('\r', "&#13;")
                .replace('\n', "&#10;")
                .replace('\t', "&#9;"),
        )
    } else {
        escaped
    }
}

/// A single `name="value"` attribute with the value escaped.
pub fn attribute(name: &str, value: &str) -> String {
    format!("{name}=\"{}\"", escape_attribute(value))
}

/// Attribute rows of one aligned group.
#[derive(Debug, Clone)]
pub struct AlignedGroup {
    names: Vec<&'static str>,
    rows: Vec<Vec<Option<String>>>,
}

impl AlignedGroup {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Adds a row; `values` follow the group's attribute order, `None` when absent.
    pub fn push(&mut self, values: Vec<Option<String>>) {
        debug_assert_eq!(values.len(), self.names.len());
        self.rows.push(values);
    }

    /// Widths per attribute; `None` for attributes absent from every row.
    fn widths(&self) -> Vec<Option<usize>> {
        (0..self.names.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .filter_map(|row| row[idx].as_deref())
                    .map(|value| attribute(self.names[idx], value).chars().count())
                    .max()
            })
            .collect()
    }

    /// Rendered attribute text of every row, without the element name.
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        self.rows
            .iter()
            .map(|row| {
                let Some(last) = row.iter().rposition(Option::is_some) else {
                    return String::new();
                };
                let mut line = String::new();
                for (idx, value) in row.iter().enumerate().take(last + 1) {
                    let Some(width) = widths[idx] else {
                        continue;
                    };
                    let text = value
                        .as_deref()
                        .map(|value| attribute(self.names[idx], value))
                        .unwrap_or_default();
                    if idx == last {
                        line.push_str(&text);
                    } else {
                        let padding = width + 2 - text.chars().count();
                        line.push_str(&text);
                        line.extend(std::iter::repeat_n(' ', padding));
                    }
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn pads_all_but_last_attribute() {
        let mut group = AlignedGroup::new(&["A", "B", "C"]);
        group.push(vec![some("1"), some("22"), some("x")]);
        group.push(vec![some("333"), some("4"), some("y")]);
        assert_eq!(
            group.render(),
            vec![
                "A=\"1\"    B=\"22\"  C=\"x\"".to_string(),
                "A=\"333\"  B=\"4\"   C=\"y\"".to_string(),
            ]
        );
    }

    #[test]
    fn absent_values_become_blanks_or_are_dropped() {
        let mut group = AlignedGroup::new(&["A", "B", "C"]);
        group.push(vec![some("1"), None, some("x")]);
        group.push(vec![some("2"), some("b"), None]);
        assert_eq!(
            group.render(),
            vec![
                format!("A=\"1\"  {}C=\"x\"", " ".repeat(7)),
                "A=\"2\"  B=\"b\"".to_string(),
            ]
        );
    }

    #[test]
    fn escapes_markup_and_line_breaks() {
        assert_eq!(escape_attribute("A & B"), "A &amp; B");
        assert_eq!(escape_attribute("x\ny"), "x&#10;y");
        assert_eq!(escape_attribute("\"q\""), "&quot;q&quot;");
    }
}
