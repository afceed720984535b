//! Terminal description of an admin create/edit form.

use crate::domain::schema::{EditBuffer, FieldKind, FieldSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLine {
    pub name: String,
    pub label: String,
    pub kind: &'static str,
    pub required: bool,
    pub value: String,
    pub options: Vec<String>,
}

/// One line per schema field, in schema order, carrying the buffer's value.
pub fn describe(schema: &FieldSchema, buffer: &EditBuffer) -> Vec<FormLine> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let value = buffer
                .get(&field.name)
                .map(ToString::to_string)
                .unwrap_or_default();
            let options = match &field.kind {
                FieldKind::Select(options) => options
                    .iter()
                    .map(|option| format!("{} ({})", option.value, option.label))
                    .collect(),
                _ => Vec::new(),
            };
            FormLine {
                name: field.name.clone(),
                label: field.label.clone(),
                kind: field.kind.as_str(),
                required: field.required,
                value,
                options,
            }
        })
        .collect()
}

pub fn render(title: &str, lines: &[FormLine]) -> String {
    let mut out = format!("{title}\n");
    for line in lines {
        let marker = if line.required { " *" } else { "" };
        out.push_str(&format!(
            "  {}{marker} [{}] {}: {}\n",
            line.label, line.kind, line.name, line.value
        ));
        if !line.options.is_empty() {
            out.push_str(&format!("      options: {}\n", line.options.join(", ")));
        }
    }
    out
}
