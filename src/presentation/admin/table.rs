//! Admin list table: the first schema columns plus an actions column.

use serde_json::Value;

use crate::domain::entities::Record;
use crate::domain::schema::{FieldKind, FieldSchema, FieldSpec};

/// List cells longer than this many characters are cut and suffixed with `...`.
pub const TRUNCATE_AT: usize = 50;
pub const EMPTY_MESSAGE: &str = "No items yet. Use `create` to add one.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ListTable {
    pub fn build(schema: &FieldSchema, items: &[Record]) -> Self {
        let columns = schema.columns();
        let mut headers: Vec<String> = columns.iter().map(|field| field.label.clone()).collect();
        headers.push("Actions".to_string());

        let rows = items
            .iter()
            .map(|item| {
                let mut row: Vec<String> = columns
                    .iter()
                    .map(|field| cell_text(field, item.attribute(&field.name)))
                    .collect();
                row.push(format!("update {0} | delete {0}", item.id));
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Display text of one list cell. Checkboxes read Yes/No.
pub fn cell_text(field: &FieldSpec, value: Option<&Value>) -> String {
    if field.kind == FieldKind::Checkbox {
        let checked = value.and_then(Value::as_bool).unwrap_or(false);
        return if checked { "Yes" } else { "No" }.to_string();
    }
    match value {
        None => String::new(),
        Some(Value::String(text)) => truncate(text, TRUNCATE_AT),
        Some(other) => other.to_string(),
    }
}

pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
