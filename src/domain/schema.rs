//! Declarative field schemas that drive admin forms and their validation.
//!
//! A [`FieldSchema`] lists the editable attributes of one entity type. The
//! generic CRUD controller seeds, validates and submits [`EditBuffer`]s from it
//! without any per-entity code.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::domain::entities::Record;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Select(Vec<SelectOption>),
    Checkbox,
}

impl FieldKind {
    /// Value a field of this kind holds when nothing else is known.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            FieldKind::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Select(_) => "select",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

/// One attribute value inside an edit buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The empty string is the only value that fails a required check.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }

    /// Converts a persisted attribute; `null` counts as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Bool(flag) => Value::Bool(*flag),
            FieldValue::Number(number) => Value::Number(number.clone()),
            FieldValue::Text(text) => Value::String(text.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(flag) => write!(f, "{flag}"),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { field: String, label: String },
    #[error("{label} must be a number, got `{input}`")]
    NotANumber { field: String, label: String, input: String },
    #[error("{label} must be yes or no, got `{input}`")]
    NotABoolean { field: String, label: String, input: String },
    #[error("{label} must be one of [{allowed}], got `{input}`")]
    UnknownOption {
        field: String,
        label: String,
        input: String,
        allowed: String,
    },
    #[error("unknown field `{field}`")]
    UnknownField { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::TextArea)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Number)
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Checkbox)
    }

    pub fn select(name: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(value, label)| SelectOption::new(*value, *label))
            .collect();
        Self::with_kind(name, label, FieldKind::Select(options))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Value used when a create form opens.
    pub fn initial_value(&self) -> FieldValue {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.empty_value())
    }

    /// Coerces raw operator input into a value of this field's kind.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        match &self.kind {
            FieldKind::Text | FieldKind::TextArea => Ok(FieldValue::text(raw)),
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::text(""));
                }
                if let Ok(int) = trimmed.parse::<i64>() {
                    return Ok(FieldValue::from(int));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(FieldValue::Number)
                    .ok_or_else(|| ValidationError::NotANumber {
                        field: self.name.clone(),
                        label: self.label.clone(),
                        input: raw.to_string(),
                    })
            }
            FieldKind::Checkbox => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Bool(true)),
                "false" | "no" | "n" | "0" | "off" | "" => Ok(FieldValue::Bool(false)),
                _ => Err(ValidationError::NotABoolean {
                    field: self.name.clone(),
                    label: self.label.clone(),
                    input: raw.to_string(),
                }),
            },
            FieldKind::Select(options) => {
                if raw.is_empty() || options.iter().any(|option| option.value == raw) {
                    Ok(FieldValue::text(raw))
                } else {
                    let allowed = options
                        .iter()
                        .map(|option| option.value.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(ValidationError::UnknownOption {
                        field: self.name.clone(),
                        label: self.label.clone(),
                        input: raw.to_string(),
                        allowed,
                    })
                }
            }
        }
    }
}

/// In-progress attribute values for a create or edit form, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    entries: Vec<(String, FieldValue)>,
}

impl EditBuffer {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object sent as the create/update body.
    pub fn to_payload(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for EditBuffer {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut buffer = EditBuffer::default();
        for (key, value) in iter {
            buffer.set(key, value);
        }
        buffer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(DomainError::schema("field name must not be empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::schema(format!(
                    "field `{}` is declared twice",
                    field.name
                )));
            }
            if let FieldKind::Select(options) = &field.kind
                && options.is_empty()
            {
                return Err(DomainError::schema(format!(
                    "select field `{}` has no options",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields shown as list columns.
    pub fn columns(&self) -> &[FieldSpec] {
        &self.fields[..self.fields.len().min(LIST_COLUMN_LIMIT)]
    }

    pub fn blank_buffer(&self) -> EditBuffer {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.initial_value()))
            .collect()
    }

    pub fn buffer_from_record(&self, record: &Record) -> EditBuffer {
        self.fields
            .iter()
            .map(|field| {
                let value = record
                    .attribute(&field.name)
                    .and_then(FieldValue::from_json)
                    .unwrap_or_else(|| field.kind.empty_value());
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Applies raw `name=value` input onto a buffer.
    pub fn apply_input(
        &self,
        buffer: &mut EditBuffer,
        name: &str,
        raw: &str,
    ) -> Result<(), ValidationError> {
        let field = self
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField {
                field: name.to_string(),
            })?;
        buffer.set(field.name.clone(), field.parse_input(raw)?);
        Ok(())
    }

    /// Required fields must be present and non-empty.
    pub fn validate(&self, buffer: &EditBuffer) -> Result<(), ValidationError> {
        for field in self.fields.iter().filter(|field| field.required) {
            match buffer.get(&field.name) {
                Some(value) if !value.is_blank() => {}
                _ => return Err(ValidationError::required(&field.name, &field.label)),
            }
        }
        Ok(())
    }
}

pub const LIST_COLUMN_LIMIT: usize = 3;
