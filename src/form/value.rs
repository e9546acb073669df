//! Form field value objects

use crate::error::{FormError, Result};
use serde::{Deserialize, Serialize};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value, e.g. a cleared number input
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Get the text value (returns empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the checkbox value (returns false for non-boolean values)
    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Empty => "empty",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::Number)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Declared kind of a field, used to coerce raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Checkbox,
    Multi,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "boolean",
            FieldKind::Multi => "list",
        }
    }

    /// Whether a value may be stored in a field of this kind
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, FieldValue::Text(_) | FieldValue::Empty)
                | (FieldKind::Number, FieldValue::Number(_) | FieldValue::Empty)
                | (FieldKind::Checkbox, FieldValue::Bool(_))
                | (FieldKind::Multi, FieldValue::List(_))
        )
    }

    pub(crate) fn check(&self, field: &str, value: &FieldValue) -> Result<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(FormError::KindMismatch {
                field: field.to_string(),
                expected: self.name(),
                found: value.kind_name(),
            })
        }
    }
}

/// A fixed-shape record of named fields.
///
/// Field order is stable and names never change for the life of a value.
pub trait FormValues: Clone {
    /// Field names in declaration order
    fn field_names(&self) -> Vec<&str>;

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn field_kind(&self, name: &str) -> Option<FieldKind>;

    /// Replace a field value, rejecting unknown names and values of the wrong kind
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    fn has_field(&self, name: &str) -> bool {
        self.field_kind(name).is_some()
    }
}

/// A single field of a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordField {
    pub name: String,
    pub kind: FieldKind,
    pub value: FieldValue,
}

/// Ordered, dynamically declared form values.
///
/// Useful for forms whose shape is only known at runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<RecordField>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field with an initial value
    pub fn text(self, name: &str, value: &str) -> Self {
        self.with(name, FieldKind::Text, FieldValue::text(value))
    }

    /// Add a number field; `None` starts it empty
    pub fn number(self, name: &str, value: Option<f64>) -> Self {
        self.with(name, FieldKind::Number, value.into())
    }

    pub fn checkbox(self, name: &str, checked: bool) -> Self {
        self.with(name, FieldKind::Checkbox, FieldValue::Bool(checked))
    }

    pub fn multi(self, name: &str, selected: &[&str]) -> Self {
        let items = selected.iter().map(|s| s.to_string()).collect();
        self.with(name, FieldKind::Multi, FieldValue::List(items))
    }

    fn with(mut self, name: &str, kind: FieldKind, value: FieldValue) -> Self {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.kind = kind;
                field.value = value;
            }
            None => self.fields.push(RecordField {
                name: name.to_string(),
                kind,
                value,
            }),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FormValues for Record {
    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }

    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.kind.check(name, &value)?;
        field.value = value;
        Ok(())
    }
}
