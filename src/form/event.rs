//! UI events delivered to the form and coercion of raw input

use super::value::{FieldKind, FieldValue};
use crate::error::{FormError, Result};
use serde::Deserialize;

/// Raw payload of an input control
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawInput {
    /// Text typed into an input, textarea or select
    Text(String),
    /// Checkbox state
    Checked(bool),
    /// Options picked in a multi-select
    Selected(Vec<String>),
}

/// An edit to one field
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChangeEvent {
    pub name: String,
    pub input: RawInput,
}

impl ChangeEvent {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            input: RawInput::Text(value.to_string()),
        }
    }

    pub fn checked(name: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            input: RawInput::Checked(checked),
        }
    }

    pub fn selected(name: &str, selected: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            input: RawInput::Selected(selected.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Convert the raw input to a value of the field's declared kind.
    ///
    /// Empty number input becomes [`FieldValue::Empty`].
    pub fn coerce(&self, kind: FieldKind) -> Result<FieldValue> {
        match (kind, &self.input) {
            (FieldKind::Text, RawInput::Text(s)) => Ok(FieldValue::Text(s.clone())),
            (FieldKind::Number, RawInput::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Empty);
                }
                trimmed
                    .parse::<f64>()
                    .map(FieldValue::Number)
                    .map_err(|_| FormError::InvalidNumber {
                        field: self.name.clone(),
                        input: s.clone(),
                    })
            }
            (FieldKind::Checkbox, RawInput::Checked(checked)) => Ok(FieldValue::Bool(*checked)),
            (FieldKind::Multi, RawInput::Selected(items)) => Ok(FieldValue::List(items.clone())),
            (kind, input) => Err(FormError::KindMismatch {
                field: self.name.clone(),
                expected: kind.name(),
                found: match input {
                    RawInput::Text(_) => "text",
                    RawInput::Checked(_) => "boolean",
                    RawInput::Selected(_) => "list",
                },
            }),
        }
    }
}

/// A field losing focus
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlurEvent {
    pub name: String,
}

impl BlurEvent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A submit request from the UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the UI's default navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
