//! Schema capability and the adapter that derives field-level checks from it

use super::value::{FieldValue, FormValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to message, at most one message per field
pub type FieldErrors = BTreeMap<String, String>;

/// One segment of an issue path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => write!(f, "{k}"),
        }
    }
}

/// A single validation failure reported by a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl ValidationIssue {
    /// Issue targeting a top-level field
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![PathSegment::Key(field.into())],
            message: message.into(),
        }
    }

    /// Issue that belongs to the whole value rather than a field
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn at(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// The top-level field this issue targets, if any
    pub fn field(&self) -> Option<&str> {
        match self.path.first() {
            Some(PathSegment::Key(k)) => Some(k),
            _ => None,
        }
    }

    /// Dotted form of the full path, e.g. `contacts.0.email`
    pub fn path_key(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Validates a single field value in isolation
pub trait FieldSchema {
    fn safe_parse(&self, value: &FieldValue) -> Result<(), Vec<ValidationIssue>>;
}

/// Schemas over records that can hand out a sub-schema per top-level field
pub trait ObjectSchema {
    fn field_schema(&self, name: &str) -> Option<&dyn FieldSchema>;
}

/// Whole-object validation capability.
///
/// On success the schema yields its parsed output, which may differ from the
/// raw values (trimmed text, normalized phone numbers and so on).
pub trait Schema<V> {
    type Output;

    fn safe_parse(&self, candidate: &V) -> Result<Self::Output, Vec<ValidationIssue>>;

    /// Per-field access, when the schema is object-shaped
    fn as_object(&self) -> Option<&dyn ObjectSchema> {
        None
    }
}

/// First message per top-level field wins.
///
/// Nested issues (`roles.0`) are filed under their field (`roles`); issues
/// with no field name at the head of their path are skipped.
pub fn collect_errors(issues: &[ValidationIssue]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for issue in issues {
        let Some(field) = issue.field() else {
            continue;
        };
        errors
            .entry(field.to_string())
            .or_insert_with(|| issue.message.clone());
    }
    errors
}

/// Wraps a schema and exposes whole-form and single-field checks
#[derive(Debug, Clone)]
pub struct SchemaAdapter<S> {
    schema: S,
}

impl<S> SchemaAdapter<S> {
    pub fn new(schema: S) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn validate_whole<V>(&self, values: &V) -> Result<S::Output, Vec<ValidationIssue>>
    where
        S: Schema<V>,
    {
        self.schema.safe_parse(values)
    }

    /// Message for `name` if `value` fails validation.
    ///
    /// Uses the field's own sub-schema when the schema provides one. Otherwise
    /// the whole schema runs against `values` with `name` overridden, and the
    /// first issue targeting `name` is reported.
    pub fn validate_field<V>(&self, values: &V, name: &str, value: &FieldValue) -> Option<String>
    where
        V: FormValues,
        S: Schema<V>,
    {
        if let Some(field_schema) = self.schema.as_object().and_then(|o| o.field_schema(name)) {
            tracing::trace!(field = name, "validating against field schema");
            return field_schema
                .safe_parse(value)
                .err()
                .and_then(|issues| issues.into_iter().next())
                .map(|issue| issue.message);
        }

        tracing::trace!(field = name, "validating field through whole schema");
        let mut candidate = values.clone();
        if let Err(err) = candidate.set_field(name, value.clone()) {
            tracing::debug!(field = name, error = %err, "field skipped by validation");
            return None;
        }

        match self.schema.safe_parse(&candidate) {
            Ok(_) => None,
            Err(issues) => issues
                .into_iter()
                .find(|issue| issue.field() == Some(name))
                .map(|issue| issue.message),
        }
    }
}
