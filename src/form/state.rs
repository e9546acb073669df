//! Field State Store: values, per-field errors, touched set and submission status

use super::schema::FieldErrors;
use super::value::FormValues;
use serde::Serialize;
use std::collections::BTreeSet;

/// Submission lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// State of one form instance.
///
/// Fields are read through accessors; all mutation goes through
/// [`FormEngine`](super::engine::FormEngine) transitions or [`FormState::reset`].
#[derive(Debug, Clone, Serialize)]
pub struct FormState<V> {
    pub(crate) values: V,
    #[serde(skip)]
    pub(crate) initial_values: V,
    pub(crate) errors: FieldErrors,
    pub(crate) touched: BTreeSet<String>,
    pub(crate) status: SubmissionStatus,
    pub(crate) submit_error: Option<String>,
}

impl<V: FormValues> FormState<V> {
    pub fn new(initial_values: V) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            status: SubmissionStatus::Idle,
            submit_error: None,
        }
    }

    pub fn values(&self) -> &V {
        &self.values
    }

    pub fn initial_values(&self) -> &V {
        &self.initial_values
    }

    /// All recorded errors, including those of fields not yet touched
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn submit_success(&self) -> bool {
        self.status == SubmissionStatus::Succeeded
    }

    /// Form-level banner message, if any
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Error for a field, only once it is touched
    pub fn get_field_error(&self, name: &str) -> Option<&str> {
        if !self.is_field_touched(name) {
            return None;
        }
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_field_error(&self, name: &str) -> bool {
        self.get_field_error(name).is_some()
    }

    pub fn is_field_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Back to the initial values with no errors, no touched fields and idle status
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.errors.clear();
        self.touched.clear();
        self.status = SubmissionStatus::Idle;
        self.submit_error = None;
    }

    pub fn clear_submit_error(&mut self) {
        self.submit_error = None;
    }

    /// Store the outcome of validating one field
    pub(crate) fn record_field_result(&mut self, name: &str, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    pub(crate) fn touch_all(&mut self) {
        let names: Vec<String> = self
            .values
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.touched.extend(names);
    }
}
