//! Touch/Change Controller: value edits and blur handling

use super::engine::FormEngine;
use super::event::{BlurEvent, ChangeEvent};
use super::schema::Schema;
use super::state::FormState;
use super::value::{FieldValue, FormValues};
use crate::config::RevalidationPolicy;
use crate::error::{FormError, Result};

impl<S> FormEngine<S> {
    /// Set one field, re-validating it only if already touched
    pub fn set_value<V>(&self, state: &mut FormState<V>, name: &str, value: FieldValue) -> Result<()>
    where
        V: FormValues,
        S: Schema<V>,
    {
        state.values.set_field(name, value)?;
        self.revalidate_after_change(state, &[name]);
        Ok(())
    }

    /// Set several fields at once.
    ///
    /// Either every field is applied or, on the first rejected field, none is.
    pub fn set_values<V, I>(&self, state: &mut FormState<V>, partial: I) -> Result<()>
    where
        V: FormValues,
        S: Schema<V>,
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut next = state.values.clone();
        let mut changed = Vec::new();
        for (name, value) in partial {
            next.set_field(&name, value)?;
            changed.push(name);
        }
        state.values = next;

        let changed: Vec<&str> = changed.iter().map(String::as_str).collect();
        self.revalidate_after_change(state, &changed);
        Ok(())
    }

    /// Mark a field touched and validate it immediately
    pub fn set_touched<V>(&self, state: &mut FormState<V>, name: &str) -> Result<()>
    where
        V: FormValues,
        S: Schema<V>,
    {
        if !state.values.has_field(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        state.touched.insert(name.to_string());
        self.validate_touched_field(state, name);
        Ok(())
    }

    /// Apply an input edit, coercing it to the field's declared kind
    pub fn handle_change<V>(&self, state: &mut FormState<V>, event: &ChangeEvent) -> Result<()>
    where
        V: FormValues,
        S: Schema<V>,
    {
        let kind = state
            .values
            .field_kind(&event.name)
            .ok_or_else(|| FormError::UnknownField(event.name.clone()))?;
        let value = event.coerce(kind)?;
        self.set_value(state, &event.name, value)
    }

    pub fn handle_blur<V>(&self, state: &mut FormState<V>, event: &BlurEvent) -> Result<()>
    where
        V: FormValues,
        S: Schema<V>,
    {
        self.set_touched(state, &event.name)
    }

    fn revalidate_after_change<V>(&self, state: &mut FormState<V>, changed: &[&str])
    where
        V: FormValues,
        S: Schema<V>,
    {
        match self.config.revalidation {
            RevalidationPolicy::TouchedFieldOnly => {
                for name in changed {
                    if state.is_field_touched(name) {
                        self.validate_touched_field(state, name);
                    }
                }
            }
            RevalidationPolicy::AllTouched => {
                let touched: Vec<String> = state.touched.iter().cloned().collect();
                for name in &touched {
                    self.validate_touched_field(state, name);
                }
            }
        }
    }

    fn validate_touched_field<V>(&self, state: &mut FormState<V>, name: &str)
    where
        V: FormValues,
        S: Schema<V>,
    {
        let value = state.values.field(name).unwrap_or_default();
        let message = self.adapter.validate_field(&state.values, name, &value);
        tracing::debug!(field = name, error = ?message, "validated field");
        state.record_field_result(name, message);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{FormConfig, RevalidationPolicy};
    use crate::error::FormError;
    use crate::form::{
        BlurEvent, ChangeEvent, FieldValue, FormEngine, FormState, Record, Schema,
        ValidationIssue,
    };

    /// Name required, and `confirm` must match `password`
    struct SignupSchema;

    impl Schema<Record> for SignupSchema {
        type Output = ();

        fn safe_parse(&self, candidate: &Record) -> Result<(), Vec<ValidationIssue>> {
            let text = |name| candidate.get(name).map(FieldValue::as_text).unwrap_or("");
            let mut issues = Vec::new();
            if text("name").is_empty() {
                issues.push(ValidationIssue::new("name", "Name is required"));
            }
            if text("confirm") != text("password") {
                issues.push(ValidationIssue::new("confirm", "Passwords do not match"));
            }
            if candidate.get("amount") == Some(&FieldValue::Empty) {
                issues.push(ValidationIssue::new("amount", "Please enter a valid amount"));
            }
            if issues.is_empty() {
                Ok(())
            } else {
                Err(issues)
            }
        }
    }

    fn signup() -> Record {
        Record::new()
            .text("name", "")
            .text("password", "")
            .text("confirm", "")
            .number("amount", Some(10.0))
            .checkbox("newsletter", false)
    }

    fn engine() -> FormEngine<SignupSchema> {
        FormEngine::new(SignupSchema)
    }

    mod touched_gating {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_untouched_edit_records_no_error() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine
                .set_value(&mut state, "password", FieldValue::text("secret"))
                .unwrap();
            assert!(state.errors().is_empty());
            assert_eq!(state.get_field_error("confirm"), None);
        }

        #[test]
        fn test_blur_validates_even_first_time() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine
                .handle_blur(&mut state, &BlurEvent::new("name"))
                .unwrap();
            assert!(state.is_field_touched("name"));
            assert_eq!(state.get_field_error("name"), Some("Name is required"));
        }

        #[test]
        fn test_touched_edit_revalidates_and_clears() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine.set_touched(&mut state, "name").unwrap();
            engine
                .handle_change(&mut state, &ChangeEvent::text("name", "Ana"))
                .unwrap();
            assert_eq!(state.get_field_error("name"), None);
            assert!(state.errors().is_empty());

            engine
                .handle_change(&mut state, &ChangeEvent::text("name", ""))
                .unwrap();
            assert_eq!(state.get_field_error("name"), Some("Name is required"));
        }

        #[test]
        fn test_errors_only_for_touched_fields() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine.set_touched(&mut state, "confirm").unwrap();
            engine
                .set_value(&mut state, "password", FieldValue::text("x"))
                .unwrap();
            engine
                .set_value(&mut state, "name", FieldValue::text(""))
                .unwrap();
            for name in state.errors().keys() {
                assert!(state.is_field_touched(name));
            }
        }
    }

    mod change_events {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_number_input_is_coerced() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine
                .handle_change(&mut state, &ChangeEvent::text("amount", "42"))
                .unwrap();
            assert_eq!(state.values().get("amount"), Some(&FieldValue::Number(42.0)));
        }

        #[test]
        fn test_cleared_number_input_is_empty() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine.set_touched(&mut state, "amount").unwrap();
            engine
                .handle_change(&mut state, &ChangeEvent::text("amount", ""))
                .unwrap();
            assert_eq!(state.values().get("amount"), Some(&FieldValue::Empty));
            assert_eq!(
                state.get_field_error("amount"),
                Some("Please enter a valid amount")
            );
        }

        #[test]
        fn test_checkbox_input_is_coerced() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine
                .handle_change(&mut state, &ChangeEvent::checked("newsletter", true))
                .unwrap();
            assert_eq!(state.values().get("newsletter"), Some(&FieldValue::Bool(true)));
        }

        #[test]
        fn test_unknown_field_is_rejected() {
            let engine = engine();
            let mut state = FormState::new(signup());
            let err = engine
                .handle_change(&mut state, &ChangeEvent::text("zip", "1"))
                .unwrap_err();
            assert!(matches!(err, FormError::UnknownField(_)));
            assert_eq!(state.values(), &signup());
        }

        #[test]
        fn test_blur_on_unknown_field_is_rejected() {
            let engine = engine();
            let mut state = FormState::new(signup());
            let err = engine
                .handle_blur(&mut state, &BlurEvent::new("zip"))
                .unwrap_err();
            assert!(matches!(err, FormError::UnknownField(_)));
            assert!(state.touched().is_empty());
        }
    }

    mod set_values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_applies_all_and_revalidates_touched() {
            let engine = engine();
            let mut state = FormState::new(signup());
            engine.set_touched(&mut state, "name").unwrap();
            engine
                .set_values(
                    &mut state,
                    vec![
                        ("name".to_string(), FieldValue::text("Ana")),
                        ("password".to_string(), FieldValue::text("pw")),
                    ],
                )
                .unwrap();
            assert_eq!(state.values().get("name"), Some(&FieldValue::text("Ana")));
            assert_eq!(state.values().get("password"), Some(&FieldValue::text("pw")));
            assert!(state.errors().is_empty());
        }

        #[test]
        fn test_rejected_field_applies_nothing() {
            let engine = engine();
            let mut state = FormState::new(signup());
            let err = engine
                .set_values(
                    &mut state,
                    vec![
                        ("name".to_string(), FieldValue::text("Ana")),
                        ("zip".to_string(), FieldValue::text("1")),
                    ],
                )
                .unwrap_err();
            assert!(matches!(err, FormError::UnknownField(_)));
            assert_eq!(state.values(), &signup());
        }
    }

    mod revalidation_policy {
        use super::*;
        use pretty_assertions::assert_eq;

        fn mismatched(engine: &FormEngine<SignupSchema>) -> FormState<Record> {
            let mut state = FormState::new(signup());
            engine
                .set_value(&mut state, "password", FieldValue::text("a"))
                .unwrap();
            engine.set_touched(&mut state, "confirm").unwrap();
            assert_eq!(
                state.get_field_error("confirm"),
                Some("Passwords do not match")
            );
            state
        }

        #[test]
        fn test_touched_field_only_leaves_other_errors_stale() {
            let engine = engine();
            let mut state = mismatched(&engine);
            engine
                .set_value(&mut state, "password", FieldValue::text(""))
                .unwrap();
            assert_eq!(
                state.get_field_error("confirm"),
                Some("Passwords do not match")
            );
        }

        #[test]
        fn test_all_touched_refreshes_other_errors() {
            let engine = FormEngine::with_config(
                SignupSchema,
                FormConfig {
                    revalidation: RevalidationPolicy::AllTouched,
                    ..Default::default()
                },
            );
            let mut state = mismatched(&engine);
            engine
                .set_value(&mut state, "password", FieldValue::text(""))
                .unwrap();
            assert_eq!(state.get_field_error("confirm"), None);
            assert!(!state.is_field_touched("password"));
            assert!(!state.errors().contains_key("password"));
        }
    }
}
