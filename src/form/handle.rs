//! The consumer-facing form handle

use super::engine::FormEngine;
use super::event::{BlurEvent, ChangeEvent, SubmitEvent};
use super::schema::{FieldErrors, Schema};
use super::state::{FormState, SubmissionStatus};
use super::submit::SubmitHandler;
use super::value::{FieldValue, FormValues};
use crate::config::FormConfig;
use crate::error::Result;
use std::collections::BTreeSet;
use tracing::Instrument;
use uuid::Uuid;

/// One form instance: its engine, its state, and an id for log correlation
#[derive(Debug)]
pub struct FormHandle<V, S> {
    id: Uuid,
    engine: FormEngine<S>,
    state: FormState<V>,
}

impl<V, S> FormHandle<V, S>
where
    V: FormValues,
    S: Schema<V>,
{
    pub fn new(schema: S, initial_values: V) -> Self {
        Self::with_config(schema, initial_values, FormConfig::default())
    }

    pub fn with_config(schema: S, initial_values: V, config: FormConfig) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(form = %id, "form created");
        Self {
            id,
            engine: FormEngine::with_config(schema, config),
            state: FormState::new(initial_values),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &FormState<V> {
        &self.state
    }

    pub fn values(&self) -> &V {
        self.state.values()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        self.state.touched()
    }

    pub fn status(&self) -> &SubmissionStatus {
        self.state.status()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn is_valid(&self) -> bool {
        self.engine.is_valid(&self.state)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.state.submit_error()
    }

    pub fn submit_success(&self) -> bool {
        self.state.submit_success()
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let _span = tracing::debug_span!("form", id = %self.id).entered();
        self.engine.set_value(&mut self.state, name, value.into())
    }

    pub fn set_values<I>(&mut self, partial: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let _span = tracing::debug_span!("form", id = %self.id).entered();
        self.engine.set_values(&mut self.state, partial)
    }

    pub fn set_touched(&mut self, name: &str) -> Result<()> {
        let _span = tracing::debug_span!("form", id = %self.id).entered();
        self.engine.set_touched(&mut self.state, name)
    }

    pub fn handle_change(&mut self, event: &ChangeEvent) -> Result<()> {
        let _span = tracing::debug_span!("form", id = %self.id).entered();
        self.engine.handle_change(&mut self.state, event)
    }

    pub fn handle_blur(&mut self, event: &BlurEvent) -> Result<()> {
        let _span = tracing::debug_span!("form", id = %self.id).entered();
        self.engine.handle_blur(&mut self.state, event)
    }

    pub async fn handle_submit<H>(&mut self, event: &mut SubmitEvent, handler: &H)
    where
        S::Output: Send + 'static,
        H: SubmitHandler<S::Output> + ?Sized,
    {
        let span = tracing::info_span!("form", id = %self.id);
        self.engine
            .handle_submit(&mut self.state, event, handler)
            .instrument(span)
            .await
    }

    pub fn get_field_error(&self, name: &str) -> Option<&str> {
        self.state.get_field_error(name)
    }

    pub fn has_field_error(&self, name: &str) -> bool {
        self.state.has_field_error(name)
    }

    pub fn is_field_touched(&self, name: &str) -> bool {
        self.state.is_field_touched(name)
    }

    pub fn reset(&mut self) {
        tracing::debug!(form = %self.id, "form reset");
        self.state.reset();
    }

    pub fn clear_submit_error(&mut self) {
        self.state.clear_submit_error();
    }
}
