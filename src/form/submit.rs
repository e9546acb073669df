//! Submission Controller
//!
//! A submit runs in three steps: [`FormEngine::begin_submit`] validates and
//! moves the form to `Submitting`, the caller's [`SubmitHandler`] runs, and
//! [`FormEngine::finish_submit`] records the outcome. [`FormEngine::handle_submit`]
//! composes the three for callers that can await in place.

use super::engine::FormEngine;
use super::event::SubmitEvent;
use super::schema::{collect_errors, Schema};
use super::state::{FormState, SubmissionStatus};
use super::value::FormValues;
use async_trait::async_trait;
use std::future::Future;

/// Receives validated form output
#[async_trait]
pub trait SubmitHandler<T: Send + 'static>: Send + Sync {
    async fn submit(&self, data: T) -> anyhow::Result<()>;
}

/// Adapts an async closure into a [`SubmitHandler`]
pub struct HandlerFn<F>(F);

pub fn handler_fn<F>(f: F) -> HandlerFn<F> {
    HandlerFn(f)
}

#[async_trait]
impl<T, F, Fut> SubmitHandler<T> for HandlerFn<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn submit(&self, data: T) -> anyhow::Result<()> {
        (self.0)(data).await
    }
}

/// Result of starting a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep<T> {
    /// A submission is already in flight; nothing changed
    Ignored,
    /// Validation failed; errors are recorded and the handler must not run
    Blocked,
    /// Validation passed; hand the parsed data to the handler
    Ready(T),
}

impl<S> FormEngine<S> {
    /// Validate the whole form and, if it passes, enter `Submitting`
    pub fn begin_submit<V>(&self, state: &mut FormState<V>, event: &mut SubmitEvent) -> SubmitStep<S::Output>
    where
        V: FormValues,
        S: Schema<V>,
    {
        event.prevent_default();

        if state.is_submitting() {
            tracing::warn!("submit ignored, a submission is already in flight");
            return SubmitStep::Ignored;
        }

        state.submit_error = None;
        state.status = SubmissionStatus::Idle;
        state.touch_all();

        match self.adapter.validate_whole(&state.values) {
            Ok(data) => {
                state.errors.clear();
                state.status = SubmissionStatus::Submitting;
                tracing::info!("submitting form");
                SubmitStep::Ready(data)
            }
            Err(issues) => {
                state.errors = collect_errors(&issues);
                // Errors for names the form does not declare stay hidden
                state.errors.retain(|name, _| state.touched.contains(name));
                if state.errors.is_empty() {
                    state.submit_error = Some(self.config.invalid_form_message.clone());
                }
                tracing::debug!(
                    issues = issues.len(),
                    fields = state.errors.len(),
                    "submit blocked by validation"
                );
                SubmitStep::Blocked
            }
        }
    }

    /// Record the handler's outcome and leave `Submitting`
    pub fn finish_submit<V>(&self, state: &mut FormState<V>, outcome: anyhow::Result<()>)
    where
        V: FormValues,
    {
        match outcome {
            Ok(()) => {
                state.status = SubmissionStatus::Succeeded;
                tracing::info!("form submitted");
            }
            Err(err) => {
                let mut reason = err.to_string();
                if reason.trim().is_empty() {
                    reason = self.config.fallback_submit_error.clone();
                }
                tracing::warn!(error = %reason, "form submission failed");
                state.submit_error = Some(reason.clone());
                state.status = SubmissionStatus::Failed(reason);
            }
        }
    }

    /// Validate, run the handler if valid, and record the outcome.
    ///
    /// Never returns an error: every failure ends up in `state`.
    pub async fn handle_submit<V, H>(&self, state: &mut FormState<V>, event: &mut SubmitEvent, handler: &H)
    where
        V: FormValues,
        S: Schema<V>,
        S::Output: Send + 'static,
        H: SubmitHandler<S::Output> + ?Sized,
    {
        if let SubmitStep::Ready(data) = self.begin_submit(state, event) {
            let outcome = handler.submit(data).await;
            self.finish_submit(state, outcome);
        }
    }
}
