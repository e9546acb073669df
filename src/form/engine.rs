//! The engine pairing a schema with its configuration

use super::schema::SchemaAdapter;
use crate::config::FormConfig;

/// Drives [`FormState`](super::state::FormState) transitions for one schema.
///
/// The engine holds no form data itself; every transition takes the state it
/// operates on, so one engine can serve any number of independent forms.
#[derive(Debug, Clone)]
pub struct FormEngine<S> {
    pub(crate) adapter: SchemaAdapter<S>,
    pub(crate) config: FormConfig,
}

impl<S> FormEngine<S> {
    pub fn new(schema: S) -> Self {
        Self::with_config(schema, FormConfig::default())
    }

    pub fn with_config(schema: S, config: FormConfig) -> Self {
        Self {
            adapter: SchemaAdapter::new(schema),
            config,
        }
    }

    pub fn adapter(&self) -> &SchemaAdapter<S> {
        &self.adapter
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }
}
