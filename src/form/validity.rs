//! Derived validity

use super::engine::FormEngine;
use super::schema::Schema;
use super::state::FormState;
use super::value::FormValues;

impl<S> FormEngine<S> {
    /// Whether the current values satisfy the schema.
    ///
    /// Recomputed on every call, never cached.
    pub fn is_valid<V>(&self, state: &FormState<V>) -> bool
    where
        V: FormValues,
        S: Schema<V>,
    {
        self.adapter.validate_whole(state.values()).is_ok()
    }
}
