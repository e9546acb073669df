//! Schema-driven form state engine
//!
//! [`FormState`] holds a form's values, errors, touched fields and submission
//! status. [`FormEngine`] applies UI events to it as plain transitions, using a
//! [`Schema`] for validation. [`FormHandle`] bundles both for a single form.

mod controller;
mod engine;
mod event;
mod handle;
mod schema;
mod state;
mod submit;
mod validity;
mod value;

pub use engine::FormEngine;
pub use event::{BlurEvent, ChangeEvent, RawInput, SubmitEvent};
pub use handle::FormHandle;
pub use schema::{
    collect_errors, FieldErrors, FieldSchema, ObjectSchema, PathSegment, Schema, SchemaAdapter,
    ValidationIssue,
};
pub use state::{FormState, SubmissionStatus};
pub use submit::{handler_fn, HandlerFn, SubmitHandler, SubmitStep};
pub use value::{FieldKind, FieldValue, FormValues, Record, RecordField};
