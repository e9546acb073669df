//! formstate - schema-driven form state for interactive frontends
//!
//! Tracks field values, touched-gated validation errors and an async
//! submission lifecycle, all derived from one declarative schema.

pub mod config;
pub mod contact;
pub mod error;
pub mod form;

pub use config::{FormConfig, RevalidationPolicy};
pub use error::{FormError, Result};
pub use form::*;
