//! Declarative validation for request payloads.
//!
//! Each resource describes its fields as a static rule table. A single generic
//! validator checks a JSON body against the table and returns the cast body.

pub mod rules;
pub mod schema;
pub mod schemas;

pub use schema::{FieldKind, FieldRule, Schema};
pub use validator::{ValidationError, ValidationErrors};
