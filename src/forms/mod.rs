//! Declarative form engine shared by the auth and contact-data screens.
//!
//! A [`FormSchema`] holds ordered [`FieldDescriptor`]s. Each edit goes through
//! [`FormSchema::update_field`], which revalidates the field with [`validate`]
//! and returns a new schema; [`render`] projects a schema into the fields the
//! drawing code consumes, and [`build_payload`] flattens it for submission.

mod controller;
mod render;
mod rules;
mod schema;
mod submit;

pub use controller::{FormController, FormInput};
pub use render::{render, FieldChange, RenderedField};
pub use rules::{validate, RuleSet};
pub use schema::{
    ElementConfig, ElementType, FieldDescriptor, FormSchema, InputType, SelectOption,
};
pub use submit::{build_payload, FormPhase, Payload};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("form has invalid fields")]
    Invalid,
    #[error("form cannot be submitted while {0:?}")]
    NotSubmittable(FormPhase),
}
