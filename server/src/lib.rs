//! A three-field input form (full name, email, phone) with validation and
//! a submit flow that polls its endpoint until it reports a final status.

pub mod components;
pub mod config;
pub mod errors;
pub mod form;
pub mod routes;
pub mod setup;
pub mod state;
pub mod submit;
pub mod validation;

pub use form::{Controls, FormData, InputForm, SubmitOutcome};
pub use submit::{ServerResponse, SubmitClient, SubmitError};
pub use validation::{FieldName, ValidationResult};
