pub mod quote_validation;

pub use quote_validation::{validate_quote_payload, FieldError, ValidationError};
