use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use validator::Validate;

use crate::dto::quote_dto::CreateQuoteRequest;
use crate::model::quote::NewQuote;

/// Order in which field errors are reported.
const FIELD_ORDER: [&str; 5] = ["name", "email", "phone", "service", "message"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        FieldError { field: field.into(), message: message.into() }
    }
}

/// Every rule a submission broke, one entry per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        ValidationError { errors: vec![FieldError::new(field, message)] }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "Validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Turns a raw JSON body into a [`NewQuote`], or reports every broken rule.
///
/// Presence and type problems are detected here; length and email rules are
/// delegated to the `validator` derive on [`CreateQuoteRequest`]. A field gets
/// at most one error, presence/type errors taking precedence.
pub fn validate_quote_payload(payload: &Value) -> Result<NewQuote, ValidationError> {
    let Some(fields) = payload.as_object() else {
        return Err(ValidationError::single("body", "request body must be a JSON object"));
    };

    let mut errors = Vec::new();
    let name = required_string(fields, "name", &mut errors);
    let email = required_string(fields, "email", &mut errors);
    let phone = required_string(fields, "phone", &mut errors);
    let service = optional_string(fields, "service", &mut errors);
    let message = required_string(fields, "message", &mut errors);

    let candidate = CreateQuoteRequest {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
        service,
        message: message.unwrap_or_default(),
    };

    if let Err(rule_errors) = candidate.validate() {
        for (field, field_errors) in rule_errors.field_errors() {
            let field = field.to_string();
            if errors.iter().any(|e: &FieldError| e.field == field) {
                continue;
            }
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                errors.push(FieldError { field, message });
            }
        }
    }

    if errors.is_empty() {
        Ok(candidate.into())
    } else {
        errors.sort_by_key(|e| field_rank(&e.field));
        let rejected = ValidationError { errors };
        debug!(fields = ?rejected.fields(), "Quote submission rejected");
        Err(rejected)
    }
}

fn required_string(fields: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, format!("{} is required", field)));
            None
        }
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field)));
            None
        }
    }
}

fn optional_string(fields: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{} must be a string", field)));
            None
        }
    }
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(FIELD_ORDER.len())
}
