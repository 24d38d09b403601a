use crate::model::quote::{NewQuote, QuoteRequest};
use serde::{Deserialize, Serialize};

use validator::Validate;

// --- Validated DTO for the contact form submission ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "email is not a valid address"))]
    pub email: String,

    #[validate(length(min = 10, message = "phone must be at least 10 characters"))]
    pub phone: String,

    pub service: Option<String>,

    #[validate(length(min = 10, message = "message must be at least 10 characters"))]
    pub message: String,
}

impl From<CreateQuoteRequest> for NewQuote {
    fn from(req: CreateQuoteRequest) -> Self {
        NewQuote {
            name: req.name,
            email: req.email,
            phone: req.phone,
            service: req.service.unwrap_or_default(),
            message: req.message,
        }
    }
}

/// Envelope shared by every successful API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { success: true, message: None, data }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse { success: true, message: Some(message.into()), data }
    }
}

/// What the caller gets back after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteAckDto {
    pub id: String,
    pub name: String,
    pub service: String,
}

impl From<&QuoteRequest> for QuoteAckDto {
    fn from(quote: &QuoteRequest) -> Self {
        QuoteAckDto {
            id: quote.id.clone(),
            name: quote.name.clone(),
            service: quote.service.clone(),
        }
    }
}
