use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored customer inquiry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A submission that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl QuoteRequest {
    /// Assigns a fresh id and creation time to a validated submission.
    ///
    /// The timestamp is truncated to milliseconds so every storage backend
    /// hands back the same value it was given.
    pub fn record(new_quote: NewQuote) -> Self {
        QuoteRequest {
            id: Uuid::new_v4().to_string(),
            name: new_quote.name,
            email: new_quote.email,
            phone: new_quote.phone,
            service: new_quote.service,
            message: new_quote.message,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}
