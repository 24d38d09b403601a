use axum::{extract::{rejection::JsonRejection, State}, response::IntoResponse, Json, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::quote_dto::{ApiResponse, QuoteAckDto};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;

pub const QUOTE_SUBMITTED_MESSAGE: &str = "Quote request submitted successfully";

// Handler: Submit Quote (public contact form)
pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_quote_handler] Handler called");
    let Json(payload) = payload.map_err(|rejection| {
        warn!("[create_quote_handler] Unreadable body ({}): {}", rejection.status(), rejection.body_text());
        HandlerError::unreadable_body(rejection.status(), format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let created = service.submit_quote(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(QUOTE_SUBMITTED_MESSAGE, QuoteAckDto::from(&created))),
    ))
}

// Handler: List Quotes
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let quotes = service.list_quotes().await?;
    Ok(Json(ApiResponse::ok(quotes)))
}
