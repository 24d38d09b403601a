use axum::{Router, routing::post};
use crate::handler::quote_handler::{create_quote_handler, list_quotes_handler};
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route("/api/quotes", post(create_quote_handler).get(list_quotes_handler))
        .with_state(service)
}
