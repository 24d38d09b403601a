use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

use crate::model::quote::QuoteRequest;
use crate::repository::quote_repo::{InMemoryQuoteRepository, QuoteRepository};
use crate::util::error::ServiceError;
use crate::validation::validate_quote_payload;

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Validates a raw submission and stores it. Nothing is stored when
	/// validation fails.
	async fn submit_quote(&self, payload: Value) -> Result<QuoteRequest, ServiceError>;
	async fn list_quotes(&self) -> Result<Vec<QuoteRequest>, ServiceError>;
}

pub struct QuoteServiceImpl {
	pub quote_repo: Arc<dyn QuoteRepository>,
}

impl QuoteServiceImpl {
	pub fn new(quote_repo: Arc<dyn QuoteRepository>) -> Self {
		QuoteServiceImpl { quote_repo }
	}

	/// Service backed by a fresh, empty in-memory store.
	pub fn in_memory() -> Self {
		Self::new(Arc::new(InMemoryQuoteRepository::new()))
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, payload))]
	async fn submit_quote(&self, payload: Value) -> Result<QuoteRequest, ServiceError> {
		info!("Registering new quote request");
		let new_quote = validate_quote_payload(&payload)?;

		let quote = self.quote_repo.create(new_quote).await?;
		info!(quote_id = %quote.id, service = %quote.service, "Quote registered successfully");
		Ok(quote)
	}

	#[instrument(skip(self))]
	async fn list_quotes(&self) -> Result<Vec<QuoteRequest>, ServiceError> {
		info!("Listing quotes");
		let quotes = self.quote_repo.list().await?;
		info!("Fetched {} quotes", quotes.len());
		Ok(quotes)
	}
}
