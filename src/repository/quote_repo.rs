use crate::model::quote::{NewQuote, QuoteRequest};
use crate::repository::storage_error::StorageResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Append-only store of quote requests.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Assigns an id and creation time, stores the record and returns it.
    async fn create(&self, quote: NewQuote) -> StorageResult<QuoteRequest>;
    /// All stored records, oldest first.
    async fn list(&self) -> StorageResult<Vec<QuoteRequest>>;
}

/// Process-lifetime store. Writers are serialized by the lock, so ids and
/// insertion order stay consistent under concurrent submissions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRepository {
    quotes: Arc<RwLock<Vec<QuoteRequest>>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(name = %quote.name))]
    async fn create(&self, quote: NewQuote) -> StorageResult<QuoteRequest> {
        let mut quotes = self.quotes.write().await;
        let mut record = QuoteRequest::record(quote);
        while quotes.iter().any(|q| q.id == record.id) {
            record.id = uuid::Uuid::new_v4().to_string();
        }
        quotes.push(record.clone());
        info!(quote_id = %record.id, total = quotes.len(), "Quote stored in memory");
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> StorageResult<Vec<QuoteRequest>> {
        let quotes = self.quotes.read().await;
        info!("Fetched {} quotes from memory", quotes.len());
        Ok(quotes.clone())
    }
}
