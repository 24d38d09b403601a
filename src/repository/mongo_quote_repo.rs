use crate::config::mongo_conf::MongoConfig;
use crate::model::quote::{NewQuote, QuoteRequest};
use crate::repository::quote_repo::QuoteRepository;
use crate::repository::storage_error::{StorageError, StorageResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use futures::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Document layout in the quotes collection. `createdAt` is a native BSON
/// date; `_id` is an ObjectId whose per-process counter orders inserts made
/// within the same millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct QuoteDocument {
    #[serde(rename = "_id")]
    object_id: ObjectId,
    id: String,
    name: String,
    email: String,
    phone: String,
    service: String,
    message: String,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
}

impl QuoteDocument {
    fn new(quote: &QuoteRequest, object_id: ObjectId) -> Self {
        QuoteDocument {
            object_id,
            id: quote.id.clone(),
            name: quote.name.clone(),
            email: quote.email.clone(),
            phone: quote.phone.clone(),
            service: quote.service.clone(),
            message: quote.message.clone(),
            created_at: bson::DateTime::from_millis(quote.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<QuoteDocument> for QuoteRequest {
    type Error = StorageError;

    fn try_from(document: QuoteDocument) -> Result<Self, Self::Error> {
        let millis = document.created_at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            StorageError::serialization(format!("Invalid createdAt for quote {}: {}", document.id, millis))
        })?;
        Ok(QuoteRequest {
            id: document.id,
            name: document.name,
            email: document.email,
            phone: document.phone,
            service: document.service,
            message: document.message,
            created_at,
        })
    }
}

/// Oldest first; `_id` breaks ties between equal timestamps.
fn creation_order() -> Document {
    doc! { "createdAt": 1, "_id": 1 }
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<QuoteDocument>,
}

impl MongoQuoteRepository {
    /// Create a new MongoQuoteRepository using MongoConfig
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::{ClientOptions, Credential}, Client};

        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("SignageQuoteBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        let collection = client
            .database(&config.database)
            .collection::<QuoteDocument>(&config.quote_collection);
        info!(database = %config.database, collection = %config.quote_collection, "MongoDB quote store ready");
        Ok(MongoQuoteRepository { collection })
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(name = %quote.name))]
    async fn create(&self, quote: NewQuote) -> StorageResult<QuoteRequest> {
        let record = QuoteRequest::record(quote);
        let document = QuoteDocument::new(&record, ObjectId::new());

        match self.collection.insert_one(&document, None).await {
            Ok(_) => {
                info!(quote_id = %record.id, "Quote stored in MongoDB");
                Ok(record)
            }
            Err(e) => {
                error!("Failed to store quote: {}", e);
                Err(StorageError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> StorageResult<Vec<QuoteRequest>> {
        use mongodb::options::FindOptions;

        let options = FindOptions::builder().sort(creation_order()).build();
        let mut cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list quotes: {}", e);
            StorageError::from(e)
        })?;

        let mut quotes = Vec::new();
        while let Some(document) = cursor.next().await {
            match document {
                Ok(d) => quotes.push(QuoteRequest::try_from(d)?),
                Err(e) => {
                    error!("Failed to deserialize quote: {}", e);
                    return Err(StorageError::from(e));
                }
            }
        }
        info!("Fetched {} quotes from MongoDB", quotes.len());
        Ok(quotes)
    }
}
