use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration for the durable quote store
#[derive(Clone)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding quote requests
    pub quote_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables, if any.
    ///
    /// Returns `Ok(None)` when MONGO_URI is unset, in which case quotes are
    /// kept in memory.
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (enables the durable store)
    /// - MONGO_DATABASE: Database name (defaults to signage)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_QUOTE_COLLECTION: Collection name for quotes (defaults to quotes)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(uri) = lookup("MONGO_URI").filter(|u| !u.is_empty()) else {
            info!("MONGO_URI not set, quote requests will be kept in memory");
            return Ok(None);
        };
        info!("Loading MongoDB configuration from environment variables");

        let database = lookup("MONGO_DATABASE").unwrap_or_else(|| {
            warn!("MONGO_DATABASE not set, using default: signage");
            "signage".to_string()
        });
        debug!("MongoDB database: {}", database);

        let username = lookup("MONGO_USERNAME");
        let password = lookup("MONGO_PASSWORD");
        if password.is_some() {
            debug!("MongoDB password provided");
        }

        let quote_collection = lookup("MONGO_QUOTE_COLLECTION").unwrap_or_else(|| "quotes".to_string());
        debug!("MongoDB quote collection: {}", quote_collection);

        let pool_size = lookup("MONGO_POOL_SIZE")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;

        let connection_timeout_secs = lookup("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            quote_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(Some(config))
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test_db".to_string(),
            username: None,
            password: None,
            quote_collection: "test_quotes".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.quote_collection.is_empty() {
            error!("MongoDB quote collection is empty");
            return Err(ConfigError::ValidationError("MongoDB quote collection cannot be empty".to_string()));
        }

        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if self.username.is_some() != self.password.is_some() {
            error!("MongoDB credentials are incomplete");
            return Err(ConfigError::ValidationError(
                "MONGO_USERNAME and MONGO_PASSWORD must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &self.uri)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("quote_collection", &self.quote_collection)
            .field("pool_size", &self.pool_size)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .finish()
    }
}
