use std::fmt;

#[derive(Debug)]
pub enum StorageError {
    AlreadyExists(String),
    DatabaseError(String),
    ConnectionError(String),
    SerializationError(String),
    /// Generic error that wraps any error implementing std::error::Error
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::AlreadyExists(msg) => write!(f, "Already Exists: {}", msg),
            StorageError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            StorageError::ConnectionError(msg) => write!(f, "Connection Error: {}", msg),
            StorageError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            StorageError::Generic(err) => write!(f, "Storage Error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Generic(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl StorageError {
    pub fn database<T: Into<String>>(msg: T) -> Self {
        StorageError::DatabaseError(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        StorageError::ConnectionError(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        StorageError::SerializationError(msg.into())
    }
}

impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::Write(_) => {
                // E11000 is the duplicate key error code
                if err.to_string().contains("E11000") {
                    StorageError::AlreadyExists(format!("Duplicate key: {}", err))
                } else {
                    StorageError::DatabaseError(format!("Write error: {}", err))
                }
            }
            ErrorKind::Authentication { .. } => {
                StorageError::ConnectionError(format!("Authentication failed: {}", err))
            }
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                StorageError::ConnectionError(format!("Database unreachable: {}", err))
            }
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                StorageError::SerializationError(format!("BSON error: {}", err))
            }
            _ => StorageError::Generic(Box::new(err)),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
