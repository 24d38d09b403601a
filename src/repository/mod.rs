pub mod mongo_quote_repo;
pub mod quote_repo;
pub mod storage_error;
