//! Error Types

use thiserror::Error;

use crate::model::ItemId;

/// Result alias for list mutations
pub type ListResult<T> = Result<T, ListError>;

/// Rejected list operations. A rejected operation never touches the list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("position {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("item name must not be empty")]
    EmptyName,
    #[error("no item ids left")]
    IdsExhausted,
    #[error("intent stream is closed")]
    StreamClosed,
}

/// Failures of the initial purchases read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid transfer state: {0}")]
    Transfer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(String),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}
