use thiserror::Error;

/// Failure of a remote account or catalog lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Record not found")]
    NotFound,
    #[error("Remote service unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid lookup query: {0}")]
    InvalidQuery(String),
    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Failure inside the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
    #[error("Blocking task failed: {0}")]
    Task(String),
}

/// Errors surfaced to callers of the order service.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("Quantity {quantity} for product {product_id} exceeds the maximum of {max}")]
    QuantityTooLarge {
        product_id: String,
        quantity: u32,
        max: u32,
    },
    #[error("None of the requested products matched the catalog")]
    NoMatchingProducts,
    #[error("Could not persist order: {0}")]
    OrderPersistenceFailed(#[source] StoreError),
    #[error("Could not load orders: {0}")]
    OrderRetrievalFailed(#[source] StoreError),
}

impl OrderError {
    /// Whether the caller may retry the whole operation unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            OrderError::CatalogUnavailable(_) => true,
            OrderError::OrderPersistenceFailed(e) | OrderError::OrderRetrievalFailed(e) => {
                !matches!(e, StoreError::InvalidRow(_))
            }
            _ => false,
        }
    }
}
