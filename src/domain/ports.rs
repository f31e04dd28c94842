use async_trait::async_trait;

use super::errors::{LookupError, StoreError};
use super::order::{Account, Order, Product, ProductQuery};

/// Durable storage of orders and their line items.
///
/// Implementations block; async callers run them on a blocking thread.
pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the header and every line item atomically.
    fn put_order(&self, order: &Order) -> Result<(), StoreError>;
    /// Orders owned by `account_id`, line items carrying only id and quantity.
    fn get_orders_for_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError>;
}

/// Read access to the account registry.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn get_account_by_id(&self, id: &str) -> Result<Account, LookupError>;
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, LookupError>;
}
