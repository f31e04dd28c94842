use std::sync::Arc;

use crate::domain::errors::{LookupError, OrderError, StoreError};
use crate::domain::order::{
    build_line_items, enrich_orders, referenced_product_ids, requested_product_ids, Order,
    Product, ProductQuery, RequestedItem, MAX_QUANTITY,
};
use crate::domain::ports::{AccountLookup, CatalogLookup, OrderRepository};

/// Composes orders from account and catalog data and reads them back enriched.
///
/// Holds no per-request state; one instance is shared by all workers.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    accounts: Arc<dyn AccountLookup>,
    catalog: Arc<dyn CatalogLookup>,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        accounts: Arc<dyn AccountLookup>,
        catalog: Arc<dyn CatalogLookup>,
    ) -> Self {
        Self {
            repo,
            accounts,
            catalog,
        }
    }

    /// Validates the account, resolves the requested products and persists
    /// the resulting order. Nothing is written unless every step succeeds.
    pub async fn post_order(
        &self,
        account_id: &str,
        requested: Vec<RequestedItem>,
    ) -> Result<Order, OrderError> {
        if let Some(item) = requested.iter().find(|item| item.quantity > MAX_QUANTITY) {
            return Err(OrderError::QuantityTooLarge {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                max: MAX_QUANTITY,
            });
        }
        let ids = requested_product_ids(&requested);

        let account = async {
            self.accounts
                .get_account_by_id(account_id)
                .await
                .map_err(|e| {
                    log::warn!("Account lookup for {} failed: {}", account_id, e);
                    OrderError::AccountNotFound(account_id.to_string())
                })
        };
        let products = async {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            self.catalog
                .get_products(&ProductQuery::by_ids(ids))
                .await
                .map_err(|e| {
                    log::warn!("Catalog lookup failed: {}", e);
                    OrderError::CatalogUnavailable(e.to_string())
                })
        };
        let (_, products) = tokio::try_join!(account, products)?;

        let lines = build_line_items(&products, &requested);
        if lines.is_empty() {
            return Err(OrderError::NoMatchingProducts);
        }

        let order = Order::new(account_id, lines);
        let repo = Arc::clone(&self.repo);
        let order = tokio::task::spawn_blocking(move || repo.put_order(&order).map(|()| order))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))
            .and_then(|result| result)
            .map_err(|e| {
                log::error!("Persisting order for account {} failed: {}", account_id, e);
                OrderError::OrderPersistenceFailed(e)
            })?;

        log::info!(
            "Created order {} for account {} ({} line items, total {})",
            order.id,
            order.account_id,
            order.products.len(),
            order.total_price()
        );
        Ok(order)
    }

    /// Stored orders for `account_id` with current catalog data merged into
    /// each line item. An account without orders yields an empty list.
    pub async fn get_orders_for_account(&self, account_id: &str) -> Result<Vec<Order>, OrderError> {
        let repo = Arc::clone(&self.repo);
        let owner = account_id.to_string();
        let mut orders = tokio::task::spawn_blocking(move || repo.get_orders_for_account(&owner))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))
            .and_then(|result| result)
            .map_err(OrderError::OrderRetrievalFailed)?;

        let ids = referenced_product_ids(&orders);
        if ids.is_empty() {
            return Ok(orders);
        }

        match self.fetch_current_products(ProductQuery::by_ids(ids)).await {
            Ok(products) => enrich_orders(&mut orders, &products),
            Err(e) => log::warn!(
                "Returning orders for account {} without catalog data: {}",
                account_id,
                e
            ),
        }
        Ok(orders)
    }

    async fn fetch_current_products(&self, query: ProductQuery) -> Result<Vec<Product>, LookupError> {
        let requested = query.ids.len();
        let products = self.catalog.get_products(&query).await?;
        if products.len() < requested {
            log::debug!(
                "Catalog resolved {} of {} referenced products",
                products.len(),
                requested
            );
        }
        Ok(products)
    }
}
