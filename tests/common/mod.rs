//! In-memory stand-ins for the order store and the remote lookups.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use order_composer::application::order_service::OrderService;
use order_composer::domain::errors::{LookupError, StoreError};
use order_composer::domain::order::{Account, Order, OrderedProduct, Product, ProductQuery};
use order_composer::domain::ports::{AccountLookup, CatalogLookup, OrderRepository};

pub fn product(id: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("{id} name"),
        description: format!("{id} description"),
        price,
    }
}

#[derive(Default)]
pub struct FakeAccounts {
    known: HashSet<String>,
    unavailable: AtomicBool,
}

impl FakeAccounts {
    pub fn with(ids: &[&str]) -> Self {
        Self {
            known: ids.iter().map(|id| id.to_string()).collect(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountLookup for FakeAccounts {
    async fn get_account_by_id(&self, id: &str) -> Result<Account, LookupError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("connection refused".to_string()));
        }
        if !self.known.contains(id) {
            return Err(LookupError::NotFound);
        }
        Ok(Account {
            id: id.to_string(),
            name: format!("{id} holder"),
        })
    }
}

/// Catalog that records every query it receives.
#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<Vec<Product>>,
    queries: Mutex<Vec<ProductQuery>>,
    unavailable: AtomicBool,
}

impl FakeCatalog {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn replace(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }

    pub fn queries(&self) -> Vec<ProductQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogLookup for FakeCatalog {
    async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, LookupError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("timed out".to_string()));
        }
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| query.ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

/// Keeps only what the Postgres store persists: header fields plus
/// product id and quantity per line item.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    fail_puts: AtomicBool,
}

impl InMemoryOrderRepository {
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// Stores an order directly, bypassing composition.
    pub fn seed(&self, order: &Order) {
        self.put_order(order).unwrap();
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn put_order(&self, order: &Order) -> Result<(), StoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Database("insert failed".to_string()));
        }
        let stored = Order::from_stored(
            order.id,
            order.created_at,
            order.account_id.clone(),
            order.total_price(),
            order
                .products
                .iter()
                .map(|p| OrderedProduct::stored(p.id.clone(), p.quantity))
                .collect(),
        );
        self.orders.lock().unwrap().push(stored);
        Ok(())
    }

    fn get_orders_for_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.account_id == account_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }
}

pub struct Harness {
    pub service: OrderService,
    pub repo: Arc<InMemoryOrderRepository>,
    pub accounts: Arc<FakeAccounts>,
    pub catalog: Arc<FakeCatalog>,
}

/// Account `acc-1` exists; the catalog holds P1 at 10.0 and P2 at 5.0.
pub fn harness() -> Harness {
    let repo = Arc::new(InMemoryOrderRepository::default());
    let accounts = Arc::new(FakeAccounts::with(&["acc-1"]));
    let catalog = Arc::new(FakeCatalog::with(vec![
        product("P1", 10.0),
        product("P2", 5.0),
    ]));
    let service = OrderService::new(repo.clone(), accounts.clone(), catalog.clone());
    Harness {
        service,
        repo,
        accounts,
        catalog,
    }
}
