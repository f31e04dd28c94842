use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest line-item quantity the order store can hold.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// A product and quantity the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestedItem {
    pub product_id: String,
    pub quantity: u32,
}

impl RequestedItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Minimal account record returned by the account registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// Catalog record for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Filter for a catalog lookup: either an explicit id set or a search query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub ids: BTreeSet<String>,
    pub query: Option<String>,
    pub skip: u64,
    pub take: u64,
}

impl ProductQuery {
    pub fn by_ids(ids: BTreeSet<String>) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    pub fn search(query: impl Into<String>, skip: u64, take: u64) -> Self {
        Self {
            ids: BTreeSet::new(),
            query: Some(query.into()),
            skip,
            take,
        }
    }

    /// True when neither ids nor a query narrow the lookup.
    pub fn is_unbounded(&self) -> bool {
        self.ids.is_empty() && self.query.as_deref().map_or(true, str::is_empty)
    }
}

/// One line item of an order.
///
/// Only `id` and `quantity` are persisted; the display fields are filled from
/// the catalog at composition time and again when orders are read back.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderedProduct {
    /// A line item as it comes back from storage, without catalog fields.
    pub fn stored(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            price: 0.0,
            quantity,
        }
    }

    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity,
        }
    }

    fn refresh_from(&mut self, product: &Product) {
        self.name.clone_from(&product.name);
        self.description.clone_from(&product.description);
        self.price = product.price;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    total_price: f64,
    pub products: Vec<OrderedProduct>,
}

impl Order {
    /// Starts a new order: assigns a time-ordered id, stamps the creation time
    /// and derives the total from the line items.
    pub fn new(account_id: impl Into<String>, products: Vec<OrderedProduct>) -> Self {
        let total_price = products
            .iter()
            .map(|p| p.price * f64::from(p.quantity))
            .sum();
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            account_id: account_id.into(),
            total_price,
            products,
        }
    }

    /// Rebuilds a committed order. The stored total is kept as-is.
    pub fn from_stored(
        id: Uuid,
        created_at: DateTime<Utc>,
        account_id: String,
        total_price: f64,
        products: Vec<OrderedProduct>,
    ) -> Self {
        Self {
            id,
            created_at,
            account_id,
            total_price,
            products,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }
}

/// Matches resolved catalog products against the requested items.
///
/// Each product takes the quantity of the first requested item with the same
/// id; products with no match (quantity 0) are dropped, as are repeated
/// catalog entries for an id already taken.
pub fn build_line_items(products: &[Product], requested: &[RequestedItem]) -> Vec<OrderedProduct> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter_map(|product| {
            let quantity = requested
                .iter()
                .find(|item| item.product_id == product.id)
                .map_or(0, |item| item.quantity);
            if quantity == 0 || !seen.insert(product.id.as_str()) {
                return None;
            }
            Some(OrderedProduct::from_product(product, quantity))
        })
        .collect()
}

/// Distinct product ids referenced by the requested items.
pub fn requested_product_ids(requested: &[RequestedItem]) -> BTreeSet<String> {
    requested
        .iter()
        .map(|item| item.product_id.clone())
        .collect()
}

/// Distinct product ids referenced across all line items of `orders`.
pub fn referenced_product_ids(orders: &[Order]) -> BTreeSet<String> {
    orders
        .iter()
        .flat_map(|o| o.products.iter().map(|p| p.id.clone()))
        .collect()
}

/// Overwrites line-item display fields with current catalog data.
///
/// Line items whose product is missing from `catalog` keep their values.
/// Quantities and order totals are never touched.
pub fn enrich_orders(orders: &mut [Order], catalog: &[Product]) {
    let by_id: HashMap<&str, &Product> = catalog.iter().map(|p| (p.id.as_str(), p)).collect();
    for line in orders.iter_mut().flat_map(|o| o.products.iter_mut()) {
        if let Some(product) = by_id.get(line.id.as_str()) {
            line.refresh_from(product);
        }
    }
}
