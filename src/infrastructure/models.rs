use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{order_products, orders};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = order_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderProductRow {
    pub order_id: Uuid,
    pub product_id: String,
    pub quantity: i32,
}
