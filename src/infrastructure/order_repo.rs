use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::StoreError;
use crate::domain::grouping::group_contiguous_by;
use crate::domain::order::{Order, OrderedProduct};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_products, orders};

use super::models::{OrderProductRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(e: r2d2::Error) -> Self {
        StoreError::Pool(e.to_string())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

fn order_rows(order: &Order) -> Result<(OrderRow, Vec<OrderProductRow>), StoreError> {
    let header = OrderRow {
        id: order.id,
        created_at: order.created_at,
        account_id: order.account_id.clone(),
        total_price: order.total_price(),
    };
    let lines = order
        .products
        .iter()
        .map(|p| {
            let quantity = i32::try_from(p.quantity).map_err(|_| {
                StoreError::InvalidRow(format!("quantity {} of {} out of range", p.quantity, p.id))
            })?;
            Ok(OrderProductRow {
                order_id: order.id,
                product_id: p.id.clone(),
                quantity,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    Ok((header, lines))
}

fn line_from_row(row: OrderProductRow) -> Result<OrderedProduct, StoreError> {
    let quantity = u32::try_from(row.quantity).map_err(|_| {
        StoreError::InvalidRow(format!(
            "negative quantity {} for product {} in order {}",
            row.quantity, row.product_id, row.order_id
        ))
    })?;
    Ok(OrderedProduct::stored(row.product_id, quantity))
}

/// Folds one run of joined rows (all sharing an order id) into an order.
fn order_from_group(group: Vec<(OrderRow, OrderProductRow)>) -> Result<Order, StoreError> {
    let mut rows = group.into_iter();
    let Some((header, first)) = rows.next() else {
        return Err(StoreError::InvalidRow("empty order group".to_string()));
    };
    let products = std::iter::once(first)
        .chain(rows.map(|(_, line)| line))
        .map(line_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Order::from_stored(
        header.id,
        header.created_at,
        header.account_id,
        header.total_price,
        products,
    ))
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn put_order(&self, order: &Order) -> Result<(), StoreError> {
        let (header, lines) = order_rows(order)?;
        let mut conn = self.pool.get()?;

        // Rolled back on any error (or panic) inside the closure.
        conn.transaction::<_, StoreError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(&header)
                .execute(conn)?;

            // Single multi-row INSERT for all line items.
            diesel::insert_into(order_products::table)
                .values(&lines)
                .execute(conn)?;

            Ok(())
        })
    }

    fn get_orders_for_account(&self, account_id: &str) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.get()?;

        // Grouping below requires rows clustered by order id.
        let rows: Vec<(OrderRow, OrderProductRow)> = orders::table
            .inner_join(order_products::table)
            .filter(orders::account_id.eq(account_id))
            .order((orders::id.asc(), order_products::product_id.asc()))
            .select((OrderRow::as_select(), OrderProductRow::as_select()))
            .load(&mut conn)?;

        group_contiguous_by(rows, |(header, _)| header.id)
            .into_iter()
            .map(order_from_group)
            .collect()
    }
}
