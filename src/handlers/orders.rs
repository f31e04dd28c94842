use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::order::{Order, OrderedProduct, RequestedItem};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderProductRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostOrderRequest {
    pub account_id: String,
    pub products: Vec<OrderProductRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderedProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    /// RFC 3339 creation timestamp (UTC).
    pub created_at: String,
    pub account_id: String,
    pub total_price: f64,
    pub products: Vec<OrderedProductResponse>,
}

impl From<OrderedProduct> for OrderedProductResponse {
    fn from(p: OrderedProduct) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            quantity: p.quantity,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            created_at: o.created_at.to_rfc3339(),
            total_price: o.total_price(),
            account_id: o.account_id,
            products: o.products.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the account, resolves the requested products against the
/// catalog and stores the order with its line items in one transaction.
/// Requested products the catalog does not know are left out of the order.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PostOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Quantity out of range"),
        (status = 404, description = "Account not found"),
        (status = 422, description = "No requested product matched the catalog"),
        (status = 503, description = "Catalog unavailable"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn post_order(
    service: web::Data<OrderService>,
    body: web::Json<PostOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let requested = body
        .products
        .into_iter()
        .map(|p| RequestedItem::new(p.product_id, p.quantity))
        .collect();

    let order = service.post_order(&body.account_id, requested).await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /accounts/{account_id}/orders
///
/// Returns every order of the account, oldest first, with current catalog
/// data merged into the line items. Unknown accounts yield an empty list.
#[utoipa::path(
    get,
    path = "/accounts/{account_id}/orders",
    params(
        ("account_id" = String, Path, description = "Account identifier"),
    ),
    responses(
        (status = 200, description = "Orders of the account", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders_for_account(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();

    let orders = service.get_orders_for_account(&account_id).await?;

    let body: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Registers the order routes on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::post().to(post_order)).route(
        "/accounts/{account_id}/orders",
        web::get().to(get_orders_for_account),
    );
}
