mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use order_composer::handlers::orders::{configure, OrderResponse};
use serde_json::{json, Value};

use common::harness;

macro_rules! app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn post_then_list_orders() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "acc-1",
            "products": [
                { "product_id": "P1", "quantity": 2 },
                { "product_id": "P3", "quantity": 1 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: OrderResponse = test::read_body_json(resp).await;
    assert_eq!(created.account_id, "acc-1");
    assert_eq!(created.total_price, 20.0);
    assert_eq!(created.products.len(), 1);

    let req = test::TestRequest::get()
        .uri("/accounts/acc-1/orders")
        .to_request();
    let listed: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].products[0].name, "P1 name");
    assert_eq!(listed[0].products[0].quantity, 2);
}

#[actix_web::test]
async fn unknown_account_returns_404() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "ghost",
            "products": [{ "product_id": "P1", "quantity": 1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Account not found: ghost");
}

#[actix_web::test]
async fn unmatched_products_return_422() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "acc-1",
            "products": [{ "product_id": "nope", "quantity": 1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn catalog_outage_returns_503() {
    let h = harness();
    h.catalog.set_unavailable(true);
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "acc-1",
            "products": [{ "product_id": "P1", "quantity": 1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn negative_quantity_is_a_bad_request() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "acc-1",
            "products": [{ "product_id": "P1", "quantity": -1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.repo.len(), 0);
}

#[actix_web::test]
async fn quantity_beyond_store_range_is_a_bad_request() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "account_id": "acc-1",
            "products": [{ "product_id": "P1", "quantity": 3000000000u64 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Quantity 3000000000 for product P1 exceeds the maximum of 2147483647"
    );
    assert_eq!(h.repo.len(), 0);
}

#[actix_web::test]
async fn account_without_orders_lists_empty_array() {
    let h = harness();
    let app = app!(h.service.clone());

    let req = test::TestRequest::get()
        .uri("/accounts/acc-1/orders")
        .to_request();
    let listed: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;

    assert!(listed.is_empty());
}
