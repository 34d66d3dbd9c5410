//! HTTP-level integration tests for the `/api/cars` endpoints and the
//! owner car-set sub-resource.

mod common;

use std::str::FromStr;

use axum::http::{header, StatusCode};
use common::{body_json, build_test_app, delete, get, patch_json, post, post_json, put_json};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use fleet_core::dto::{CarDto, OwnerDto, OwnerRef};
use fleet_db::services::{CarService, OwnerService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_owner(pool: &PgPool, name: &str) -> i64 {
    OwnerService::save(
        pool,
        &OwnerDto {
            id: None,
            name: name.to_string(),
            gender: "female".to_string(),
        },
    )
    .await
    .unwrap()
    .id
    .unwrap()
}

async fn seed_car(pool: &PgPool, name: &str, price: &str, owner: Option<i64>) -> i64 {
    CarService::save(
        pool,
        &CarDto {
            id: None,
            name: name.to_string(),
            model: "Corolla".to_string(),
            price: Decimal::from_str(price).unwrap(),
            owner: owner.map(|id| OwnerRef { id }),
        },
    )
    .await
    .unwrap()
    .id
    .unwrap()
}

/// Assert a JSON price field equals the expected numeric value, whatever
/// its textual scale.
fn assert_price(value: &serde_json::Value, expected: &str) {
    let actual = Decimal::from_str(value.as_str().expect("price should be a JSON string"))
        .expect("price should parse as a decimal");
    assert_eq!(actual, Decimal::from_str(expected).unwrap());
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_car_returns_201_with_location(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/cars",
        json!({ "name": "Daily driver", "model": "Corolla", "price": "15000.50" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header should be set")
        .to_str()
        .unwrap()
        .to_string();

    let json = body_json(response).await;
    let id = json["id"].as_i64().expect("created car should have an id");
    assert_eq!(location, format!("/api/cars/{id}"));
    assert_eq!(json["model"], "Corolla");
    assert_price(&json["price"], "15000.50");
    assert_eq!(json["owner"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_car_with_owner_reference(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/cars",
        json!({
            "name": "Daily driver",
            "model": "Corolla",
            "price": "15000.50",
            "owner": { "id": owner_id }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The owner comes back as a reference-only projection.
    let json = body_json(response).await;
    assert_eq!(json["owner"], json!({ "id": owner_id }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_car_with_id_is_rejected(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/cars",
        json!({ "id": 1, "name": "A", "model": "B", "price": "1.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error_key"], "idexists");
    assert_eq!(json["entity"], "car");
    assert!(CarService::find_all(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_car_with_unknown_owner_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/cars",
        json!({
            "name": "Orphan",
            "model": "Corolla",
            "price": "1.00",
            "owner": { "id": 4242 }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Read / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_car_round_trips_the_owner_reference(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;
    let car_id = seed_car(&pool, "Daily driver", "15000.50", Some(owner_id)).await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["owner"], json!({ "id": owner_id }));
    assert_price(&json["price"], "15000.50");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_car_with_mismatched_id_is_rejected(pool: PgPool) {
    let car_id = seed_car(&pool, "A", "1.00", None).await;

    let app = build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/cars/{car_id}"),
        json!({ "id": car_id + 1, "name": "A", "model": "B", "price": "1.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_key"], "idinvalid");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_car_replaces_all_fields(pool: PgPool) {
    let car_id = seed_car(&pool, "A", "1.00", None).await;

    let app = build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/cars/{car_id}"),
        json!({ "id": car_id, "name": "B", "model": "911", "price": "120000.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "B");
    assert_eq!(json["model"], "911");
    assert_price(&json["price"], "120000.00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_car_returns_204(pool: PgPool) {
    let car_id = seed_car(&pool, "A", "1.00", None).await;

    let app = build_test_app(pool);
    let response = delete(app.clone(), &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_car_price_only(pool: PgPool) {
    let car_id = seed_car(&pool, "Daily driver", "15000.50", None).await;

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/cars/{car_id}"),
        json!({ "id": car_id, "price": "19999.99" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_price(&json["price"], "19999.99");
    assert_eq!(json["name"], "Daily driver");
    assert_eq!(json["model"], "Corolla");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_car_with_explicit_null_owner_clears_it(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;
    let car_id = seed_car(&pool, "Daily driver", "15000.50", Some(owner_id)).await;

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/cars/{car_id}"),
        json!({ "id": car_id, "owner": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["owner"], serde_json::Value::Null);
    assert_price(&json["price"], "15000.50");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_car_omitting_owner_keeps_it(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;
    let car_id = seed_car(&pool, "Daily driver", "15000.50", Some(owner_id)).await;

    let app = build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/cars/{car_id}"),
        json!({ "id": car_id, "name": "Weekender" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Weekender");
    assert_eq!(json["owner"], json!({ "id": owner_id }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_unknown_car_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = patch_json(app, "/api/cars/4242", json!({ "id": 4242, "name": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Owner car-set sub-resource
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_cars_replaces_the_owned_set(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;
    let a = seed_car(&pool, "A", "1.00", None).await;
    let b = seed_car(&pool, "B", "2.00", None).await;
    let c = seed_car(&pool, "C", "3.00", None).await;

    let app = build_test_app(pool.clone());
    let response = put_json(
        app.clone(),
        &format!("/api/owners/{owner_id}/cars"),
        json!([a, b]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<i64> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b]);

    // Replace: b stays, a is released, c is claimed.
    let response = put_json(
        app.clone(),
        &format!("/api/owners/{owner_id}/cars"),
        json!([b, c]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let released = get(app, &format!("/api/cars/{a}")).await;
    assert_eq!(body_json(released).await["owner"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_cars_for_unknown_owner_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(app, "/api/owners/4242/cars", json!([])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_and_remove_car_through_the_api(pool: PgPool) {
    let owner_id = seed_owner(&pool, "Ada").await;
    let car_id = seed_car(&pool, "A", "1.00", None).await;

    let app = build_test_app(pool);
    let response = post(app.clone(), &format!("/api/owners/{owner_id}/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["owner"],
        json!({ "id": owner_id })
    );

    let response = delete(
        app.clone(),
        &format!("/api/owners/{owner_id}/cars/{car_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(body_json(response).await["owner"], serde_json::Value::Null);
}
