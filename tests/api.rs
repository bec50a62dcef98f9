//! Testes HTTP: o router completo sobre a store em memória.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use dvd_rental::{
    config::AppState,
    db::InMemoryStore,
    middleware::request_id::REQUEST_ID_HEADER,
    models::rental::Rental,
    routes,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

fn store() -> InMemoryStore {
    let at = |day, hour| {
        NaiveDate::from_ymd_opt(2005, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    };

    InMemoryStore::new()
        .with_customer(1, "Mary", "Smith", "mary.smith@sakilacustomer.org")
        .with_customer(2, "Patricia", "Johnson", "patricia.johnson@sakilacustomer.org")
        .with_staff(1, "Mike", "Hillyer", "Mike.Hillyer@sakilastaff.com")
        .with_staff(2, "Jon", "Stephens", "Jon.Stephens@sakilastaff.com")
        .with_film(1, "Academy Dinosaur")
        .with_film(2, "Ace Goldfinger")
        .with_inventory(1, 1)
        .with_inventory(2, 1)
        .with_inventory(3, 2)
        .with_payment(1, Decimal::new(299, 2))
        .with_rental(Rental {
            rental_id: 10,
            rental_date: at(24, 22),
            inventory_id: 3,
            customer_id: 2,
            staff_id: 1,
            return_date: None,
        })
        .with_rental(Rental {
            rental_id: 11,
            rental_date: at(25, 9),
            inventory_id: 1,
            customer_id: 1,
            staff_id: 1,
            return_date: Some(at(27, 9)),
        })
}

fn app() -> Router {
    routes::router(AppState::in_memory(store()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn assert_error(body: &Value, message: &str) {
    assert_eq!(body, &json!({ "error": message }));
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": "true" }));
}

#[tokio::test]
async fn login_returns_a_role_label_token() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "mike.hillyer@sakilastaff.com", "role": "staff" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "token": "staff-1", "role": "staff", "id": 1, "name": "Mike Hillyer" })
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "nobody@example.com", "role": "customer" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "customer not found");
}

#[tokio::test]
async fn login_rejects_unknown_roles_and_bad_bodies() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "mike.hillyer@sakilastaff.com", "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "role must be 'staff' or 'customer'");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "not-an-email", "role": "staff" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "email: must be a valid email address");

    let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({ "role": "staff" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn rent_return_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": 1, "inventory_id": 2, "staff_id": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let rental_id = body["rental_id"].as_i64().expect("rental_id");

    // A mesma cópia não pode sair duas vezes
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": 2, "inventory_id": 2, "staff_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "inventory already rented");

    let uri = format!("/api/returns/{rental_id}");
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "returned": rental_id }));

    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "rental not found or already returned");

    let (status, body) = send(&app, Method::POST, &format!("/api/rentals/{rental_id}/cancel"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "cannot cancel: rental already returned or not found");
}

#[tokio::test]
async fn cancel_frees_the_item() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/rentals/10/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "canceled": 10 }));

    let (status, body) = send(&app, Method::GET, "/api/inventory/available?film_id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "inventory_ids": [3] }));
}

#[tokio::test]
async fn rent_validates_the_payload() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": 0, "inventory_id": 2, "staff_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "customer_id: must be a positive id");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": "one", "inventory_id": 2, "staff_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": 1, "inventory_id": 999, "staff_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "inventory item 999 not found");
}

#[tokio::test]
async fn malformed_path_ids_are_invalid_input() {
    let (status, body) = send(&app(), Method::POST, "/api/returns/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn available_inventory_requires_film_id() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/inventory/available", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "film_id required");

    let (status, body) = send(&app, Method::GET, "/api/inventory/available?film_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "inventory_ids": [1, 2] }));

    let (status, body) = send(&app, Method::GET, "/api/inventory/available?film_id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "inventory_ids": [] }));
}

#[tokio::test]
async fn reports_serialize_with_snake_case_fields() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/reports/customer/1/rentals", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "rental_id": 11,
            "rental_date": "2005-05-25T09:00:00",
            "return_date": "2005-05-27T09:00:00",
            "title": "Academy Dinosaur",
            "inventory_id": 1
        }])
    );

    let (status, body) = send(&app, Method::GET, "/api/reports/not-returned", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "rental_id": 10,
            "customer": "Patricia Johnson",
            "title": "Ace Goldfinger",
            "rental_date": "2005-05-24T22:00:00",
            "inventory_id": 3
        }])
    );

    let (status, body) = send(&app, Method::GET, "/api/reports/top-rented?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "title": "Academy Dinosaur", "total": 1 }]));

    let (status, body) = send(&app, Method::GET, "/api/reports/revenue-by-staff", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["staff_id"], 1);
    assert_eq!(rows[0]["staff"], "Mike Hillyer");
    assert!((rows[0]["revenue"].as_f64().unwrap() - 2.99).abs() < 1e-9);
    // Funcionário sem pagamentos aparece com 0
    assert_eq!(rows[1]["staff_id"], 2);
    assert_eq!(rows[1]["staff"], "Jon Stephens");
    assert_eq!(rows[1]["revenue"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn top_rented_rejects_bad_limits() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/reports/top-rented?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/reports/top-rented?limit=ten", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_are_json_not_found() {
    let (status, body) = send(&app(), Method::GET, "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "route not found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/rentals"].is_object());
}

#[tokio::test]
async fn request_id_is_generated_or_echoed() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let generated = response.headers().get(REQUEST_ID_HEADER).expect("request id header");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let mine = "7f1d2c3e-9a8b-4c5d-8e6f-0a1b2c3d4e5f";
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, mine)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], mine);
}

#[tokio::test]
async fn empty_query_values_count_as_absent() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/reports/top-rented?limit=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "title": "Academy Dinosaur", "total": 1 },
            { "title": "Ace Goldfinger", "total": 1 }
        ])
    );

    let (status, body) = send(&app, Method::GET, "/api/inventory/available?film_id=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "film_id required");

    let (status, body) = send(&app, Method::GET, "/api/inventory/available?film_id=1&limit=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "inventory_ids": [1, 2] }));
}

#[tokio::test]
async fn rent_with_ids_beyond_smallint_is_not_found() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/rentals",
        Some(json!({ "customer_id": 40000, "inventory_id": 2, "staff_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "customer 40000 not found");
}
