//! HTTP routing against the in-memory store

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use crafter_cms::server::route;
use crafter_cms::{AppState, Args, ContentService};

fn state() -> AppState {
    AppState::new(Args::in_memory(), Arc::new(ContentService::memory()))
}

async fn call(state: &AppState, method: Method, path: &str, body: Value) -> (StatusCode, Value) {
    let bytes = Bytes::from(serde_json::to_vec(&body).unwrap());
    let response = route(state, &method, path, bytes).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn seed_then_query_catalog() {
    let state = state();

    let (status, report) = call(&state, Method::POST, "/api/admin/seed", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["success"], true);
    assert_eq!(report["stats"]["blogPosts"], 5);

    let (_, films) = call(
        &state,
        Method::POST,
        "/api/products/getProducts",
        json!({ "category": "protective-films" }),
    )
    .await;
    let films = films.as_array().unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["slug"], "surface-protection-film");

    let (_, industries) = call(&state, Method::POST, "/api/industries/getIndustries", json!({})).await;
    let orders: Vec<i64> = industries
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["order"].as_i64().unwrap())
        .collect();
    let mut sorted = orders.clone();
    sorted.sort();
    assert_eq!(orders, sorted);

    let (_, dashboard) = call(&state, Method::GET, "/api/admin/dashboard", Value::Null).await;
    assert_eq!(dashboard["products"], 6);
    assert_eq!(dashboard["seedStatus"], "success");
}

#[tokio::test]
async fn clear_empties_every_collection() {
    let state = state();
    call(&state, Method::POST, "/api/seed/seedDemoData", json!({})).await;
    call(
        &state,
        Method::POST,
        "/api/inquiries/createInquiry",
        json!({ "name": "Ada", "email": "ada@example.com", "message": "Quote" }),
    )
    .await;

    let (status, report) = call(&state, Method::POST, "/api/admin/clear", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["success"], true);

    let (_, dashboard) = call(&state, Method::GET, "/api/admin/dashboard", Value::Null).await;
    for field in ["products", "blogPosts", "industries", "inquiries"] {
        assert_eq!(dashboard[field], 0, "{} not cleared", field);
    }

    let (_, settings) = call(&state, Method::POST, "/api/siteSettings/getSettings", json!({})).await;
    assert_eq!(settings, json!({}));
}

#[tokio::test]
async fn settings_round_trip_through_functions() {
    let state = state();
    let (status, _) = call(
        &state,
        Method::POST,
        "/api/siteSettings/setSetting",
        json!({ "key": "contactPhone", "value": "+1 555 0100" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, value) = call(
        &state,
        Method::POST,
        "/api/siteSettings/getSetting",
        json!({ "key": "contactPhone" }),
    )
    .await;
    assert_eq!(value, "+1 555 0100");

    let (_, missing) = call(
        &state,
        Method::POST,
        "/api/siteSettings/getSetting",
        json!({ "key": "nope" }),
    )
    .await;
    assert_eq!(missing, Value::Null);
}
