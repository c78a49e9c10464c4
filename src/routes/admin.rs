//! Admin endpoints
//!
//! No authentication is applied here; deployments must restrict `/api/admin`
//! at the proxy until login is added.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde_json::json;

use super::{error_response, json_response};
use crate::services::ContentService;

/// Index of admin sub-resources
pub fn handle_admin_info() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &json!({
            "message": "Admin API",
            "endpoints": {
                "products": "/api/admin/products",
                "blogPosts": "/api/admin/blog-posts",
                "industries": "/api/admin/industries",
                "inquiries": "/api/admin/inquiries",
            }
        }),
    )
}

pub async fn handle_dashboard(service: &ContentService) -> Response<Full<Bytes>> {
    match service.dashboard().await {
        Ok(stats) => json_response(StatusCode::OK, &stats),
        Err(e) => error_response(&e),
    }
}

pub async fn handle_seed(service: &ContentService) -> Response<Full<Bytes>> {
    match service.seed_demo_data().await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(e) => error_response(&e),
    }
}

pub async fn handle_clear(service: &ContentService) -> Response<Full<Bytes>> {
    match service.clear_all_data().await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(e) => error_response(&e),
    }
}
