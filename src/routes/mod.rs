//! HTTP routes
//!
//! - `GET /health`, `GET /healthz` - liveness
//! - `GET /api/admin` - admin endpoint index
//! - `GET /api/admin/dashboard` - content counts
//! - `POST /api/admin/seed`, `POST /api/admin/clear` - demo data
//! - `POST /api/{module}/{function}` - query/mutation functions

pub mod admin;
pub mod api;
pub mod health;

pub use admin::{handle_admin_info, handle_clear, handle_dashboard, handle_seed};
pub use api::{handle_function_call, parse_function_route};
pub use health::health_check;

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::types::CmsError;

/// API error body
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    code: &'static str,
}

/// JSON response with permissive CORS
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(bytes) => raw_json(status, Bytes::from(bytes)),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal serialization error","code":"SERIALIZATION_ERROR"}"#),
            )
        }
    }
}

/// JSON error response carrying the error's status and code
pub fn error_response(err: &CmsError) -> Response<Full<Bytes>> {
    json_response(
        err.status_code(),
        &ApiError {
            error: err.to_string(),
            code: err.code(),
        },
    )
}

fn raw_json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
