//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Request bodies are read
//! in full (bounded by `max_body_bytes`) before routing, so [`route`] is a
//! plain async function that tests can drive without a socket.

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::header::{self, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::routes::{self, json_response};
use crate::services::ContentService;
use crate::types::{CmsError, Result};

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub service: Arc<ContentService>,
    pub started: Instant,
}

impl AppState {
    pub fn new(args: Args, service: Arc<ContentService>) -> Self {
        Self {
            args,
            service,
            started: Instant::now(),
        }
    }
}

/// Accept connections until the process exits
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Crafter CMS listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    if state.args.dev_mode {
        warn!("Development mode enabled - admin endpoints are unauthenticated");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let body = match Limited::new(req.into_body(), state.args.max_body_bytes)
        .collect()
        .await
    {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!("[{}] body over {} bytes rejected", addr, state.args.max_body_bytes);
            return Ok(to_boxed(payload_too_large_response(state.args.max_body_bytes)));
        }
        Err(e) => {
            warn!("[{}] failed to read body: {}", addr, e);
            return Ok(to_boxed(routes::error_response(&CmsError::BadRequest(
                "failed to read request body".to_string(),
            ))));
        }
    };

    Ok(to_boxed(route(&state, &method, &path, body).await))
}

/// Dispatch one fully-read request
pub async fn route(state: &AppState, method: &Method, path: &str, body: Bytes) -> Response<Full<Bytes>> {
    let service = state.service.as_ref();

    match (method.clone(), path) {
        (Method::OPTIONS, _) => preflight_response(),

        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(state),

        (Method::GET, "/api/admin") => routes::handle_admin_info(),
        (Method::GET, "/api/admin/dashboard") => routes::handle_dashboard(service).await,
        (Method::POST, "/api/admin/seed") => routes::handle_seed(service).await,
        (Method::POST, "/api/admin/clear") => routes::handle_clear(service).await,

        (m, p) => match routes::parse_function_route(p) {
            Some(("admin", _)) => not_found_response(path),
            Some((module, function)) if m == Method::POST => {
                routes::handle_function_call(service, module, function, &body).await
            }
            Some(_) => method_not_allowed_response(),
            None => not_found_response(path),
        },
    }
}

fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    response
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
        "hint": "Functions are called with POST /api/{module}/{function}"
    });
    json_response(StatusCode::NOT_FOUND, &body)
}

fn method_not_allowed_response() -> Response<Full<Bytes>> {
    let mut response = json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({ "error": "Method Not Allowed" }),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"));
    response
}

fn payload_too_large_response(limit: usize) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &serde_json::json!({
            "error": "Payload Too Large",
            "limit": limit
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn state() -> AppState {
        AppState::new(Args::in_memory(), Arc::new(ContentService::memory()))
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let state = state();
        let response = route(&state, &Method::GET, "/health", Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["store"], "memory");
        assert_eq!(body["nodeId"], state.args.node_id.to_string());
    }

    #[tokio::test]
    async fn test_preflight_allows_any_origin() {
        let response = route(&state(), &Method::OPTIONS, "/api/products/getProducts", Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_function_route_requires_post() {
        let response = route(&state(), &Method::GET, "/api/products/getProducts", Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_listed_admin_resources_are_not_found() {
        let state = state();
        for path in ["/api/admin/products", "/api/admin/blog-posts", "/api/admin/inquiries"] {
            let response = route(&state, &Method::GET, path, Bytes::new()).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
            assert!(response.headers().get(header::ALLOW).is_none());
        }

        let response = route(&state, &Method::POST, "/api/admin/products", Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = route(&state(), &Method::GET, "/nowhere", Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["path"], "/nowhere");
    }

    #[tokio::test]
    async fn test_function_call_and_admin_dashboard() {
        let state = state();
        let body = Bytes::from_static(br#"{"name":"Ada","email":"ada@example.com","message":"Quote"}"#);
        let response = route(&state, &Method::POST, "/api/inquiries/createInquiry", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = route(&state, &Method::GET, "/api/admin/dashboard", Bytes::new()).await;
        let stats = body_json(response).await;
        assert_eq!(stats["inquiries"], 1);
        assert_eq!(stats["newInquiries"], 1);
    }
}
