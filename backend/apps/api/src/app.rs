//! Router assembly
//!
//! Wires the auth and capture routers, the health check, the static files
//! mount and the cross-cutting layers.

use std::sync::Arc;

use auth::{SqliteOperatorRepository, StaticCredentialProvider, TokenService, auth_router};
use axum::http::{HeaderValue, Method, StatusCode, header, request::Parts};
use axum::response::Response;
use axum::{Json, Router, middleware, routing::get};
use capture::{DiskImageStore, SqliteCaptureRepository, TextWatermarkRenderer, capture_router};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Static files mount point
pub const FILES_PATH: &str = "/files";

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Successful `OPTIONS` answers are sent as 204 No Content.
///
/// `CorsLayer` short-circuits preflights with 200 before any route runs.
async fn preflight_no_content(method: Method, mut response: Response) -> Response {
    if method == Method::OPTIONS && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// `http(s)://localhost[:port]` or `http(s)://127.0.0.1[:port]`
pub fn is_local_origin(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    let Some(port) = rest
        .strip_prefix("localhost")
        .or_else(|| rest.strip_prefix("127.0.0.1"))
    else {
        return false;
    };

    match port.strip_prefix(':') {
        None => port.is_empty(),
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
    }
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                allowed.contains(origin) || origin.to_str().is_ok_and(is_local_origin)
            },
        ))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// Build the full application router
pub fn build_router(config: &AppConfig, pool: SqlitePool, renderer: TextWatermarkRenderer) -> Router {
    let tokens = Arc::new(TokenService::new(&config.auth_config()));
    let capture_config = config.capture_config();

    let auth_routes = auth_router(
        StaticCredentialProvider::warehouse_defaults(),
        SqliteOperatorRepository::new(pool.clone()),
        tokens.clone(),
    );

    let capture_routes = capture_router(
        SqliteCaptureRepository::new(pool),
        DiskImageStore::new(capture_config.storage_dir.clone()),
        renderer,
        capture_config.clone(),
        tokens,
    );

    let api = if config.api_prefix.is_empty() {
        Router::new().merge(capture_routes)
    } else {
        Router::new().nest(&config.api_prefix, capture_routes)
    };

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(api)
        .nest_service(FILES_PATH, ServeDir::new(&capture_config.storage_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .layer(middleware::map_response(preflight_no_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::collections::HashMap;
    use tower::ServiceExt;

    struct TestServer {
        router: Router,
        dir: tempfile::TempDir,
    }

    async fn server(prefix: &str) -> TestServer {
        let dir = tempfile::tempdir().unwrap();
        let vars: HashMap<&str, String> = HashMap::from([
            ("STORAGE_DIR", dir.path().display().to_string()),
            ("API_PREFIX", prefix.to_string()),
            ("SECRET_KEY", "api-tests".to_string()),
            ("ENABLE_WATERMARK", "false".to_string()),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let pool = platform::database::memory_pool().await.unwrap();

        TestServer {
            router: build_router(&config, pool, TextWatermarkRenderer::without_font()),
            dir,
        }
    }

    impl TestServer {
        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn login(&self, username: &str, password: &str) -> String {
            let response = self
                .send(
                    Request::builder()
                        .method("POST")
                        .uri("/token")
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(Body::from(format!("username={username}&password={password}")))
                        .unwrap(),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            body["access_token"].as_str().unwrap().to_string()
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_is_local_origin() {
        assert!(is_local_origin("http://localhost"));
        assert!(is_local_origin("http://localhost:5173"));
        assert!(is_local_origin("https://127.0.0.1:8443"));
        assert!(!is_local_origin("http://localhost.evil.com"));
        assert!(!is_local_origin("http://localhost:"));
        assert!(!is_local_origin("http://localhost:80abc"));
        assert!(!is_local_origin("ftp://localhost"));
        assert!(!is_local_origin("https://example.com"));
    }

    #[tokio::test]
    async fn test_health() {
        let server = server("/api").await;

        let response = server.send(get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_login_then_query_under_prefix() {
        let server = server("/api").await;
        let token = server.login("callcenter", "callcenter123").await;

        let response = server
            .send(
                Request::builder()
                    .uri("/api/orders")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));

        let response = server.send(get("/api/captures?order_no=PO-1")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_root_prefix() {
        let server = server("/").await;

        let response = server.send(get("/orders")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_preflight_without_origin() {
        let server = server("/api").await;

        let response = server
            .send(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/captures")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_browser_preflight_is_no_content() {
        let server = server("/api").await;

        let response = server
            .send(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/captures")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_and_local_origins() {
        let server = server("/api").await;

        for (origin, allowed) in [
            ("http://localhost:5173", true),
            ("http://127.0.0.1:3000", true),
            ("https://evil.example.com", false),
        ] {
            let response = server
                .send(
                    Request::builder()
                        .method("OPTIONS")
                        .uri("/api/captures")
                        .header(header::ORIGIN, origin)
                        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await;

            let echoed = response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap().to_string());
            if allowed {
                assert_eq!(echoed.as_deref(), Some(origin));
            } else {
                assert_eq!(echoed, None);
            }
        }
    }

    #[tokio::test]
    async fn test_files_are_served_without_auth() {
        let server = server("/api").await;
        let order_dir = server.dir.path().join("PO-1");
        std::fs::create_dir_all(&order_dir).unwrap();
        std::fs::write(order_dir.join("abc.jpg"), b"jpeg-bytes").unwrap();

        let response = server.send(get("/files/PO-1/abc.jpg")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"jpeg-bytes");

        let response = server.send(get("/files/PO-1/missing.jpg")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
