//! Route assembly — dashboard, system endpoints, module API routes.

use axum::Router;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use taskboard_core::{Module, ServerConfig};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the complete router.
pub fn build_router(config: &ServerConfig, module: &dyn Module) -> Router {
    tracing::info!("mounting {} routes under /api", module.name());

    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/version", get(version))
        .nest("/api", module.routes())
        .layer(cors_layer(&config.allowed_origins))
}

/// CORS layer from the configured origin list. `*` anywhere in the list
/// means any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}

async fn dashboard_page() -> impl IntoResponse {
    Html(include_str!("web/dashboard.html"))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "taskboardd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use taskboard_sql::{SQLStore, SqliteStore};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = ServerConfig::from_lookup(|_| None);
        let db: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let module = tasks::TasksModule::new(db).unwrap();
        build_router(&config, &module)
    }

    async fn get_text(router: &Router, uri: &str) -> (StatusCode, String) {
        let resp = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn dashboard_is_served_at_root() {
        let router = test_router();
        let (status, body) = get_text(&router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<html"));
        assert!(body.contains("Taskboard"));
    }

    #[tokio::test]
    async fn health_and_version() {
        let router = test_router();
        let (status, body) = get_text(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));

        let (status, body) = get_text(&router, "/version").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("taskboardd"));
    }

    #[tokio::test]
    async fn api_routes_are_nested() {
        let router = test_router();
        let (status, body) = get_text(&router, "/api/tasks").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("items"));

        let (status, _) = get_text(&router, "/api/reports/tasks").await;
        assert_eq!(status, StatusCode::OK);
    }
}
