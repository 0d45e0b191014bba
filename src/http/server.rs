//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::audit::{RecordFactory, TransactionService};
use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::X_REQUEST_ID;
use crate::store::ObjectStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TransactionService,
    /// Ceiling on one request's store writes; expiry answers like a store failure.
    pub request_timeout: Duration,
}

/// HTTP front-end for the audit gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server writing to `store` with the system clock and random ids.
    pub fn new(config: GatewayConfig, store: Arc<dyn ObjectStore>) -> Self {
        let service = TransactionService::new(
            store,
            RecordFactory::default(),
            config.audit.write_policy,
        );
        Self::with_service(config, service)
    }

    /// Create a server around a pre-built service.
    pub fn with_service(config: GatewayConfig, service: TransactionService) -> Self {
        let state = AppState {
            service,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                request_id = %request_id,
                method = %request.method(),
                path = %request.uri().path(),
            )
        });

        Router::new()
            .route("/insert", post(handlers::insert))
            .route("/update", put(handlers::update))
            .route("/delete", delete(handlers::delete))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(trace)
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Router with all routes and layers, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            write_policy = ?self.config.audit.write_policy,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::WritePolicy;
    use crate::store::MemoryStore;
    use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
    use tower::ServiceExt;

    fn server(store: Arc<MemoryStore>) -> HttpServer {
        let mut config = GatewayConfig::default();
        config.limits.max_body_bytes = 64;
        HttpServer::new(config, store)
    }

    fn xml_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/xml")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_routes_and_request_id() {
        let store = Arc::new(MemoryStore::new());
        let router = server(store.clone()).router();

        for (method, uri) in [
            (Method::POST, "/insert"),
            (Method::PUT, "/update"),
            (Method::DELETE, "/delete"),
        ] {
            let response = router
                .clone()
                .oneshot(xml_request(method, uri, "<a/>"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().contains_key(X_REQUEST_ID));
        }
        assert_eq!(store.keys_with_prefix("xml-uploads/").len(), 3);
        // Records created within the same millisecond share a key.
        assert!(!store.keys_with_prefix("transactions/").is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let response = server(store.clone())
            .router()
            .oneshot(xml_request(Method::GET, "/insert", "<a/>"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_body_limit() {
        let store = Arc::new(MemoryStore::new());
        let big = "<a>0123456789012345678901234567890123456789012345678901234567890123456789</a>";
        let response = server(store.clone())
            .router()
            .oneshot(xml_request(Method::POST, "/insert", big))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let store = Arc::new(MemoryStore::new());
        let response = server(store)
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = GatewayConfig::default();
        config.audit.write_policy = WritePolicy::Independent;
        let server = HttpServer::new(config, Arc::new(MemoryStore::new()));
        assert_eq!(server.config().audit.write_policy, WritePolicy::Independent);
    }
}
