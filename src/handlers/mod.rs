/// HTTP handlers for the relay endpoints
pub mod leads;
pub mod webhook;

use crate::chatwoot::ChatwootClient;
use crate::error::RelayError;
use crate::models::RelayConfig;
use crate::services::{Mailer, SmtpMailer};
use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared state for all HTTP handlers
pub struct AppContext {
    /// Relay configuration
    pub config: RelayConfig,

    /// Helpdesk API client
    pub chatwoot: ChatwootClient,

    /// Outbound mailer, absent when SMTP credentials are not configured
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppContext {
    /// Create the shared context from configuration
    pub fn new(config: RelayConfig) -> Result<Arc<Self>, RelayError> {
        let chatwoot = ChatwootClient::new(&config.helpdesk)?;

        let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
            Some(smtp) => Some(Arc::new(SmtpMailer::new(smtp)?)),
            None => {
                warn!("SMTP credentials not set, reply forwarding is disabled");
                None
            }
        };

        Ok(Arc::new(Self {
            config,
            chatwoot,
            mailer,
        }))
    }
}

/// Build the relay router
///
/// Routes:
/// - POST /api/leads - lead form intake
/// - POST /api/chatwoot/webhook - agent reply webhook
/// - GET /healthz - liveness check
///
/// CORS is only enabled when ALLOW_ORIGIN is configured, and is restricted
/// to that single origin.
pub fn router(ctx: Arc<AppContext>) -> Result<Router, RelayError> {
    let mut app = Router::new()
        .route("/api/leads", post(leads::handle))
        .route("/api/chatwoot/webhook", post(webhook::handle))
        .route("/healthz", get(healthz))
        // Add request logging middleware
        .layer(middleware::from_fn(log_request));

    if let Some(origin) = &ctx.config.allow_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .map_err(|e| RelayError::Config(format!("Invalid ALLOW_ORIGIN: {}", e)))?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    Ok(app.with_state(ctx))
}

/// Liveness check handler
async fn healthz() -> &'static str {
    "ok"
}

/// Request logging middleware
///
/// Logs all requests with:
/// - Request ID (generated)
/// - HTTP method and path
/// - Response status code
/// - Request duration
async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();

    // Generate request ID
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Log incoming request
    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    // Process request
    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    // Log response
    if status.is_client_error() || status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::TEST_API_TOKEN;
    use crate::models::HelpdeskConfig;
    use axum::body::{Body, to_bytes};
    use tower::ServiceExt;

    fn config(allow_origin: Option<&str>) -> RelayConfig {
        RelayConfig {
            helpdesk: HelpdeskConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                account_id: "1".to_string(),
                inbox_id: None,
                api_token: TEST_API_TOKEN.to_string(),
            },
            webhook_token: None,
            allow_origin: allow_origin.map(String::from),
            smtp: None,
            port: 0,
        }
    }

    #[test]
    fn test_router_without_cors() {
        let ctx = AppContext::new(config(None)).unwrap();
        assert!(router(ctx).is_ok());
    }

    #[test]
    fn test_router_with_cors_origin() {
        let ctx = AppContext::new(config(Some("https://leads.example.com"))).unwrap();
        assert!(router(ctx).is_ok());
    }

    #[test]
    fn test_router_rejects_invalid_origin() {
        let ctx = AppContext::new(config(Some("https://bad\norigin.example.com"))).unwrap();
        let err = router(ctx).unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[tokio::test]
    async fn test_healthz_returns_ok() {
        let ctx = AppContext::new(config(None)).unwrap();
        let app = router(ctx).unwrap();

        let request = axum::http::Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[test]
    fn test_request_id_generation() {
        let id1 = Uuid::new_v4().to_string();
        let id2 = Uuid::new_v4().to_string();
        assert_ne!(id1, id2, "Request IDs should be unique");
    }
}
