//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use leadflow::constants::WEBHOOK_TOKEN_HEADER;
use leadflow::error::RelayError;
use leadflow::models::{HelpdeskConfig, RelayConfig};
use leadflow::services::{Mailer, OutboundEmail};
use leadflow::{AppContext, chatwoot::ChatwootClient};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Mailer double that records every email instead of delivering it
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Mailer double that fails every delivery
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), RelayError> {
        Err(RelayError::Mail("connection refused".to_string()))
    }
}

/// Relay configuration pointing at a mock helpdesk server
pub fn test_config(
    base_url: &str,
    inbox_id: Option<u32>,
    webhook_token: Option<&str>,
) -> RelayConfig {
    RelayConfig {
        helpdesk: HelpdeskConfig {
            base_url: base_url.to_string(),
            account_id: "1".to_string(),
            inbox_id,
            api_token: "test-token".to_string(),
        },
        webhook_token: webhook_token.map(String::from),
        allow_origin: None,
        smtp: None,
        port: 0,
    }
}

/// Build an app context around a mock helpdesk and an optional mailer double
pub fn test_context(config: RelayConfig, mailer: Option<Arc<dyn Mailer>>) -> Arc<AppContext> {
    let chatwoot = ChatwootClient::new(&config.helpdesk).expect("client should build");
    Arc::new(AppContext {
        config,
        chatwoot,
        mailer,
    })
}

pub fn test_router(config: RelayConfig, mailer: Option<Arc<dyn Mailer>>) -> Router {
    leadflow::router(test_context(config, mailer)).expect("router should build")
}

/// POST a JSON body and return the response status with its decoded body
pub async fn send_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// POST a raw webhook body that need not be JSON at all
pub async fn send_webhook_raw(app: Router, body: &str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chatwoot/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("request should succeed");
    response.status()
}

/// POST a webhook payload, optionally carrying the shared token header
pub async fn send_webhook(app: Router, body: Value, token: Option<&str>) -> StatusCode {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chatwoot/webhook")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(WEBHOOK_TOKEN_HEADER, token);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("request should succeed");
    response.status()
}
