/// Webhook handler - forwards public agent replies to the contact by email
use crate::chatwoot::resolve_email;
use crate::constants::{EVENT_MESSAGE_CREATED, WEBHOOK_TOKEN_HEADER};
use crate::error::RelayError;
use crate::handlers::AppContext;
use crate::models::WebhookEvent;
use crate::services::OutboundEmail;
use crate::utils::logging::redact_email;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// POST /api/chatwoot/webhook
///
/// Acknowledges with 200 once past the token check, whatever the processing
/// outcome, so the helpdesk never retries or disables the webhook over a
/// delivery problem. Failures are logged instead.
pub async fn handle(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, RelayError> {
    // 1. Verify the shared webhook token when one is configured
    if let Some(expected) = &ctx.config.webhook_token {
        let provided = headers
            .get(WEBHOOK_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            return Err(RelayError::Unauthorized(
                "Webhook token mismatch".to_string(),
            ));
        }
    }

    // 2. Tolerate unknown payload shapes; any body that does not parse,
    //    empty bodies included, is an ignorable event
    let event: WebhookEvent = serde_json::from_slice(&body).unwrap_or_default();

    // 3. Process the event without surfacing delivery failures
    if let Err(e) = process_event(&ctx, event).await {
        error!("Failed to process webhook event: {}", e);
    }

    Ok(StatusCode::OK)
}

#[tracing::instrument(
    name = "webhook.process_event",
    skip(ctx, event),
    fields(event = %event.event_name().unwrap_or("unknown"))
)]
async fn process_event(ctx: &AppContext, event: WebhookEvent) -> Result<(), RelayError> {
    // 1. Only public agent replies on message.created qualify
    if event.event_name() != Some(EVENT_MESSAGE_CREATED) {
        debug!("Ignoring event");
        return Ok(());
    }

    let Some(message) = event.message() else {
        debug!("Event carries no message, ignoring");
        return Ok(());
    };

    if !message.is_agent_reply() {
        debug!("Message is not a public agent reply, ignoring");
        return Ok(());
    }

    // 2. Without SMTP credentials there is nothing to deliver with
    let Some(mailer) = &ctx.mailer else {
        warn!("SMTP not configured; skipping reply delivery");
        return Ok(());
    };

    let Some(conversation_id) = message.conversation_id else {
        warn!("Agent reply carries no conversation id, skipping");
        return Ok(());
    };

    // 3. Resolve the contact's address through the conversation
    let Some(recipient) = resolve_email(&ctx.chatwoot, conversation_id).await? else {
        warn!(conversation_id, "No contact email for conversation, skipping");
        return Ok(());
    };

    // 4. Send the reply
    let email = OutboundEmail::reply(&recipient, message.content.as_deref().unwrap_or(""));
    mailer.send(&email).await?;

    info!(
        to = %redact_email(&recipient),
        conversation_id,
        "Reply email sent"
    );

    Ok(())
}
