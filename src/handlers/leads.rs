/// Lead intake handler - records a form submission in the helpdesk
use crate::constants::MESSAGE_TYPE_INCOMING;
use crate::error::RelayError;
use crate::handlers::AppContext;
use crate::models::{
    ContactAttributes, LeadResponse, LeadSubmission, NewContact, NewConversation, NewMessage,
};
use crate::utils::logging::redact_email;
use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// POST /api/leads
///
/// Creates a contact for the submission, opens a conversation when an
/// inbox is configured, and posts the form contents as the first message.
#[tracing::instrument(name = "leads.handle", skip(ctx, payload))]
pub async fn handle(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<Value>,
) -> Result<Json<LeadResponse>, RelayError> {
    // 1. Parse and validate the submission
    let lead: LeadSubmission = serde_json::from_value(payload)
        .map_err(|e| RelayError::Validation(format!("Invalid lead payload: {}", e)))?;

    let (name, email) = lead
        .required_fields()
        .ok_or_else(|| RelayError::Validation("name & email required".to_string()))?;

    info!("Processing lead from {}", redact_email(email));

    // 2. Create or update the contact
    let contact = ctx
        .chatwoot
        .create_contact(&NewContact {
            name,
            email,
            phone_number: lead.phone.as_deref(),
            custom_attributes: ContactAttributes::for_lead(&lead),
        })
        .await?;
    let contact_id = extract_contact_id(&contact)?;

    // 3. Open a conversation when an inbox is configured
    let conversation_id = match ctx.config.helpdesk.inbox_id {
        Some(inbox_id) => Some(open_conversation(&ctx, inbox_id, contact_id).await?),
        None => None,
    };

    // 4. Post the form contents into the conversation
    if let Some(conversation_id) = conversation_id {
        ctx.chatwoot
            .post_message(
                conversation_id,
                &NewMessage {
                    content: &lead.summary(),
                    message_type: MESSAGE_TYPE_INCOMING,
                },
            )
            .await?;
    }

    info!(
        contact_id,
        conversation_id, "Lead recorded for {}", redact_email(email)
    );

    Ok(Json(LeadResponse {
        ok: true,
        contact_id,
        conversation_id,
    }))
}

/// Opens a conversation associated to the contact via `contact_id`, falling
/// back to a `source_id` association when the first create call is rejected.
async fn open_conversation(
    ctx: &AppContext,
    inbox_id: u32,
    contact_id: i64,
) -> Result<i64, RelayError> {
    let conversation = match ctx
        .chatwoot
        .create_conversation(&NewConversation::with_contact_id(inbox_id, contact_id))
        .await
    {
        Ok(conversation) => {
            info!(variant = "contact_id", "Conversation created");
            conversation
        }
        Err(primary) => {
            warn!(
                error = %primary,
                "Conversation create with contact_id rejected, retrying with source_id"
            );
            let conversation = ctx
                .chatwoot
                .create_conversation(&NewConversation::with_source_id(inbox_id, contact_id))
                .await?;
            info!(variant = "source_id", "Conversation created");
            conversation
        }
    };

    conversation
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            RelayError::Helpdesk(format!(
                "Conversation response missing id: {}",
                conversation
            ))
        })
}

/// Pulls the contact id out of a create response. Depending on the API
/// version the contact sits under `payload.contact` or at the top level.
fn extract_contact_id(response: &Value) -> Result<i64, RelayError> {
    let contact = response.pointer("/payload/contact").unwrap_or(response);
    contact.get("id").and_then(Value::as_i64).ok_or_else(|| {
        RelayError::Helpdesk(format!("Contact response missing id: {}", response))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_contact_id_bare() {
        let response = json!({"id": 5, "name": "Ada"});
        assert_eq!(extract_contact_id(&response).unwrap(), 5);
    }

    #[test]
    fn test_extract_contact_id_wrapped() {
        let response = json!({"payload": {"contact": {"id": 7, "email": "ada@example.com"}}});
        assert_eq!(extract_contact_id(&response).unwrap(), 7);
    }

    #[test]
    fn test_extract_contact_id_missing() {
        let response = json!({"payload": {"contact": {"email": "ada@example.com"}}});
        let err = extract_contact_id(&response).unwrap_err();
        assert!(matches!(err, RelayError::Helpdesk(_)));

        let err = extract_contact_id(&json!({})).unwrap_err();
        assert!(matches!(err, RelayError::Helpdesk(_)));
    }
}
