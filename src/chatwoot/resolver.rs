/// Contact email resolution from conversation payloads
///
/// Conversation payloads have carried the contact in three different spots
/// across helpdesk versions. Resolution checks, in priority order:
///
/// 1. `meta.sender`
/// 2. `meta.contact`
/// 3. `contact` (top level)
///
/// The first location holding a non-empty email wins. When none holds an
/// email but one holds a contact id (same priority order), that contact is
/// fetched once and its email used instead.
use crate::chatwoot::ChatwootClient;
use crate::error::RelayError;
use serde_json::Value;

const EMAIL_LOCATIONS: [&str; 3] = ["/meta/sender/email", "/meta/contact/email", "/contact/email"];
const CONTACT_ID_LOCATIONS: [&str; 3] = ["/meta/sender/id", "/meta/contact/id", "/contact/id"];

/// Resolves the customer email for a conversation, or `None` when the
/// conversation carries neither an email nor a contact id, or the contact
/// record has no email. API failures propagate.
pub async fn resolve_email(
    client: &ChatwootClient,
    conversation_id: i64,
) -> Result<Option<String>, RelayError> {
    let conversation = client.get_conversation(conversation_id).await?;

    if let Some(email) = email_at(&conversation) {
        return Ok(Some(email));
    }

    let Some(contact_id) = contact_id_at(&conversation) else {
        return Ok(None);
    };

    let contact = client.get_contact(contact_id).await?;
    Ok(contact
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| !email.is_empty())
        .map(str::to_string))
}

/// First non-empty email across the documented locations.
fn email_at(conversation: &Value) -> Option<String> {
    EMAIL_LOCATIONS
        .iter()
        .filter_map(|path| conversation.pointer(path))
        .filter_map(Value::as_str)
        .find(|email| !email.is_empty())
        .map(str::to_string)
}

/// First contact id across the documented locations.
fn contact_id_at(conversation: &Value) -> Option<i64> {
    CONTACT_ID_LOCATIONS
        .iter()
        .filter_map(|path| conversation.pointer(path))
        .find_map(Value::as_i64)
}
