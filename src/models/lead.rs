/// Lead intake models and helpdesk request bodies
use crate::constants::{CONVERSATION_STATUS_OPEN, DEFAULT_PLAN, LEAD_SOURCE_TAG};
use serde::{Deserialize, Serialize};

/// A lead form submission. Only `name` and `email` are required; the
/// handler rejects the request when either is missing or empty.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub note: Option<String>,
}

impl LeadSubmission {
    /// Returns the required fields when both are present and non-empty.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|s| !s.is_empty())?;
        let email = self.email.as_deref().filter(|s| !s.is_empty())?;
        Some((name, email))
    }

    /// Builds the summary message posted into the conversation: one line of
    /// `Lead: name | email | phone | plan`, the note on the next line.
    /// Absent fields render as empty strings; the plan default applies only
    /// to contact attributes, not here.
    pub fn summary(&self) -> String {
        format!(
            "Lead: {} | {} | {} | {}\n{}",
            self.name.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            self.plan.as_deref().unwrap_or(""),
            self.note.as_deref().unwrap_or("")
        )
    }
}

/// Response body for a successful lead intake.
/// `conversation_id` stays in the body as null when no inbox is configured.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub ok: bool,
    pub contact_id: i64,
    pub conversation_id: Option<i64>,
}

/// Contact upsert request body
#[derive(Debug, Serialize)]
pub struct NewContact<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<&'a str>,
    pub custom_attributes: ContactAttributes<'a>,
}

#[derive(Debug, Serialize)]
pub struct ContactAttributes<'a> {
    pub plan: &'a str,
    pub source: &'a str,
    pub note: &'a str,
}

impl<'a> ContactAttributes<'a> {
    /// Attributes recorded on the contact. The plan falls back to the
    /// default when missing or empty, the note to an empty string.
    pub fn for_lead(lead: &'a LeadSubmission) -> Self {
        Self {
            plan: lead
                .plan
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PLAN),
            source: LEAD_SOURCE_TAG,
            note: lead.note.as_deref().unwrap_or(""),
        }
    }
}

/// Conversation create request body. Helpdesk API variants disagree on the
/// party field name, so exactly one of `contact_id` and `source_id` is set.
#[derive(Debug, Serialize)]
pub struct NewConversation {
    pub inbox_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    pub status: &'static str,
}

impl NewConversation {
    pub fn with_contact_id(inbox_id: u32, contact_id: i64) -> Self {
        Self {
            inbox_id,
            contact_id: Some(contact_id),
            source_id: None,
            status: CONVERSATION_STATUS_OPEN,
        }
    }

    pub fn with_source_id(inbox_id: u32, contact_id: i64) -> Self {
        Self {
            inbox_id,
            contact_id: None,
            source_id: Some(contact_id),
            status: CONVERSATION_STATUS_OPEN,
        }
    }
}

/// Message create request body
#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub content: &'a str,
    pub message_type: &'a str,
}
