/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Helpdesk API Constants
// ============================================================================
/// Custom authentication header understood by the helpdesk API
pub const API_TOKEN_HEADER: &str = "api_access_token";

/// Source tag attached to every contact created from the lead form
pub const LEAD_SOURCE_TAG: &str = "web-form";

/// Plan recorded on a contact when the lead did not pick one
pub const DEFAULT_PLAN: &str = "Free";

/// Status a freshly created conversation is opened with
pub const CONVERSATION_STATUS_OPEN: &str = "open";

/// Message type for the lead summary posted into a conversation
pub const MESSAGE_TYPE_INCOMING: &str = "incoming";

// ============================================================================
// Webhook Constants
// ============================================================================

/// Header carrying the shared webhook secret
pub const WEBHOOK_TOKEN_HEADER: &str = "x-chatwoot-token";

/// Event name emitted by the helpdesk when a message is created
pub const EVENT_MESSAGE_CREATED: &str = "message.created";

/// Numeric message type code for agent (outgoing) messages
pub const OUTGOING_TYPE_CODE: i64 = 1;

/// String message type name for agent (outgoing) messages
pub const OUTGOING_TYPE_NAME: &str = "outgoing";

// ============================================================================
// Email Constants
// ============================================================================

/// Subject line for every agent-reply email
pub const REPLY_SUBJECT: &str = "Reply from Digital Service";

/// Display name on the From header when FROM_NAME is not configured
pub const DEFAULT_FROM_NAME: &str = "Digital Service";

/// SMTP port that uses implicit TLS instead of STARTTLS
pub const SMTPS_PORT: u16 = 465;

// ============================================================================
// Configuration Defaults
// ============================================================================

/// Helpdesk base URL when CHATWOOT_BASE is not configured
pub const DEFAULT_HELPDESK_BASE: &str = "https://app.chatwoot.com";

/// Helpdesk account when ACCOUNT_ID is not configured
pub const DEFAULT_ACCOUNT_ID: &str = "1";

/// SMTP relay host when SMTP_HOST is not configured
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// SMTP submission port when SMTP_PORT is not configured
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// HTTP listen port when PORT is not configured
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

// ============================================================================
// Testing Constants
// ============================================================================

#[cfg(test)]
pub mod test_constants {
    /// Test API token
    pub const TEST_API_TOKEN: &str = "test-token";

    /// Test email address
    pub const TEST_EMAIL: &str = "customer@example.com";
}
