/// Configuration models
///
/// All configuration is read once at startup and passed to each component's
/// constructor; nothing reads the environment after boot.
use crate::constants::{
    DEFAULT_ACCOUNT_ID, DEFAULT_FROM_NAME, DEFAULT_HELPDESK_BASE, DEFAULT_LISTEN_PORT,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
use crate::error::RelayError;
use std::fmt;

/// Relay configuration
#[derive(Clone)]
pub struct RelayConfig {
    pub helpdesk: HelpdeskConfig,
    /// Shared secret expected in the webhook header; unset disables the check
    pub webhook_token: Option<String>,
    /// Single origin allowed by CORS; unset serves no CORS headers
    pub allow_origin: Option<String>,
    /// Present only when SMTP credentials are configured
    pub smtp: Option<SmtpConfig>,
    pub port: u16,
}

#[derive(Clone)]
pub struct HelpdeskConfig {
    pub base_url: String,
    pub account_id: String,
    /// Conversation creation is skipped when no inbox is configured
    pub inbox_id: Option<u32>,
    pub api_token: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from_email: String,
    pub from_name: String,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// CW_API_TOKEN is mandatory; the process must not start without it.
    /// Empty values count as unset. The mailer is configured only when both
    /// SMTP_USER and SMTP_PASS are present.
    pub fn from_env() -> Result<Self, RelayError> {
        let api_token = env_non_empty("CW_API_TOKEN")
            .ok_or_else(|| RelayError::Config("Missing CW_API_TOKEN env var".to_string()))?;

        let inbox_id = match env_non_empty("INBOX_ID") {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| RelayError::Config(format!("Invalid INBOX_ID: {}", raw)))?,
            ),
            None => None,
        };

        let helpdesk = HelpdeskConfig {
            base_url: env_non_empty("CHATWOOT_BASE")
                .unwrap_or_else(|| DEFAULT_HELPDESK_BASE.to_string()),
            account_id: env_non_empty("ACCOUNT_ID")
                .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string()),
            inbox_id,
            api_token,
        };

        let smtp = match (env_non_empty("SMTP_USER"), env_non_empty("SMTP_PASS")) {
            (Some(user), Some(pass)) => {
                let port = match env_non_empty("SMTP_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .map_err(|_| RelayError::Config(format!("Invalid SMTP_PORT: {}", raw)))?,
                    None => DEFAULT_SMTP_PORT,
                };
                Some(SmtpConfig {
                    host: env_non_empty("SMTP_HOST")
                        .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                    port,
                    from_email: env_non_empty("FROM_EMAIL").unwrap_or_else(|| user.clone()),
                    from_name: env_non_empty("FROM_NAME")
                        .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
                    user,
                    pass,
                })
            }
            _ => None,
        };

        let port = match env_non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| RelayError::Config(format!("Invalid PORT: {}", raw)))?,
            None => DEFAULT_LISTEN_PORT,
        };

        let config = Self {
            helpdesk,
            webhook_token: env_non_empty("WEBHOOK_TOKEN"),
            allow_origin: env_non_empty("ALLOW_ORIGIN"),
            smtp,
            port,
        };

        config
            .validate()
            .map_err(|e| RelayError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!("Configuration validated successfully");

        Ok(config)
    }

    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.helpdesk.api_token.is_empty() {
            return Err("API token not configured".to_string());
        }

        if !self.helpdesk.base_url.starts_with("http") {
            return Err(format!(
                "Invalid helpdesk base URL: {}",
                self.helpdesk.base_url
            ));
        }

        if self.helpdesk.account_id.is_empty() {
            return Err("Account id not configured".to_string());
        }

        Ok(())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

// The API token and SMTP password must never reach logs
impl fmt::Debug for HelpdeskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpdeskConfig")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("inbox_id", &self.inbox_id)
            .finish()
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("helpdesk", &self.helpdesk)
            .field("webhook_token", &self.webhook_token.as_ref().map(|_| "***"))
            .field("allow_origin", &self.allow_origin)
            .field("smtp", &self.smtp)
            .field("port", &self.port)
            .finish()
    }
}
