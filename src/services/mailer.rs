/// Outbound email delivery over SMTP
use crate::constants::{REPLY_SUBJECT, SMTPS_PORT};
use crate::error::RelayError;
use crate::models::SmtpConfig;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// One email, built per qualifying webhook event and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutboundEmail {
    /// Builds the agent-reply email: fixed subject, the message content as
    /// plain text, and the same content with newlines as `<br>` for HTML.
    pub fn reply(to: &str, content: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: REPLY_SUBJECT.to_string(),
            text: content.to_string(),
            html: format!("<p>{}</p>", content.replace('\n', "<br>")),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError>;
}

/// SMTP-backed mailer. Port 465 selects implicit TLS; any other port
/// upgrades the connection via STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, RelayError> {
        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| RelayError::Mail(format!("Invalid SMTP relay {}: {}", config.host, e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        let address = config.from_email.parse().map_err(|e| {
            RelayError::Config(format!("Invalid from address {}: {}", config.from_email, e))
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| RelayError::Mail(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(email.text.clone()))
                    .singlepart(SinglePart::html(email.html.clone())),
            )
            .map_err(|e| RelayError::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| RelayError::Mail(e.to_string()))?;

        Ok(())
    }
}
