/// Infrastructure services
pub mod mailer;

// Re-export service traits
pub use mailer::{Mailer, OutboundEmail, SmtpMailer};
