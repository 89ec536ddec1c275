/// Helpdesk API client and contact resolution
pub mod client;
pub mod resolver;

// Re-export commonly used types
pub use client::ChatwootClient;
pub use resolver::resolve_email;
