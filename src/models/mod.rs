/// Data models for the lead relay
pub mod config;
pub mod lead;
pub mod webhook;

// Re-export commonly used types
pub use config::*;
pub use lead::*;
pub use webhook::*;
