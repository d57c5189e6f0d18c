//! Utility modules for error handling, configuration and tool lookup

pub mod binaries;
pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use binaries::{find_binary, resolve_binary};
pub use config::{AppSettings, TranscodeSettings};
pub use error::ClipperError;
pub use paths::{clip_file_name, sanitize_title};
