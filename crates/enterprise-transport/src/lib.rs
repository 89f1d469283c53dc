//! Gatling Enterprise Transport Layer
//!
//! Network access to the Gatling Enterprise public API.
//!
//! This crate provides:
//! - [`directory`]: the [`RemoteDirectory`] capability consumed by the plugin core
//! - [`http`]: [`HttpEnterpriseClient`], the blocking `ureq` implementation
//! - [`error`]: the [`ApiError`] taxonomy shared by every endpoint
//!
//! # Example
//!
//! ```ignore
//! use enterprise_transport::{ClientConfig, HttpEnterpriseClient, RemoteDirectory};
//!
//! let client = HttpEnterpriseClient::connect(&ClientConfig::new(url, token))?;
//! for pool in client.pools()? {
//!     println!("{}", pool);
//! }
//! ```

pub mod directory;
pub mod error;
pub mod http;

// Re-export main types for convenience
pub use directory::RemoteDirectory;
pub use error::ApiError;
pub use http::{ClientConfig, HttpEnterpriseClient, DEFAULT_TIMEOUT};
