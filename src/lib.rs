//! Gatling Enterprise plugin core
//!
//! Uploads a packaged simulation artifact to Gatling Enterprise, resolves the
//! simulation to run from partial configuration, and starts it:
//!
//! - [`plugin`]: the resolution workflow, unattended ([`BatchPlugin`]) or
//!   interactive ([`InteractivePlugin`]), and the checksum-gated upload
//! - [`prompt`]: line-based operator choices returning [`Choice`]
//! - [`config`]: what to run and how to reach the control plane
//!
//! The control plane is reached through [`enterprise_transport`]; artifacts
//! are inspected with [`package_scanner`].

#![allow(clippy::result_large_err)]

pub mod config;
pub mod plugin;
pub mod prompt;

pub use config::{EnterpriseSettings, ResolutionConfig};
pub use plugin::{BatchPlugin, InteractivePlugin, PluginClient, PluginError, UploadOutcome};
pub use prompt::{Choice, Chooser, PromptIo, StdPrompt};
