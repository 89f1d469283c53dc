//! Configuration consumed by the resolution workflow.
//!
//! [`ResolutionConfig`] is what the user asked for: every field except the
//! artifact and the run properties is optional, and the resolution rules fill
//! the gaps. [`EnterpriseSettings`] is how to reach the control plane.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use enterprise_transport::ClientConfig;
use enterprise_types::env_utils::{env_string, env_string_or, env_var_or};
use enterprise_types::{StartOptions, Uuid};

pub const DEFAULT_API_URL: &str = "https://cloud.gatling.io/api/public";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const URL_ENV: &str = "GATLING_ENTERPRISE_URL";
pub const API_TOKEN_ENV: &str = "GATLING_ENTERPRISE_API_TOKEN";
pub const TIMEOUT_ENV: &str = "GATLING_ENTERPRISE_TIMEOUT_MS";

/// What to run, as configured by the user.
#[derive(Debug, Clone, Default)]
pub struct ResolutionConfig {
    /// Run this existing simulation instead of resolving one.
    pub simulation_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    /// Fully qualified class to run.
    pub simulation_class: Option<String>,
    /// Upload into this existing package instead of creating one.
    pub package_id: Option<Uuid>,
    pub system_properties: BTreeMap<String, String>,
    pub environment_variables: BTreeMap<String, String>,
    /// The packaged artifact (JAR).
    pub artifact_file: PathBuf,
}

impl ResolutionConfig {
    pub fn new(artifact_file: impl Into<PathBuf>) -> Self {
        Self {
            artifact_file: artifact_file.into(),
            ..Default::default()
        }
    }

    /// Run properties sent with the start request.
    pub fn start_options(&self) -> StartOptions {
        StartOptions::new(
            self.system_properties.clone(),
            self.environment_variables.clone(),
        )
    }
}

/// Control-plane connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseSettings {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub client_name: String,
    pub client_version: String,
}

impl Default for EnterpriseSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl EnterpriseSettings {
    /// Read `GATLING_ENTERPRISE_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: env_string_or(URL_ENV, DEFAULT_API_URL),
            api_token: env_string(API_TOKEN_ENV),
            timeout: Duration::from_millis(env_var_or(TIMEOUT_ENV, DEFAULT_TIMEOUT_MS)),
            ..Default::default()
        }
    }

    /// Apply command-line values on top of the environment.
    pub fn with_overrides(mut self, base_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(token) = api_token.filter(|t| !t.trim().is_empty()) {
            self.api_token = Some(token);
        }
        self
    }

    /// Transport configuration, or `None` when no API token is known.
    pub fn client_config(&self) -> Option<ClientConfig> {
        let token = self.api_token.as_deref()?;
        Some(
            ClientConfig::new(&self.base_url, token)
                .with_client(&self.client_name, &self.client_version)
                .with_timeout(self.timeout),
        )
    }
}
