//! CLI subcommand implementations for gatling-enterprise

pub mod inspect;
pub mod output;
pub mod start;
pub mod upload;

use anyhow::{anyhow, Result};
use enterprise_transport::{ApiError, HttpEnterpriseClient};
use gatling_enterprise::config::API_TOKEN_ENV;
use gatling_enterprise::{EnterpriseSettings, PluginClient, PluginError};
use package_scanner::JarSimulationScanner;

/// Connect to the control plane (this runs the compatibility check).
pub fn plugin_client(
    settings: &EnterpriseSettings,
) -> Result<PluginClient<HttpEnterpriseClient, JarSimulationScanner>> {
    let config = settings.client_config().ok_or_else(|| {
        anyhow!(
            "No API token configured, use --api-token or set {}",
            API_TOKEN_ENV
        )
    })?;
    let directory = HttpEnterpriseClient::connect(&config)?;
    Ok(PluginClient::new(directory, JarSimulationScanner::new()))
}

/// Add what the operator can do next to a failed command.
pub fn with_hint(err: anyhow::Error) -> anyhow::Error {
    let created = err
        .downcast_ref::<PluginError>()
        .and_then(PluginError::created_simulation)
        .map(|simulation| {
            format!(
                "{} exists, start it again with --simulation-id {}",
                simulation, simulation.id
            )
        });
    let hint = created.or_else(|| {
        err.chain()
            .filter_map(|cause| cause.downcast_ref::<ApiError>())
            .any(ApiError::is_auth)
            .then(|| format!("Check the token given with --api-token or {}", API_TOKEN_ENV))
    });
    match hint {
        Some(hint) => err.context(hint),
        None => err,
    }
}
