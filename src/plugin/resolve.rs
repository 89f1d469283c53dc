//! Name and default resolution rules.
//!
//! Pure functions over listings already fetched from the control plane. The
//! unattended workflow applies them as is; the interactive workflow falls
//! back to a prompt when they report an ambiguity.

use enterprise_types::{Pool, Simulation, Team, Uuid};
use tracing::info;

use super::errors::PluginError;

/// Default simulation name: the last segment of the class name.
pub fn simulation_name_from_class(class_name: &str) -> &str {
    class_name.rsplit('.').next().unwrap_or(class_name)
}

/// Default package name: `group:artifact`, or `artifact` alone.
pub fn default_package_name(
    group_id: Option<&str>,
    artifact_id: Option<&str>,
) -> Result<String, PluginError> {
    match (group_id, artifact_id) {
        (_, None) => Err(PluginError::ArtifactIdRequired),
        (Some(group), Some(artifact)) => Ok(format!("{}:{}", group, artifact)),
        (None, Some(artifact)) => Ok(artifact.to_string()),
    }
}

/// Pick the class to run among the classes discovered in the artifact.
///
/// A configured class always wins when it exists. Without one, the class
/// already stored on `simulation` is kept when it still exists, then a lone
/// candidate is picked.
pub fn resolve_class_name(
    discovered: &[String],
    configured: Option<&str>,
    simulation: Option<&Simulation>,
) -> Result<String, PluginError> {
    if discovered.is_empty() {
        return Err(PluginError::NoSimulationClassNameFound);
    }

    if let Some(configured) = configured {
        if !discovered.iter().any(|c| c == configured) {
            return Err(PluginError::InvalidSimulationClass {
                available: discovered.to_vec(),
                configured: configured.to_string(),
            });
        }
        return Ok(configured.to_string());
    }

    if let Some(stored) = simulation
        .map(|s| s.class_name.as_str())
        .filter(|stored| discovered.iter().any(|c| c == stored))
    {
        return Ok(stored.to_string());
    }

    match discovered {
        [only] => {
            info!("Picked only available simulation class name {}", only);
            Ok(only.clone())
        }
        _ => Err(PluginError::SeveralSimulationClassNamesFound(
            discovered.to_vec(),
        )),
    }
}

/// Pick the team owning a new simulation.
pub fn resolve_team(teams: &[Team], configured: Option<Uuid>) -> Result<Team, PluginError> {
    if teams.is_empty() {
        return Err(PluginError::NoTeamFound);
    }
    match (configured, teams) {
        (Some(id), _) => teams
            .iter()
            .find(|team| team.id == id)
            .cloned()
            .ok_or(PluginError::TeamNotFound(id)),
        (None, [only]) => Ok(only.clone()),
        (None, _) => Err(PluginError::SeveralTeamsFound(teams.to_vec())),
    }
}

/// The first pool of the listing; managed deployments always have one.
pub fn first_pool(pools: &[Pool]) -> Result<Pool, PluginError> {
    pools.first().cloned().ok_or(PluginError::NoPoolFound)
}
