//! Errors raised by the resolution workflow.

use enterprise_transport::ApiError;
use enterprise_types::{Simulation, Team, Uuid};
use package_scanner::{ChecksumError, ScanError};

/// Failure of an upload, resolution or start.
///
/// Configuration errors carry the candidates the tool could not choose
/// between, so that a caller can render them instead of only failing.
#[derive(Debug)]
pub enum PluginError {
    /// A call to the control plane failed.
    Api(ApiError),
    /// The artifact could not be scanned for simulation classes.
    Scanner(ScanError),
    /// The artifact checksum could not be computed.
    Checksum(ChecksumError),

    /// The artifact contains no simulation class.
    NoSimulationClassNameFound,
    /// The configured class is not one of the discovered classes.
    InvalidSimulationClass {
        available: Vec<String>,
        configured: String,
    },
    /// More than one simulation class and nothing to choose between them.
    SeveralSimulationClassNamesFound(Vec<String>),

    /// The API token cannot see any team.
    NoTeamFound,
    /// The configured team id is not in the team listing.
    TeamNotFound(Uuid),
    /// More than one team and no team id configured.
    SeveralTeamsFound(Vec<Team>),

    NoPoolFound,
    /// A new package needs a name and no artifact id was given.
    ArtifactIdRequired,

    /// A class was compiled for a newer Java release than the injectors run.
    UnsupportedJavaVersion {
        class_name: String,
        version: u32,
        max: u32,
    },
    /// `GET /info` did not advertise a usable Java version.
    InvalidServerInformation(String),

    /// An interactive choice was offered over an empty list.
    EmptyChoices(&'static str),
    /// Reading from or writing to the prompt channel failed.
    Prompt(std::io::Error),

    /// The simulation exists (it may just have been created) but the run
    /// could not be started.
    SimulationStart {
        simulation: Box<Simulation>,
        created: bool,
        source: ApiError,
    },
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginError::Api(e) => write!(f, "{}", e),
            PluginError::Scanner(e) => write!(f, "{}", e),
            PluginError::Checksum(e) => write!(f, "{}", e),
            PluginError::NoSimulationClassNameFound => write!(
                f,
                "No simulation class discovered. Simulation classes must extend \
                 io.gatling.javaapi.core.Simulation (Java, Kotlin) or \
                 io.gatling.core.scenario.Simulation (Scala)"
            ),
            PluginError::InvalidSimulationClass {
                available,
                configured,
            } => write!(
                f,
                "Simulation class '{}' was not found in the package, available classes are: {}",
                configured,
                available.join(", ")
            ),
            PluginError::SeveralSimulationClassNamesFound(classes) => write!(
                f,
                "Several simulation classes were found, please configure the one to run: {}",
                classes.join(", ")
            ),
            PluginError::NoTeamFound => write!(
                f,
                "No team was found, please create a team or use an API token with access to one"
            ),
            PluginError::TeamNotFound(id) => write!(f, "Team with id '{}' not found", id),
            PluginError::SeveralTeamsFound(teams) => {
                write!(f, "Several teams were found, please configure a team id:")?;
                for team in teams {
                    write!(f, "\n  - {}", team)?;
                }
                Ok(())
            }
            PluginError::NoPoolFound => write!(f, "No pool was found to run the simulation"),
            PluginError::ArtifactIdRequired => write!(
                f,
                "An artifact id is required to name the package to create"
            ),
            PluginError::UnsupportedJavaVersion {
                class_name,
                version,
                max,
            } => write!(
                f,
                "Class {} was compiled for Java {}, but Gatling Enterprise runs Java {} at most. \
                 Please compile your simulations for Java {} or lower",
                class_name, version, max, max
            ),
            PluginError::InvalidServerInformation(msg) => {
                write!(f, "Invalid server information: {}", msg)
            }
            PluginError::EmptyChoices(what) => {
                write!(f, "Cannot choose {} from an empty list", what)
            }
            PluginError::Prompt(e) => write!(f, "Failed to interact with the user: {}", e),
            PluginError::SimulationStart {
                simulation,
                created: true,
                source,
            } => write!(
                f,
                "{} was created but failed to start: {}",
                simulation, source
            ),
            PluginError::SimulationStart {
                simulation,
                created: false,
                source,
            } => write!(f, "Failed to start {}: {}", simulation, source),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Api(e) => Some(e),
            PluginError::Scanner(e) => Some(e),
            PluginError::Checksum(e) => Some(e),
            PluginError::Prompt(e) => Some(e),
            PluginError::SimulationStart { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ApiError> for PluginError {
    fn from(e: ApiError) -> Self {
        PluginError::Api(e)
    }
}

impl From<ScanError> for PluginError {
    fn from(e: ScanError) -> Self {
        PluginError::Scanner(e)
    }
}

impl From<ChecksumError> for PluginError {
    fn from(e: ChecksumError) -> Self {
        PluginError::Checksum(e)
    }
}

impl PluginError {
    /// The simulation left behind by a failed start, if any.
    pub fn created_simulation(&self) -> Option<&Simulation> {
        match self {
            PluginError::SimulationStart {
                simulation,
                created: true,
                ..
            } => Some(&**simulation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation() -> Simulation {
        Simulation {
            id: Uuid::nil(),
            name: "Sim".to_string(),
            team_id: Uuid::nil(),
            class_name: "a.Sim".to_string(),
            pkg_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_invalid_class_message_lists_candidates() {
        let err = PluginError::InvalidSimulationClass {
            available: vec!["A".to_string(), "B".to_string()],
            configured: "X".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'X'"));
        assert!(msg.contains("A, B"));
    }

    #[test]
    fn test_simulation_start_keeps_created_simulation() {
        let err = PluginError::SimulationStart {
            simulation: Box::new(simulation()),
            created: true,
            source: ApiError::Forbidden,
        };
        assert_eq!(err.created_simulation().map(|s| s.name.as_str()), Some("Sim"));
        assert!(err.to_string().contains("was created but failed to start"));
        assert!(std::error::Error::source(&err).is_some());

        let err = PluginError::SimulationStart {
            simulation: Box::new(simulation()),
            created: false,
            source: ApiError::Forbidden,
        };
        assert!(err.created_simulation().is_none());
        assert!(err.to_string().starts_with("Failed to start"));
    }
}
