//! Unattended workflow: every decision comes from configuration or from a
//! listing with a single candidate; anything else is an error.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use enterprise_transport::RemoteDirectory;
use enterprise_types::{
    HostByPool, SimulationCreationPayload, SimulationStartResult, StartOptions, Uuid,
};
use package_scanner::ArtifactScanner;
use tracing::{debug, info};

use super::resolve::{
    default_package_name, first_pool, resolve_class_name, resolve_team,
    simulation_name_from_class,
};
use super::{PluginClient, PluginError, UploadOutcome};
use crate::config::ResolutionConfig;

pub struct BatchPlugin<D, S> {
    client: PluginClient<D, S>,
}

impl<D: RemoteDirectory, S: ArtifactScanner> BatchPlugin<D, S> {
    pub fn new(client: PluginClient<D, S>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PluginClient<D, S> {
        &self.client
    }

    pub fn upload_package(&self, package_id: Uuid, file: &Path) -> Result<UploadOutcome, PluginError> {
        self.client.upload_package(package_id, file)
    }

    pub fn upload_package_with_simulation_id(
        &self,
        simulation_id: Uuid,
        file: &Path,
    ) -> Result<UploadOutcome, PluginError> {
        self.client
            .upload_package_with_simulation_id(simulation_id, file)
    }

    /// Run the configured simulation id, or create (or reuse) one.
    pub fn resolve_and_run(
        &self,
        config: &ResolutionConfig,
    ) -> Result<SimulationStartResult, PluginError> {
        match config.simulation_id {
            Some(simulation_id) => self.start_existing(
                simulation_id,
                &config.system_properties,
                &config.environment_variables,
                config.simulation_class.as_deref(),
                &config.artifact_file,
            ),
            None => self.create_or_start(config),
        }
    }

    /// Upload into an existing simulation's package and start it.
    pub fn start_existing(
        &self,
        simulation_id: Uuid,
        system_properties: &BTreeMap<String, String>,
        environment_variables: &BTreeMap<String, String>,
        configured_class: Option<&str>,
        file: &Path,
    ) -> Result<SimulationStartResult, PluginError> {
        let mut simulation = self.client.directory.simulation(simulation_id)?;
        let discovered = self.client.scan_artifact(file)?;
        self.client.upload_package(simulation.pkg_id, file)?;

        let class_name = resolve_class_name(&discovered, configured_class, Some(&simulation))?;
        self.client.update_class_name(&mut simulation, class_name)?;

        let options = StartOptions::new(system_properties.clone(), environment_variables.clone());
        self.client.start(simulation, &options, false)
    }

    /// Create a simulation for the artifact and start it.
    ///
    /// Without a simulation id there is no way to tell which existing
    /// simulation to reuse, so a new one is always created.
    pub fn create_or_start(
        &self,
        config: &ResolutionConfig,
    ) -> Result<SimulationStartResult, PluginError> {
        let file = config.artifact_file.as_path();
        let discovered = self.client.scan_artifact(file)?;

        let existing = self.client.directory.simulations()?;
        debug!(
            count = existing.len(),
            "existing simulations, creating a new one"
        );

        let class_name = resolve_class_name(&discovered, config.simulation_class.as_deref(), None)?;
        let team = resolve_team(&self.client.directory.teams()?, config.team_id)?;
        let pool = first_pool(&self.client.directory.pools()?)?;

        let pkg_id = match config.package_id {
            Some(package_id) => self.client.directory.package(package_id)?.id,
            None => {
                let name = default_package_name(
                    config.group_id.as_deref(),
                    config.artifact_id.as_deref(),
                )?;
                let pkg = self.client.directory.create_package(&name, Some(team.id))?;
                info!("Created package '{}', id='{}'", pkg.name, pkg.id);
                pkg.id
            }
        };

        self.client.upload_package(pkg_id, file)?;

        let mut hosts_by_pool = HashMap::new();
        hosts_by_pool.insert(pool.id, HostByPool::default());
        let payload = SimulationCreationPayload::new(
            simulation_name_from_class(&class_name),
            team.id,
            class_name.as_str(),
            pkg_id,
            hosts_by_pool,
        );
        let simulation = self.client.directory.create_simulation(&payload)?;
        info!("Created {} in {} on {}", simulation, team, pool);

        self.client.start(simulation, &config.start_options(), true)
    }
}
