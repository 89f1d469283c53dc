//! Interactive workflow.
//!
//! Same steps as the unattended one, but every decision the rules leave
//! ambiguous (or that needs a value nobody configured) is asked to the
//! operator. Configured values are never asked again, and an invalid
//! configured id is still an error.
//!
//! ```text
//! START ─► list simulations ─┬─ none ─────────────► CREATE
//!                            └─ ask create/start ─┬► CREATE: class, team, package,
//!                                                 │   pool, size, name, upload,
//!                                                 │   create, start
//!                                                 └► START_EXISTING: simulation,
//!                                                     class, upload, start
//! ```
//! Any prompt may return [`Choice::Cancelled`], which ends the workflow at once.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::NonZeroU32;

use enterprise_transport::RemoteDirectory;
use enterprise_types::{
    HostByPool, Pool, Simulation, SimulationCreationPayload, SimulationStartResult, Team, Uuid,
};
use package_scanner::ArtifactScanner;
use tracing::info;

use super::resolve::{
    default_package_name, resolve_class_name, resolve_team, simulation_name_from_class,
};
use super::{PluginClient, PluginError};
use crate::config::ResolutionConfig;
use crate::prompt::{selected, Choice, Chooser, PromptIo};

/// Upper bound (exclusive) of the load generator count prompt.
const MAX_POOL_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulationAction {
    Create,
    StartExisting,
}

impl fmt::Display for SimulationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationAction::Create => write!(f, "Create a new simulation"),
            SimulationAction::StartExisting => write!(f, "Start an existing simulation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackageAction {
    Create,
    UseExisting,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAction::Create => write!(f, "Create a new package"),
            PackageAction::UseExisting => write!(f, "Use an existing package"),
        }
    }
}

/// Package answer, created only once every question is answered.
enum PackageSelection {
    Existing(Uuid),
    New(String),
}

pub struct InteractivePlugin<D, S, P> {
    client: PluginClient<D, S>,
    chooser: Chooser<P>,
}

impl<D: RemoteDirectory, S: ArtifactScanner, P: PromptIo> InteractivePlugin<D, S, P> {
    pub fn new(client: PluginClient<D, S>, chooser: Chooser<P>) -> Self {
        Self { client, chooser }
    }

    pub fn client(&self) -> &PluginClient<D, S> {
        &self.client
    }

    pub fn chooser(&self) -> &Chooser<P> {
        &self.chooser
    }

    /// Start an existing simulation or create a new one, asking whatever the
    /// configuration leaves open.
    pub fn create_or_start(
        &mut self,
        config: &ResolutionConfig,
    ) -> Result<Choice<SimulationStartResult>, PluginError> {
        let discovered = self.client.scan_artifact(&config.artifact_file)?;

        if let Some(simulation_id) = config.simulation_id {
            let simulation = self.client.directory.simulation(simulation_id)?;
            return self.start_existing(simulation, &discovered, config);
        }

        let simulations = self.client.directory.simulations()?;
        if simulations.is_empty() {
            info!("No simulation found, creating a new one");
            return self.create_and_start(&discovered, &simulations, config);
        }

        let action = selected!(self.chooser.choose_from_list(
            "what to do",
            vec![SimulationAction::Create, SimulationAction::StartExisting],
            |action| action.to_string(),
        )?);
        match action {
            SimulationAction::Create => self.create_and_start(&discovered, &simulations, config),
            SimulationAction::StartExisting => {
                let simulation = selected!(self.choose_simulation(simulations)?);
                self.start_existing(simulation, &discovered, config)
            }
        }
    }

    fn start_existing(
        &mut self,
        mut simulation: Simulation,
        discovered: &[String],
        config: &ResolutionConfig,
    ) -> Result<Choice<SimulationStartResult>, PluginError> {
        let class_name = selected!(self.choose_class_name(
            discovered,
            config.simulation_class.as_deref(),
            Some(&simulation),
        )?);
        self.client
            .upload_package(simulation.pkg_id, &config.artifact_file)?;
        self.client.update_class_name(&mut simulation, class_name)?;
        self.client
            .start(simulation, &config.start_options(), false)
            .map(Choice::Selected)
    }

    fn create_and_start(
        &mut self,
        discovered: &[String],
        existing: &[Simulation],
        config: &ResolutionConfig,
    ) -> Result<Choice<SimulationStartResult>, PluginError> {
        let class_name = selected!(self.choose_class_name(
            discovered,
            config.simulation_class.as_deref(),
            None,
        )?);
        let team = selected!(self.choose_team(config.team_id)?);
        let package = selected!(self.choose_package(&team, config)?);
        let pool = selected!(self.choose_pool()?);
        let size = selected!(self
            .chooser
            .choose_int("Number of load generators", 1, MAX_POOL_SIZE)?);
        let name = selected!(self.choose_simulation_name(&class_name, existing)?);

        // Nothing is created until every question is answered.
        let pkg_id = match package {
            PackageSelection::Existing(pkg_id) => pkg_id,
            PackageSelection::New(package_name) => {
                let pkg = self
                    .client
                    .directory
                    .create_package(&package_name, Some(team.id))?;
                info!("Created package '{}', id='{}'", pkg.name, pkg.id);
                pkg.id
            }
        };
        self.client.upload_package(pkg_id, &config.artifact_file)?;

        let mut hosts_by_pool = HashMap::new();
        hosts_by_pool.insert(
            pool.id,
            HostByPool::new(NonZeroU32::new(size).unwrap_or(NonZeroU32::MIN), 0),
        );
        let payload = SimulationCreationPayload::new(name, team.id, class_name, pkg_id, hosts_by_pool);
        let simulation = self.client.directory.create_simulation(&payload)?;
        info!("Created {} in {} on {}", simulation, team, pool);

        self.client
            .start(simulation, &config.start_options(), true)
            .map(Choice::Selected)
    }

    fn choose_simulation(
        &mut self,
        mut simulations: Vec<Simulation>,
    ) -> Result<Choice<Simulation>, PluginError> {
        if simulations.len() == 1 {
            let simulation = simulations.remove(0);
            info!("Picked only available simulation {}", simulation);
            return Ok(Choice::Selected(simulation));
        }
        self.chooser.choose_from_sorted_list(
            "a simulation to start",
            simulations,
            |simulation| simulation.to_string(),
            |a, b| a.name.cmp(&b.name),
        )
    }

    fn choose_class_name(
        &mut self,
        discovered: &[String],
        configured: Option<&str>,
        simulation: Option<&Simulation>,
    ) -> Result<Choice<String>, PluginError> {
        match resolve_class_name(discovered, configured, simulation) {
            Err(PluginError::SeveralSimulationClassNamesFound(candidates)) => {
                self.chooser.choose_from_sorted_list(
                    "a simulation class",
                    candidates,
                    |class_name| class_name.clone(),
                    |a, b| a.cmp(b),
                )
            }
            resolved => resolved.map(Choice::Selected),
        }
    }

    fn choose_team(&mut self, configured: Option<Uuid>) -> Result<Choice<Team>, PluginError> {
        let teams = self.client.directory.teams()?;
        match resolve_team(&teams, configured) {
            Err(PluginError::SeveralTeamsFound(candidates)) => self.chooser.choose_from_sorted_list(
                "a team",
                candidates,
                |team| team.to_string(),
                |a, b| a.name.cmp(&b.name),
            ),
            resolved => resolved.map(Choice::Selected),
        }
    }

    fn choose_package(
        &mut self,
        team: &Team,
        config: &ResolutionConfig,
    ) -> Result<Choice<PackageSelection>, PluginError> {
        if let Some(package_id) = config.package_id {
            let pkg = self.client.directory.package(package_id)?;
            return Ok(Choice::Selected(PackageSelection::Existing(pkg.id)));
        }

        let packages = self.client.directory.packages()?;
        let taken: HashSet<String> = packages.iter().map(|pkg| pkg.name.clone()).collect();
        let usable: Vec<_> = packages
            .into_iter()
            .filter(|pkg| pkg.team_id.map_or(true, |id| id == team.id))
            .collect();

        let action = if usable.is_empty() {
            PackageAction::Create
        } else {
            selected!(self.chooser.choose_from_list(
                "how to provide the package",
                vec![PackageAction::Create, PackageAction::UseExisting],
                |action| action.to_string(),
            )?)
        };

        match action {
            PackageAction::UseExisting => Ok(self
                .chooser
                .choose_from_sorted_list(
                    "a package",
                    usable,
                    |pkg| pkg.to_string(),
                    |a, b| a.name.cmp(&b.name),
                )?
                .map(|pkg| PackageSelection::Existing(pkg.id))),
            PackageAction::Create => {
                let default = default_package_name(
                    config.group_id.as_deref(),
                    config.artifact_id.as_deref(),
                )
                .ok()
                .filter(|name| !taken.contains(name));
                let name = selected!(self.chooser.choose_string(
                    "Package name",
                    |name| unique_name("package", name, &taken),
                    default.as_deref(),
                )?);
                Ok(Choice::Selected(PackageSelection::New(name)))
            }
        }
    }

    fn choose_pool(&mut self) -> Result<Choice<Pool>, PluginError> {
        let mut pools = self.client.directory.pools()?;
        match pools.len() {
            0 => Err(PluginError::NoPoolFound),
            1 => Ok(Choice::Selected(pools.remove(0))),
            _ => self.chooser.choose_from_sorted_list(
                "a pool",
                pools,
                |pool| pool.to_string(),
                |a, b| a.name.cmp(&b.name),
            ),
        }
    }

    fn choose_simulation_name(
        &mut self,
        class_name: &str,
        existing: &[Simulation],
    ) -> Result<Choice<String>, PluginError> {
        let taken: HashSet<String> = existing.iter().map(|s| s.name.clone()).collect();
        let default = Some(simulation_name_from_class(class_name)).filter(|name| !taken.contains(*name));
        self.chooser.choose_string(
            "Simulation name",
            |name| unique_name("simulation", name, &taken),
            default,
        )
    }
}

fn unique_name(kind: &str, name: &str, taken: &HashSet<String>) -> Result<(), String> {
    if taken.contains(name) {
        Err(format!("A {} named '{}' already exists", kind, name))
    } else {
        Ok(())
    }
}
