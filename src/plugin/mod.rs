//! The simulation resolution workflow.
//!
//! [`PluginClient`] holds what both front-ends share: the remote directory,
//! the artifact scanner, the upload gate and the start call. On top of it,
//! [`BatchPlugin`] resolves every decision from configuration and fails on
//! ambiguity, while [`InteractivePlugin`] asks an operator instead.
//!
//! ```text
//! scan artifact ─► check Java version ─► resolve class/team/package/pool
//!       ─► upload if changed ─► create or update simulation ─► start
//! ```

use std::cell::OnceCell;
use std::path::Path;

use enterprise_transport::RemoteDirectory;
use enterprise_types::{Simulation, SimulationStartResult, StartOptions};
use package_scanner::ArtifactScanner;
use tracing::{debug, info};

mod batch;
mod errors;
mod interactive;
pub mod resolve;
mod upload;

pub use batch::BatchPlugin;
pub use errors::PluginError;
pub use interactive::InteractivePlugin;
pub use upload::UploadOutcome;

/// Remote directory plus artifact scanner, with the steps common to every
/// workflow.
pub struct PluginClient<D, S> {
    directory: D,
    scanner: S,
    // Fetched from `GET /info` at most once.
    max_java_version: OnceCell<u32>,
}

impl<D: RemoteDirectory, S: ArtifactScanner> PluginClient<D, S> {
    pub fn new(directory: D, scanner: S) -> Self {
        Self {
            directory,
            scanner,
            max_java_version: OnceCell::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Highest Java major version the control plane can run.
    pub fn max_java_version(&self) -> Result<u32, PluginError> {
        if let Some(max) = self.max_java_version.get() {
            return Ok(*max);
        }
        let info = self.directory.server_information()?;
        let max = info.max_java_version().ok_or_else(|| {
            PluginError::InvalidServerInformation(format!(
                "unsupported maximum Java version {:?}",
                info.versions.java.max
            ))
        })?;
        Ok(*self.max_java_version.get_or_init(|| max))
    }

    /// Discovered simulation classes of `file`, once its bytecode is known to
    /// be runnable remotely.
    pub fn scan_artifact(&self, file: &Path) -> Result<Vec<String>, PluginError> {
        let scan = self.scanner.scan(file)?;
        if let Some(highest) = &scan.highest_java_version {
            let max = self.max_java_version()?;
            if highest.java_version > max {
                return Err(PluginError::UnsupportedJavaVersion {
                    class_name: highest.class_name.clone(),
                    version: highest.java_version,
                    max,
                });
            }
        }
        debug!(classes = ?scan.simulation_classes, "discovered simulation classes");
        Ok(scan.simulation_classes)
    }

    /// Store `class_name` on the simulation when it differs.
    pub(crate) fn update_class_name(
        &self,
        simulation: &mut Simulation,
        class_name: String,
    ) -> Result<(), PluginError> {
        if simulation.class_name == class_name {
            return Ok(());
        }
        let updated = self
            .directory
            .update_simulation_class_name(simulation.id, &class_name)?;
        info!(
            "Updated {} class name from {} to {}",
            simulation, simulation.class_name, updated.class_name
        );
        simulation.class_name = updated.class_name;
        Ok(())
    }

    /// Start a run; a failure keeps the simulation and whether it was just
    /// created.
    pub(crate) fn start(
        &self,
        simulation: Simulation,
        options: &StartOptions,
        created: bool,
    ) -> Result<SimulationStartResult, PluginError> {
        match self.directory.start_simulation(simulation.id, options) {
            Ok(run_summary) => {
                info!(run_id = %run_summary.run_id, "Started {}", simulation);
                Ok(SimulationStartResult {
                    simulation,
                    run_summary,
                    created_simulation: created,
                })
            }
            Err(source) => Err(PluginError::SimulationStart {
                simulation: Box::new(simulation),
                created,
                source,
            }),
        }
    }
}
