//! Upload command - checksum-gated package upload

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use uuid::Uuid;

use gatling_enterprise::{BatchPlugin, EnterpriseSettings};

use super::{output, plugin_client};

#[derive(Parser, Debug)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["package_id", "simulation_id"])
))]
pub struct UploadCmd {
    /// Packaged simulation artifact (JAR)
    #[arg(long)]
    pub file: PathBuf,

    /// Package to upload into
    #[arg(long)]
    pub package_id: Option<Uuid>,

    /// Upload into the package of this simulation
    #[arg(long)]
    pub simulation_id: Option<Uuid>,
}

impl UploadCmd {
    pub fn execute(&self, settings: &EnterpriseSettings, json_output: bool) -> Result<()> {
        let plugin = BatchPlugin::new(plugin_client(settings)?);
        let outcome = match (self.package_id, self.simulation_id) {
            (Some(package_id), _) => plugin.upload_package(package_id, &self.file)?,
            (None, Some(simulation_id)) => {
                plugin.upload_package_with_simulation_id(simulation_id, &self.file)?
            }
            (None, None) => anyhow::bail!("--package-id or --simulation-id is required"),
        };
        println!("{}", output::format_upload(outcome, json_output));
        Ok(())
    }
}
