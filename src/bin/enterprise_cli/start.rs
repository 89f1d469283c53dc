//! Start command - resolve and run a simulation

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use uuid::Uuid;

use enterprise_types::parse_properties;
use gatling_enterprise::{
    BatchPlugin, Choice, Chooser, EnterpriseSettings, InteractivePlugin, ResolutionConfig,
    StdPrompt,
};

use super::{output, plugin_client};

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Packaged simulation artifact (JAR)
    #[arg(long)]
    pub file: PathBuf,

    /// Start this existing simulation
    #[arg(long)]
    pub simulation_id: Option<Uuid>,

    /// Team owning a new simulation (required when the token sees several teams)
    #[arg(long)]
    pub team_id: Option<Uuid>,

    /// Group id, prefixes the name of a new package
    #[arg(long)]
    pub group_id: Option<String>,

    /// Artifact id naming a new package (default: the file name without extension)
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// Fully qualified simulation class to run
    #[arg(long)]
    pub simulation_class: Option<String>,

    /// Upload into this existing package instead of creating one
    #[arg(long)]
    pub package_id: Option<Uuid>,

    /// Extra system properties: "key1=value1,key2=value2"
    #[arg(long, value_name = "PROPERTIES", default_value = "")]
    pub system_properties: String,

    /// Extra environment variables: "KEY1=value1,KEY2=value2"
    #[arg(long, value_name = "PROPERTIES", default_value = "")]
    pub environment_variables: String,

    /// Ask for anything the options leave open
    #[arg(long)]
    pub interactive: bool,
}

impl StartCmd {
    pub fn execute(&self, settings: &EnterpriseSettings, json_output: bool) -> Result<()> {
        let config = self.resolution_config()?;
        let client = plugin_client(settings)?;

        let outcome = if self.interactive {
            InteractivePlugin::new(client, Chooser::new(StdPrompt)).create_or_start(&config)
        } else {
            BatchPlugin::new(client)
                .resolve_and_run(&config)
                .map(Choice::Selected)
        };

        match outcome? {
            Choice::Selected(result) => {
                println!("{}", output::format_start_result(&result, json_output));
            }
            Choice::Cancelled => println!("{}", output::format_cancelled(json_output)),
        }
        Ok(())
    }

    pub fn resolution_config(&self) -> Result<ResolutionConfig> {
        let system_properties =
            parse_properties(&self.system_properties).context("Invalid --system-properties")?;
        let environment_variables = parse_properties(&self.environment_variables)
            .context("Invalid --environment-variables")?;
        let artifact_id = self.artifact_id.clone().or_else(|| {
            self.file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        });

        Ok(ResolutionConfig {
            simulation_id: self.simulation_id,
            team_id: self.team_id,
            group_id: self.group_id.clone(),
            artifact_id,
            simulation_class: self.simulation_class.clone(),
            package_id: self.package_id,
            system_properties,
            environment_variables,
            artifact_file: self.file.clone(),
        })
    }
}
