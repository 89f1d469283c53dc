//! Local artifact inspection, no network access.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use package_scanner::{compute_checksum, ArtifactScanner, JarSimulationScanner};

use super::output;

#[derive(Parser, Debug)]
pub struct ChecksumCmd {
    /// Packaged simulation artifact (JAR)
    #[arg(long)]
    pub file: PathBuf,
}

impl ChecksumCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let checksum = compute_checksum(&self.file)?;
        println!("{}", output::format_checksum(&self.file, &checksum, json_output));
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Packaged simulation artifact (JAR)
    #[arg(long)]
    pub file: PathBuf,
}

impl ScanCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let result = JarSimulationScanner::new().scan(&self.file)?;
        println!("{}", output::format_scan(&result, json_output));
        Ok(())
    }
}
