//! Checksum-gated package upload.

use std::path::Path;

use enterprise_transport::{ApiError, RemoteDirectory};
use enterprise_types::Uuid;
use package_scanner::{compute_checksum, ArtifactScanner};
use tracing::{debug, info};

use super::{PluginClient, PluginError};

/// What the gate did with the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Number of bytes sent.
    Uploaded(u64),
    /// The package already holds this content.
    Skipped,
}

impl<D: RemoteDirectory, S: ArtifactScanner> PluginClient<D, S> {
    /// Upload `file` into the package unless its recorded checksum already
    /// matches the file's.
    ///
    /// A package that cannot be found has no recorded checksum; the upload
    /// itself then reports the missing package.
    pub fn upload_package(&self, package_id: Uuid, file: &Path) -> Result<UploadOutcome, PluginError> {
        let remote_checksum = match self.directory.package(package_id) {
            Ok(pkg) => pkg.checksum().map(str::to_owned),
            Err(ApiError::PackageNotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        let local_checksum = compute_checksum(file)?;
        debug!(
            %package_id,
            local = %local_checksum,
            remote = remote_checksum.as_deref().unwrap_or("<none>"),
            "package checksums"
        );

        if remote_checksum.as_deref() == Some(local_checksum.as_str()) {
            info!("No code changes detected, skipping package upload");
            return Ok(UploadOutcome::Skipped);
        }

        let bytes = self.directory.upload_package(package_id, file)?;
        info!(%package_id, bytes, "Package uploaded");
        Ok(UploadOutcome::Uploaded(bytes))
    }

    /// Upload into the package of an existing simulation.
    pub fn upload_package_with_simulation_id(
        &self,
        simulation_id: Uuid,
        file: &Path,
    ) -> Result<UploadOutcome, PluginError> {
        let simulation = self.directory.simulation(simulation_id)?;
        self.upload_package(simulation.pkg_id, file)
    }
}
