//! Records exchanged with the Gatling Enterprise control plane.
//!
//! Field names follow the public API's camelCase JSON. Identifiers are UUIDs
//! on the wire and are kept as [`Uuid`] here so that a malformed id fails at
//! deserialization time rather than deep inside the workflow.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

/// Ownership/billing boundary for packages and simulations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team '{}', id='{}'", self.name, self.id)
    }
}

/// A group of load injectors, usually tied to a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pool {
    pub id: Uuid,
    pub name: String,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool {}", self.name)
    }
}

/// Descriptor of the last file uploaded to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Fingerprint of the uploaded content, see `package_scanner::checksum`.
    #[serde(default)]
    pub checksum: Option<String>,
}

/// A package (artifact) as returned by `GET /artifacts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pkg {
    pub id: Uuid,
    #[serde(default)]
    pub team_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub file: Option<PackageFile>,
}

impl Pkg {
    /// Checksum recorded for the last upload, if any content was ever uploaded.
    pub fn checksum(&self) -> Option<&str> {
        self.file.as_ref().and_then(|f| f.checksum.as_deref())
    }
}

/// A package entry from the `GET /artifacts` listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PkgIndex {
    pub id: Uuid,
    #[serde(default)]
    pub team_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl fmt::Display for PkgIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Package '{}', id='{}'", self.name, self.id)
    }
}

/// The remotely persisted configuration that gets run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    /// Fully qualified name of the simulation class.
    pub class_name: String,
    #[serde(rename = "build", with = "build_ref")]
    pub pkg_id: Uuid,
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Simulation '{}', id='{}'", self.name, self.id)
    }
}

/// The API nests the package id as `build: { pkgId }`.
mod build_ref {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use uuid::Uuid;

    #[derive(Serialize, Deserialize)]
    struct BuildRef {
        // Older servers name it `artifactId`.
        #[serde(rename = "pkgId", alias = "artifactId")]
        pkg_id: Uuid,
    }

    pub fn serialize<S: Serializer>(pkg_id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        BuildRef { pkg_id: *pkg_id }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        BuildRef::deserialize(deserializer).map(|b| b.pkg_id)
    }
}

/// Response of `PUT /simulations/{id}/classname`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationClassName {
    pub class_name: String,
}

/// Number of load-injector hosts to allocate in one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostByPool {
    pub size: NonZeroU32,
    pub weight: u32,
}

impl HostByPool {
    pub fn new(size: NonZeroU32, weight: u32) -> Self {
        Self { size, weight }
    }
}

impl Default for HostByPool {
    /// One host, no weight.
    fn default() -> Self {
        Self {
            size: NonZeroU32::MIN,
            weight: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeaningfulTimeWindow {
    pub ramp_up: u32,
    pub ramp_down: u32,
}

/// Body of `POST /simulations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationCreationPayload {
    pub name: String,
    pub team_id: Uuid,
    pub class_name: String,
    #[serde(rename = "build", with = "build_ref")]
    pub pkg_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_options: Option<String>,
    pub system_properties: BTreeMap<String, String>,
    pub environment_variables: BTreeMap<String, String>,
    pub ignore_global_properties: bool,
    pub meaningful_time_window: MeaningfulTimeWindow,
    pub hosts_by_pool: HashMap<Uuid, HostByPool>,
    pub use_pool_weights: bool,
    pub use_pool_dedicated_ips: bool,
}

impl SimulationCreationPayload {
    /// Payload with empty properties, no time window and pool weights/dedicated IPs disabled.
    pub fn new(
        name: impl Into<String>,
        team_id: Uuid,
        class_name: impl Into<String>,
        pkg_id: Uuid,
        hosts_by_pool: HashMap<Uuid, HostByPool>,
    ) -> Self {
        Self {
            name: name.into(),
            team_id,
            class_name: class_name.into(),
            pkg_id,
            jvm_options: None,
            system_properties: BTreeMap::new(),
            environment_variables: BTreeMap::new(),
            ignore_global_properties: false,
            meaningful_time_window: MeaningfulTimeWindow::default(),
            hosts_by_pool,
            use_pool_weights: false,
            use_pool_dedicated_ips: false,
        }
    }
}

/// Body of `POST /simulations/start`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOptions {
    pub extra_system_properties: BTreeMap<String, String>,
    pub extra_environment_variables: BTreeMap<String, String>,
}

impl StartOptions {
    pub fn new(
        extra_system_properties: BTreeMap<String, String>,
        extra_environment_variables: BTreeMap<String, String>,
    ) -> Self {
        Self {
            extra_system_properties,
            extra_environment_variables,
        }
    }
}

/// Proof that a run was accepted by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: Uuid,
    pub class_name: String,
    #[serde(alias = "reportsUrl")]
    pub reports_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSupported {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub java: VersionSupported,
}

/// Response of `GET /info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInformation {
    pub versions: Versions,
}

impl ServerInformation {
    /// Highest Java major version the injectors can run, when the server advertises one.
    pub fn max_java_version(&self) -> Option<u32> {
        self.versions
            .java
            .max
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Outcome of a successful start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStartResult {
    pub simulation: Simulation,
    pub run_summary: RunSummary,
    /// `true` when the simulation was created by this invocation.
    pub created_simulation: bool,
}

/// `{ "data": [...] }` envelope used by the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataList<T> {
    pub data: Vec<T>,
}
