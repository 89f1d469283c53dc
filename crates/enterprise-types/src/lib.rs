//! Shared types for the gatling-enterprise workspace.
//!
//! This crate holds the records exchanged with the Gatling Enterprise public
//! API so that the transport, the scanner and the plugin core agree on one
//! definition of each.
//!
//! - [`model`]: teams, pools, packages, simulations, run summaries and payloads
//! - [`properties`]: `key=value,key=value` property list parsing
//! - [`env_utils`]: environment variable helpers used for configuration

pub mod env_utils;
pub mod model;
pub mod properties;

// Re-export commonly used records at crate root
pub use model::{
    DataList, HostByPool, MeaningfulTimeWindow, PackageFile, Pkg, PkgIndex, Pool, RunSummary,
    ServerInformation, Simulation, SimulationClassName, SimulationCreationPayload,
    SimulationStartResult, StartOptions, Team, VersionSupported, Versions,
};
pub use properties::{parse_properties, InvalidProperty};

/// Re-exported so downstream crates use the same `Uuid` type.
pub use uuid::Uuid;
