//! The remote directory capability.
//!
//! Everything the plugin core needs from the control plane goes through this
//! trait, so the resolution workflow never depends on HTTP details and can be
//! driven by an in-memory directory in tests.

use std::path::Path;

use enterprise_types::{
    Pkg, PkgIndex, Pool, RunSummary, ServerInformation, Simulation, SimulationClassName,
    SimulationCreationPayload, StartOptions, Team, Uuid,
};

use crate::error::ApiError;

/// CRUD and listing operations against the Gatling Enterprise public API.
///
/// Every call is blocking. Implementations never retry.
pub trait RemoteDirectory {
    /// `GET /info`
    fn server_information(&self) -> Result<ServerInformation, ApiError>;

    /// `GET /simulations`
    fn simulations(&self) -> Result<Vec<Simulation>, ApiError>;

    /// `GET /simulations/{id}`, [`ApiError::SimulationNotFound`] on 404.
    fn simulation(&self, simulation_id: Uuid) -> Result<Simulation, ApiError>;

    /// `GET /teams`
    fn teams(&self) -> Result<Vec<Team>, ApiError>;

    /// `GET /pools`
    fn pools(&self) -> Result<Vec<Pool>, ApiError>;

    /// `GET /artifacts`
    fn packages(&self) -> Result<Vec<PkgIndex>, ApiError>;

    /// `GET /artifacts/{id}`, [`ApiError::PackageNotFound`] on 404.
    fn package(&self, package_id: Uuid) -> Result<Pkg, ApiError>;

    /// `POST /artifacts`
    fn create_package(&self, name: &str, team_id: Option<Uuid>) -> Result<Pkg, ApiError>;

    /// `PUT /artifacts/{id}/content`; returns the number of bytes uploaded.
    fn upload_package(&self, package_id: Uuid, file: &Path) -> Result<u64, ApiError>;

    /// `POST /simulations`
    fn create_simulation(
        &self,
        payload: &SimulationCreationPayload,
    ) -> Result<Simulation, ApiError>;

    /// `PUT /simulations/{id}/classname`
    fn update_simulation_class_name(
        &self,
        simulation_id: Uuid,
        class_name: &str,
    ) -> Result<SimulationClassName, ApiError>;

    /// `POST /simulations/start?simulation={id}`
    fn start_simulation(
        &self,
        simulation_id: Uuid,
        options: &StartOptions,
    ) -> Result<RunSummary, ApiError>;
}
