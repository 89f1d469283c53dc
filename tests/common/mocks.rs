//! In-memory collaborators for the plugin workflows.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::Path;

use enterprise_transport::{ApiError, RemoteDirectory};
use enterprise_types::{
    PackageFile, Pkg, PkgIndex, Pool, RunSummary, ServerInformation, Simulation,
    SimulationClassName, SimulationCreationPayload, StartOptions, Team, Uuid, VersionSupported,
    Versions,
};
use gatling_enterprise::PromptIo;
use package_scanner::{
    compute_checksum, ArtifactScanner, HighestJavaVersionClass, ScanError, ScanResult,
};

/// A recorded remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ServerInformation,
    Simulations,
    Simulation(Uuid),
    Teams,
    Pools,
    Packages,
    Package(Uuid),
    CreatePackage { name: String, team_id: Option<Uuid> },
    Upload(Uuid),
    CreateSimulation(SimulationCreationPayload),
    UpdateClassName { simulation_id: Uuid, class_name: String },
    Start { simulation_id: Uuid, options: StartOptions },
}

#[derive(Default)]
struct State {
    max_java_version: Option<String>,
    teams: Vec<Team>,
    pools: Vec<Pool>,
    packages: Vec<Pkg>,
    simulations: Vec<Simulation>,
    start_error: Option<ApiError>,
    calls: Vec<Call>,
}

/// Remote directory backed by vectors. Uploads record the file checksum on
/// the package the way the control plane does.
pub struct FakeDirectory {
    state: RefCell<State>,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDirectory {
    pub fn new() -> Self {
        let state = State {
            max_java_version: Some("21".to_string()),
            ..Default::default()
        };
        Self {
            state: RefCell::new(state),
        }
    }

    pub fn set_max_java_version(&self, max: Option<&str>) {
        self.state.borrow_mut().max_java_version = max.map(str::to_string);
    }

    pub fn fail_start(&self, error: ApiError) {
        self.state.borrow_mut().start_error = Some(error);
    }

    pub fn add_team(&self, name: &str) -> Team {
        let team = Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.state.borrow_mut().teams.push(team.clone());
        team
    }

    pub fn add_pool(&self, name: &str) -> Pool {
        let pool = Pool {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.state.borrow_mut().pools.push(pool.clone());
        pool
    }

    pub fn add_package(&self, name: &str, team_id: Option<Uuid>, checksum: Option<&str>) -> Pkg {
        let pkg = Pkg {
            id: Uuid::new_v4(),
            team_id,
            name: name.to_string(),
            file: checksum.map(|c| PackageFile {
                filename: Some(format!("{}.jar", name)),
                version: None,
                checksum: Some(c.to_string()),
            }),
        };
        self.state.borrow_mut().packages.push(pkg.clone());
        pkg
    }

    pub fn add_simulation(&self, name: &str, class_name: &str, pkg: &Pkg, team: &Team) -> Simulation {
        let simulation = Simulation {
            id: Uuid::new_v4(),
            name: name.to_string(),
            team_id: team.id,
            class_name: class_name.to_string(),
            pkg_id: pkg.id,
        };
        self.state.borrow_mut().simulations.push(simulation.clone());
        simulation
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn uploads(&self) -> Vec<Uuid> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Upload(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn created_packages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreatePackage { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn created_simulations(&self) -> Vec<SimulationCreationPayload> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateSimulation(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn stored_simulation(&self, id: Uuid) -> Option<Simulation> {
        self.state
            .borrow()
            .simulations
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl RemoteDirectory for FakeDirectory {
    fn server_information(&self) -> Result<ServerInformation, ApiError> {
        self.record(Call::ServerInformation);
        Ok(ServerInformation {
            versions: Versions {
                java: VersionSupported {
                    min: Some("1.8".to_string()),
                    max: self.state.borrow().max_java_version.clone(),
                },
            },
        })
    }

    fn simulations(&self) -> Result<Vec<Simulation>, ApiError> {
        self.record(Call::Simulations);
        Ok(self.state.borrow().simulations.clone())
    }

    fn simulation(&self, simulation_id: Uuid) -> Result<Simulation, ApiError> {
        self.record(Call::Simulation(simulation_id));
        self.stored_simulation(simulation_id)
            .ok_or(ApiError::SimulationNotFound(simulation_id))
    }

    fn teams(&self) -> Result<Vec<Team>, ApiError> {
        self.record(Call::Teams);
        Ok(self.state.borrow().teams.clone())
    }

    fn pools(&self) -> Result<Vec<Pool>, ApiError> {
        self.record(Call::Pools);
        Ok(self.state.borrow().pools.clone())
    }

    fn packages(&self) -> Result<Vec<PkgIndex>, ApiError> {
        self.record(Call::Packages);
        Ok(self
            .state
            .borrow()
            .packages
            .iter()
            .map(|pkg| PkgIndex {
                id: pkg.id,
                team_id: pkg.team_id,
                name: pkg.name.clone(),
                file_name: pkg.file.as_ref().and_then(|f| f.filename.clone()),
            })
            .collect())
    }

    fn package(&self, package_id: Uuid) -> Result<Pkg, ApiError> {
        self.record(Call::Package(package_id));
        self.state
            .borrow()
            .packages
            .iter()
            .find(|p| p.id == package_id)
            .cloned()
            .ok_or(ApiError::PackageNotFound(package_id))
    }

    fn create_package(&self, name: &str, team_id: Option<Uuid>) -> Result<Pkg, ApiError> {
        self.record(Call::CreatePackage {
            name: name.to_string(),
            team_id,
        });
        Ok(self.add_package(name, team_id, None))
    }

    fn upload_package(&self, package_id: Uuid, file: &Path) -> Result<u64, ApiError> {
        self.record(Call::Upload(package_id));
        let checksum = compute_checksum(file).map_err(|e| ApiError::Io(e.to_string()))?;
        let mut state = self.state.borrow_mut();
        let pkg = state
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or(ApiError::PackageNotFound(package_id))?;
        pkg.file = Some(PackageFile {
            filename: file.file_name().map(|n| n.to_string_lossy().into_owned()),
            version: None,
            checksum: Some(checksum),
        });
        Ok(std::fs::metadata(file)?.len())
    }

    fn create_simulation(
        &self,
        payload: &SimulationCreationPayload,
    ) -> Result<Simulation, ApiError> {
        self.record(Call::CreateSimulation(payload.clone()));
        let simulation = Simulation {
            id: Uuid::new_v4(),
            name: payload.name.clone(),
            team_id: payload.team_id,
            class_name: payload.class_name.clone(),
            pkg_id: payload.pkg_id,
        };
        self.state.borrow_mut().simulations.push(simulation.clone());
        Ok(simulation)
    }

    fn update_simulation_class_name(
        &self,
        simulation_id: Uuid,
        class_name: &str,
    ) -> Result<SimulationClassName, ApiError> {
        self.record(Call::UpdateClassName {
            simulation_id,
            class_name: class_name.to_string(),
        });
        let mut state = self.state.borrow_mut();
        let simulation = state
            .simulations
            .iter_mut()
            .find(|s| s.id == simulation_id)
            .ok_or(ApiError::SimulationNotFound(simulation_id))?;
        simulation.class_name = class_name.to_string();
        Ok(SimulationClassName {
            class_name: class_name.to_string(),
        })
    }

    fn start_simulation(
        &self,
        simulation_id: Uuid,
        options: &StartOptions,
    ) -> Result<RunSummary, ApiError> {
        self.record(Call::Start {
            simulation_id,
            options: options.clone(),
        });
        if let Some(error) = self.state.borrow().start_error.clone() {
            return Err(error);
        }
        let simulation = self
            .stored_simulation(simulation_id)
            .ok_or(ApiError::SimulationNotFound(simulation_id))?;
        let run_id = Uuid::new_v4();
        Ok(RunSummary {
            run_id,
            class_name: simulation.class_name,
            reports_path: format!("/o/test/simulations/reports/{}", run_id),
        })
    }
}

/// Scanner returning a fixed result whatever the file.
pub struct FakeScanner {
    result: ScanResult,
}

impl FakeScanner {
    /// Classes compiled for Java 11.
    pub fn with_classes(classes: &[&str]) -> Self {
        Self::compiled_for(classes, 11)
    }

    pub fn compiled_for(classes: &[&str], java_version: u32) -> Self {
        Self {
            result: ScanResult {
                simulation_classes: classes.iter().map(|c| c.to_string()).collect(),
                highest_java_version: classes.first().map(|c| HighestJavaVersionClass {
                    class_name: c.to_string(),
                    java_version,
                }),
            },
        }
    }
}

impl ArtifactScanner for FakeScanner {
    fn scan(&self, _artifact: &Path) -> Result<ScanResult, ScanError> {
        Ok(self.result.clone())
    }
}

/// Prompt answering from a fixed list of lines; end of input once exhausted.
#[derive(Default)]
pub struct ScriptedPrompt {
    input: VecDeque<String>,
    pub output: String,
}

impl ScriptedPrompt {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| l.to_string()).collect(),
            output: String::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl PromptIo for ScriptedPrompt {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}
