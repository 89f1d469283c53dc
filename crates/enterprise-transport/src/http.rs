//! Blocking HTTP implementation of [`RemoteDirectory`].
//!
//! # Example
//!
//! ```ignore
//! use enterprise_transport::{ClientConfig, HttpEnterpriseClient, RemoteDirectory};
//!
//! let config = ClientConfig::new("https://cloud.gatling.io/api/public", token);
//! let client = HttpEnterpriseClient::connect(&config)?;
//! let teams = client.teams()?;
//! ```

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use enterprise_types::{
    DataList, Pkg, PkgIndex, Pool, RunSummary, ServerInformation, Simulation,
    SimulationClassName, SimulationCreationPayload, StartOptions, Team, Uuid,
};

use crate::directory::RemoteDirectory;
use crate::error::{validate_status, ApiError};

/// Connect and read timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const JSON_MEDIA_TYPE: &str = "application/json";
const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// Connection settings for [`HttpEnterpriseClient::connect`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    /// Name reported to the `/compatibility` check.
    pub client_name: String,
    /// Version reported to the `/compatibility` check.
    pub client_version: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_client(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.client_name = name.into();
        self.client_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gatling Enterprise public API client.
#[derive(Clone)]
pub struct HttpEnterpriseClient {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

struct HttpResponse {
    code: u16,
    body: String,
}

enum Body<'a> {
    Empty,
    Json(serde_json::Value),
    File(&'a Path),
}

impl HttpEnterpriseClient {
    /// Build a client and run the client/server compatibility check.
    ///
    /// Fails with [`ApiError::UnsupportedClient`] before any other call can
    /// be made when the server rejects this client version.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Self::new(&config.base_url, &config.token, config.timeout)?;
        client.check_version_support(&config.client_name, &config.client_version)?;
        Ok(client)
    }

    /// Build a client without contacting the server.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Ok(Self {
            base_url,
            token: token.to_string(),
            agent,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /compatibility`; HTTP 400 means this client is outdated.
    pub fn check_version_support(&self, client: &str, version: &str) -> Result<(), ApiError> {
        let request = self
            .request("GET", "compatibility")
            .query("clientName", client)
            .query("version", version);
        self.execute(request, Body::Empty, |code| {
            (code == 400).then(|| ApiError::UnsupportedClient {
                client: client.to_string(),
                version: version.to_string(),
            })
        })?;
        Ok(())
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}/{}", self.base_url, path))
            .set("Authorization", &self.token)
            .set("Accept", JSON_MEDIA_TYPE)
    }

    /// Send the request, apply the endpoint-specific status check, then the
    /// default one.
    fn execute(
        &self,
        request: ureq::Request,
        body: Body<'_>,
        on_status: impl Fn(u16) -> Option<ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method(), url = request.url(), "api call");
        let result = match body {
            Body::Empty => request.call(),
            Body::Json(value) => request.send_json(value),
            Body::File(path) => {
                let file = File::open(path)?;
                let length = file.metadata()?.len();
                request
                    .set("Content-Type", OCTET_STREAM_MEDIA_TYPE)
                    .set("Content-Length", &length.to_string())
                    .send(file)
            }
        };

        let response = match result {
            Ok(response) => HttpResponse {
                code: response.status(),
                body: response.into_string()?,
            },
            Err(ureq::Error::Status(code, response)) => HttpResponse {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            Err(ureq::Error::Transport(transport)) => {
                return Err(ApiError::Io(transport.to_string()))
            }
        };
        debug!(status = response.code, "api response");

        if let Some(err) = on_status(response.code) {
            return Err(err);
        }
        validate_status(response.code, &response.body)?;
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        on_status: impl Fn(u16) -> Option<ApiError>,
    ) -> Result<T, ApiError> {
        let response = self.execute(self.request("GET", path), Body::Empty, on_status)?;
        read_json(&response)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: ureq::Request,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Json(e.to_string()))?;
        let response = self.execute(request, Body::Json(value), |_| None)?;
        read_json(&response)
    }
}

impl RemoteDirectory for HttpEnterpriseClient {
    fn server_information(&self) -> Result<ServerInformation, ApiError> {
        self.get_json("info", |_| None)
    }

    fn simulations(&self) -> Result<Vec<Simulation>, ApiError> {
        self.get_json("simulations", |_| None)
    }

    fn simulation(&self, simulation_id: Uuid) -> Result<Simulation, ApiError> {
        self.get_json(&format!("simulations/{}", simulation_id), |code| {
            (code == 404).then_some(ApiError::SimulationNotFound(simulation_id))
        })
    }

    fn teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get_json::<DataList<Team>>("teams", |_| None)
            .map(|list| list.data)
    }

    fn pools(&self) -> Result<Vec<Pool>, ApiError> {
        self.get_json::<DataList<Pool>>("pools", |_| None)
            .map(|list| list.data)
    }

    fn packages(&self) -> Result<Vec<PkgIndex>, ApiError> {
        self.get_json::<DataList<PkgIndex>>("artifacts", |_| None)
            .map(|list| list.data)
    }

    fn package(&self, package_id: Uuid) -> Result<Pkg, ApiError> {
        self.get_json(&format!("artifacts/{}", package_id), |code| {
            (code == 404).then_some(ApiError::PackageNotFound(package_id))
        })
    }

    fn create_package(&self, name: &str, team_id: Option<Uuid>) -> Result<Pkg, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct PackageCreationPayload<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            team_id: Option<Uuid>,
        }

        self.send_json(
            self.request("POST", "artifacts"),
            &PackageCreationPayload { name, team_id },
        )
    }

    fn upload_package(&self, package_id: Uuid, file: &Path) -> Result<u64, ApiError> {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let request = self
            .request("PUT", &format!("artifacts/{}/content", package_id))
            .query("filename", &filename);
        self.execute(request, Body::File(file), |code| match code {
            404 => Some(ApiError::PackageNotFound(package_id)),
            413 => Some(ApiError::InvalidCall(
                "Package exceeds maximum allowed size (5 GB)".to_string(),
            )),
            _ => None,
        })?;
        Ok(std::fs::metadata(file)?.len())
    }

    fn create_simulation(
        &self,
        payload: &SimulationCreationPayload,
    ) -> Result<Simulation, ApiError> {
        self.send_json(self.request("POST", "simulations"), payload)
    }

    fn update_simulation_class_name(
        &self,
        simulation_id: Uuid,
        class_name: &str,
    ) -> Result<SimulationClassName, ApiError> {
        self.send_json(
            self.request("PUT", &format!("simulations/{}/classname", simulation_id)),
            &SimulationClassName {
                class_name: class_name.to_string(),
            },
        )
    }

    fn start_simulation(
        &self,
        simulation_id: Uuid,
        options: &StartOptions,
    ) -> Result<RunSummary, ApiError> {
        let request = self
            .request("POST", "simulations/start")
            .query("simulation", &simulation_id.to_string());
        self.send_json(request, options)
    }
}

fn read_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Json(e.to_string()))
}

/// Accept `http://` and `https://` URLs with a host; drop trailing slashes so
/// paths can be appended with a single `/`.
fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(trimmed.to_string()),
        _ => Err(ApiError::InvalidBaseUrl(base_url.to_string())),
    }
}
