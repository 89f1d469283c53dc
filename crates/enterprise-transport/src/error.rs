//! Errors raised by the remote directory.
//!
//! The mapping from HTTP status to variant is uniform across endpoints:
//! 401 and 403 are authentication problems, 400 carries the response body,
//! 404 on an item lookup names the resource kind, anything else non-2xx is
//! [`ApiError::Unhandled`]. Network failures surface as [`ApiError::Io`].
//! None of these are retried by the client.

use enterprise_types::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401: the API token is missing or invalid.
    Unauthorized,
    /// 403: the API token lacks the required role.
    Forbidden,
    /// 400: the server rejected the request; carries the response body.
    InvalidCall(String),
    /// 404 on a package lookup or upload.
    PackageNotFound(Uuid),
    /// 404 on a simulation lookup.
    SimulationNotFound(Uuid),
    /// Any other non-2xx response.
    Unhandled { code: u16, body: String },
    /// DNS, connection, timeout or local file errors.
    Io(String),
    /// Request or response body could not be (de)serialized.
    Json(String),
    /// The control plane no longer accepts this client version.
    UnsupportedClient { client: String, version: String },
    /// The configured base URL is not an HTTP(S) URL.
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Authentication errors, for which the fix is a different token.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(
                f,
                "Invalid API token: please configure a valid token with the role 'Configure'"
            ),
            ApiError::Forbidden => write!(
                f,
                "API token valid but lacks required privileges: please configure a token with the role 'Configure'"
            ),
            ApiError::InvalidCall(body) => write!(f, "Invalid API call: {}", body),
            ApiError::PackageNotFound(id) => write!(f, "Package {} not found", id),
            ApiError::SimulationNotFound(id) => write!(f, "Simulation {} not found", id),
            ApiError::Unhandled { code, body } => {
                write!(f, "Unhandled API response (status code {})", code)?;
                if !body.is_empty() {
                    write!(f, ": {}", body)?;
                }
                Ok(())
            }
            ApiError::Io(msg) => write!(f, "Failed to call the Gatling Enterprise API: {}", msg),
            ApiError::Json(msg) => write!(f, "Failed to process JSON: {}", msg),
            ApiError::UnsupportedClient { client, version } => write!(
                f,
                "Client {} version {} is no longer supported, please upgrade to the latest version",
                client, version
            ),
            ApiError::InvalidBaseUrl(url) => {
                write!(f, "'{}' is not a valid HTTP or HTTPS URL", url)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e.to_string())
    }
}

/// Default status validation applied after any endpoint-specific check.
pub fn validate_status(code: u16, body: &str) -> Result<(), ApiError> {
    match code {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        403 => Err(ApiError::Forbidden),
        400 => Err(ApiError::InvalidCall(body.to_string())),
        _ => Err(ApiError::Unhandled {
            code,
            body: body.to_string(),
        }),
    }
}
