//! Environment variable parsing utilities.
//!
//! Settings such as the API token or request timeout can come from the
//! environment so that CI jobs do not have to put secrets on the command line.
//!
//! # Example
//!
//! ```
//! use enterprise_types::env_utils::{env_var, env_var_or};
//!
//! let timeout: u64 = env_var_or("GATLING_ENTERPRISE_TIMEOUT_MS", 10_000);
//! let custom: Option<u64> = env_var("SOME_CUSTOM_VALUE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read a non-empty string variable.
///
/// Blank values count as unset, which is what CI systems produce for
/// undefined secrets.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable as a string with a default value.
pub fn env_string_or(key: &str, default: &str) -> String {
    env_string(key).unwrap_or_else(|| default.to_string())
}
