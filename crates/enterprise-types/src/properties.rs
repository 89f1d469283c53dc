//! Parsing of `key1=value1,key2=value2` property lists.
//!
//! Used for system properties and environment variables passed on the command
//! line. Entries without `=` are dropped; a value may itself contain `=`.

use std::collections::BTreeMap;
use std::fmt;

/// A property list that cannot be turned into a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidProperty {
    /// The key contains whitespace.
    WhitespaceInKey(String),
    /// The key was given more than once.
    DuplicateKey(String),
}

impl fmt::Display for InvalidProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidProperty::WhitespaceInKey(key) => write!(
                f,
                "A property key cannot contain whitespaces, invalid property: {}",
                key
            ),
            InvalidProperty::DuplicateKey(key) => {
                write!(f, "Property '{}' is defined more than once", key)
            }
        }
    }
}

impl std::error::Error for InvalidProperty {}

/// Parse a property list into an ordered map.
///
/// Keys and values are trimmed. A key may appear only once.
pub fn parse_properties(properties: &str) -> Result<BTreeMap<String, String>, InvalidProperty> {
    let mut map = BTreeMap::new();
    for entry in properties.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.chars().any(char::is_whitespace) {
            return Err(InvalidProperty::WhitespaceInKey(key.to_string()));
        }
        if map.insert(key.to_string(), value.trim().to_string()).is_some() {
            return Err(InvalidProperty::DuplicateKey(key.to_string()));
        }
    }
    Ok(map)
}
