//! Scanner and checksum errors.

use std::path::{Path, PathBuf};

/// Failure to compute a package checksum.
#[derive(Debug)]
pub enum ChecksumError {
    /// The artifact could not be read.
    Io(std::io::Error),
    /// The artifact is not a readable ZIP archive.
    Archive(String),
}

impl std::fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumError::Io(e) => write!(f, "Unable to read package file: {}", e),
            ChecksumError::Archive(msg) => {
                write!(f, "Unable to compute package checksum: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChecksumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChecksumError::Io(e) => Some(e),
            ChecksumError::Archive(_) => None,
        }
    }
}

impl From<std::io::Error> for ChecksumError {
    fn from(e: std::io::Error) -> Self {
        ChecksumError::Io(e)
    }
}

impl From<zip::result::ZipError> for ChecksumError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => ChecksumError::Io(io),
            other => ChecksumError::Archive(other.to_string()),
        }
    }
}

/// Failure to scan an artifact for simulation classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The artifact could not be opened or an entry could not be read.
    Io { path: PathBuf, message: String },
    /// The artifact is not a readable ZIP archive.
    Archive { path: PathBuf, message: String },
    /// A `.class` entry is not a well-formed class file.
    InvalidClass { entry: String, reason: String },
    /// A class uses a class-file format newer than this scanner understands.
    UnsupportedBytecode { class_name: String, major_version: u16 },
}

impl ScanError {
    pub(crate) fn io(path: &Path, e: impl std::fmt::Display) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }

    pub(crate) fn archive(path: &Path, e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => ScanError::io(path, io),
            other => ScanError::Archive {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Io { path, message } => write!(
                f,
                "Unable to scan simulation classes in file {}: {}",
                path.display(),
                message
            ),
            ScanError::Archive { path, message } => write!(
                f,
                "File {} is not a valid package archive: {}",
                path.display(),
                message
            ),
            ScanError::InvalidClass { entry, reason } => {
                write!(f, "Invalid class file {}: {}", entry, reason)
            }
            ScanError::UnsupportedBytecode {
                class_name,
                major_version,
            } => write!(
                f,
                "Class {} uses class file major version {}, which is not supported yet",
                class_name, major_version
            ),
        }
    }
}

impl std::error::Error for ScanError {}
