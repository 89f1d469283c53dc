//! Local inspection of packaged Gatling artifacts.
//!
//! - [`checksum`]: the content fingerprint used to skip redundant uploads
//! - [`scanner`]: simulation class discovery and bytecode version detection
//! - [`classfile`]: the class-file header reader behind the scanner
//!
//! Nothing in this crate touches the network.

pub mod checksum;
pub mod classfile;
pub mod error;
pub mod scanner;

pub use checksum::{checksum_from_reader, compute_checksum, MANIFEST_NAME};
pub use error::{ChecksumError, ScanError};
pub use scanner::{
    ArtifactScanner, HighestJavaVersionClass, JarSimulationScanner, ScanResult,
    JAVA_VERSION_OFFSET, MAX_SUPPORTED_MAJOR_VERSION,
};
