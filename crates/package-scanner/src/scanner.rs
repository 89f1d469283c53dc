//! Simulation class discovery.
//!
//! A simulation is a concrete class whose superclass chain, followed through
//! the classes of the same archive, ends at one of the Gatling `Simulation`
//! base classes. Simulations extending a class from a dependency jar that is
//! not packaged are not detected.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::classfile::{parse_class_header, ClassHeader};
use crate::error::ScanError;

/// Highest class-file major version understood (Java 25).
pub const MAX_SUPPORTED_MAJOR_VERSION: u16 = 69;

/// `java version = major version - 44`
pub const JAVA_VERSION_OFFSET: u16 = 44;

/// Entry sizes come from the archive and are not trusted beyond this.
const MAX_ENTRY_PREALLOCATION: u64 = 1 << 20;

const SIMULATION_SUPERCLASSES: [&str; 2] = [
    "io/gatling/core/scenario/Simulation",
    "io/gatling/javaapi/core/Simulation",
];

/// The class compiled for the most recent Java release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighestJavaVersionClass {
    /// Dotted class name.
    pub class_name: String,
    pub java_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    /// Fully qualified names, sorted.
    pub simulation_classes: Vec<String>,
    /// `None` when the archive holds no class at all.
    pub highest_java_version: Option<HighestJavaVersionClass>,
}

/// Extracts candidate simulation classes from a packaged artifact.
pub trait ArtifactScanner {
    fn scan(&self, artifact: &Path) -> Result<ScanResult, ScanError>;
}

/// [`ArtifactScanner`] for JAR files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarSimulationScanner;

impl JarSimulationScanner {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactScanner for JarSimulationScanner {
    fn scan(&self, artifact: &Path) -> Result<ScanResult, ScanError> {
        let file = File::open(artifact).map_err(|e| ScanError::io(artifact, e))?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| ScanError::archive(artifact, e))?;

        let mut classes: HashMap<String, ClassHeader> = HashMap::new();
        let mut highest: Option<(u16, String)> = None;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| ScanError::archive(artifact, e))?;
            let name = entry.name().to_string();
            if !is_scanned_class(&name) {
                continue;
            }

            let mut bytes = Vec::with_capacity(preallocation(entry.size()));
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| ScanError::io(artifact, e))?;
            let header = parse_class_header(&bytes).map_err(|reason| ScanError::InvalidClass {
                entry: name.clone(),
                reason,
            })?;

            if header.major_version > MAX_SUPPORTED_MAJOR_VERSION {
                return Err(ScanError::UnsupportedBytecode {
                    class_name: dotted(&header.this_class),
                    major_version: header.major_version,
                });
            }
            if highest
                .as_ref()
                .map_or(true, |(major, _)| header.major_version > *major)
            {
                highest = Some((header.major_version, header.this_class.clone()));
            }
            classes.insert(header.this_class.clone(), header);
        }

        let simulation_classes: BTreeSet<String> = classes
            .values()
            .filter(|header| header.is_concrete() && extends_simulation(header, &classes))
            .map(|header| dotted(&header.this_class))
            .collect();

        debug!(
            artifact = %artifact.display(),
            classes = classes.len(),
            simulations = simulation_classes.len(),
            "scanned artifact"
        );

        Ok(ScanResult {
            simulation_classes: simulation_classes.into_iter().collect(),
            highest_java_version: highest.map(|(major, class_name)| HighestJavaVersionClass {
                class_name: dotted(&class_name),
                java_version: u32::from(major.saturating_sub(JAVA_VERSION_OFFSET)),
            }),
        })
    }
}

fn is_scanned_class(name: &str) -> bool {
    name.ends_with(".class")
        && !name.starts_with("META-INF/")
        && name.rsplit('/').next() != Some("module-info.class")
}

fn extends_simulation(header: &ClassHeader, classes: &HashMap<String, ClassHeader>) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = header;
    while let Some(parent) = current.super_class.as_deref() {
        if SIMULATION_SUPERCLASSES.contains(&parent) {
            return true;
        }
        // Guard against cyclic hierarchies in hand-crafted archives.
        if !seen.insert(parent) {
            return false;
        }
        match classes.get(parent) {
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}

fn preallocation(declared_size: u64) -> usize {
    declared_size.min(MAX_ENTRY_PREALLOCATION) as usize
}

fn dotted(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}
