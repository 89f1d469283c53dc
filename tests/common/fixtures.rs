//! Artifact fixtures.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

pub const JAVA_SIMULATION: &str = "io/gatling/javaapi/core/Simulation";

/// Minimal class file: magic, version, a four-entry constant pool, flags,
/// this/super and empty tables.
pub fn class_bytes(major: u16, this: &str, super_class: &str) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&major.to_be_bytes());
    out.extend_from_slice(&5u16.to_be_bytes());
    for (index, name) in [(1u16, this), (3u16, super_class)] {
        out.push(1);
        out.extend_from_slice(&(name.len() as u16).to_be_bytes());
        out.extend_from_slice(name.as_bytes());
        out.push(7);
        out.extend_from_slice(&index.to_be_bytes());
    }
    // public
    out.extend_from_slice(&0x0021u16.to_be_bytes());
    out.extend_from_slice(&2u16.to_be_bytes());
    out.extend_from_slice(&4u16.to_be_bytes());
    out.extend_from_slice(&[0; 8]);
    out
}

/// Write a JAR holding `entries` at `dir/name`.
pub fn write_jar(dir: &Path, name: &str, entries: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    for (entry, bytes) in entries {
        writer.start_file(*entry, FileOptions::default()).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// A JAR with a manifest and one Java simulation per dotted class name.
pub fn simulation_jar(dir: &Path, name: &str, manifest: &str, classes: &[&str]) -> PathBuf {
    let mut entries = vec![("META-INF/MANIFEST.MF".to_string(), manifest.as_bytes().to_vec())];
    for class_name in classes {
        let internal = class_name.replace('.', "/");
        entries.push((
            format!("{}.class", internal),
            class_bytes(55, &internal, JAVA_SIMULATION),
        ));
    }
    let entries: Vec<(&str, Vec<u8>)> = entries
        .iter()
        .map(|(entry, bytes)| (entry.as_str(), bytes.clone()))
        .collect();
    write_jar(dir, name, &entries)
}
