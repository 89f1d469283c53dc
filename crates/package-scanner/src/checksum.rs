//! Packaging checksum.
//!
//! The fingerprint of a package is the base64 MD5 of the CRC-32 of every
//! archive entry except the manifest, taken in archive order. Rebuilding a JAR
//! rewrites the manifest timestamp but leaves the other CRCs alone, so an
//! unchanged project produces an unchanged checksum.
//!
//! Each CRC is fed as the shortest signed big-endian encoding of its value
//! (a leading `0x00` is kept when the high bit is set), which is how the
//! control plane computes the checksum it records for uploaded packages.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use zip::ZipArchive;

use crate::error::ChecksumError;

/// Entry excluded from the checksum.
pub const MANIFEST_NAME: &str = "META-INF/MANIFEST.MF";

/// Compute the checksum of the artifact at `path`.
pub fn compute_checksum(path: &Path) -> Result<String, ChecksumError> {
    let file = File::open(path)?;
    checksum_from_reader(BufReader::new(file))
}

/// Compute the checksum of an archive held by any seekable reader.
pub fn checksum_from_reader<R: Read + Seek>(reader: R) -> Result<String, ChecksumError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut md5 = Md5::new();
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        if entry.name() != MANIFEST_NAME {
            md5.update(crc_bytes(entry.crc32()));
        }
    }
    Ok(STANDARD.encode(md5.finalize()))
}

/// Shortest two's-complement big-endian encoding of a non-negative CRC.
fn crc_bytes(crc: u32) -> Vec<u8> {
    let bytes = u64::from(crc).to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
        start += 1;
    }
    bytes[start..].to_vec()
}
