// src/hash.rs

//! MD5 hashing for SB ingredient checksums
//!
//! Scripture Burrito records an MD5 digest for every ingredient. The digest
//! is used for identification and integrity checking only, never for
//! security decisions.

use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// A digest together with the number of bytes that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Lowercase hex MD5
    pub md5: String,
    /// Number of bytes hashed
    pub size: u64,
}

/// Compute the MD5 of a byte slice as lowercase hex
pub fn md5_bytes(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Stream a reader through MD5, counting bytes as they go
pub fn md5_reader<R: Read>(reader: &mut R) -> io::Result<FileDigest> {
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];
    let mut size = 0u64;

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        size += n as u64;
    }

    Ok(FileDigest {
        md5: hex::encode(hasher.finalize()),
        size,
    })
}

/// Hash a file on disk without loading it into memory
pub fn md5_file(path: &Path) -> io::Result<FileDigest> {
    let mut file = File::open(path)?;
    md5_reader(&mut file)
}

/// A checksum or size mismatch found while verifying a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyError {
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "md5 mismatch: expected {}, got {}", self.expected, self.actual)
    }
}

impl std::error::Error for VerifyError {}

/// Verify a file matches an expected MD5
pub fn verify_file(path: &Path, expected: &str) -> Result<FileDigest, VerifyError> {
    let digest = md5_file(path).map_err(|_| VerifyError {
        expected: expected.to_string(),
        actual: "<file read error>".to_string(),
    })?;

    if digest.md5 == expected.to_lowercase() {
        Ok(digest)
    } else {
        Err(VerifyError {
            expected: expected.to_string(),
            actual: digest.md5,
        })
    }
}
