//! Incremental digest computation over file streams.
//!
//! Algorithm names are resolved lazily: constructing a validator with an
//! unknown name succeeds, and the name only fails when a digest is first
//! computed. Reads in chunks to keep memory use bounded; suitable for
//! large files.

use crate::error::Error;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::path::Path;
use tokio::io::AsyncReadExt;

const BUF_SIZE: usize = 64 * 1024;

/// Incremental hasher over one of the supported digest algorithms.
///
/// Feed chunks with [`update`](Hasher::update), then take the lowercase hex
/// digest with [`finalize_hex`](Hasher::finalize_hex).
#[derive(Debug)]
pub enum Hasher {
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

impl Hasher {
    /// Resolves an algorithm name (case-insensitive). Fails with
    /// [`Error::UnsupportedAlgorithm`] for names outside the supported set.
    pub fn new(algorithm: &str) -> Result<Self, Error> {
        match algorithm.to_ascii_lowercase().as_str() {
            "sha224" => Ok(Hasher::Sha224(Sha224::new())),
            "sha256" => Ok(Hasher::Sha256(Sha256::new())),
            "sha384" => Ok(Hasher::Sha384(Sha384::new())),
            "sha512" => Ok(Hasher::Sha512(Sha512::new())),
            "blake3" => Ok(Hasher::Blake3(Box::new(blake3::Hasher::new()))),
            _ => Err(Error::UnsupportedAlgorithm(algorithm.to_string())),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha224(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha384(h) => h.update(data),
            Hasher::Sha512(h) => h.update(data),
            Hasher::Blake3(h) => {
                h.update(data);
            }
        }
    }

    /// Consumes the hasher and returns the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        match self {
            Hasher::Sha224(h) => hex::encode(h.finalize()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
            Hasher::Sha384(h) => hex::encode(h.finalize()),
            Hasher::Sha512(h) => hex::encode(h.finalize()),
            Hasher::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Streams the file at `path` through `hasher` and returns the lowercase
/// hex digest. Open and read errors propagate unmodified.
pub async fn digest_file(mut hasher: Hasher, path: &Path) -> Result<String, Error> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize_hex())
}
