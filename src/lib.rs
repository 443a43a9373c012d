//! Validate files against a checksum manifest file, as produced by tools
//! like `sha256sum`. Parses the manifest into a lookup table, then streams
//! each target file through the configured digest and reports exactly
//! which file failed and why.

pub mod digest;
pub mod encoding;
pub mod error;
pub mod manifest;
pub mod validator;

pub use error::Error;
pub use manifest::{Manifest, ManifestEntry};
pub use validator::{ChecksumValidator, FilesToCheck, ValidatorConfig};

use std::path::{Path, PathBuf};

/// Validates `files` (relative to `base_dir`) against the checksum
/// manifest at `checksum_filename`, using the named digest algorithm.
///
/// Convenience for callers who do not need to reuse the parsed manifest:
/// equivalent to constructing a [`ChecksumValidator`] and calling
/// [`validate`](ChecksumValidator::validate) once.
pub async fn validate(
    algorithm: &str,
    checksum_filename: impl Into<PathBuf>,
    base_dir: impl AsRef<Path>,
    files: impl Into<FilesToCheck>,
) -> Result<(), Error> {
    ChecksumValidator::new(algorithm, checksum_filename)
        .validate(base_dir, files)
        .await
}
