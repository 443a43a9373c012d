//! The checksum validator: load a manifest, then check target files
//! against it concurrently.

use crate::digest::{self, Hasher};
use crate::encoding;
use crate::error::Error;
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Validator options. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Text encoding used when reading the manifest and non-binary target
    /// files. Binary-mode entries always use the byte-preserving encoding
    /// regardless of this setting.
    pub default_text_encoding: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_text_encoding: encoding::DEFAULT_TEXT.to_string(),
        }
    }
}

/// One or more filenames to validate, relative to a base directory.
///
/// Stands in for "a single name or a list of names": `From` impls cover
/// the common caller shapes, so `validate` accepts either directly.
#[derive(Debug, Clone)]
pub struct FilesToCheck(Vec<String>);

impl FilesToCheck {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for FilesToCheck {
    fn from(filename: &str) -> Self {
        FilesToCheck(vec![filename.to_string()])
    }
}

impl From<String> for FilesToCheck {
    fn from(filename: String) -> Self {
        FilesToCheck(vec![filename])
    }
}

impl From<Vec<String>> for FilesToCheck {
    fn from(filenames: Vec<String>) -> Self {
        FilesToCheck(filenames)
    }
}

impl From<&[&str]> for FilesToCheck {
    fn from(filenames: &[&str]) -> Self {
        FilesToCheck(filenames.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilesToCheck {
    fn from(filenames: [&str; N]) -> Self {
        FilesToCheck(filenames.iter().map(|f| f.to_string()).collect())
    }
}

/// Validates files against a checksum manifest.
///
/// Construct with an algorithm name and a manifest path, then call
/// [`validate`](ChecksumValidator::validate). The manifest field starts
/// unset and is replaced atomically by a successful parse; a failed parse
/// leaves the previous state untouched. The algorithm name is stored
/// verbatim and only checked when a digest is first computed.
pub struct ChecksumValidator {
    algorithm: String,
    checksum_filename: PathBuf,
    config: ValidatorConfig,
    manifest: Option<Arc<Manifest>>,
}

/// Everything one spawned validation needs, owned so the task is 'static.
struct CheckContext {
    manifest: Option<Arc<Manifest>>,
    algorithm: String,
    text_encoding: String,
    base_dir: PathBuf,
    filename: String,
}

impl ChecksumValidator {
    pub fn new(algorithm: impl Into<String>, checksum_filename: impl Into<PathBuf>) -> Self {
        Self::with_config(algorithm, checksum_filename, ValidatorConfig::default())
    }

    pub fn with_config(
        algorithm: impl Into<String>,
        checksum_filename: impl Into<PathBuf>,
        config: ValidatorConfig,
    ) -> Self {
        ChecksumValidator {
            algorithm: algorithm.into(),
            checksum_filename: checksum_filename.into(),
            config,
            manifest: None,
        }
    }

    /// The encoding used for a given mode: byte-preserving for binary
    /// entries, the configured default for text entries.
    pub fn encoding(&self, binary: bool) -> &str {
        if binary {
            encoding::BINARY
        } else {
            &self.config.default_text_encoding
        }
    }

    /// The manifest from the last successful parse, if any.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_deref()
    }

    /// Parses manifest text and stores the result. All-or-nothing: on a
    /// parse error the previously stored manifest (if any) is kept.
    pub fn parse_checksum_file(&mut self, data: &str) -> Result<(), Error> {
        let manifest = Manifest::parse(data)?;
        self.manifest = Some(Arc::new(manifest));
        Ok(())
    }

    /// Reads the whole file at `path` with the mode-appropriate encoding.
    /// Filesystem errors propagate unmodified.
    pub async fn read_file(&self, path: impl AsRef<Path>, binary: bool) -> Result<String, Error> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), binary, "reading file");
        let bytes = tokio::fs::read(path).await?;
        encoding::decode(&bytes, self.encoding(binary))
    }

    /// Primary entry point: reads and parses the manifest file (text mode,
    /// path used as given, not joined with `base_dir`), then validates
    /// every named file against it.
    pub async fn validate(
        &mut self,
        base_dir: impl AsRef<Path>,
        files: impl Into<FilesToCheck>,
    ) -> Result<(), Error> {
        let data = self.read_file(&self.checksum_filename, false).await?;
        self.parse_checksum_file(&data)?;
        self.validate_files(base_dir, files).await
    }

    /// Validates a single file against the stored manifest. No file I/O
    /// happens when the manifest has no entry for `filename`.
    pub async fn validate_file(
        &self,
        base_dir: impl AsRef<Path>,
        filename: &str,
    ) -> Result<(), Error> {
        check_one(self.check_context(base_dir.as_ref(), filename.to_string())).await
    }

    /// Validates every named file, one concurrent task per file. Returns
    /// the error from whichever validation is observed to fail first;
    /// failures are not aggregated. Succeeds only when every file passes.
    pub async fn validate_files(
        &self,
        base_dir: impl AsRef<Path>,
        files: impl Into<FilesToCheck>,
    ) -> Result<(), Error> {
        let base_dir = base_dir.as_ref();
        let files: FilesToCheck = files.into();
        let mut join_set = tokio::task::JoinSet::new();
        for filename in files.into_vec() {
            join_set.spawn(check_one(self.check_context(base_dir, filename)));
        }
        while let Some(res) = join_set.join_next().await {
            res??;
        }
        Ok(())
    }

    fn check_context(&self, base_dir: &Path, filename: String) -> CheckContext {
        CheckContext {
            manifest: self.manifest.clone(),
            algorithm: self.algorithm.clone(),
            text_encoding: self.config.default_text_encoding.clone(),
            base_dir: base_dir.to_path_buf(),
            filename,
        }
    }
}

/// Checks one file: manifest lookup, stream through the digest, compare.
async fn check_one(ctx: CheckContext) -> Result<(), Error> {
    let entry = ctx
        .manifest
        .as_deref()
        .and_then(|m| m.get(&ctx.filename))
        .cloned()
        .ok_or_else(|| Error::NoChecksumFound {
            filename: ctx.filename.clone(),
        })?;

    // Absolute filenames short-circuit the base directory; `.`/`..` are
    // left to the OS at open time.
    let full_path = ctx.base_dir.join(&ctx.filename);
    tracing::debug!(path = %full_path.display(), binary = entry.binary, "validating file");

    let hasher = Hasher::new(&ctx.algorithm)?;
    let calculated = if entry.binary {
        digest::digest_file(hasher, &full_path).await?
    } else {
        let bytes = tokio::fs::read(&full_path).await?;
        let text = encoding::decode(&bytes, &ctx.text_encoding)?;
        let mut hasher = hasher;
        hasher.update(text.as_bytes());
        hasher.finalize_hex()
    };

    tracing::debug!(expected = %entry.digest_hex, actual = %calculated, "comparing digests");
    if calculated != entry.digest_hex {
        return Err(Error::ChecksumMismatch {
            filename: ctx.filename,
        });
    }
    Ok(())
}
