//! Error taxonomy for manifest parsing and file validation.
//!
//! Callers are expected to match on the variant to produce actionable
//! messages; the Display text of the three validation kinds is stable.

/// Errors returned by manifest parsing and file validation.
///
/// I/O errors from the manifest file or a target file pass through
/// unmodified as [`Error::Io`]; nothing is caught or wrapped beyond the
/// variants below, and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest line did not match `<hex-digest> <mode-marker><filename>`.
    /// Carries the 1-based line number (counted after trimming the whole
    /// text and collapsing newline runs) and the offending line verbatim.
    #[error("Could not parse checksum file at line {line_number}: {line}")]
    ManifestParse { line_number: usize, line: String },

    /// A requested target file has no entry in the parsed manifest.
    #[error(r#"No checksum found in checksum file for "{filename}"."#)]
    NoChecksumFound { filename: String },

    /// The computed digest differs from the digest recorded in the manifest.
    #[error(r#"Generated checksum for "{filename}" did not match expected checksum."#)]
    ChecksumMismatch { filename: String },

    /// The configured digest algorithm name is not recognized. Surfaced
    /// lazily, when a digest is first computed (never at construction).
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The configured text encoding name is not recognized. Surfaced
    /// lazily, when a text-mode file is first read.
    #[error("unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    /// Underlying filesystem error (e.g. manifest or target file missing).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A spawned validation task failed to join (panic or abort).
    #[error("validation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// The target filename for the two filename-bearing kinds
    /// ([`Error::NoChecksumFound`] and [`Error::ChecksumMismatch`]).
    pub fn filename(&self) -> Option<&str> {
        match self {
            Error::NoChecksumFound { filename } | Error::ChecksumMismatch { filename } => {
                Some(filename)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_is_stable() {
        let err = Error::ManifestParse {
            line_number: 3,
            line: "not a checksum line".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not parse checksum file at line 3: not a checksum line"
        );

        let err = Error::NoChecksumFound {
            filename: "missing.tar.gz".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"No checksum found in checksum file for "missing.tar.gz"."#
        );

        let err = Error::ChecksumMismatch {
            filename: "corrupt.iso".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Generated checksum for "corrupt.iso" did not match expected checksum."#
        );
    }

    #[test]
    fn filename_accessor_covers_both_kinds() {
        let err = Error::NoChecksumFound {
            filename: "a".to_string(),
        };
        assert_eq!(err.filename(), Some("a"));

        let err = Error::ChecksumMismatch {
            filename: "b".to_string(),
        };
        assert_eq!(err.filename(), Some("b"));

        let err = Error::ManifestParse {
            line_number: 1,
            line: String::new(),
        };
        assert_eq!(err.filename(), None);
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io);
        match err {
            Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {:?}", other),
        }
    }
}
