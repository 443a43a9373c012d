//! Checksum-manifest parsing.
//!
//! A manifest is the text produced by tools like `sha256sum`: one entry per
//! line, `<hex-digest><SPACE><mode-marker><filename>`, where the marker is
//! a space (text mode) or `*` (binary mode) and the filename is the rest of
//! the line verbatim (embedded spaces allowed).

use crate::error::Error;
use std::collections::HashMap;

/// One manifest line: the recorded digest (hex, stored exactly as written,
/// never case-normalized) and whether the entry is binary mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub digest_hex: String,
    pub binary: bool,
}

/// Parsed manifest: filename to expected digest and mode.
///
/// Immutable once built. Duplicate filename lines are last-write-wins;
/// this is deliberate policy, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: HashMap<String, ManifestEntry>,
}

impl Manifest {
    /// Parses manifest text into a `Manifest`.
    ///
    /// The whole text is trimmed, then split on runs of `\r`/`\n`; line
    /// numbers in errors are 1-based over those post-trim lines. Parsing is
    /// all-or-nothing: the first non-matching line fails the entire parse
    /// and no value is produced (entries from earlier lines are discarded).
    pub fn parse(data: &str) -> Result<Self, Error> {
        tracing::debug!("parsing checksum file");
        let trimmed = data.trim();
        if trimmed.is_empty() {
            // An empty manifest is a malformed line 1, not an empty map.
            return Err(Error::ManifestParse {
                line_number: 1,
                line: String::new(),
            });
        }

        let mut entries = HashMap::new();
        for (idx, line) in trimmed
            .split(['\r', '\n'])
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let line_number = idx + 1;
            let Some((digest_hex, binary, filename)) = split_line(line) else {
                tracing::debug!(line_number, "could not parse checksum line");
                return Err(Error::ManifestParse {
                    line_number,
                    line: line.to_string(),
                });
            };
            entries.insert(
                filename.to_string(),
                ManifestEntry {
                    digest_hex: digest_hex.to_string(),
                    binary,
                },
            );
        }

        tracing::debug!(entries = entries.len(), "parsed checksum file");
        Ok(Manifest { entries })
    }

    /// Looks up the entry recorded for `filename` (the exact string from
    /// the manifest line).
    pub fn get(&self, filename: &str) -> Option<&ManifestEntry> {
        self.entries.get(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(filename, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Splits one line into `(digest, binary, filename)`, or `None` when the
/// line does not match the manifest format.
fn split_line(line: &str) -> Option<(&str, bool, &str)> {
    let (digest, rest) = line.split_once(' ')?;
    if digest.is_empty() || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let binary = match rest.chars().next()? {
        '*' => true,
        ' ' => false,
        _ => return None,
    };
    // Marker is a single ASCII char, so the remainder starts at byte 1.
    let filename = &rest[1..];
    if filename.is_empty() {
        return None;
    }
    Some((digest, binary, filename))
}
