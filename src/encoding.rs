//! Text-encoding selection for manifest and target-file reads.
//!
//! Manifest mode markers distinguish binary entries (`*`, hashed byte-exact)
//! from text entries (space, read with the configured text encoding). The
//! binary pseudo-encoding maps each byte to the char of the same value, so
//! content survives a trip through a `String` unchanged.

use crate::error::Error;

/// Encoding name used for binary-mode reads (byte-value preserving).
pub const BINARY: &str = "binary";

/// Default text encoding when none is configured.
pub const DEFAULT_TEXT: &str = "utf8";

/// Decodes raw file bytes to text under the named encoding.
///
/// Supported names: `utf8`/`utf-8` (lossy), `binary`/`latin1` (byte-value
/// preserving), and `hex` (bytes rendered as a lowercase hex string).
/// Unknown names fail with [`Error::UnsupportedEncoding`]; like algorithm
/// names, encodings are only checked when actually used.
pub fn decode(bytes: &[u8], encoding: &str) -> Result<String, Error> {
    match encoding {
        BINARY | "latin1" => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        DEFAULT_TEXT | "utf-8" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "hex" => Ok(hex::encode(bytes)),
        other => Err(Error::UnsupportedEncoding(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_decodes_text() {
        assert_eq!(decode(b"hello\n", "utf8").unwrap(), "hello\n");
        assert_eq!(decode("grüße".as_bytes(), "utf-8").unwrap(), "grüße");
    }

    #[test]
    fn binary_preserves_byte_values() {
        let decoded = decode(&[0x00, 0x7f, 0x80, 0xff], "binary").unwrap();
        let bytes: Vec<u8> = decoded.chars().map(|c| c as u8).collect();
        assert_eq!(bytes, vec![0x00, 0x7f, 0x80, 0xff]);
    }

    #[test]
    fn hex_renders_lowercase() {
        assert_eq!(decode(&[0xde, 0xad, 0xbe, 0xef], "hex").unwrap(), "deadbeef");
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = decode(b"x", "ebcdic").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(name) if name == "ebcdic"));
    }
}
