//! Short hex excerpts of byte values for log and error messages

use std::fmt;

/// Number of leading bytes rendered by an excerpt
pub const EXCERPT_BYTES: usize = 4;

/// Render a short, deterministic hex excerpt of `bytes`
///
/// Only the first [`EXCERPT_BYTES`] bytes are rendered, so a 32-byte hash
/// becomes 8 hex characters. Shorter inputs (including empty) are rendered
/// as-is.
pub fn excerpt(bytes: &[u8]) -> String {
    Excerpt(bytes).to_string()
}

/// Display adapter for [`excerpt`]
#[derive(Debug, Clone, Copy)]
pub struct Excerpt<'a>(pub &'a [u8]);

impl fmt::Display for Excerpt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().take(EXCERPT_BYTES) {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_hash() {
        let hash = [0xabu8; 32];
        assert_eq!(excerpt(&hash), "abababab");
    }

    #[test]
    fn test_excerpt_short_and_empty() {
        assert_eq!(excerpt(&[]), "");
        assert_eq!(excerpt(&[0x01, 0x02]), "0102");
    }

    #[test]
    fn test_display_matches_function() {
        let address = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc];
        assert_eq!(Excerpt(&address).to_string(), excerpt(&address));
        assert_eq!(Excerpt(&[]).to_string(), "");
    }
}
