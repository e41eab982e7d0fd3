//! String payload encoding
//!
//! Text-bearing commands carry their string inline in the command stream,
//! packed into little-endian 32-bit words. Bytes after the first NUL are
//! ignored, so a C-style terminated buffer and a plain `&str` encode the same.

use heapless::Vec;

/// Longest string payload accepted, in bytes
///
/// One quarter of the command ring.
pub const MAX_PAYLOAD_BYTES: usize = 1024;

/// Word capacity needed for [`MAX_PAYLOAD_BYTES`]
pub const MAX_PAYLOAD_WORDS: usize = MAX_PAYLOAD_BYTES / 4;

/// Payload encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// More than [`MAX_PAYLOAD_BYTES`] before the first NUL
    TooLarge,
}

/// A string packed into command words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    words: Vec<u32, MAX_PAYLOAD_WORDS>,
    len: usize,
}

impl Payload {
    /// Encode a byte string, stopping at the first NUL
    pub fn encode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        if len > MAX_PAYLOAD_BYTES {
            return Err(PayloadError::TooLarge);
        }

        let mut words = Vec::new();
        for chunk in bytes[..len].chunks(4) {
            let mut le = [0u8; 4];
            le[..chunk.len()].copy_from_slice(chunk);
            words
                .push(u32::from_le_bytes(le))
                .map_err(|_| PayloadError::TooLarge)?;
        }

        Ok(Self { words, len })
    }

    /// Encode a string slice
    pub fn encode_str(text: &str) -> Result<Self, PayloadError> {
        Self::encode(text.as_bytes())
    }

    /// Encoded words, `ceil(len / 4)` of them
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the last word has no zero padding left to act as a terminator
    ///
    /// Commands that need a NUL-terminated string send one extra zero word
    /// in that case.
    pub fn needs_terminator(&self) -> bool {
        !self.is_empty() && self.len % 4 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_partial_word() {
        let p = Payload::encode_str("AB").unwrap();
        assert_eq!(p.words(), &[0x0000_4241]);
        assert!(!p.needs_terminator());
    }

    #[test]
    fn test_full_word() {
        let p = Payload::encode_str("ABCD").unwrap();
        assert_eq!(p.words(), &[0x4443_4241]);
        assert!(p.needs_terminator());
    }

    #[test]
    fn test_spills_into_second_word() {
        let p = Payload::encode_str("ABCDE").unwrap();
        assert_eq!(p.words(), &[0x4443_4241, 0x0000_0045]);
    }

    #[test]
    fn test_empty() {
        let p = Payload::encode_str("").unwrap();
        assert!(p.words().is_empty());
        assert!(p.is_empty());
        assert!(!p.needs_terminator());
    }

    #[test]
    fn test_stops_at_nul() {
        let p = Payload::encode(b"Hi\0there").unwrap();
        assert_eq!(p.words(), &[0x0000_6948]);
        assert!(!p.needs_terminator());

        assert!(Payload::encode(b"\0abc").unwrap().is_empty());
    }

    #[test]
    fn test_size_limit() {
        let max = [b'x'; MAX_PAYLOAD_BYTES];
        assert_eq!(Payload::encode(&max).unwrap().words().len(), MAX_PAYLOAD_WORDS);

        let over = [b'x'; MAX_PAYLOAD_BYTES + 1];
        assert_eq!(Payload::encode(&over), Err(PayloadError::TooLarge));

        // Trailing bytes past a NUL don't count
        let mut terminated = [b'x'; MAX_PAYLOAD_BYTES + 8];
        terminated[10] = 0;
        assert!(Payload::encode(&terminated).is_ok());
    }

    proptest! {
        #[test]
        fn prop_word_count_and_bytes(
            bytes in proptest::collection::vec(1u8..=255, 0..=MAX_PAYLOAD_BYTES),
        ) {
            let p = Payload::encode(&bytes).unwrap();
            prop_assert_eq!(p.words().len(), bytes.len().div_ceil(4));

            let unpacked: std::vec::Vec<u8> = p
                .words()
                .iter()
                .flat_map(|w| w.to_le_bytes())
                .collect();
            prop_assert_eq!(&unpacked[..bytes.len()], &bytes[..]);
            prop_assert!(unpacked[bytes.len()..].iter().all(|&b| b == 0));
        }
    }
}
