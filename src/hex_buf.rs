//! Allocation-free lowercase hex rendering of digests.

/// Size in bytes of a SHA-1 digest.
pub const DIGEST_LEN: usize = 20;

/// Reusable output buffer for hex-encoding one digest at a time.
#[derive(Clone)]
pub struct HexBuf {
    buf: [u8; DIGEST_LEN * 2],
}

impl Default for HexBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl HexBuf {
    pub fn new() -> Self {
        Self {
            buf: [0; DIGEST_LEN * 2],
        }
    }

    /// Encode `digest` into the internal buffer and return the hex bytes.
    ///
    /// Output is always lowercase and exactly twice the digest length.
    pub fn encode(&mut self, digest: &[u8; DIGEST_LEN]) -> &[u8] {
        // Output length is fixed at 2 * DIGEST_LEN, so this cannot fail.
        let _ = hex::encode_to_slice(digest, &mut self.buf);
        &self.buf
    }

    /// Same as [`HexBuf::encode`], as a string slice.
    pub fn encode_str(&mut self, digest: &[u8; DIGEST_LEN]) -> &str {
        let bytes = self.encode(digest);
        // hex output is ASCII.
        std::str::from_utf8(bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_lowercase() {
        let mut digest = [0u8; DIGEST_LEN];
        digest[0] = 0xAB;
        digest[19] = 0x0F;
        let mut buf = HexBuf::new();
        let out = buf.encode_str(&digest);
        assert_eq!(out.len(), 40);
        assert!(out.starts_with("ab00"));
        assert!(out.ends_with("0f"));
    }

    #[test]
    fn buffer_is_reused() {
        let mut buf = HexBuf::new();
        assert_eq!(buf.encode(&[0xff; DIGEST_LEN])[0], b'f');
        assert_eq!(buf.encode(&[0x00; DIGEST_LEN]), &[b'0'; 40][..]);
    }
}
