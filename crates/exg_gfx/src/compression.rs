//! Payload compression handling.
//!
//! Compressed payloads are single zstd frames. The frame magic doubles as
//! the payload's "compressed" marker on disk (see [`crate::pixel::is_compressed`]),
//! so no compression level or flag is recorded anywhere else.

use tracing::instrument;

use crate::error::Result;

/// Compress a payload into a single zstd frame.
#[instrument(skip(data), fields(size = data.len()), err)]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(zstd::encode_all(data, zstd::DEFAULT_COMPRESSION_LEVEL)?)
}

/// Decompress a single zstd frame back into the payload bytes.
#[instrument(skip(data), fields(size = data.len()), err)]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(zstd::decode_all(data)?)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pixel::is_compressed;

    #[test]
    fn compressed_payload_carries_frame_magic() -> Result<()> {
        let compressed = compress(b"some payload bytes")?;

        assert!(is_compressed(&compressed));

        Ok(())
    }

    #[test]
    fn roundtrip() -> Result<()> {
        let original: Vec<u8> = (0u8..255).cycle().take(4096).collect();

        let compressed = compress(&original)?;
        assert_eq!(decompress(&compressed)?, original);

        Ok(())
    }

    #[test]
    fn empty_payload_roundtrip() -> Result<()> {
        let compressed = compress(&[])?;

        assert!(is_compressed(&compressed));
        assert!(decompress(&compressed)?.is_empty());

        Ok(())
    }
}
