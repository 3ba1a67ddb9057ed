//! Channel-order conversion and payload classification.
//!
//! Raw pixel payloads are stored 4 bytes per pixel with channels 0 and 2
//! swapped relative to a displayable RGBA image. Swapping two channels is
//! its own inverse, so the same permutation converts both ways; the two
//! named entry points exist to keep call sites readable.
//!
//! Classification is a pure function over byte prefixes. The wire format
//! carries no payload type tag, so the first bytes of a decompressed
//! payload are matched against known magic sequences.

use crate::error::{Error, Result};

/// zstd frame magic, marking a compressed payload
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Magic prefix of a DDS texture
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// Magic prefix of a Windows bitmap
pub const BMP_MAGIC: [u8; 2] = *b"BM";

/// What a decompressed payload turned out to be
///
/// There is no type enum on disk; this is derived from the payload's
/// leading bytes via [`classify`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadKind {
    /// A DDS texture blob
    Dds,
    /// A Windows bitmap blob
    Bitmap,
    /// A raw pixel buffer in storage channel order
    RawPixels,
}

/// Classify a decompressed payload by its magic prefix.
pub fn classify(data: &[u8]) -> PayloadKind {
    if data.starts_with(&DDS_MAGIC) {
        PayloadKind::Dds
    } else if data.starts_with(&BMP_MAGIC) {
        PayloadKind::Bitmap
    } else {
        PayloadKind::RawPixels
    }
}

/// Whether a payload starts with the zstd frame magic.
pub fn is_compressed(data: &[u8]) -> bool {
    data.starts_with(&ZSTD_MAGIC)
}

fn swap_channels(buffer: &mut [u8]) -> Result<()> {
    if buffer.len() % 4 != 0 {
        return Err(Error::TruncatedPixel(buffer.len()));
    }

    for pixel in buffer.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }

    Ok(())
}

/// Convert a pixel buffer from storage order to display order in place.
///
/// Fails with [`Error::TruncatedPixel`] if the buffer length is not a
/// multiple of 4.
pub fn to_display_order(buffer: &mut [u8]) -> Result<()> {
    swap_channels(buffer)
}

/// Convert a pixel buffer from display order to storage order in place.
///
/// The exact inverse of [`to_display_order`].
pub fn to_storage_order(buffer: &mut [u8]) -> Result<()> {
    swap_channels(buffer)
}
