//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// Transparent wrapper for [`hex::FromHexError`]
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),

    /// Transparent wrapper for [`image::ImageError`]
    #[error(transparent)]
    ImageError(#[from] image::ImageError),

    /// stream does not start with the EXGr magic
    #[error("stream is not an EXG container")]
    InvalidContainer,

    /// serialized width field is row width in pixels times 4
    #[error("item width field {raw_width} is not a multiple of 4")]
    WidthNotAligned {
        /// The offending on-disk value
        raw_width: u32,
    },

    /// pixel buffer does not line up with the declared row width
    #[error("pixel buffer of {len} bytes does not fill whole rows of {width} pixels")]
    PixelBufferMismatch {
        /// Length of the decompressed buffer in bytes
        len: usize,
        /// Declared row width in pixels
        width: u32,
    },

    /// a zero width cannot describe a non-empty pixel buffer
    #[error("item declares a width of 0 pixels but carries {len} bytes of pixel data")]
    ZeroWidth {
        /// Length of the decompressed buffer in bytes
        len: usize,
    },

    /// pixel buffers are 4 bytes per pixel
    #[error("pixel buffer length {0} is not a multiple of 4")]
    TruncatedPixel(usize),

    /// item directories are named by their decimal index
    #[error("item directory name {0:?} is not a decimal index")]
    BadItemIndex(String),

    /// manifest head field has a fixed on-disk size
    #[error("manifest head field decodes to {actual} bytes, expected {expected}")]
    BadHeadLength {
        /// Size of the on-disk head slot
        expected: usize,
        /// Size the manifest hex string decodes to
        actual: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
