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

    /// Transparent wrapper for [`std::string::FromUtf8Error`]
    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// Transparent wrapper for [`hex::FromHexError`]
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),

    /// Failure inside an embedded EXG container
    #[error("entry {name}: {source}")]
    Container {
        /// Name of the entry being processed
        name: String,
        /// The container-level failure
        source: exg_gfx::error::Error,
    },

    /// index file does not start with the YPAC magic
    #[error("file is not a YPAC archive")]
    InvalidArchive,

    /// entry names occupy a fixed 64-byte slot
    #[error("entry name {name:?} is {len} bytes encoded, which exceeds the 64-byte name slot")]
    NameTooLong {
        /// The offending entry name
        name: String,
        /// Its UTF-8 encoded length
        len: usize,
    },

    /// manifest head field has a fixed on-disk size
    #[error("manifest head field decodes to {actual} bytes, expected {expected}")]
    BadHeadLength {
        /// Size of the on-disk head slot
        expected: usize,
        /// Size the manifest hex string decodes to
        actual: usize,
    },

    /// entry names come from directory and file names on repack
    #[error("file name {0:?} is not valid UTF-8")]
    BadFileName(std::path::PathBuf),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn container(name: &str, source: exg_gfx::error::Error) -> Self {
        Self::Container {
            name: name.to_owned(),
            source,
        }
    }
}
