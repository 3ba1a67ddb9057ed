//! This library handles reading from and creating **EXG** texture containers,
//! the per-entry payload format carried inside YPAC archive pairs.
//!
//! # EXG Container Format Documentation
//!
//! An EXG container is a flat sequence of texture items behind a magic number
//! and a count. Containers are embedded in the data half of a YPAC archive
//! pair (see the `exg_pac` crate) or stored standalone with the `.exg`
//! extension.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field        | Description                                  |
//! |----------------|--------------|----------------------------------------------|
//! | 0x0000         | Magic number | 4 bytes: 0x45584772 ("EXGr")                 |
//! | 0x0004         | Item Count   | 4 bytes: Number of item records that follow  |
//! | 0x0008         | Items        | Item records, stored back to back            |
//!
//! ### Item Record
//!
//! | Offset (bytes) | Field     | Description                                        |
//! |----------------|-----------|----------------------------------------------------|
//! | 0x0000         | Data Size | 4 bytes: Length of the payload in bytes            |
//! | 0x0004         | Width     | 4 bytes: Row width in pixels multiplied by 4       |
//! | 0x0008         | Head      | 24 bytes: Opaque blob, preserved verbatim          |
//! | 0x0020         | Data      | (Data Size) bytes: Payload                         |
//!
//! The width field stores `row width in pixels * 4`; readers divide by 4 and
//! writers multiply by 4. A width field that is not a multiple of 4 is
//! rejected.
//!
//! ### Payloads
//!
//! The payload carries no type tag. It is classified by inspection:
//!
//! - A payload starting with the zstd frame magic (`28 B5 2F FD`) is
//!   compressed. The decompressed bytes are one of:
//!   - a DDS texture (`"DDS "` prefix),
//!   - a Windows bitmap (`"BM"` prefix),
//!   - otherwise a raw pixel buffer, 4 bytes per pixel in storage channel
//!     order (the displayable image's channels 0 and 2 swapped), with the
//!     declared row width and a height derived from the buffer length.
//! - Any other payload is opaque raw bytes and is preserved verbatim.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.exg`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod compression;
pub mod error;
pub mod pixel;
pub mod read;
pub mod tree;
pub mod types;
pub mod write;

pub use pixel::PayloadKind;
pub use tree::UnpackOptions;
pub use types::{ExgFile, ExgItem};
