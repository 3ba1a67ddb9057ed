//! This library handles reading from and creating **YPAC** archive pairs,
//! the two-file container format used to ship game texture assets.
//!
//! # YPAC Archive Format Documentation
//!
//! A YPAC archive is a pair of files sharing a base name: an index file
//! (`.hed`) describing the entries, and a data file (`.dat`) holding their
//! payloads back to back.
//!
//! ## Index File Structure (`.hed`)
//!
//! | Offset (bytes) | Field        | Description                                    |
//! |----------------|--------------|------------------------------------------------|
//! | 0x0000         | Magic number | 4 bytes: 0x59504143 ("YPAC")                   |
//! | 0x0004         | Head         | 12 bytes: Opaque blob, preserved verbatim      |
//! | 0x0010         | Records      | Index records until the file runs out          |
//!
//! ### Index Record
//!
//! | Offset (bytes) | Field  | Description                                          |
//! |----------------|--------|------------------------------------------------------|
//! | 0x0000         | Name   | 64 bytes: UTF-8 entry name, NUL-padded               |
//! | 0x0040         | Length | 4 bytes: Size of the entry's payload in the data file|
//! | 0x0044         | Offset | 4 bytes: Position of the payload in the data file    |
//!
//! The record table has no count field. Reading stops when fewer than 64
//! bytes remain for the next name slot; a short trailing read is the
//! documented terminal condition, not an error.
//!
//! A name of exactly 64 bytes fills its slot with no NUL terminator.
//! Shorter names are terminated by the first NUL byte.
//!
//! ## Data File Structure (`.dat`)
//!
//! The concatenation of every entry's serialized payload, in index order.
//! Offsets start at 0 and accumulate by each entry's length, so a correct
//! writer produces a contiguous data file with no gaps.
//!
//! ## Entry Kinds
//!
//! The format carries no type tag. An entry whose name ends in `.exg` is
//! an EXG texture container (decoded via the `exg_gfx` crate); any other
//! entry is an opaque blob preserved verbatim.
//!
//! ## Additional Information
//!
//! - **File Extensions**: `.hed` + `.dat`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod read;
pub mod tree;
pub mod types;
pub mod write;

pub use types::{PacArchive, PacEntry, PacPayload};
