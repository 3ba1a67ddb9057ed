//! Base types for structure of an EXG container.

use binrw::{BinRead, BinWrite};

/// Size of the opaque per-item head blob
pub const ITEM_HEAD_LEN: usize = 24;

/// EXG container header
///
/// Always starts with "EXGr" followed by the number of item records.
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"EXGr", little)]
pub struct ExgHeader {
    /// The number of item records stored in the container
    pub items: u32,
}

/// One texture item inside an EXG container
///
/// The head blob and the payload are opaque to the codec: both are
/// preserved verbatim across a decode/encode round trip. The payload is
/// only interpreted when unpacking to a directory tree (see
/// [`crate::tree`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExgItem {
    /// Row width in pixels. On disk this is stored multiplied by 4.
    pub width: u32,

    /// Opaque 24-byte head blob, semantics unknown
    pub head: [u8; ITEM_HEAD_LEN],

    /// Payload bytes, raw or zstd-compressed
    pub data: Vec<u8>,
}

impl ExgItem {
    /// Creates an item with an empty payload and a zeroed head.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            head: [0u8; ITEM_HEAD_LEN],
            data: Vec::new(),
        }
    }
}

/// An EXG container: an ordered sequence of texture items
///
/// Item order is significant. It is preserved across a decode/encode round
/// trip and determines the numbered slot each item occupies when unpacked
/// to a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExgFile {
    /// All items in the container, in on-disk order
    pub items: Vec<ExgItem>,
}

impl ExgFile {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items contained in this container.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this container holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
