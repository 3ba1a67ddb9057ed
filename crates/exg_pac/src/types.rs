//! Base types for structure of a YPAC archive pair.

use binrw::{BinRead, BinWrite};
use exg_gfx::ExgFile;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Size of the fixed name slot in an index record
pub const NAME_LEN: usize = 64;

/// Size of the opaque archive head blob
pub const HEAD_LEN: usize = 12;

/// Entries with this name suffix are EXG containers
pub const CONTAINER_EXT: &str = ".exg";

/// YPAC index file header
///
/// Always starts with "YPAC" followed by an opaque 12-byte blob whose
/// internal structure is not interpreted.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"YPAC", little)]
pub struct PacHeader {
    /// Opaque head blob, preserved verbatim
    pub head: [u8; HEAD_LEN],
}

/// What an entry's payload holds
#[derive(Debug, Clone, PartialEq)]
pub enum PacPayload {
    /// An EXG texture container
    Exg(ExgFile),
    /// An opaque blob, preserved verbatim
    Misc(Vec<u8>),
}

/// One named slot in the archive
///
/// The kind of an entry is not tagged on disk: it is derived purely from
/// whether the name ends in `.exg`, both when decoding and when encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct PacEntry {
    /// Entry name, at most 64 bytes of UTF-8
    pub name: String,
    /// The entry's payload
    pub payload: PacPayload,
}

impl PacEntry {
    /// Whether this entry's name marks it as an EXG container.
    pub fn is_container(&self) -> bool {
        self.name.ends_with(CONTAINER_EXT)
    }
}

/// An in-memory YPAC archive
///
/// Entry order is significant: it is the order recovered from the index
/// file and the order payloads are laid out in the data file on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PacArchive {
    /// Opaque head blob from the index file
    pub head: [u8; HEAD_LEN],
    /// All entries, in index order
    pub entries: Vec<PacEntry>,
}

impl PacArchive {
    /// Creates an empty archive with a zeroed head.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries contained in this archive.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all the entry names in this archive.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Decode a 64-byte name slot: up to the first NUL, or the whole slot.
pub(crate) fn decode_name(slot: &[u8; NAME_LEN]) -> Result<String> {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    Ok(String::from_utf8(slot[..end].to_vec())?)
}

/// Encode a name into a NUL-padded 64-byte slot.
pub(crate) fn encode_name(name: &str) -> Result<[u8; NAME_LEN]> {
    let bytes = name.as_bytes();
    if bytes.len() > NAME_LEN {
        return Err(Error::NameTooLong {
            name: name.to_owned(),
            len: bytes.len(),
        });
    }

    let mut slot = [0u8; NAME_LEN];
    slot[..bytes.len()].copy_from_slice(bytes);
    Ok(slot)
}

/// Append `.ext` to a base path without replacing an existing extension.
pub(crate) fn pair_path(base: &Path, ext: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn short_name_roundtrip() -> Result<()> {
        let slot = encode_name("a.exg")?;

        assert_eq!(&slot[..5], b"a.exg");
        assert!(slot[5..].iter().all(|&b| b == 0));
        assert_eq!(decode_name(&slot)?, "a.exg");

        Ok(())
    }

    #[test]
    fn full_slot_name_roundtrip() -> Result<()> {
        let name = "x".repeat(NAME_LEN);
        let slot = encode_name(&name)?;

        // No NUL terminator when the name fills the slot exactly.
        assert!(slot.iter().all(|&b| b == b'x'));
        assert_eq!(decode_name(&slot)?, name);

        Ok(())
    }

    #[test]
    fn oversized_name_is_rejected() {
        let name = "x".repeat(NAME_LEN + 1);

        let result = encode_name(&name);
        assert!(matches!(result, Err(Error::NameTooLong { len: 65, .. })));
    }

    #[test]
    fn multibyte_name_length_is_measured_in_bytes() {
        // 22 three-byte characters encode to 66 bytes.
        let name = "あ".repeat(22);

        let result = encode_name(&name);
        assert!(matches!(result, Err(Error::NameTooLong { len: 66, .. })));
    }

    #[test]
    fn decode_stops_at_first_nul() -> Result<()> {
        let mut slot = [0u8; NAME_LEN];
        slot[..3].copy_from_slice(b"abc");
        slot[4] = b'z';

        assert_eq!(decode_name(&slot)?, "abc");

        Ok(())
    }

    #[test]
    fn pair_path_appends_extension() {
        assert_eq!(
            pair_path(Path::new("assets/portrait"), "hed"),
            PathBuf::from("assets/portrait.hed")
        );
        // A dot in the base name is part of the name, not an extension.
        assert_eq!(
            pair_path(Path::new("data.v2"), "dat"),
            PathBuf::from("data.v2.dat")
        );
    }

    #[test]
    fn container_kind_follows_name_suffix() {
        let entry = PacEntry {
            name: "face.exg".into(),
            payload: PacPayload::Misc(Vec::new()),
        };
        assert!(entry.is_container());

        let entry = PacEntry {
            name: "table.dat".into(),
            payload: PacPayload::Misc(Vec::new()),
        };
        assert!(!entry.is_container());
    }
}
