//! Types for writing YPAC archive pairs
//!

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::borrow::Cow;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    types::{encode_name, pair_path, PacArchive, PacHeader, PacPayload},
};

impl PacArchive {
    /// Encode the archive to its index and data streams.
    ///
    /// Payloads are laid out in entry order; each index record carries
    /// the serialized length and the running byte offset into the data
    /// stream, starting at 0. Equal entry order therefore reproduces a
    /// byte-identical data layout.
    #[instrument(skip(self, hed, dat), err)]
    pub fn write<H, D>(&self, mut hed: H, mut dat: D) -> Result<()>
    where
        H: Write + Seek,
        D: Write,
    {
        PacHeader { head: self.head }.write(&mut hed)?;

        let mut offset = 0u32;
        for entry in &self.entries {
            info!("writing {}", entry.name);

            let data: Cow<'_, [u8]> = match &entry.payload {
                PacPayload::Exg(exg) => Cow::Owned(
                    exg.to_bytes()
                        .map_err(|e| Error::container(&entry.name, e))?,
                ),
                PacPayload::Misc(data) => Cow::Borrowed(data.as_slice()),
            };

            dat.write_all(&data)?;

            hed.write_all(&encode_name(&entry.name)?)?;
            hed.write_u32::<LittleEndian>(data.len() as u32)?;
            hed.write_u32::<LittleEndian>(offset)?;
            offset += data.len() as u32;
        }

        Ok(())
    }

    /// Save the archive as `<base>.hed` / `<base>.dat`.
    ///
    /// Both halves are staged fully in memory first, so a failed encode
    /// leaves no partial files behind.
    #[instrument(skip(self), err)]
    pub fn save(&self, base: &Path) -> Result<()> {
        let mut hed = Cursor::new(Vec::new());
        let mut dat = Vec::new();
        self.write(&mut hed, &mut dat)?;

        std::fs::write(pair_path(base, "hed"), hed.into_inner())?;
        std::fs::write(pair_path(base, "dat"), dat)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use exg_gfx::{ExgFile, ExgItem};
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{PacArchive, PacEntry, PacPayload, NAME_LEN};

    fn misc(name: &str, data: &[u8]) -> PacEntry {
        PacEntry {
            name: name.to_owned(),
            payload: PacPayload::Misc(data.to_vec()),
        }
    }

    fn encode(archive: &PacArchive) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut hed = Cursor::new(Vec::new());
        let mut dat = Vec::new();
        archive.write(&mut hed, &mut dat)?;
        Ok((hed.into_inner(), dat))
    }

    #[test]
    fn write_empty_archive() -> Result<()> {
        let archive = PacArchive {
            head: [0x22; 12],
            entries: Vec::new(),
        };

        let (hed, dat) = encode(&archive)?;

        let mut expected = b"YPAC".to_vec();
        expected.extend_from_slice(&[0x22; 12]);
        assert_eq!(hed, expected);
        assert!(dat.is_empty());

        Ok(())
    }

    #[test]
    fn offsets_are_the_running_prefix_sum() -> Result<()> {
        let archive = PacArchive {
            head: [0u8; 12],
            entries: vec![
                misc("one.bin", b"Hello"),
                misc("two.bin", b"World!"),
                misc("three.bin", b""),
                misc("four.bin", b"tail"),
            ],
        };

        let (hed, dat) = encode(&archive)?;

        assert_eq!(dat, b"HelloWorld!tail");

        let lengths = [5u32, 6, 0, 4];
        let mut expected_offset = 0u32;
        for (i, length) in lengths.iter().enumerate() {
            let record = &hed[16 + i * 72..16 + (i + 1) * 72];
            assert_eq!(record[64..68], length.to_le_bytes());
            assert_eq!(record[68..72], expected_offset.to_le_bytes());
            expected_offset += length;
        }
        assert_eq!(expected_offset as usize, dat.len());

        Ok(())
    }

    #[test]
    fn oversized_entry_name_fails_the_encode() {
        let archive = PacArchive {
            head: [0u8; 12],
            entries: vec![misc(&"n".repeat(NAME_LEN + 1), b"")],
        };

        let result = encode(&archive);
        assert!(matches!(result, Err(Error::NameTooLong { len: 65, .. })));
    }

    #[test]
    fn binary_roundtrip() -> Result<()> {
        let mut item = ExgItem::new(2);
        item.head = [0x7E; 24];
        item.data = vec![0x01, 0x02, 0x03, 0x04];

        let archive = PacArchive {
            head: *b"\x01\x00\x00\x00abcdefgh",
            entries: vec![
                PacEntry {
                    name: "face.exg".into(),
                    payload: PacPayload::Exg(ExgFile { items: vec![item] }),
                },
                misc("palette.bin", &[0xAA, 0xBB]),
                misc("empty.bin", b""),
            ],
        };

        let (hed, dat) = encode(&archive)?;
        let decoded = PacArchive::read(Cursor::new(hed), Cursor::new(dat))?;

        assert_eq!(decoded, archive);

        Ok(())
    }

    #[test]
    fn full_slot_name_roundtrips_through_the_index() -> Result<()> {
        // 64 bytes exactly, ending in .exg would change the kind, so use
        // a misc entry.
        let name = "m".repeat(NAME_LEN);
        let archive = PacArchive {
            head: [0u8; 12],
            entries: vec![misc(&name, b"x")],
        };

        let (hed, dat) = encode(&archive)?;
        let decoded = PacArchive::read(Cursor::new(hed), Cursor::new(dat))?;

        assert_eq!(decoded.entries[0].name, name);

        Ok(())
    }
}
