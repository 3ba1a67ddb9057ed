//! Types for reading YPAC archive pairs
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use exg_gfx::ExgFile;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    types::{decode_name, pair_path, PacArchive, PacEntry, PacHeader, PacPayload, NAME_LEN},
};

/// Fill `buf` from `reader`, returning how many bytes were read before
/// the stream ran out.
fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl PacArchive {
    /// Read an archive from its index and data streams.
    ///
    /// The index is consumed sequentially: magic, head blob, then index
    /// records until fewer than 64 bytes remain for the next name slot.
    /// The data stream is seeked to each record's offset; entries named
    /// `*.exg` are decoded as containers, everything else is stored
    /// verbatim. Decoding order defines entry order.
    #[instrument(skip(hed, dat), err)]
    pub fn read<H, D>(mut hed: H, mut dat: D) -> Result<Self>
    where
        H: Read + Seek,
        D: Read + Seek,
    {
        let header = PacHeader::read(&mut hed).map_err(|e| match e {
            binrw::Error::BadMagic { .. } => Error::InvalidArchive,
            e => Error::BinRWError(e),
        })?;

        let mut entries = Vec::new();
        loop {
            let mut slot = [0u8; NAME_LEN];
            // A short trailing read terminates the record table.
            if read_fill(&mut hed, &mut slot)? < NAME_LEN {
                break;
            }

            let name = decode_name(&slot)?;
            let length = hed.read_u32::<LittleEndian>()?;
            let offset = hed.read_u32::<LittleEndian>()?;

            info!("loading {name} ({length} bytes at {offset})");
            dat.seek(SeekFrom::Start(offset as u64))?;

            let payload = if name.ends_with(crate::types::CONTAINER_EXT) {
                let exg = ExgFile::read(&mut dat).map_err(|e| Error::container(&name, e))?;
                PacPayload::Exg(exg)
            } else {
                let mut data = vec![0u8; length as usize];
                dat.read_exact(&mut data)?;
                PacPayload::Misc(data)
            };

            entries.push(PacEntry { name, payload });
        }

        Ok(Self {
            head: header.head,
            entries,
        })
    }

    /// Open the archive pair `<base>.hed` / `<base>.dat`.
    #[instrument(err)]
    pub fn open(base: &Path) -> Result<Self> {
        let hed = File::open(pair_path(base, "hed"))?;
        let dat = File::open(pair_path(base, "dat"))?;

        Self::read(BufReader::new(hed), BufReader::new(dat))
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{PacArchive, PacPayload};

    fn record(name: &[u8], length: u32, offset: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; 64];
        bytes[..name.len()].copy_from_slice(name);
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes
    }

    #[test]
    fn read_invalid_magic() {
        let hed = b"PACX\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00".to_vec();

        let result = PacArchive::read(Cursor::new(hed), Cursor::new(Vec::new()));
        assert!(matches!(result, Err(Error::InvalidArchive)));
    }

    #[test]
    fn read_empty_archive() -> Result<()> {
        let mut hed = b"YPAC".to_vec();
        hed.extend_from_slice(&[0x11; 12]);

        let archive = PacArchive::read(Cursor::new(hed), Cursor::new(Vec::new()))?;
        assert!(archive.is_empty());
        assert_eq!(archive.head, [0x11; 12]);

        Ok(())
    }

    #[test]
    fn read_archive_with_container_entry() -> Result<()> {
        // Index: one record pointing at an empty container, with the
        // recorded length padded past the container's 8 bytes.
        let mut hed = b"YPAC".to_vec();
        hed.extend_from_slice(&[0u8; 12]);
        hed.extend_from_slice(&record(b"a.exg", 12, 0));

        let mut dat = b"EXGr\x00\x00\x00\x00".to_vec();
        dat.extend_from_slice(&[0u8; 4]);

        let archive = PacArchive::read(Cursor::new(hed), Cursor::new(dat))?;

        assert_eq!(archive.head, [0u8; 12]);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.entries[0].name, "a.exg");
        match &archive.entries[0].payload {
            PacPayload::Exg(exg) => assert!(exg.is_empty()),
            PacPayload::Misc(_) => panic!("expected a container entry"),
        }

        Ok(())
    }

    #[test]
    fn read_archive_with_misc_entries() -> Result<()> {
        let mut hed = b"YPAC".to_vec();
        hed.extend_from_slice(&[0u8; 12]);
        hed.extend_from_slice(&record(b"one.bin", 5, 0));
        hed.extend_from_slice(&record(b"two.bin", 6, 5));

        let dat = b"HelloWorld!".to_vec();

        let archive = PacArchive::read(Cursor::new(hed), Cursor::new(dat))?;

        assert_eq!(archive.len(), 2);
        assert_eq!(
            archive.entries[0].payload,
            PacPayload::Misc(b"Hello".to_vec())
        );
        assert_eq!(
            archive.entries[1].payload,
            PacPayload::Misc(b"World!".to_vec())
        );

        Ok(())
    }

    #[test]
    fn short_trailing_read_terminates_the_table() -> Result<()> {
        let mut hed = b"YPAC".to_vec();
        hed.extend_from_slice(&[0u8; 12]);
        hed.extend_from_slice(&record(b"one.bin", 5, 0));
        // 10 stray bytes, fewer than the next 64-byte name slot.
        hed.extend_from_slice(&[0xEE; 10]);

        let archive = PacArchive::read(Cursor::new(hed), Cursor::new(b"Hello".to_vec()))?;

        assert_eq!(archive.len(), 1);

        Ok(())
    }

    #[test]
    fn container_decode_failure_names_the_entry() {
        let mut hed = b"YPAC".to_vec();
        hed.extend_from_slice(&[0u8; 12]);
        hed.extend_from_slice(&record(b"bad.exg", 8, 0));

        // Not an EXGr stream.
        let dat = b"XXXX\x00\x00\x00\x00".to_vec();

        let result = PacArchive::read(Cursor::new(hed), Cursor::new(dat));
        assert!(matches!(
            result,
            Err(Error::Container { name, .. }) if name == "bad.exg"
        ));
    }
}
