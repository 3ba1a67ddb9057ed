//! Types for reading EXG containers
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    types::{ExgFile, ExgHeader, ExgItem, ITEM_HEAD_LEN},
};

impl ExgItem {
    /// Decode a single item record from the current stream position.
    ///
    /// The on-disk width field stores the row width in pixels multiplied
    /// by 4; it is divided back down here. A width field that is not a
    /// multiple of 4 fails with [`Error::WidthNotAligned`].
    #[instrument(skip(reader), err)]
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let data_size = reader.read_u32::<LittleEndian>()?;
        let raw_width = reader.read_u32::<LittleEndian>()?;
        if raw_width % 4 != 0 {
            return Err(Error::WidthNotAligned { raw_width });
        }

        let mut head = [0u8; ITEM_HEAD_LEN];
        reader.read_exact(&mut head)?;

        let mut data = vec![0u8; data_size as usize];
        reader.read_exact(&mut data)?;

        Ok(Self {
            width: raw_width / 4,
            head,
            data,
        })
    }
}

impl ExgFile {
    /// Decode a container from the current stream position.
    ///
    /// Reads the "EXGr" magic and the item count, then exactly that many
    /// item records in sequence. A magic mismatch fails with
    /// [`Error::InvalidContainer`].
    #[instrument(skip(reader), err)]
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let header = ExgHeader::read(reader).map_err(|e| match e {
            binrw::Error::BadMagic { .. } => Error::InvalidContainer,
            e => Error::BinRWError(e),
        })?;

        let items = (0..header.items)
            .map(|_| ExgItem::read(reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { items })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{ExgFile, ExgItem};

    #[test]
    fn read_empty_container() -> Result<()> {
        let input = [0x45, 0x58, 0x47, 0x72, 0x00, 0x00, 0x00, 0x00];

        let exg = ExgFile::read(&mut Cursor::new(input))?;
        assert!(exg.is_empty());

        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let input = [0x45, 0x58, 0x47, 0x42, 0x00, 0x00, 0x00, 0x00];

        let result = ExgFile::read(&mut Cursor::new(input));
        assert!(matches!(result, Err(Error::InvalidContainer)));
    }

    #[test]
    fn read_container_with_item() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            // Header
            0x45, 0x58, 0x47, 0x72,
            0x01, 0x00, 0x00, 0x00,
            // Item: data size, width (2 pixels * 4)
            0x03, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x00, 0x00,
            // Head (24)
            0xAA, 0xBB, 0xCC, 0xDD, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            // Data (3)
            0x01, 0x02, 0x03,
        ];

        let exg = ExgFile::read(&mut Cursor::new(input))?;
        assert_eq!(exg.len(), 1);

        let item = &exg.items[0];
        assert_eq!(item.width, 2);
        assert_eq!(item.head[0..4], [0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(item.data, vec![0x01, 0x02, 0x03]);

        Ok(())
    }

    #[test]
    fn read_item_width_not_aligned() {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x00,
            // Width field 7 is not a multiple of 4
            0x07, 0x00, 0x00, 0x00,
        ];

        let result = ExgItem::read(&mut Cursor::new(input));
        assert!(matches!(
            result,
            Err(Error::WidthNotAligned { raw_width: 7 })
        ));
    }

    #[test]
    fn read_item_with_empty_payload() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x00, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            // Head (24)
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let item = ExgItem::read(&mut Cursor::new(input))?;
        assert_eq!(item.width, 1);
        assert!(item.data.is_empty());

        Ok(())
    }
}
