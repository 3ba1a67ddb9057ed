//! Types for writing EXG containers
//!

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Seek, Write};
use tracing::instrument;

use crate::{
    error::Result,
    types::{ExgFile, ExgHeader, ExgItem},
};

impl ExgItem {
    /// Encode this item record to a stream.
    ///
    /// Layout: payload length, row width in pixels multiplied by 4, the
    /// 24-byte head blob, then the payload bytes.
    #[instrument(skip(self, writer), err)]
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.data.len() as u32)?;
        writer.write_u32::<LittleEndian>(self.width * 4)?;
        writer.write_all(&self.head)?;
        writer.write_all(&self.data)?;

        Ok(())
    }
}

impl ExgFile {
    /// Encode this container to a stream, magic and item count first.
    #[instrument(skip(self, writer), err)]
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        ExgHeader {
            items: self.items.len() as u32,
        }
        .write(writer)?;

        for item in &self.items {
            item.write(writer)?;
        }

        Ok(())
    }

    /// Encode this container to an owned buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
