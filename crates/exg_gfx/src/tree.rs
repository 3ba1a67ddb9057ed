//! Round trip between EXG containers and editable directory trees.
//!
//! A container unpacks to one subdirectory per item, named by the item's
//! zero-based decimal index. Each item directory holds an `info.json`
//! manifest (row width and the head blob as hex) plus at most one payload
//! sidecar file:
//!
//! - `data.bin` — opaque raw payload, byte-identical to the archive
//! - `data.dds` — decompressed DDS texture
//! - `data.bmp` — decompressed Windows bitmap
//! - `data.png` — decompressed raw pixel buffer, materialized as a
//!   displayable image
//!
//! Loading applies the inverse mapping with a fixed priority: a `data.bin`
//! wins over `data.png`, which wins over `data.dds`, which wins over
//! `data.bmp`; a directory with none of them loads as an empty payload.
//! Item directories are ordered by their parsed numeric index, never by
//! filesystem enumeration order.

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::instrument;

use crate::{
    compression,
    error::{Error, Result},
    pixel::{self, PayloadKind},
    types::{ExgFile, ExgItem, ITEM_HEAD_LEN},
};

/// Manifest file name used at every level of the tree
pub const MANIFEST_NAME: &str = "info.json";

const RAW_NAME: &str = "data.bin";
const PNG_NAME: &str = "data.png";
const DDS_NAME: &str = "data.dds";
const BMP_NAME: &str = "data.bmp";

/// Options for how payloads are unpacked to a directory tree
#[derive(Debug, Clone, Copy, Builder)]
pub struct UnpackOptions {
    /// Pad a pixel buffer whose final row is short instead of rejecting
    /// it. Archives produced by the original tooling can carry such
    /// buffers; the strict default reports them.
    #[builder(default)]
    pub lenient: bool,

    /// Also write the decompressed payload bytes to `data.bin` next to
    /// the decoded sidecar file
    #[builder(default)]
    pub dump_raw: bool,
}

#[derive(Serialize, Deserialize)]
struct ItemManifest {
    width: u32,
    head: String,
}

fn read_head_blob<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(hex_str)?;
    bytes.as_slice().try_into().map_err(|_| Error::BadHeadLength {
        expected: N,
        actual: bytes.len(),
    })
}

impl ExgItem {
    /// Write this item into `dir` as a manifest plus one payload sidecar.
    ///
    /// A payload without the zstd frame magic is written verbatim as
    /// `data.bin`. A compressed payload is decompressed and classified;
    /// DDS and bitmap blobs are written as-is, anything else is treated
    /// as a raw pixel buffer of the declared width and saved as a PNG.
    #[instrument(skip(self, options), err)]
    pub fn unpack_to_dir(&self, dir: &Path, options: &UnpackOptions) -> Result<()> {
        fs::create_dir_all(dir)?;

        let manifest = ItemManifest {
            width: self.width,
            head: hex::encode(self.head),
        };
        fs::write(dir.join(MANIFEST_NAME), serde_json::to_string(&manifest)?)?;

        if !pixel::is_compressed(&self.data) {
            fs::write(dir.join(RAW_NAME), &self.data)?;
            return Ok(());
        }

        let decompressed = compression::decompress(&self.data)?;
        if options.dump_raw {
            fs::write(dir.join(RAW_NAME), &decompressed)?;
        }

        match pixel::classify(&decompressed) {
            PayloadKind::Dds => fs::write(dir.join(DDS_NAME), &decompressed)?,
            PayloadKind::Bitmap => fs::write(dir.join(BMP_NAME), &decompressed)?,
            PayloadKind::RawPixels => self.save_pixels(dir, decompressed, options)?,
        }

        Ok(())
    }

    fn save_pixels(&self, dir: &Path, mut pixels: Vec<u8>, options: &UnpackOptions) -> Result<()> {
        if pixels.is_empty() {
            // An empty frame has no image to materialize. Keep the original
            // compressed bytes so the payload reloads byte-identical.
            fs::write(dir.join(RAW_NAME), &self.data)?;
            return Ok(());
        }
        if self.width == 0 {
            return Err(Error::ZeroWidth { len: pixels.len() });
        }
        if pixels.len() % 4 != 0 {
            return Err(Error::TruncatedPixel(pixels.len()));
        }

        let stride = self.width as usize * 4;
        if pixels.len() % stride != 0 {
            if !options.lenient {
                return Err(Error::PixelBufferMismatch {
                    len: pixels.len(),
                    width: self.width,
                });
            }
            let padded = pixels.len().div_ceil(stride) * stride;
            pixels.resize(padded, 0);
        }
        let height = (pixels.len() / stride) as u32;

        pixel::to_display_order(&mut pixels)?;

        let image = image::RgbaImage::from_raw(self.width, height, pixels).ok_or(
            Error::PixelBufferMismatch {
                len: height as usize * stride,
                width: self.width,
            },
        )?;
        image.save(dir.join(PNG_NAME))?;

        Ok(())
    }

    /// Load one item back from a directory written by [`ExgItem::unpack_to_dir`].
    ///
    /// Payload priority: `data.bin` (verbatim, uncompressed), then
    /// `data.png` (re-encoded to a compressed pixel buffer; the image
    /// width overrides the manifest width), then `data.dds` or `data.bmp`
    /// (compressed verbatim), then nothing (empty payload).
    #[instrument(err)]
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let manifest: ItemManifest =
            serde_json::from_str(&fs::read_to_string(dir.join(MANIFEST_NAME))?)?;

        let head: [u8; ITEM_HEAD_LEN] = read_head_blob(&manifest.head)?;
        let mut width = manifest.width;

        let raw_path = dir.join(RAW_NAME);
        let png_path = dir.join(PNG_NAME);
        let dds_path = dir.join(DDS_NAME);
        let bmp_path = dir.join(BMP_NAME);

        let data = if raw_path.exists() {
            fs::read(raw_path)?
        } else if png_path.exists() {
            let image = image::open(&png_path)?.to_rgba8();
            width = image.width();

            let mut pixels = image.into_raw();
            pixel::to_storage_order(&mut pixels)?;
            compression::compress(&pixels)?
        } else if dds_path.exists() {
            compression::compress(&fs::read(dds_path)?)?
        } else if bmp_path.exists() {
            // Bitmaps round-trip verbatim, not through an image decode.
            compression::compress(&fs::read(bmp_path)?)?
        } else {
            Vec::new()
        };

        Ok(Self { width, head, data })
    }
}

impl ExgFile {
    /// Unpack every item into `dir`, one subdirectory per item named by
    /// its zero-based index.
    #[instrument(skip(self, options), err)]
    pub fn unpack_to_dir(&self, dir: &Path, options: &UnpackOptions) -> Result<()> {
        fs::create_dir_all(dir)?;

        for (index, item) in self.items.iter().enumerate() {
            item.unpack_to_dir(&dir.join(index.to_string()), options)?;
        }

        Ok(())
    }

    /// Load a container back from a directory written by
    /// [`ExgFile::unpack_to_dir`].
    ///
    /// Every immediate subdirectory must be named by a decimal index;
    /// items are ordered by that parsed index so the container's item
    /// order survives the round trip regardless of how the filesystem
    /// enumerates entries.
    #[instrument(err)]
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let index: usize = name
                .parse()
                .map_err(|_| Error::BadItemIndex(name.clone()))?;
            slots.push((index, entry.path()));
        }
        slots.sort_unstable_by_key(|(index, _)| *index);

        let items = slots
            .into_iter()
            .map(|(_, path)| ExgItem::load_from_dir(&path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { items })
    }
}
