//! Round trip between YPAC archives and editable directory trees.
//!
//! An archive unpacks to a root directory holding:
//!
//! - `info.json` — the archive's 12-byte head blob as a hex string
//! - one subdirectory per container entry, named by the entry name and
//!   laid out by [`exg_gfx::ExgFile::unpack_to_dir`]
//! - `misc/` — one file per opaque entry, byte-identical to the archive
//!
//! Loading applies the inverse mapping. Container directories are taken
//! in lexicographic name order and misc files after them, also in
//! lexicographic order; that fixed order is what the repacked data file's
//! layout follows.

use exg_gfx::{ExgFile, UnpackOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    types::{PacArchive, PacEntry, PacPayload, HEAD_LEN},
};

/// Manifest file name at the archive root
pub const MANIFEST_NAME: &str = "info.json";

/// Reserved subdirectory holding opaque entries
pub const MISC_DIR: &str = "misc";

#[derive(Serialize, Deserialize)]
struct ArchiveManifest {
    head: String,
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::BadFileName(path.to_path_buf()))
}

/// Immediate children of `dir` matching `filter`, sorted by name.
fn sorted_children(dir: &Path, filter: fn(&fs::Metadata) -> bool) -> Result<Vec<std::path::PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if filter(&entry.metadata()?) {
            children.push(entry.path());
        }
    }
    children.sort();
    Ok(children)
}

impl PacArchive {
    /// Unpack the archive into `root` as an editable directory tree.
    ///
    /// # Warnings
    ///
    /// Entry names become path components under `root`. Archives are not
    /// trusted input: a crafted name could escape the target directory,
    /// so do not unpack archives from unknown sources into sensitive
    /// locations.
    #[instrument(skip(self, options), err)]
    pub fn unpack_to_dir(&self, root: &Path, options: &UnpackOptions) -> Result<()> {
        fs::create_dir_all(root)?;

        let manifest = ArchiveManifest {
            head: hex::encode(self.head),
        };
        fs::write(root.join(MANIFEST_NAME), serde_json::to_string(&manifest)?)?;

        let misc_dir = root.join(MISC_DIR);
        fs::create_dir_all(&misc_dir)?;

        for entry in &self.entries {
            info!("unpacking {}", entry.name);
            match &entry.payload {
                PacPayload::Exg(exg) => exg
                    .unpack_to_dir(&root.join(&entry.name), options)
                    .map_err(|e| Error::container(&entry.name, e))?,
                PacPayload::Misc(data) => fs::write(misc_dir.join(&entry.name), data)?,
            }
        }

        Ok(())
    }

    /// Load an archive back from a directory written by
    /// [`PacArchive::unpack_to_dir`].
    ///
    /// Every subdirectory except `misc` is loaded as one container entry
    /// named after the directory; every file under `misc` becomes one
    /// opaque entry named after the file. Containers come first, then
    /// misc entries, each group in lexicographic name order.
    #[instrument(err)]
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        let manifest: ArchiveManifest =
            serde_json::from_str(&fs::read_to_string(root.join(MANIFEST_NAME))?)?;

        let head_bytes = hex::decode(&manifest.head)?;
        let head: [u8; HEAD_LEN] =
            head_bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::BadHeadLength {
                    expected: HEAD_LEN,
                    actual: head_bytes.len(),
                })?;

        let mut entries = Vec::new();

        for path in sorted_children(root, fs::Metadata::is_dir)? {
            let name = file_name(&path)?;
            if name == MISC_DIR {
                continue;
            }

            info!("loading {name}");
            let exg = ExgFile::load_from_dir(&path).map_err(|e| Error::container(&name, e))?;
            entries.push(PacEntry {
                name,
                payload: PacPayload::Exg(exg),
            });
        }

        let misc_dir = root.join(MISC_DIR);
        if misc_dir.is_dir() {
            for path in sorted_children(&misc_dir, fs::Metadata::is_file)? {
                let name = file_name(&path)?;

                info!("loading {name}");
                entries.push(PacEntry {
                    name,
                    payload: PacPayload::Misc(fs::read(&path)?),
                });
            }
        }

        Ok(Self { head, entries })
    }
}
