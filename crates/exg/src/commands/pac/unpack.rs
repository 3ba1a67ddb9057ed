use clap::Args;
use exg_gfx::UnpackOptions;
use exg_pac::PacArchive;
use miette::{miette, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::archive_base;
use crate::commands::unpack_dir;

#[derive(Args)]
pub struct UnpackArgs {
    /// Archive pairs to unpack; either half of a pair or its base path
    #[arg(value_name = "ARCHIVE", required = true)]
    targets: Vec<PathBuf>,

    /// Target directory, instead of deriving `<base>.unpack` from the
    /// archive name; only valid with a single target
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Allow overwriting existing target directories
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Pad pixel buffers with a short final row instead of rejecting them
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Also write decompressed payload bytes as data.bin
    #[arg(long, default_value_t = false)]
    dump_raw: bool,
}

impl UnpackArgs {
    pub fn handle(&self) -> Result<()> {
        if self.directory.is_some() && self.targets.len() > 1 {
            return Err(miette!(
                "--directory cannot be combined with multiple targets"
            ));
        }

        let options = UnpackOptions::builder()
            .lenient(self.lenient)
            .dump_raw(self.dump_raw)
            .build();

        // Keep going when one archive fails so a batch run reports every
        // broken pair in a single pass.
        let mut failures = 0usize;
        for target in &self.targets {
            if let Err(e) = self.unpack_one(target, &options) {
                error!("{}: {e:?}", target.display());
                failures += 1;
            }
        }

        if failures > 0 {
            return Err(miette!(
                "{failures} of {} archives failed to unpack",
                self.targets.len()
            ));
        }
        Ok(())
    }

    fn unpack_one(&self, target: &Path, options: &UnpackOptions) -> Result<()> {
        let base = archive_base(target);
        let out = match &self.directory {
            Some(dir) => dir.clone(),
            None => unpack_dir(&base),
        };

        if out.exists() && !self.overwrite {
            return Err(miette!(
                "{} already exists, pass --overwrite to replace it",
                out.display()
            ));
        }

        let archive =
            PacArchive::open(&base).context(format!("opening {}", base.display()))?;

        info!("unpacking {} entries into {}", archive.len(), out.display());
        archive
            .unpack_to_dir(&out, options)
            .context(format!("unpacking into {}", out.display()))?;

        Ok(())
    }
}
