use clap::Args;
use exg_gfx::{ExgFile, UnpackOptions};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::commands::unpack_dir;

#[derive(Args)]
pub struct UnpackArgs {
    /// Standalone container files (`.exg`) to unpack
    #[arg(value_name = "FILE", required = true)]
    targets: Vec<PathBuf>,

    /// Target directory, instead of deriving `<file>.unpack` from the
    /// container name; only valid with a single target
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

        let mut failures = 0usize;
        for target in &self.targets {
            if let Err(e) = self.unpack_one(target, &options) {
                error!("{}: {e:?}", target.display());
                failures += 1;
            }
        }

        if failures > 0 {
            return Err(miette!(
                "{failures} of {} containers failed to unpack",
                self.targets.len()
            ));
        }
        Ok(())
    }

    fn unpack_one(&self, target: &Path, options: &UnpackOptions) -> Result<()> {
        let out = match &self.directory {
            Some(dir) => dir.clone(),
            None => unpack_dir(target),
        };

        if out.exists() && !self.overwrite {
            return Err(miette!(
                "{} already exists, pass --overwrite to replace it",
                out.display()
            ));
        }

        let f = File::open(target)
            .into_diagnostic()
            .context(format!("opening {}", target.display()))?;
        let exg = ExgFile::read(&mut BufReader::new(f))
            .context(format!("decoding {}", target.display()))?;

        info!("unpacking {} items into {}", exg.len(), out.display());
        exg.unpack_to_dir(&out, options)
            .context(format!("unpacking into {}", out.display()))?;

        Ok(())
    }
}
