use clap::Args;
use exg_pac::PacArchive;
use miette::{miette, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::commands::packed_base;

#[derive(Args)]
pub struct PackArgs {
    /// Unpacked archive directories (`<base>.unpack`) to repack
    #[arg(value_name = "DIR", required = true)]
    targets: Vec<PathBuf>,

    /// Base path for the output pair, instead of deriving it from the
    /// directory name; only valid with a single target
    #[arg(short, long, value_name = "BASE")]
    file: Option<PathBuf>,

    /// Allow overwriting existing archive pairs
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        if self.file.is_some() && self.targets.len() > 1 {
            return Err(miette!("--file cannot be combined with multiple targets"));
        }

        let mut failures = 0usize;
        for target in &self.targets {
            if let Err(e) = self.pack_one(target) {
                error!("{}: {e:?}", target.display());
                failures += 1;
            }
        }

        if failures > 0 {
            return Err(miette!(
                "{failures} of {} directories failed to pack",
                self.targets.len()
            ));
        }
        Ok(())
    }

    fn pack_one(&self, target: &Path) -> Result<()> {
        let base = match &self.file {
            Some(base) => base.clone(),
            None => packed_base(target).ok_or_else(|| {
                miette!(
                    "{} has no .unpack suffix, pass --file to name the output",
                    target.display()
                )
            })?,
        };

        if !self.overwrite {
            for half in ["hed", "dat"] {
                let mut path = base.clone().into_os_string();
                path.push(".");
                path.push(half);
                let path = PathBuf::from(path);
                if path.exists() {
                    return Err(miette!(
                        "{} already exists, pass --overwrite to replace it",
                        path.display()
                    ));
                }
            }
        }

        let archive = PacArchive::load_from_dir(target)
            .context(format!("loading {}", target.display()))?;

        info!("packing {} entries into {}.*", archive.len(), base.display());
        archive
            .save(&base)
            .context(format!("saving {}", base.display()))?;

        Ok(())
    }
}
