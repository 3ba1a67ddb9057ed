use clap::Args;
use exg_gfx::ExgFile;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::commands::packed_base;

#[derive(Args)]
pub struct PackArgs {
    /// Unpacked container directories (`<file>.unpack`) to repack
    #[arg(value_name = "DIR", required = true)]
    targets: Vec<PathBuf>,

    /// Path for the output container file, instead of deriving it from
    /// the directory name; only valid with a single target
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Allow overwriting existing container files
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
        let out = match &self.file {
            Some(file) => file.clone(),
            None => packed_base(target).ok_or_else(|| {
                miette!(
                    "{} has no .unpack suffix, pass --file to name the output",
                    target.display()
                )
            })?,
        };

        let exg = ExgFile::load_from_dir(target)
            .context(format!("loading {}", target.display()))?;
        let bytes = exg.to_bytes()?;

        info!("packing {} items into {}", exg.len(), out.display());
        let mut f = if !self.overwrite {
            File::create_new(&out)
                .into_diagnostic()
                .context(format!("creating {}", out.display()))?
        } else {
            File::create(&out)
                .into_diagnostic()
                .context(format!("creating {}", out.display()))?
        };
        f.write_all(&bytes)
            .into_diagnostic()
            .context(format!("writing {}", out.display()))?;

        Ok(())
    }
}
