use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub mod gfx;
pub mod pac;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle YPAC archive pairs
    Pac {
        #[command(subcommand)]
        command: pac::PacCommands,
    },
    /// Handle standalone EXG container files
    Gfx {
        #[command(subcommand)]
        command: gfx::GfxCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Pac { command } => command.handle(),
            Commands::Gfx { command } => command.handle(),
        }
    }
}

/// Append `.unpack` to a path without replacing an existing extension.
pub(crate) fn unpack_dir(base: &Path) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".unpack");
    PathBuf::from(path)
}

/// Derive the packed output path by stripping a `.unpack` suffix.
pub(crate) fn packed_base(dir: &Path) -> Option<PathBuf> {
    if dir.extension() == Some(OsStr::new("unpack")) {
        Some(dir.with_extension(""))
    } else {
        None
    }
}
