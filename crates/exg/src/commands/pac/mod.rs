use std::path::{Path, PathBuf};

pub mod pack;
pub mod unpack;

#[derive(clap::Subcommand)]
pub enum PacCommands {
    /// Unpack archive pairs into editable directory trees
    Unpack(unpack::UnpackArgs),
    /// Pack directory trees back into archive pairs
    Pack(pack::PackArgs),
}

impl PacCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            PacCommands::Unpack(unpack) => unpack.handle(),
            PacCommands::Pack(pack) => pack.handle(),
        }
    }
}

/// Strip a trailing `.hed` or `.dat` so either half of the pair (or the
/// bare base path) can be named on the command line.
pub(crate) fn archive_base(target: &Path) -> PathBuf {
    match target.extension().and_then(|e| e.to_str()) {
        Some("hed") | Some("dat") => target.with_extension(""),
        _ => target.to_path_buf(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn archive_base_strips_pair_extensions() {
        assert_eq!(archive_base(Path::new("a/b.hed")), PathBuf::from("a/b"));
        assert_eq!(archive_base(Path::new("a/b.dat")), PathBuf::from("a/b"));
        assert_eq!(archive_base(Path::new("a/b")), PathBuf::from("a/b"));
        // Other extensions are part of the base name.
        assert_eq!(
            archive_base(Path::new("a/b.v2")),
            PathBuf::from("a/b.v2")
        );
    }
}
