pub mod pack;
pub mod unpack;

#[derive(clap::Subcommand)]
pub enum GfxCommands {
    /// Unpack standalone container files into editable directory trees
    Unpack(unpack::UnpackArgs),
    /// Pack directory trees back into standalone container files
    Pack(pack::PackArgs),
}

impl GfxCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            GfxCommands::Unpack(unpack) => unpack.handle(),
            GfxCommands::Pack(pack) => pack.handle(),
        }
    }
}
