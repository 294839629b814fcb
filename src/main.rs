use anyhow::Result;
use clap::Parser;
use devswap::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    devswap::logging::init(cli.verbose);

    cli::run(cli)
}
