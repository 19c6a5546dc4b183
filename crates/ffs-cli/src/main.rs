mod cli;
mod logging;
mod tui;

use clap::Parser;
use cli::args::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;
    cli::run(cli)
}
