use clap::Parser;
use miette::Result;
use smiley::cli::{Cli, Commands};
use smiley::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => smiley::cli::build::run(args, &printer)?,
    }

    Ok(())
}
