pub mod build;

use clap::{Parser, Subcommand};

/// smiley - Pidgin smiley theme builder
#[derive(Parser, Debug)]
#[command(name = "smiley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a smiley theme bundle from emoji and flag images
    Build(build::BuildArgs),
}
