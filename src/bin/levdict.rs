//! `levdict` command-line entry point.

use clap::Parser;
use levdict::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
