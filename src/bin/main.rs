use std::process;
use clap::Parser;

#[macro_use]
extern crate log;

use anyhow::Result;
use parser::Cli;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Record the command line arguments, then dispatch to the requested subcommand.
fn serialize_and_run(cli: Cli) -> Result<()> {
    cli.serialize()?;
    heredity_rs::run(cli)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ---- `--quiet` silences everything but errors.
    let verbosity = if cli.quiet {0} else {cli.verbose + 1};
    logger::Logger::init(verbosity)?;

    if let Err(e) = serialize_and_run(cli) {
        error!("{e:?}");
        process::exit(1);
    }
    Ok(())
}
