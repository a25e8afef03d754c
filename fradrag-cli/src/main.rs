use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use fradrag_cli::{Cli, logging, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;
    out.flush().context("cannot write output")?;

    Ok(())
}
