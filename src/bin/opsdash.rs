use std::process::ExitCode;

use clap::Parser;
use opsdash::cli::{run, Args};
use opsdash::logging;

fn main() -> anyhow::Result<ExitCode> {
    logging::init();

    let args = Args::parse();
    let ok = run(args, &mut std::io::stdout().lock())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
