//! hubrecents CLI entry point.
//!
//! Records and queries recently used repositories for an account or organization.

use std::process::ExitCode;

use clap::Parser;

use hubrecents::cli::{dispatch, Args};
use hubrecents::observability::init_tracing;
use hubrecents::{open_session, Config, Result};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("hubrecents: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<u8> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config);

    let owner = args.owner();
    let mut session = open_session(&config, owner.clone())?;

    let outcome = dispatch(&mut session, &owner, args.command, &mut std::io::stdout().lock())?;
    Ok(outcome.exit_code())
}
