//! Shell completion generation.

use crate::cli::args::Cli;
use crate::error::Result;
use crate::project_identity;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

pub fn run(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    generate(
        shell,
        &mut command,
        project_identity::BINARY_NAME,
        &mut io::stdout(),
    );
    Ok(())
}
