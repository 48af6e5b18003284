//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers. Builds the settings
//! and context once and threads them through; no handler reads globals.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::{Context, Settings};
use crate::error::Result;
use crate::project_identity;
use crate::ui as output;

pub fn dispatch(args: &Cli) -> Result<()> {
    let settings = Settings::load()?;
    let ctx = Context::build(&args.global, &settings)?;

    // --json suppresses the banner header only; output stays human-oriented.
    if !ctx.json && !ctx.quiet {
        output::banner(&ctx.channel);
    }

    match &args.command {
        Some(Command::Status) => commands::status::run(&ctx),
        Some(Command::Install { packages }) => commands::install::run(&ctx, packages),
        Some(Command::Remove { packages }) => commands::remove::run(&ctx, packages),
        Some(Command::Update) => commands::update::run(&ctx),
        Some(Command::Search { term }) => commands::search::run(&ctx, term),
        Some(Command::Info { package }) => commands::info::run(&ctx, package),
        Some(Command::List) => commands::list::run(&ctx),
        Some(Command::Doctor) => commands::doctor::run(&ctx),
        Some(Command::Clean) => commands::maintenance::clean(&ctx),
        Some(Command::Autoremove) => commands::maintenance::autoremove(&ctx),
        Some(Command::Sync) => commands::maintenance::sync(&ctx),
        Some(Command::Power { command }) => commands::power::run(&ctx, command),
        Some(Command::Dm { command }) => commands::dm::run(&ctx, command),
        Some(Command::Setup { target }) => commands::setup::run(&ctx, target),
        Some(Command::Upgrade) => commands::self_update::upgrade(&ctx),
        Some(Command::Switch { channel }) => {
            commands::self_update::switch(&ctx, channel.as_deref())
        }
        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            output::info("No command provided.");
            output::info("Quick start:");
            output::indent(
                &format!("{} status", project_identity::BINARY_NAME),
                2,
            );
            output::indent(
                &format!("{} install htop", project_identity::BINARY_NAME),
                2,
            );
            output::indent(
                &format!("{} search browser", project_identity::BINARY_NAME),
                2,
            );
            output::info(&format!(
                "Use `{} --help` for the full command list.",
                project_identity::BINARY_NAME
            ));
            Ok(())
        }
    }
}
