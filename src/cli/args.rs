use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "ware",
    about = "SkywareOS unified package front-end",
    long_about = "Unified front-end over the system repository (pacman), universal \
                  applications (flatpak) and the community repository (AUR).",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Suppress the banner header (script-friendly output)
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show system status: kernel, uptime, updates, firewall, disk, memory
    Status,

    /// Install packages (system repo, then flatpak, then AUR)
    Install {
        /// Packages to install; prompts for one when omitted
        packages: Vec<String>,
    },

    /// Remove installed packages, whichever backend owns them
    Remove {
        /// Packages to remove; prompts for one when omitted
        packages: Vec<String>,
    },

    /// Update all backends (pacman -Syu, flatpak update, AUR helper)
    Update,

    /// Search all backends for a term
    Search { term: String },

    /// Show package details from the first backend that knows it
    Info { package: String },

    /// List installed packages per backend
    List,

    /// Run system health checks (report-only, never repairs)
    Doctor,

    /// Clean package caches
    Clean,

    /// Remove orphaned and unused packages
    Autoremove,

    /// Refresh package databases
    Sync,

    /// Apply or inspect a power profile
    Power {
        #[command(subcommand)]
        command: PowerCommand,
    },

    /// Manage the display manager
    Dm {
        #[command(subcommand)]
        command: DmCommand,
    },

    /// Run an environment setup target (gnome, plasma, xfce, hyprland, snap)
    Setup { target: String },

    /// Re-fetch the latest installer for the current channel and run it
    Upgrade,

    /// Switch release channel and re-run the installer
    Switch {
        /// Target channel (e.g. stable, testing); prompts when omitted
        channel: Option<String>,
    },

    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug)]
pub enum PowerCommand {
    /// Default governor, power management service on
    Balanced,
    /// Performance governor, power management service off
    Performance,
    /// Powersave governor, power management service on
    Battery,
    /// Report the current governor and service state
    Status,
}

#[derive(Subcommand, Debug)]
pub enum DmCommand {
    /// List known display managers and whether they are installed
    List,
    /// Report active/enabled state of installed display managers
    Status,
    /// Enable one display manager, disabling all others first
    Switch { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn json_flag_precedes_subcommand() {
        let cli = Cli::try_parse_from(["ware", "--json", "status"]).unwrap();
        assert!(cli.global.json);
        assert!(matches!(cli.command, Some(Command::Status)));
    }

    #[test]
    fn install_accepts_multiple_packages() {
        let cli = Cli::try_parse_from(["ware", "install", "htop", "bat"]).unwrap();
        match cli.command {
            Some(Command::Install { packages }) => assert_eq!(packages, vec!["htop", "bat"]),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn install_with_no_packages_parses() {
        let cli = Cli::try_parse_from(["ware", "install"]).unwrap();
        match cli.command {
            Some(Command::Install { packages }) => assert!(packages.is_empty()),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn dm_switch_requires_name() {
        assert!(Cli::try_parse_from(["ware", "dm", "switch"]).is_err());
        let cli = Cli::try_parse_from(["ware", "dm", "switch", "sddm"]).unwrap();
        match cli.command {
            Some(Command::Dm {
                command: DmCommand::Switch { name },
            }) => assert_eq!(name, "sddm"),
            other => panic!("unexpected parse: {:?}", other),
        }
    }
}
