//! Command line interface, built with clap derive.
//!
//! ```text
//! oblivion-modman [--dir <PATH>] [--debug] [command]
//!   list                      (default)
//!   toggle <NAME>
//!   install [ARCHIVE]         file picker when omitted
//!   delete <NAME> [--yes]     confirmation dialog unless --yes
//!   set-dir [PATH]            folder picker when omitted
//! ```

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Mod library manager for Oblivion Remastered
#[derive(Debug, Parser)]
#[command(name = "oblivion-modman", author, version, about)]
pub struct Cli {
    /// Use this mod directory for this run only (not saved)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<Utf8PathBuf>,

    /// Verbose logging, also echoed to the console
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List mods in the mod directory
    List,

    /// Enable a disabled mod or disable an enabled one
    Toggle {
        /// File name as shown by `list`
        name: String,
    },

    /// Extract a .zip or .7z archive into the mod directory
    Install {
        /// Archive to install; opens a file picker when omitted
        archive: Option<Utf8PathBuf>,
    },

    /// Delete a mod file or folder from the mod directory
    Delete {
        name: String,

        /// Skip the confirmation dialog
        #[arg(short, long)]
        yes: bool,
    },

    /// Change the saved mod directory
    SetDir {
        /// New directory; opens a folder picker when omitted
        path: Option<Utf8PathBuf>,
    },
}

impl Cli {
    /// The command to run, `list` when none was given.
    pub fn action(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }
}
