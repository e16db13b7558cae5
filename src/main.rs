//! Oblivion Mod Manager - command line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments
//! 2. Initialize logging → ~/.oblivion_mod_manager/logs/oblivion-modman.<date>
//! 3. Resolve the mod directory (saved config, platform default, folder picker,
//!    or unvalidated fallback), unless `--dir` overrides it for this run
//! 4. Run the requested action, print its outcome
//! 5. Re-scan and print the listing
//!
//! Every action failure is reported and turned into a non-zero exit code;
//! nothing panics on a missing or invalid mod directory.

use anyhow::Result;
use clap::Parser;
use oblivion_modman::cli::{Cli, Command};
use oblivion_modman::config::{self, ConfigStore};
use oblivion_modman::ui::{self, Controller, NativeDialogs, Notice, NoticeLevel};
use oblivion_modman::{APP_NAME, DirectoryResolver, GameProfile, VERSION};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_dir = config::app_dir()?.join("logs");
    let _guard = oblivion_modman::logging::setup_logging(&log_dir, APP_NAME, cli.debug, cli.debug)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let resolver = DirectoryResolver::new(
        ConfigStore::default_location()?,
        GameProfile::oblivion_remastered()?,
    );
    let mut dialogs = NativeDialogs;

    let mut controller = match cli.dir.clone() {
        Some(dir) => Controller::with_override(resolver, dir),
        None => Controller::start(resolver, &mut dialogs),
    };

    if !controller.directory().is_resolved() {
        report(&Notice::warning(format!(
            "{} is not a validated mod directory, listing may be empty",
            controller.directory().path()
        )));
    }

    let notice = match cli.action() {
        Command::List => None,
        Command::Toggle { name } => Some(controller.toggle(&name)),
        Command::Install { archive } => match archive.or_else(ui::pick_archive) {
            Some(archive) => Some(controller.install(&archive)),
            None => Some(Notice::info("Install cancelled")),
        },
        Command::Delete { name, yes } => {
            let mut confirm = |name: &str| yes || ui::confirm_delete(name);
            controller.delete(&name, &mut confirm)
        }
        Command::SetDir { path: Some(path) } => Some(controller.set_directory(&path)),
        Command::SetDir { path: None } => Some(controller.change_directory(&mut dialogs)),
    };

    let failed = notice.as_ref().is_some_and(Notice::is_error);
    if let Some(notice) = &notice {
        report(notice);
    }

    let listing = controller.refresh();
    if let Some(warning) = &listing.warning {
        report(warning);
    }
    println!("Mod directory: {}", controller.directory().path());
    print!("{}", ui::render_listing(&listing.mods));

    tracing::info!("Done");
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn report(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
        NoticeLevel::Error => eprintln!("error: {}", notice.message),
    }
}
