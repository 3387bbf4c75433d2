//! Command-line options and the console run
//!
//! Usage:
//!   sgdb-sync [--list] [--game <text>] [--api-key <key>] [--steam-path <path>]
//!
//! Options:
//!   --config <path>   Settings file (default: <config dir>/steamgriddb/config.json)
//!   --setup           Prompt for the API key even if one is configured

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;
use sgdb_sync_core::{
    discover_users, resolve_steam_root, FilterCriteria, Settings, SteamGridDb, SyncEngine,
    SyncEvent, SyncOptions,
};

use crate::setup::run_setup;

/// CLI options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub api_key: Option<String>,
    pub steam_path: Option<PathBuf>,
    pub game: Option<String>,
    pub list: bool,
    pub setup: bool,
    pub verbose: bool,
}

/// Parse CLI arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--api-key" => options.api_key = Some(take_value(args, &mut i)?),
            "--steam-path" => options.steam_path = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--game" => options.game = Some(take_value(args, &mut i)?),
            "--list" => options.list = true,
            "--setup" => options.setup = true,
            "-v" | "--verbose" => options.verbose = true,
            _ if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
        i += 1;
    }

    Ok(options)
}

fn take_value(args: &[String], i: &mut usize) -> Result<String, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

/// Run the tool with parsed options
pub fn run(options: CliOptions) -> anyhow::Result<()> {
    let config_path = options
        .config
        .clone()
        .or_else(Settings::default_path)
        .context("Could not determine the config directory; use --config")?;

    debug!("Using config file {}", config_path.display());
    let mut settings = Settings::load(&config_path);

    let needs_setup = options.setup
        || (!options.list && options.api_key.is_none() && !settings.has_api_key());
    if needs_setup {
        settings = run_setup(
            settings,
            &config_path,
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?;
    }

    let settings = settings.with_overrides(options.api_key.clone(), options.steam_path.clone());

    let catalog = if options.list {
        None
    } else {
        if !settings.has_api_key() {
            return Err(sgdb_sync_core::Error::MissingApiKey.into());
        }
        Some(SteamGridDb::new(settings.api_key.trim())?)
    };

    let steam_root = resolve_steam_root(settings.steam_path.as_deref())?;
    println!("Steam: {}", steam_root.display());
    println!();

    let users = discover_users(&steam_root)?;

    let mut filter = FilterCriteria::new();
    if let Some(game) = options.game {
        filter = filter.with_name(game);
    }
    let engine = SyncEngine::new(SyncOptions::from_settings(&settings).with_filter(filter))
        .with_progress_callback(Box::new(|event: &SyncEvent| {
            if let Some(line) = narrate(event) {
                println!("{}", line);
            }
        }));

    match catalog {
        None => {
            engine.list(&users);
        }
        Some(catalog) => {
            let summary = engine.fetch(&users, &catalog);
            if summary.games_with_art > 0 {
                println!(
                    "✓ Processed {} game(s). Restart Steam to see changes!",
                    summary.games_with_art
                );
            }
        }
    }

    Ok(())
}

/// Console text for one progress event
fn narrate(event: &SyncEvent) -> Option<String> {
    match event {
        SyncEvent::UserStarted { user_id, shortcuts } => Some(if *shortcuts == 0 {
            format!("User: {}\n  No shortcuts\n", user_id)
        } else {
            format!("User: {}\n  {} shortcut(s)\n", user_id, shortcuts)
        }),
        SyncEvent::ShortcutStarted { name, app_id } => {
            Some(format!("  [{}]\n    App ID: {}", name, app_id))
        }
        SyncEvent::ExistingArtwork { files, .. } if !files.is_empty() => {
            Some(format!("    Files: {}", files.join(", ")))
        }
        SyncEvent::Searching { .. } => Some("    Searching...".to_string()),
        SyncEvent::NotFound { .. } => Some("    ✗ Not found".to_string()),
        SyncEvent::ArtworkDownloaded { art, .. } => Some(format!("    ✓ {}", art)),
        SyncEvent::ShortcutFinished { .. } => Some(String::new()),
        _ => None,
    }
}

/// Print CLI help
pub fn print_help() {
    println!("sgdb-sync v{}", env!("CARGO_PKG_VERSION"));
    println!("Set SteamGridDB artwork for Steam shortcuts");
    println!();
    println!("USAGE:");
    println!("    sgdb-sync [options]");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>             Config file path");
    println!("    --api-key <key>             SteamGridDB API key (overrides config)");
    println!("    --steam-path <path>         Steam installation path (overrides config)");
    println!("    --game <text>               Process only this game (case-insensitive partial match)");
    println!("    --list                      List shortcuts without downloading");
    println!("    --setup                     Run configuration setup");
    println!("    -v, --verbose               Show debug logging");
    println!("    -h, --help                  Show this help message");
    println!("    -V, --version               Show version");
    println!();
    println!("EXAMPLES:");
    println!("    sgdb-sync --setup");
    println!("    sgdb-sync --list");
    println!("    sgdb-sync --game \"hollow knight\"");
    println!("    sgdb-sync --steam-path ~/.var/app/com.valvesoftware.Steam/.local/share/Steam");
}
