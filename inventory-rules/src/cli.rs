use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use inventory_rules::{
    InventoryConfig, RootInventoryConfig, check_root_inventory, output, validate_tree,
};
use tracing_subscriber::EnvFilter;

/// Every check passed.
const EXIT_OK: u8 = 0;
/// One or more inventory failures were found.
const EXIT_FAILURES: u8 = 1;
/// The check itself could not run.
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "inventory-rules",
    version,
    about = "Check that every directory documents its contents in inventory.md",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
    // Without a subcommand, `check` runs with these arguments.
    #[command(flatten)]
    check: CheckArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the inventory.md of every directory under ROOT
    Check(CheckArgs),
    /// Compare ROOT's direct children against the root-level inventory list
    Root(RootArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Directory to walk (defaults to the current directory)
    root: Option<PathBuf>,
    /// Additional child name to ignore everywhere (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,
    /// Glob of directories not to walk into (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,
    /// Minimum words in a folder description
    #[arg(long, value_name = "N")]
    min_folder_words: Option<usize>,
    /// Minimum words in an entry description
    #[arg(long, value_name = "N")]
    min_entry_words: Option<usize>,
    /// Inventory file name, matched case-insensitively
    #[arg(long, value_name = "NAME")]
    inventory_name: Option<String>,
    /// Follow symbolic links while walking
    #[arg(long)]
    follow_links: bool,
}

impl CheckArgs {
    fn config(&self) -> InventoryConfig {
        let mut config = InventoryConfig::default();
        config.walk.ignore_names.extend(self.ignore.iter().cloned());
        config.walk.exclude.clone_from(&self.exclude);
        config.walk.follow_links = self.follow_links;
        if let Some(words) = self.min_folder_words {
            config.rules.min_folder_description_words = words;
        }
        if let Some(words) = self.min_entry_words {
            config.rules.min_entry_description_words = words;
        }
        if let Some(name) = &self.inventory_name {
            config.rules.inventory_file_name.clone_from(name);
        }
        config
    }
}

#[derive(Args, Debug)]
struct RootArgs {
    /// Project root (defaults to the current directory)
    root: Option<PathBuf>,
    /// Inventory list, relative to ROOT
    #[arg(long, value_name = "PATH", default_value = inventory_rules::DEFAULT_ROOT_INVENTORY)]
    inventory: PathBuf,
}

impl RootArgs {
    fn config(&self) -> RootInventoryConfig {
        let mut config = RootInventoryConfig::default();
        config.inventory.clone_from(&self.inventory);
        config
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Ignore the error: a subscriber may already be installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(path) => Ok(path.to_owned()),
        None => std::env::current_dir().context("Failed to determine the current directory"),
    }
}

fn run_check(args: &CheckArgs, json: bool, out: &mut dyn Write) -> Result<bool> {
    let root = resolve_root(args.root.as_deref())?;
    let report = validate_tree(&root, &args.config())?;
    if json {
        output::write_json(&report, out)?;
    } else {
        output::write_human(&report, out)?;
    }
    Ok(report.ok)
}

/// Run the selected command. Returns whether everything passed.
fn execute(cli: &Cli, out: &mut dyn Write) -> Result<bool> {
    match &cli.command {
        None => run_check(&cli.check, cli.json, out),
        Some(Commands::Check(args)) => run_check(args, cli.json, out),
        Some(Commands::Root(args)) => {
            let root = resolve_root(args.root.as_deref())?;
            let report = check_root_inventory(&root, &args.config())?;
            if cli.json {
                output::write_root_json(&report, out)?;
            } else {
                output::write_root_human(&report, out)?;
            }
            Ok(report.ok)
        }
    }
}

/// Parse arguments, run, and map the outcome onto the exit-code convention:
/// `0` pass, `1` failures found, `2` operational error. Argument errors are
/// reported by clap, which also exits with `2`.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(&cli, &mut out);
    if let Err(err) = &outcome {
        eprintln!("{} {err:#}", "error:".red().bold());
    }
    ExitCode::from(exit_code(&outcome))
}

fn exit_code(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILURES,
        Err(_) => EXIT_ERROR,
    }
}
