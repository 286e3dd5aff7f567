//! Signup CLI - the registration form in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod commands;
mod output;

use commands::{config, list, logs, register, remove, validate};

/// Signup - register users from your terminal
#[derive(Parser)]
#[command(name = "signup", version, about, long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user (prompts for missing fields)
    Register {
        #[command(flatten)]
        args: register::RegisterArgs,
    },

    /// Check a single field value
    Validate {
        /// Field name (fullName, email, password, confirmPassword, phone, dateOfBirth)
        field: String,
        /// Value to check
        value: String,
        /// Password to compare against (for confirmPassword)
        #[arg(long, default_value = "")]
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a registered user
    Remove {
        /// Record ID to remove
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register { args } => register::run(args),
        Commands::Validate { field, value, password, json } => {
            validate::run(&field, &value, &password, json)
        }
        Commands::List { json } => list::run(json),
        Commands::Remove { id, force, json } => remove::run(&id, force, json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
