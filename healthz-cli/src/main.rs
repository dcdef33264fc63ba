//! healthz: command-line client for gNOI Healthz.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use healthz::Operation;

mod commands;

#[derive(Parser)]
#[command(name = "healthz")]
#[command(about = "Healthz client - query component health on a device")]
#[command(version)]
struct Cli {
    /// Config file (default: $HEALTHZ_CONFIG or ~/.config/healthz/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Device address (host:port), overrides config
    #[arg(short = 't', long = "target", global = true)]
    target: Option<String>,

    /// Username attached to each call
    #[arg(short = 'u', long = "username", global = true)]
    username: Option<String>,

    /// Password attached to each call
    #[arg(short = 'p', long = "password", global = true)]
    password: Option<String>,

    /// Per-call timeout in seconds (0 = no deadline)
    #[arg(long = "timeout", global = true)]
    timeout: Option<u64>,

    /// Device-state snapshot (JSON) that answers the calls
    #[arg(short = 's', long = "device-state", global = true)]
    device_state: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG also applies
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the latest health status of one component
    Get {
        /// JSON payload, e.g. '{"path": "/components/component[name=fan1]"}'
        #[arg(short = 'j', long = "jsonin", default_value = "{}")]
        jsonin: String,
    },

    /// List health events under a path
    List {
        /// JSON payload, e.g. '{"path": "/components", "include_acknowledged": true}'
        #[arg(short = 'j', long = "jsonin", default_value = "{}")]
        jsonin: String,
    },

    /// Re-check the health of a component
    Check {
        /// JSON payload, e.g. '{"path": "/components/component[name=fan1]", "event_id": "evt-1"}'
        #[arg(short = 'j', long = "jsonin", default_value = "{}")]
        jsonin: String,
    },

    /// Run an operation by RPC name (Healthz.Get, Healthz.List, Healthz.Check)
    Rpc {
        /// RPC name
        name: String,

        /// JSON payload for the operation
        #[arg(short = 'j', long = "jsonin", default_value = "{}")]
        jsonin: String,
    },

    /// Parse a path expression and print its elements
    Parse {
        /// Path expression, e.g. /components/component[name=fan1]/state
        path: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = commands::ConnectOptions {
        config: cli.config,
        target: cli.target,
        username: cli.username,
        password: cli.password,
        timeout_secs: cli.timeout,
        device_state: cli.device_state,
    };

    let result = match cli.command {
        Commands::Get { jsonin } => commands::run(Operation::Get, &opts, &jsonin),
        Commands::List { jsonin } => commands::run(Operation::List, &opts, &jsonin),
        Commands::Check { jsonin } => commands::run(Operation::Check, &opts, &jsonin),
        Commands::Rpc { name, jsonin } => commands::rpc(&name, &opts, &jsonin),
        Commands::Parse { path } => commands::parse(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
