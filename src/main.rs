//! txkv: interactive shell for the transactional key-value store.
//!
//! Reads commands from stdin, one per line:
//! `begin`, `commit`, `rollback`, `get <key>`, `set <key> <value>`,
//! `delete <key>`, `count <value>`. An empty line, `exit` or `quit` ends
//! the session.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use txkv::{Config, Shell, Store};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TXKV_LOG";

#[derive(Debug, Parser)]
#[command(name = "txkv", version, about = "In-memory key-value store with nested transactions")]
struct Args {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not print a prompt before each line.
    #[arg(long)]
    no_prompt: bool,

    /// Log filter, e.g. `debug` or `txkv=trace`. Overrides TXKV_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    if let Err(e) = run(args) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> txkv::Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.no_prompt {
        config.shell.show_prompt = false;
    }

    tracing::debug!(?config, "starting shell");

    let mut shell = Shell::new(Store::new(config.store), config.shell);
    shell.run(io::stdin().lock(), io::stdout().lock())
}
