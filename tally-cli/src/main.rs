use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tally_core::parse_timezone;
use tally_store::RecordStore;
use tracing::info;

mod app;
mod config;
mod logging;
mod render;
mod session;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal expense log")]
struct Cli {
    /// Expense log CSV (overrides the config's store.path)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Config file (default: ~/.tally/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config file and exit
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::InitConfig) => config::init_config(cli.config.as_deref()),
        None => run_session(cli),
    }
}

fn run_session(cli: Cli) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.session.log_level);

    let tz = parse_timezone(&cfg.session.timezone).context("session.timezone in config")?;

    let data_path = match cli.file.or_else(|| cfg.store.path.clone()) {
        Some(p) => p,
        None => state::default_data_path()?,
    };
    info!(path = %data_path.display(), tz = tz.name(), "starting session");

    let store = RecordStore::new(data_path);
    let console = app::Console::new(io::stdin().lock(), io::stdout().lock());
    app::App::new(&store, &cfg, tz, console).run()
}
