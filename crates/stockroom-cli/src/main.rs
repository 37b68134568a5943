//! stockroom - command-line shell for the stockroom service.
//!
//! A thin wrapper over `stockroom-http` and `stockroom-core`: every feature
//! command first navigates to its page through the guard, so the shell
//! enforces the same access rules as the web front end.

mod app;
mod cli;
mod commands;
mod output;
mod storage;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::App;
use cli::{Cli, Commands};
use commands::{companies, finance, inventory, logs, orders, session, users};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let app = App::open(cli.server.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Login(args) => session::login(&app, args).await,
        Commands::Logout => session::logout(&app),
        Commands::Whoami => session::whoami(&app).await,
        Commands::Routes(args) => session::routes(&app, args).await,
        Commands::Open(args) => session::open(&app, args).await,
        Commands::Users(cmd) => users::handle(&app, cmd).await,
        Commands::Inventory(cmd) => inventory::handle(&app, cmd).await,
        Commands::Companies(cmd) => companies::handle(&app, cmd).await,
        Commands::Finance(cmd) => finance::handle(&app, cmd).await,
        Commands::Orders(cmd) => orders::handle(&app, cmd).await,
        Commands::Logs(args) => logs::run(&app, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
