//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{companies, finance, inventory, logs, orders, session, users};

/// Command-line shell for the stockroom inventory and finance service.
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version = env!("STOCKROOM_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Service base URL (defaults to the server of the last login)
    #[arg(long, env = "STOCKROOM_SERVER", global = true)]
    pub server: Option<String>,

    /// Directory holding the saved session
    #[arg(long, env = "STOCKROOM_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and save the session
    Login(session::LoginArgs),

    /// Forget the saved session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List routes and whether the current session may open them
    Routes(session::RoutesArgs),

    /// Navigate to a page, reporting where the guard lands
    Open(session::OpenArgs),

    /// Manage users (owner only)
    #[command(subcommand)]
    Users(users::UsersCommand),

    /// Stock items and movements
    #[command(subcommand)]
    Inventory(inventory::InventoryCommand),

    /// Suppliers, customers and balances
    #[command(subcommand)]
    Companies(companies::CompaniesCommand),

    /// Income and expense entries
    #[command(subcommand)]
    Finance(finance::FinanceCommand),

    /// Stock-in/stock-out orders
    #[command(subcommand)]
    Orders(orders::OrdersCommand),

    /// Operation log (owner only)
    Logs(logs::LogsArgs),
}
