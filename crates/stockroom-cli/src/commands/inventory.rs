//! Stock item and movement commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

use stockroom_core::types::SkipLimit;
use stockroom_core::types::inventory::{
    Direction, InventoryItem, StockMovement, TransactionFilter,
};
use stockroom_http::api::PerformanceRange;

use crate::app::App;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum InventoryCommand {
    /// List stock items
    List(ListArgs),

    /// Show one item by barcode
    Get {
        barcode: String,
    },

    /// Receive stock
    StockIn(MovementArgs),

    /// Issue or sell stock
    StockOut(MovementArgs),

    /// Dashboard figures
    Stats,

    /// Stock movement history
    Transactions(TransactionArgs),

    /// Profit and sales rankings
    Performance(RangeArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DirectionArg {
    In,
    Out,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::In => Direction::In,
            DirectionArg::Out => Direction::Out,
        }
    }
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct TransactionArgs {
    #[arg(long)]
    pub barcode: Option<String>,

    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    #[command(flatten)]
    pub range: RangeArgs,

    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Print JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MovementArgs {
    #[arg(long)]
    pub barcode: String,

    #[arg(long)]
    pub quantity: i64,

    /// Unit price
    #[arg(long)]
    pub price: f64,
}

impl From<MovementArgs> for StockMovement {
    fn from(args: MovementArgs) -> Self {
        StockMovement {
            barcode: args.barcode,
            quantity: args.quantity,
            price: args.price,
        }
    }
}

pub async fn handle(app: &App, cmd: InventoryCommand) -> Result<()> {
    match cmd {
        InventoryCommand::List(args) => {
            app.enter("/inventory").await?;
            let items = app
                .client
                .list_inventory(SkipLimit::new(args.skip, args.limit))
                .await
                .context("Failed to list inventory")?;

            if args.json {
                return output::json_lines(&items, "No items found.");
            }
            for item in &items {
                print_row(item);
            }
            if items.is_empty() {
                output::hint("No items found.");
            }
        }
        InventoryCommand::Get { barcode } => {
            app.enter("/inventory").await?;
            let item = app
                .client
                .get_inventory(&barcode)
                .await
                .with_context(|| format!("Failed to fetch item {}", barcode))?;
            output::json_pretty(&item)?;
        }
        InventoryCommand::StockIn(args) => {
            app.enter("/stock-in").await?;
            let item = app
                .client
                .stock_in(&args.into())
                .await
                .context("Failed to record stock-in")?;
            output::success(&format!("{} now at {} {}", item.name, item.stock, item.unit));
        }
        InventoryCommand::StockOut(args) => {
            app.enter("/stock-out").await?;
            let item = app
                .client
                .stock_out(&args.into())
                .await
                .context("Failed to record stock-out")?;
            output::success(&format!("{} now at {} {}", item.name, item.stock, item.unit));
            if item.is_low() {
                output::hint(&format!("Stock is at or below the warning level of {}", item.warning_stock));
            }
        }
        InventoryCommand::Stats => {
            app.enter("/dashboard").await?;
            let stats = app
                .client
                .inventory_stats()
                .await
                .context("Failed to fetch statistics")?;
            output::json_pretty(&stats)?;
        }
        InventoryCommand::Transactions(args) => {
            app.enter("/transactions").await?;
            let filter = TransactionFilter {
                barcode: args.barcode,
                direction: args.direction.map(Into::into),
                start_date: args.range.from.map(|d| d.to_string()),
                end_date: args.range.to.map(|d| d.to_string()),
            };
            let history = app
                .client
                .list_transactions(&filter, SkipLimit::new(args.skip, args.limit))
                .await
                .context("Failed to list transactions")?;
            output::json_lines(&history, "No transactions found.")?;
        }
        InventoryCommand::Performance(range) => {
            app.enter("/performance").await?;
            let range = PerformanceRange {
                start_date: range.from.map(|d| d.to_string()),
                end_date: range.to.map(|d| d.to_string()),
            };
            let stats = app
                .client
                .performance(&range)
                .await
                .context("Failed to fetch performance")?;
            output::json_pretty(&stats)?;
        }
    }

    Ok(())
}

fn print_row(item: &InventoryItem) {
    let stock = format!("{:>6} {}", item.stock, item.unit);
    let stock = if item.is_low() {
        stock.red().to_string()
    } else {
        stock
    };
    println!(
        "{:<16} {:<28} {} {:>9.2}",
        item.barcode, item.name, stock, item.selling_price
    );
}
