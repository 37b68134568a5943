//! Stock order commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use stockroom_core::types::stock_order::{StockOrder, StockOrderQuery};

use crate::app::App;
use crate::output;

const PAGE: &str = "/stock-orders";

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// List orders
    List(ListArgs),

    /// Confirm a draft order
    Confirm {
        id: i64,
    },

    /// Cancel a draft order
    Cancel {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Match against order numbers and companies
    #[arg(long, default_value = "")]
    pub search: String,

    /// `in` or `out`
    #[arg(long = "type", default_value = "")]
    pub direction: String,

    /// `draft`, `confirmed` or `cancelled`
    #[arg(long, default_value = "")]
    pub status: String,

    /// Print JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(app: &App, cmd: OrdersCommand) -> Result<()> {
    app.enter(PAGE).await?;

    match cmd {
        OrdersCommand::List(args) => {
            let query = StockOrderQuery {
                page: args.page,
                limit: args.limit,
                search: args.search,
                direction: args.direction,
                status: args.status,
            };
            let page = app
                .client
                .list_stock_orders(&query)
                .await
                .context("Failed to list orders")?;

            if args.json {
                return output::json_lines(&page.items, "No orders found.");
            }
            for order in &page.items {
                print_row(order);
            }
            if page.items.is_empty() {
                output::hint("No orders found.");
            }
        }
        OrdersCommand::Confirm { id } => {
            let order = app
                .client
                .confirm_stock_order(id)
                .await
                .context("Failed to confirm order")?;
            output::success(&format!("Confirmed {}", order.order_no));
        }
        OrdersCommand::Cancel { id } => {
            let order = app
                .client
                .cancel_stock_order(id)
                .await
                .context("Failed to cancel order")?;
            output::success(&format!("Cancelled {}", order.order_no));
        }
    }

    Ok(())
}

fn print_row(order: &StockOrder) {
    println!(
        "{:>5}  {:<20} {:<4} {:<10} {:<20} {:>10.2}",
        order.id,
        order.order_no,
        order.direction.as_str(),
        order.status.as_str(),
        order.company_name.as_deref().unwrap_or("-"),
        order.total_amount
    );
}
