//! Income and expense commands.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand, ValueEnum};

use stockroom_core::types::finance::{EntryKind, FinanceQuery, NewOtherTransaction};

use crate::app::App;
use crate::output;

const PAGE: &str = "/finance";

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum EntryArg {
    Income,
    Expense,
}

impl From<EntryArg> for EntryKind {
    fn from(kind: EntryArg) -> Self {
        match kind {
            EntryArg::Income => EntryKind::Income,
            EntryArg::Expense => EntryKind::Expense,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommand {
    /// List entries
    List(ListArgs),

    /// Record an entry
    Create(CreateArgs),

    /// Delete an entry
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub page_size: u32,

    #[arg(long, value_enum)]
    pub kind: Option<EntryArg>,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, value_enum)]
    pub kind: EntryArg,

    #[arg(long)]
    pub amount: f64,

    /// Entry date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn handle(app: &App, cmd: FinanceCommand) -> Result<()> {
    app.enter(PAGE).await?;

    match cmd {
        FinanceCommand::List(args) => {
            let query = FinanceQuery {
                page: args.page,
                page_size: args.page_size,
                kind: args.kind.map(Into::into),
                start_date: args.from,
                end_date: args.to,
            };
            let page = app
                .client
                .list_finance(&query)
                .await
                .context("Failed to list entries")?;

            output::json_lines(&page.items, "No entries found.")?;
            eprintln!();
            output::field(
                "Page",
                &format!("{} ({} entries)", query.page, page.total),
            );
        }
        FinanceCommand::Create(args) => {
            let entry = NewOtherTransaction {
                kind: args.kind.into(),
                amount: args.amount,
                transaction_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
                notes: args.notes,
            };
            let created = app
                .client
                .create_finance(&entry)
                .await
                .context("Failed to record entry")?;
            output::success(&format!(
                "Recorded entry {} on {}",
                created.id, created.transaction_date
            ));
        }
        FinanceCommand::Delete { id } => {
            app.client
                .delete_finance(id)
                .await
                .context("Failed to delete entry")?;
            output::success(&format!("Deleted entry {}", id));
        }
    }

    Ok(())
}
