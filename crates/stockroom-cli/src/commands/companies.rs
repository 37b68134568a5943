//! Supplier and customer commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use stockroom_core::types::SkipLimit;
use stockroom_core::types::company::CompanyKind;
use stockroom_http::api::{BalanceQuery, CompanyFilter};

use crate::app::App;
use crate::output;

const PAGE: &str = "/companies";

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Supplier,
    Customer,
}

impl From<KindArg> for CompanyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Supplier => CompanyKind::Supplier,
            KindArg::Customer => CompanyKind::Customer,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CompaniesCommand {
    /// List companies
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Receivable and payable balances
    Balances(BalancesArgs),

    /// Ledger of one company
    Ledger {
        id: i64,

        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Payments received or made
    Payments {
        #[arg(long)]
        company_id: Option<i64>,
    },
}

#[derive(Args, Debug)]
pub struct BalancesArgs {
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Match against company names
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

pub async fn handle(app: &App, cmd: CompaniesCommand) -> Result<()> {
    app.enter(PAGE).await?;

    match cmd {
        CompaniesCommand::List { kind } => {
            let filter = CompanyFilter {
                kind: kind.map(Into::into),
            };
            let page = app
                .client
                .list_companies(filter)
                .await
                .context("Failed to list companies")?;
            output::json_lines(&page.items, "No companies found.")?;
        }
        CompaniesCommand::Balances(args) => {
            let kind = args.kind.map(CompanyKind::from);
            let query = BalanceQuery {
                skip: args.skip,
                limit: args.limit,
                kind,
                search: args.search,
            };
            let page = app
                .client
                .company_balances(&query)
                .await
                .context("Failed to fetch balances")?;
            let total = app
                .client
                .total_balance(CompanyFilter { kind })
                .await
                .context("Failed to fetch total balance")?;

            output::json_lines(&page.items, "No balances found.")?;
            eprintln!();
            output::field("Companies", &page.total.to_string());
            output::field("Receivable", &format!("{:.2}", total.total_receivable));
            output::field("Payable", &format!("{:.2}", total.total_payable));
        }
        CompaniesCommand::Ledger { id, skip, limit } => {
            let ledger = app
                .client
                .company_transactions(id, SkipLimit::new(skip, limit))
                .await
                .with_context(|| format!("Failed to fetch ledger of company {}", id))?;
            output::json_lines(&ledger, "No ledger entries found.")?;
        }
        CompaniesCommand::Payments { company_id } => {
            let payments = app
                .client
                .list_payments(company_id)
                .await
                .context("Failed to list payments")?;
            output::json_lines(&payments, "No payments found.")?;
        }
    }

    Ok(())
}
