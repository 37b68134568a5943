//! Operation log command.

use anyhow::{Context, Result};
use clap::Args;

use stockroom_core::types::log::LogQuery;

use crate::app::App;
use crate::output;

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Earliest timestamp, e.g. 2024-03-01
    #[arg(long)]
    pub from: Option<String>,

    /// Latest timestamp
    #[arg(long)]
    pub to: Option<String>,

    /// Only this operation type
    #[arg(long = "type")]
    pub operation_type: Option<String>,
}

pub async fn run(app: &App, args: LogsArgs) -> Result<()> {
    app.enter("/logs").await?;

    let query = LogQuery {
        start_date: args.from,
        end_date: args.to,
        operation_type: args.operation_type,
    };
    let logs = app
        .client
        .operation_logs(&query)
        .await
        .context("Failed to fetch operation logs")?;

    output::json_lines(&logs, "No log entries found.")
}
