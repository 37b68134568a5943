//! User administration commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use stockroom_core::types::{NewUser, UserUpdate};

use crate::app::App;
use crate::output;

const PAGE: &str = "/users";

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users
    List,

    /// Create a user
    Create(CreateArgs),

    /// Update a user's name, permissions or password
    Update(UpdateArgs),

    /// Delete a user
    Delete {
        /// User id
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub username: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub password: String,

    /// Permission tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub permissions: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// User id
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Replacement permission tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub permissions: Option<Vec<String>>,
}

pub async fn handle(app: &App, cmd: UsersCommand) -> Result<()> {
    app.enter(PAGE).await?;

    match cmd {
        UsersCommand::List => {
            let users = app.client.list_users().await.context("Failed to list users")?;
            for user in &users {
                let role = if user.is_owner {
                    "owner".cyan().to_string()
                } else {
                    user.permissions.iter().cloned().collect::<Vec<_>>().join(",")
                };
                let state = if user.is_active { "" } else { " (inactive)" };
                println!("{:>4}  {:<16} {}{}", user.id, user.username, role, state.red());
            }
            if users.is_empty() {
                output::hint("No users found.");
            }
        }
        UsersCommand::Create(args) => {
            let new_user = NewUser {
                username: args.username,
                name: args.name,
                password: args.password,
                permissions: args.permissions,
            };
            let user = app
                .client
                .create_user(&new_user)
                .await
                .context("Failed to create user")?;
            output::success(&format!("Created user {} (id {})", user.username, user.id));
        }
        UsersCommand::Update(args) => {
            let update = UserUpdate {
                name: args.name,
                permissions: args.permissions,
                password: args.password,
            };
            let user = app
                .client
                .update_user(args.id, &update)
                .await
                .context("Failed to update user")?;
            output::success(&format!("Updated user {}", user.username));
        }
        UsersCommand::Delete { id } => {
            app.client
                .delete_user(id)
                .await
                .context("Failed to delete user")?;
            output::success(&format!("Deleted user {}", id));
        }
    }

    Ok(())
}
