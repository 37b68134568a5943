//! Login, logout, identity and navigation commands.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use stockroom_core::nav::normalize;
use stockroom_core::{Credentials, GuardDecision, NavigationOutcome, User};

use crate::app::App;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Print one JSON object per route
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Page path, e.g. /inventory
    pub path: String,
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = app
        .client
        .login(&credentials)
        .await
        .context("Failed to login")?;
    app.remember_server()?;

    output::success("Logged in successfully");
    println!();
    print_user(&user);
    output::field("Server", app.client.server().as_str());

    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.client.logout();
    output::success("Logged out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    if app.session.token().is_none() {
        bail!("Not logged in. Run 'stockroom login' first.");
    }

    let user = app
        .client
        .restore()
        .await
        .context("Session is no longer valid. Run 'stockroom login' again.")?;

    print_user(&user);
    output::field("Server", app.client.server().as_str());

    Ok(())
}

#[derive(Serialize)]
struct RouteAccess<'a> {
    path: &'a str,
    name: &'a str,
    title: &'a str,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<String>,
}

pub async fn routes(app: &App, args: RoutesArgs) -> Result<()> {
    let guard = app.navigator.guard();

    for route in app.navigator.routes().routes() {
        let redirect = match &route.redirect {
            Some(alias) => Some(alias.clone()),
            None => match guard.check(route, &app.client).await {
                GuardDecision::Allow => None,
                GuardDecision::Redirect(to) => Some(to),
            },
        };

        let access = RouteAccess {
            path: &route.path,
            name: &route.name,
            title: &route.title,
            allowed: redirect.is_none(),
            redirect,
        };

        if args.json {
            output::json(&access)?;
        } else {
            let status = match &access.redirect {
                None => "open".green().to_string(),
                Some(to) => format!("-> {}", to).yellow().to_string(),
            };
            println!("{:<14} {:<22} {}", access.path, access.title.dimmed(), status);
        }
    }

    Ok(())
}

pub async fn open(app: &App, args: OpenArgs) -> Result<()> {
    let outcome = app
        .navigator
        .navigate(&args.path, &app.client)
        .await
        .with_context(|| format!("Failed to open {}", args.path))?;

    match outcome {
        NavigationOutcome::Arrived { path } => output::success(&format!("Opened {}", path)),
        NavigationOutcome::Redirected { from, to } => output::redirected(&from, &to),
        NavigationOutcome::Superseded => {
            let landed = app.navigator.current().unwrap_or_default();
            output::redirected(&normalize(&args.path), &landed);
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    output::field("User", &user.username);
    output::field("Name", user.label());
    output::field("Owner", if user.is_owner { "yes" } else { "no" });
    let permissions: Vec<&str> = user.permissions.iter().map(String::as_str).collect();
    output::field(
        "Permissions",
        if permissions.is_empty() {
            "-".to_string()
        } else {
            permissions.join(", ")
        }
        .as_str(),
    );
}
