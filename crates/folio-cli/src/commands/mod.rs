//! Subcommand implementations.

pub mod blog;
pub mod contact;
pub mod login;
pub mod open;
pub mod projects;
pub mod register;

mod logout;
mod whoami;

use anyhow::{Context, Result, anyhow, bail};
use folio::config::{API_URL_ENV, TOKEN_PATH_ENV, VALIDATE_TIMEOUT_ENV};
use folio::{Config, SessionManager};
use tracing::debug;

use crate::cli::{ApiArgs, Cli, Commands};

pub async fn handle(cli: Cli) -> Result<()> {
    let api = &cli.api;
    match cli.command {
        Commands::Login(args) => login::run(api, args).await,
        Commands::Register(args) => register::run(api, args).await,
        Commands::Logout => logout::run(api).await,
        Commands::Whoami => whoami::run(api).await,
        Commands::Open(args) => open::run(api, args).await,
        Commands::Projects(cmd) => projects::handle(api, cmd).await,
        Commands::Blog(cmd) => blog::handle(api, cmd).await,
        Commands::Contact(args) => contact::run(api, args).await,
    }
}

/// Build the session manager and restore the stored session.
pub async fn connect(args: &ApiArgs) -> Result<SessionManager> {
    if args.api_url.is_none() {
        bail!("No API address. Pass --api-url or set {API_URL_ENV}.");
    }
    // Flags and their environment fallbacks are already merged by clap.
    let config = Config::from_lookup(|key| match key {
        API_URL_ENV => args.api_url.clone(),
        TOKEN_PATH_ENV => args
            .token_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        VALIDATE_TIMEOUT_ENV => args.validate_timeout.clone(),
        _ => None,
    })
    .context("Invalid configuration")?;

    let session = SessionManager::from_config(&config).context("Failed to set up session")?;
    let state = session.initialize().await;
    debug!(authenticated = state.is_authenticated(), "session restored");

    Ok(session)
}

/// Turn a library error into the message a user should see.
pub fn explain(fallback: &'static str) -> impl FnOnce(folio::Error) -> anyhow::Error {
    move |e| anyhow!(e.user_message(fallback))
}
