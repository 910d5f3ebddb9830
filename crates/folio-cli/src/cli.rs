//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio::config::{API_URL_ENV, TOKEN_PATH_ENV, VALIDATE_TIMEOUT_ENV};

use crate::commands::{blog, contact, login, open, projects, register};

/// Command-line client for the folio portfolio and blog.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version = env!("FOLIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug)]
pub struct ApiArgs {
    /// API base URL
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Token file location (defaults to the platform data directory)
    #[arg(long, env = TOKEN_PATH_ENV, global = true)]
    pub token_path: Option<PathBuf>,

    /// Seconds to wait for the stored session to be confirmed
    #[arg(long, env = VALIDATE_TIMEOUT_ENV, global = true)]
    pub validate_timeout: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login(login::LoginArgs),

    /// Create an account and sign in with it
    Register(register::RegisterArgs),

    /// Sign out and forget the stored token
    Logout,

    /// Display the signed-in user
    Whoami,

    /// Navigate to a view of the site
    Open(open::OpenArgs),

    /// Portfolio projects
    Projects(projects::ProjectsCommand),

    /// Blog posts and comments
    Blog(blog::BlogCommand),

    /// Send a message through the contact form
    Contact(contact::ContactArgs),
}
