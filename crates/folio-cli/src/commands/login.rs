//! Login command implementation.

use anyhow::Result;
use clap::Args;

use folio::Credentials;
use folio::error::LOGIN_FAILED_MESSAGE;
use folio::routes::destination_after_login;

use super::{connect, explain};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// The view that asked for a login, e.g. /admin
    #[arg(long)]
    pub from: Option<String>,
}

pub async fn run(api: &ApiArgs, args: LoginArgs) -> Result<()> {
    let session = connect(api).await?;

    output::status("Logging in...");

    let user = session
        .login(Credentials::new(args.email, args.password))
        .await
        .map_err(explain(LOGIN_FAILED_MESSAGE))?;

    output::success("Logged in successfully");
    println!();
    output::field("Name", &user.name);
    output::optional_field("Email", user.email.as_deref());
    output::field("Continue to", &destination_after_login(args.from.as_deref()));

    Ok(())
}
