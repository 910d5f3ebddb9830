//! Register command implementation.

use anyhow::Result;
use clap::Args;

use folio::RegistrationForm;
use folio::error::REGISTER_FAILED_MESSAGE;

use super::{connect, explain};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Password again; defaults to --password
    #[arg(long)]
    pub confirm_password: Option<String>,
}

pub async fn run(api: &ApiArgs, args: RegisterArgs) -> Result<()> {
    let confirm = args
        .confirm_password
        .unwrap_or_else(|| args.password.clone());
    let form = RegistrationForm::new(args.name, args.email, args.password, confirm);

    let session = connect(api).await?;

    output::status("Creating account...");

    let user = session
        .register(form)
        .await
        .map_err(explain(REGISTER_FAILED_MESSAGE))?;

    output::success("Account created");
    println!();
    output::field("Name", &user.name);
    output::optional_field("Email", user.email.as_deref());
    output::field("ID", &user.id.to_string());

    Ok(())
}
