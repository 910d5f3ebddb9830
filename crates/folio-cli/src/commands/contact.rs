//! Contact form command implementation.

use anyhow::Result;
use clap::Args;

use folio::ContentApi;
use folio::content::ContactMessage;

use super::{connect, explain};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Address to reply to
    #[arg(long)]
    pub email: String,

    /// Message text
    #[arg(long)]
    pub message: String,
}

pub async fn run(api: &ApiArgs, args: ContactArgs) -> Result<()> {
    let session = connect(api).await?;

    let message = ContactMessage {
        name: args.name,
        email: args.email,
        message: args.message,
    };

    ContentApi::new(&session)
        .send_message(&message)
        .await
        .map_err(explain("could not send message"))?;

    output::success("Message sent");

    Ok(())
}
