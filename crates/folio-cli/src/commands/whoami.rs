//! Whoami command implementation.

use anyhow::{Context, Result};

use super::connect;
use crate::cli::ApiArgs;
use crate::output;

pub async fn run(api: &ApiArgs) -> Result<()> {
    let session = connect(api).await?;
    let user = session
        .user()
        .context("Not logged in. Run 'folio login' first.")?;

    output::field("Name", &user.name);
    output::optional_field("Email", user.email.as_deref());
    output::optional_field("Role", user.role.as_deref());
    output::field("ID", &user.id.to_string());
    output::field("API", &session.client().base().to_string());

    Ok(())
}
