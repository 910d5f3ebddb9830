//! Logout command implementation.

use anyhow::Result;

use super::connect;
use crate::cli::ApiArgs;
use crate::output;

pub async fn run(api: &ApiArgs) -> Result<()> {
    let session = connect(api).await?;
    session.logout().await;

    output::success("Logged out");

    Ok(())
}
